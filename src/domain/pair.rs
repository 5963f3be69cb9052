//! Trading pair snapshots and best-pair selection.
//!
//! Pairs are read-only snapshots deserialized from the aggregator. Every
//! numeric field is optional and may arrive as a JSON number or a numeric
//! string; accessors coerce anything missing or non-numeric to 0 so the
//! ranking cascade stays total.

use std::cmp::Ordering;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One side of a trading pair (base or quote token).
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PairToken {
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
}

/// Pooled liquidity for a pair.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PairLiquidity {
    #[serde(deserialize_with = "flexible_number")]
    pub usd: Option<f64>,
    #[serde(deserialize_with = "flexible_number")]
    pub base: Option<f64>,
    #[serde(deserialize_with = "flexible_number")]
    pub quote: Option<f64>,
    pub is_locked: Option<bool>,
}

/// Rolling volume windows. Only the 24h window participates in ranking.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PairVolume {
    #[serde(deserialize_with = "flexible_number")]
    pub h24: Option<f64>,
}

/// Buy/sell transaction counts for one window.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TxnWindow {
    #[serde(deserialize_with = "flexible_number")]
    pub buys: Option<f64>,
    #[serde(deserialize_with = "flexible_number")]
    pub sells: Option<f64>,
}

/// Transaction counters keyed by window.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PairTxns {
    pub m5: Option<TxnWindow>,
}

/// One venue/pool for a token against a counter-asset.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TradingPair {
    pub dex_id: Option<String>,
    pub chain_id: Option<String>,
    pub pair_address: Option<String>,
    pub url: Option<String>,
    pub base_token: Option<PairToken>,
    pub quote_token: Option<PairToken>,
    #[serde(deserialize_with = "flexible_number")]
    pub price_usd: Option<f64>,
    #[serde(deserialize_with = "flexible_number")]
    pub price_native: Option<f64>,
    pub liquidity: Option<PairLiquidity>,
    pub volume: Option<PairVolume>,
    #[serde(deserialize_with = "flexible_number")]
    pub fdv: Option<f64>,
    pub txns: Option<PairTxns>,
    pub labels: Vec<String>,
}

impl TradingPair {
    pub fn liquidity_usd(&self) -> f64 {
        coerce(self.liquidity.as_ref().and_then(|l| l.usd))
    }

    pub fn volume_h24(&self) -> f64 {
        coerce(self.volume.as_ref().and_then(|v| v.h24))
    }

    /// Combined 5-minute buy + sell transaction count.
    pub fn txns_m5_total(&self) -> f64 {
        let window = self.txns.as_ref().and_then(|t| t.m5.as_ref());
        match window {
            Some(w) => coerce(w.buys) + coerce(w.sells),
            None => 0.0,
        }
    }

    pub fn base_symbol(&self) -> &str {
        self.base_token
            .as_ref()
            .and_then(|t| t.symbol.as_deref())
            .unwrap_or("BASE")
    }

    pub fn quote_symbol(&self) -> &str {
        self.quote_token
            .as_ref()
            .and_then(|t| t.symbol.as_deref())
            .unwrap_or("QUOTE")
    }
}

fn coerce(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Accept a JSON number, a numeric string, or null.
fn flexible_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_f64))
}

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Rank pairs and keep the top `take`.
///
/// Three-level cascade, each level strictly numeric and consulted only when
/// the previous level ties exactly: liquidity USD desc, 24h volume desc,
/// 5-minute buy+sell count desc. The sort is stable, so fully tied pairs
/// keep their original relative order.
pub fn select_best_pairs(pairs: &[TradingPair], take: usize) -> Vec<TradingPair> {
    let mut sorted = pairs.to_vec();
    sorted.sort_by(|a, b| {
        let by_liquidity = b.liquidity_usd().total_cmp(&a.liquidity_usd());
        if by_liquidity != Ordering::Equal {
            return by_liquidity;
        }
        let by_volume = b.volume_h24().total_cmp(&a.volume_h24());
        if by_volume != Ordering::Equal {
            return by_volume;
        }
        b.txns_m5_total().total_cmp(&a.txns_m5_total())
    });
    sorted.truncate(take);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pair(liquidity: f64, volume: f64, buys: f64, sells: f64, address: &str) -> TradingPair {
        serde_json::from_value(json!({
            "pairAddress": address,
            "liquidity": { "usd": liquidity },
            "volume": { "h24": volume },
            "txns": { "m5": { "buys": buys, "sells": sells } }
        }))
        .unwrap()
    }

    fn addresses(pairs: &[TradingPair]) -> Vec<&str> {
        pairs
            .iter()
            .map(|p| p.pair_address.as_deref().unwrap())
            .collect()
    }

    #[test]
    fn ranks_by_liquidity_first() {
        let pairs = vec![
            pair(50_000.0, 900_000.0, 99.0, 99.0, "low-liq"),
            pair(120_000.0, 10.0, 0.0, 0.0, "high-liq"),
        ];
        let best = select_best_pairs(&pairs, 2);
        assert_eq!(addresses(&best), vec!["high-liq", "low-liq"]);
    }

    #[test]
    fn volume_breaks_liquidity_ties() {
        let pairs = vec![
            pair(100.0, 5_000.0, 0.0, 0.0, "lower-vol"),
            pair(100.0, 9_000.0, 0.0, 0.0, "higher-vol"),
        ];
        let best = select_best_pairs(&pairs, 2);
        assert_eq!(addresses(&best), vec!["higher-vol", "lower-vol"]);
    }

    #[test]
    fn txn_count_breaks_volume_ties() {
        let pairs = vec![
            pair(100.0, 5_000.0, 1.0, 2.0, "quiet"),
            pair(100.0, 5_000.0, 12.0, 8.0, "busy"),
        ];
        let best = select_best_pairs(&pairs, 2);
        assert_eq!(addresses(&best), vec!["busy", "quiet"]);
    }

    #[test]
    fn fully_tied_pairs_keep_input_order() {
        let pairs = vec![
            pair(100.0, 100.0, 1.0, 1.0, "first"),
            pair(100.0, 100.0, 1.0, 1.0, "second"),
            pair(100.0, 100.0, 1.0, 1.0, "third"),
        ];
        let best = select_best_pairs(&pairs, 3);
        assert_eq!(addresses(&best), vec!["first", "second", "third"]);
    }

    #[test]
    fn missing_metrics_rank_last() {
        let bare: TradingPair = serde_json::from_value(json!({ "pairAddress": "bare" })).unwrap();
        let pairs = vec![bare, pair(1.0, 0.0, 0.0, 0.0, "tiny")];
        let best = select_best_pairs(&pairs, 2);
        assert_eq!(addresses(&best), vec!["tiny", "bare"]);
    }

    #[test]
    fn take_zero_and_empty_input_yield_empty() {
        assert!(select_best_pairs(&[], 3).is_empty());
        let pairs = vec![pair(1.0, 1.0, 1.0, 1.0, "only")];
        assert!(select_best_pairs(&pairs, 0).is_empty());
    }

    #[test]
    fn truncates_to_take() {
        let pairs = vec![
            pair(3.0, 0.0, 0.0, 0.0, "a"),
            pair(2.0, 0.0, 0.0, 0.0, "b"),
            pair(1.0, 0.0, 0.0, 0.0, "c"),
        ];
        assert_eq!(select_best_pairs(&pairs, 2).len(), 2);
    }

    #[test]
    fn deserializes_stringly_typed_numbers() {
        let pair: TradingPair = serde_json::from_value(json!({
            "priceUsd": "0.0123",
            "liquidity": { "usd": "120000" }
        }))
        .unwrap();
        assert_eq!(pair.price_usd, Some(0.0123));
        assert_eq!(pair.liquidity_usd(), 120_000.0);
    }

    #[test]
    fn junk_numeric_fields_coerce_to_zero() {
        let pair: TradingPair = serde_json::from_value(json!({
            "liquidity": { "usd": "not a number" },
            "volume": { "h24": null }
        }))
        .unwrap();
        assert_eq!(pair.liquidity_usd(), 0.0);
        assert_eq!(pair.volume_h24(), 0.0);
    }
}
