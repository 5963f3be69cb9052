//! Alert embed rendering.
//!
//! Builds the webhook JSON body for one new-token alert: a single rich
//! embed whose color tracks the risk tier, plus an optional role mention
//! in the message content.

use chrono::Utc;
use serde_json::{json, Map, Value};

use crate::ports::NewTokenAlert;
use super::format::{format_number, format_percent, format_usd, risk_tier, short_address};

/// Build the full webhook payload (`content` + `embeds`) for an alert.
pub fn build_alert_payload(alert: &NewTokenAlert, mention_role_id: Option<&str>) -> Value {
    let pair = &alert.pair;
    let verdict = &alert.verdict;
    let tier = risk_tier(verdict.risk_score);
    let base = pair.base_symbol();
    let quote = pair.quote_symbol();

    let mut description_parts = vec![
        format!("{} Risk: {} (score {:.0})", tier.emoji, tier.label, verdict.risk_score),
        if verdict.is_honeypot {
            "⚠️ Honeypot detected".to_string()
        } else {
            "✅ Honeypot check OK".to_string()
        },
    ];
    if let Some(reason) = &verdict.reason {
        description_parts.push(format!("Note: {reason}"));
    }

    let pair_link = match pair.url.as_deref() {
        Some(url) => format!("[{base}/{quote}]({url})"),
        None => format!("{base}/{quote}"),
    };
    let lock_status = match alert.lock.locked {
        None => "🔒 ?",
        Some(true) => "🔒 Locked",
        Some(false) => "🔓 Unlocked",
    };
    let liquidity = pair.liquidity.as_ref();
    let m5 = pair.txns.as_ref().and_then(|t| t.m5.as_ref());

    let token_name = alert
        .candidate
        .name
        .as_deref()
        .or_else(|| pair.base_token.as_ref().and_then(|t| t.name.as_deref()))
        .unwrap_or(base);
    let token_address = alert
        .candidate
        .token_address
        .as_deref()
        .or_else(|| pair.base_token.as_ref().and_then(|t| t.address.as_deref()));

    let fields = json!([
        {
            "name": "Pair",
            "value": format!(
                "{pair_link} • {} • {}",
                pair.dex_id.as_deref().unwrap_or("?"),
                pair.chain_id.as_deref().unwrap_or("?")
            )
        },
        {
            "name": "Price",
            "value": format!(
                "{} ({} native)",
                format_usd(pair.price_usd),
                format_number(pair.price_native)
            )
        },
        {
            "name": "Liquidity",
            "value": format!(
                "{} ({} {base} / {} {quote}) • {lock_status}",
                format_usd(liquidity.and_then(|l| l.usd)),
                format_number(liquidity.and_then(|l| l.base)),
                format_number(liquidity.and_then(|l| l.quote))
            )
        },
        {
            "name": "Volume 24h",
            "value": format_usd(pair.volume.as_ref().and_then(|v| v.h24))
        },
        {
            "name": "FDV",
            "value": format_usd(pair.fdv)
        },
        {
            "name": "Txns (5m)",
            "value": format!(
                "🟢 {:.0} / 🔴 {:.0}",
                m5.and_then(|w| w.buys).unwrap_or(0.0),
                m5.and_then(|w| w.sells).unwrap_or(0.0)
            )
        },
        {
            "name": "Taxes (risk API)",
            "value": format!(
                "Buy {} {} • Sell {} {}",
                format_percent(Some(verdict.taxes.buy)),
                if verdict.buy_failed { "❌" } else { "✅" },
                format_percent(Some(verdict.taxes.sell)),
                if verdict.sell_failed { "❌" } else { "✅" }
            )
        },
        {
            "name": "Token",
            "value": format!("{token_name} ({base})\n{}", short_address(token_address))
        }
    ]);

    let mut embed = Map::new();
    embed.insert("title".into(), json!(format!("{token_name} | {base}/{quote}")));
    if let Some(url) = &pair.url {
        embed.insert("url".into(), json!(url));
    }
    embed.insert("color".into(), json!(tier.color));
    embed.insert("description".into(), json!(description_parts.join(" • ")));
    if let Some(image) = &alert.candidate.image_url {
        embed.insert("thumbnail".into(), json!({ "url": image }));
    }
    embed.insert("fields".into(), fields);
    embed.insert(
        "footer".into(),
        json!({ "text": "Screened via honeypot.is + DexScreener" }),
    );
    embed.insert("timestamp".into(), json!(Utc::now().to_rfc3339()));

    let mut payload = Map::new();
    if let Some(role) = mention_role_id {
        payload.insert("content".into(), json!(format!("<@&{role}> New token detected")));
    }
    payload.insert("embeds".into(), json!([Value::Object(embed)]));
    Value::Object(payload)
}
