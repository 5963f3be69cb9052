//! Normalization of the risk API's loosely shaped response payload.
//!
//! The upstream payload shape is not contractually stable: score, honeypot
//! flag, simulation outcome, and taxes each show up under several known
//! locations depending on API version and chain. Normalization is total —
//! it produces a verdict for any JSON value whatsoever.

use serde_json::Value;

use crate::domain::{RiskVerdict, TokenTaxes};

/// Score assigned when nothing numeric is present but the summary flags a
/// honeypot.
const SCORE_FLAGGED: f64 = 100.0;

/// Score assigned when the payload carries no risk information at all.
const SCORE_UNKNOWN: f64 = 50.0;

/// Normalize a raw IsHoneypot payload into a canonical verdict.
pub fn normalize_verdict(payload: &Value) -> RiskVerdict {
    let risk_score = extract_risk_score(payload);
    let is_honeypot = extract_honeypot_flag(payload);

    let sim = first_object(payload, &["simulationResult", "result"]);
    let buy_failed = truthy(sim.and_then(|s| s.get("buyFailed")))
        || truthy(sim.and_then(|s| s.get("buyError")));
    let sell_failed = truthy(sim.and_then(|s| s.get("sellFailed")))
        || truthy(sim.and_then(|s| s.get("sellError")));

    let taxes = extract_taxes(payload);
    let ok = !is_honeypot && !buy_failed && !sell_failed;

    let reason = if ok {
        None
    } else if is_honeypot {
        Some("honeypot detected".to_string())
    } else if buy_failed {
        Some("buy simulation failed".to_string())
    } else {
        Some("sell simulation failed".to_string())
    };

    RiskVerdict {
        supported: true,
        ok,
        is_honeypot,
        risk_score,
        taxes,
        buy_failed,
        sell_failed,
        reason,
    }
}

/// First numeric value among the known score locations; otherwise 100 when
/// the summary flags a honeypot, else 50.
fn extract_risk_score(payload: &Value) -> f64 {
    let paths: [&[&str]; 4] = [
        &["riskLevel"],
        &["riskScore"],
        &["summary", "riskLevel"],
        &["simulationResult", "riskLevel"],
    ];
    let score = paths
        .iter()
        .find_map(|path| number_at(payload, path))
        .unwrap_or_else(|| {
            if bool_at(payload, &["summary", "isHoneypot"]) == Some(true) {
                SCORE_FLAGGED
            } else {
                SCORE_UNKNOWN
            }
        });
    score.clamp(0.0, 100.0)
}

/// First boolean among the known honeypot-flag locations; false only when
/// every lookup is absent.
fn extract_honeypot_flag(payload: &Value) -> bool {
    let paths: [&[&str]; 4] = [
        &["summary", "isHoneypot"],
        &["isHoneypot"],
        &["result", "isHoneypot"],
        &["simulationResult", "isHoneypot"],
    ];
    paths
        .iter()
        .find_map(|path| bool_at(payload, path))
        .unwrap_or(false)
}

fn extract_taxes(payload: &Value) -> TokenTaxes {
    let sim = first_object(payload, &["simulationResult", "honeypotResult"]);
    // A nested `taxes` object takes precedence; otherwise the simulation
    // object carries the fields directly.
    let tax_source = sim.and_then(|s| s.get("taxes")).filter(|t| t.is_object());

    let side = |tax_keys: [&str; 2], fee_key: &str, summary_key: &str| -> f64 {
        tax_source
            .and_then(|t| tax_keys.iter().find_map(|k| t.get(k).and_then(value_number)))
            .or_else(|| match tax_source {
                Some(_) => None,
                None => sim.and_then(|s| tax_keys.iter().find_map(|k| s.get(k).and_then(value_number))),
            })
            .or_else(|| sim.and_then(|s| s.get(fee_key)).and_then(value_number))
            .or_else(|| number_at(payload, &["summary", summary_key]))
            .unwrap_or(0.0)
    };

    TokenTaxes {
        buy: side(["buyTax", "buy"], "buyFee", "buyTax"),
        sell: side(["sellTax", "sell"], "sellFee", "sellTax"),
    }
}

fn first_object<'a>(payload: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .find_map(|key| payload.get(key).filter(|v| v.is_object()))
}

fn number_at(payload: &Value, path: &[&str]) -> Option<f64> {
    let mut current = payload;
    for part in path {
        current = current.get(part)?;
    }
    value_number(current)
}

fn bool_at(payload: &Value, path: &[&str]) -> Option<bool> {
    let mut current = payload;
    for part in path {
        current = current.get(part)?;
    }
    current.as_bool()
}

/// JSON number or numeric string.
fn value_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// An explicit failure/error marker: boolean true, non-empty string, or
/// nonzero number.
fn truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
        _ => false,
    }
}
