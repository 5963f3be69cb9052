//! Display formatting helpers for alert rendering.

/// Placeholder for values the source did not report.
const MISSING: &str = "—";

/// Risk tier used for embed color and labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskTier {
    pub color: u32,
    pub emoji: &'static str,
    pub label: &'static str,
}

/// Tier for a 0–100 risk score: red from 80, amber from 60, green below.
pub fn risk_tier(score: f64) -> RiskTier {
    if score >= 80.0 {
        RiskTier { color: 0xe74c3c, emoji: "🔴", label: "High" }
    } else if score >= 60.0 {
        RiskTier { color: 0xf1c40f, emoji: "🟠", label: "Medium" }
    } else {
        RiskTier { color: 0x2ecc71, emoji: "🟢", label: "Low" }
    }
}

/// USD amount with B/M abbreviations above a million, grouped dollars below.
pub fn format_usd(value: Option<f64>) -> String {
    let Some(v) = finite(value) else {
        return MISSING.to_string();
    };
    if v >= 1_000_000_000.0 {
        format!("${:.2}B", v / 1_000_000_000.0)
    } else if v >= 1_000_000.0 {
        format!("${:.2}M", v / 1_000_000.0)
    } else {
        format!("${}", grouped(v, 2))
    }
}

/// Plain quantity: B/M abbreviations, grouped with trailing zeros trimmed,
/// three significant digits below 1.
pub fn format_number(value: Option<f64>) -> String {
    let Some(v) = finite(value) else {
        return MISSING.to_string();
    };
    if v >= 1_000_000_000.0 {
        format!("{:.2}B", v / 1_000_000_000.0)
    } else if v >= 1_000_000.0 {
        format!("{:.2}M", v / 1_000_000.0)
    } else if v >= 1.0 {
        trim_zeros(&grouped(v, 2))
    } else {
        significant(v, 3)
    }
}

pub fn format_percent(value: Option<f64>) -> String {
    match finite(value) {
        Some(v) => format!("{v:.2}%"),
        None => MISSING.to_string(),
    }
}

/// `0x1234…abcd`-style shortened address.
pub fn short_address(address: Option<&str>) -> String {
    match address {
        Some(addr) if addr.len() > 10 => {
            format!("{}…{}", &addr[..6], &addr[addr.len() - 4..])
        }
        Some(addr) if !addr.is_empty() => addr.to_string(),
        _ => MISSING.to_string(),
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Fixed-decimal rendering with thousands separators.
fn grouped(value: f64, decimals: usize) -> String {
    let rendered = format!("{value:.decimals$}");
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (rendered, None),
    };
    let negative = int_part.starts_with('-');
    let digits = int_part.trim_start_matches('-');

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(&frac);
    }
    out
}

fn trim_zeros(rendered: &str) -> String {
    if !rendered.contains('.') {
        return rendered.to_string();
    }
    rendered.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Sub-1 values rendered to `figures` significant digits.
fn significant(value: f64, figures: i32) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (figures - 1 - magnitude).max(0) as usize;
    format!("{value:.decimals$}")
}
