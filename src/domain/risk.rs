//! Canonical risk verdicts produced by the risk assessment gateway.

/// Buy/sell tax percentages reported by the risk API.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TokenTaxes {
    pub buy: f64,
    pub sell: f64,
}

/// Canonical outcome of a risk assessment.
///
/// The verdict is fail-closed: whenever the upstream call fails or the
/// payload is too ambiguous to score, `risk_score` lands on the worst case
/// (100) rather than the best.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskVerdict {
    /// Whether the risk API covers the token's chain at all.
    pub supported: bool,
    /// Passes: no detected honeypot and both buy/sell simulate cleanly.
    pub ok: bool,
    pub is_honeypot: bool,
    /// 0–100, higher is worse.
    pub risk_score: f64,
    pub taxes: TokenTaxes,
    pub buy_failed: bool,
    pub sell_failed: bool,
    /// Human-readable cause when `ok` is false or the chain is unsupported.
    pub reason: Option<String>,
}

impl RiskVerdict {
    /// Verdict for a chain the risk API does not cover. No lookup was made.
    pub fn unsupported(reason: impl Into<String>) -> Self {
        Self {
            supported: false,
            ok: false,
            is_honeypot: false,
            risk_score: 100.0,
            taxes: TokenTaxes::default(),
            buy_failed: false,
            sell_failed: false,
            reason: Some(reason.into()),
        }
    }

    /// Worst-case verdict for a failed or unreadable lookup.
    pub fn fail_closed(reason: impl Into<String>) -> Self {
        Self {
            supported: true,
            ok: false,
            is_honeypot: true,
            risk_score: 100.0,
            taxes: TokenTaxes::default(),
            buy_failed: false,
            sell_failed: false,
            reason: Some(reason.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_verdict_never_passes() {
        let verdict = RiskVerdict::unsupported("chain not covered");
        assert!(!verdict.supported);
        assert!(!verdict.ok);
        assert_eq!(verdict.risk_score, 100.0);
    }

    #[test]
    fn fail_closed_is_worst_case() {
        let verdict = RiskVerdict::fail_closed("HTTP 503");
        assert!(verdict.supported);
        assert!(!verdict.ok);
        assert!(verdict.is_honeypot);
        assert_eq!(verdict.risk_score, 100.0);
        assert_eq!(verdict.reason.as_deref(), Some("HTTP 503"));
    }
}
