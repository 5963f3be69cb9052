//! Liquidity lock derivation from pair labels and flags.

use super::pair::TradingPair;

/// Lock status for a pair's pooled liquidity.
///
/// `locked: None` means the source reported nothing either way; callers must
/// never treat unknown as locked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiquidityLock {
    pub locked: Option<bool>,
    pub reason: String,
}

impl LiquidityLock {
    fn new(locked: Option<bool>, reason: &str) -> Self {
        Self {
            locked,
            reason: reason.to_string(),
        }
    }
}

/// Derive the lock status of a pair's liquidity.
///
/// Labels are compared lowercased, rules in strict priority order, the first
/// matching rule terminal: a "burn" label, then a "lock" label that is not an
/// "unlock" label, then an "unlock" label, then the explicit `isLocked` flag,
/// else unknown.
pub fn derive_liquidity_lock(pair: &TradingPair) -> LiquidityLock {
    let labels: Vec<String> = pair.labels.iter().map(|l| l.to_lowercase()).collect();

    if labels.iter().any(|l| l.contains("burn")) {
        return LiquidityLock::new(Some(true), "Liquidity burned (pair labels)");
    }
    if labels
        .iter()
        .any(|l| l.contains("lock") && !l.contains("unlock"))
    {
        return LiquidityLock::new(Some(true), "Lock label on pair");
    }
    if labels.iter().any(|l| l.contains("unlock")) {
        return LiquidityLock::new(Some(false), "Unlock label on pair");
    }
    if let Some(flag) = pair.liquidity.as_ref().and_then(|l| l.is_locked) {
        return LiquidityLock::new(Some(flag), "Explicit isLocked flag");
    }
    LiquidityLock::new(None, "Not reported by source")
}
