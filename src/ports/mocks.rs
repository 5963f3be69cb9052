//! Recording mock implementations of the port traits.
//!
//! Used by the pipeline integration tests: responses are scripted up front
//! with builder methods, and every call is recorded so tests can assert on
//! exactly which gateway traffic a cycle produced.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::{RiskVerdict, TokenTaxes, TradingPair};
use super::{
    CandidateBatch, GatewayError, MarketDataPort, NewTokenAlert, NotifierPort, NotifyError,
    RiskPort, SourceMode,
};

/// A passing verdict with the given score, for scripting mock responses.
pub fn passing_verdict(risk_score: f64) -> RiskVerdict {
    RiskVerdict {
        supported: true,
        ok: true,
        is_honeypot: false,
        risk_score,
        taxes: TokenTaxes { buy: 0.0, sell: 0.0 },
        buy_failed: false,
        sell_failed: false,
        reason: None,
    }
}

/// Mock market data port with scripted batches and per-address pairs.
#[derive(Debug, Default)]
pub struct MockMarketData {
    batches: Mutex<VecDeque<CandidateBatch>>,
    pairs: Mutex<HashMap<String, Vec<TradingPair>>>,
    failing_pairs: Mutex<HashSet<String>>,
    fetch_calls: Arc<Mutex<usize>>,
    pair_requests: Arc<Mutex<Vec<String>>>,
}

impl MockMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one cycle's candidate batch. Cycles beyond the queue see an
    /// empty primary feed.
    pub fn with_batch(self, batch: CandidateBatch) -> Self {
        self.batches.lock().unwrap().push_back(batch);
        self
    }

    /// Script the pairs returned for a token address.
    pub fn with_pairs(self, token_address: &str, pairs: Vec<TradingPair>) -> Self {
        self.pairs
            .lock()
            .unwrap()
            .insert(token_address.to_string(), pairs);
        self
    }

    /// Make `pairs_for_token` fail for a token address.
    pub fn with_pairs_failure(self, token_address: &str) -> Self {
        self.failing_pairs
            .lock()
            .unwrap()
            .insert(token_address.to_string());
        self
    }

    /// Number of candidate fetches issued.
    pub fn fetch_count(&self) -> usize {
        *self.fetch_calls.lock().unwrap()
    }

    /// Token addresses whose pairs were requested, in call order.
    pub fn pair_requests(&self) -> Vec<String> {
        self.pair_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl MarketDataPort for MockMarketData {
    async fn fetch_candidates(
        &self,
        _mode: SourceMode,
        _limit: usize,
    ) -> Result<CandidateBatch, GatewayError> {
        *self.fetch_calls.lock().unwrap() += 1;
        Ok(self
            .batches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(CandidateBatch {
                candidates: Vec::new(),
                primary_checked: true,
                primary_count: 0,
            }))
    }

    async fn pairs_for_token(
        &self,
        _chain: Option<&str>,
        token_address: &str,
    ) -> Result<Vec<TradingPair>, GatewayError> {
        self.pair_requests
            .lock()
            .unwrap()
            .push(token_address.to_string());
        if self.failing_pairs.lock().unwrap().contains(token_address) {
            return Err(GatewayError::Transport("scripted failure".to_string()));
        }
        Ok(self
            .pairs
            .lock()
            .unwrap()
            .get(token_address)
            .cloned()
            .unwrap_or_default())
    }
}

/// Mock risk port with per-address verdicts and a configurable default.
#[derive(Debug)]
pub struct MockRisk {
    default_verdict: RiskVerdict,
    verdicts: Mutex<HashMap<String, RiskVerdict>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl Default for MockRisk {
    fn default() -> Self {
        Self {
            default_verdict: passing_verdict(0.0),
            verdicts: Mutex::new(HashMap::new()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl MockRisk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the verdict for a token address.
    pub fn with_verdict(self, token_address: &str, verdict: RiskVerdict) -> Self {
        self.verdicts
            .lock()
            .unwrap()
            .insert(token_address.to_string(), verdict);
        self
    }

    /// Replace the verdict returned for unscripted addresses.
    pub fn with_default_verdict(mut self, verdict: RiskVerdict) -> Self {
        self.default_verdict = verdict;
        self
    }

    /// Token addresses assessed, in call order.
    pub fn assess_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RiskPort for MockRisk {
    async fn assess(
        &self,
        _chain: &str,
        token_address: &str,
        _pair_address: Option<&str>,
    ) -> RiskVerdict {
        self.calls.lock().unwrap().push(token_address.to_string());
        self.verdicts
            .lock()
            .unwrap()
            .get(token_address)
            .cloned()
            .unwrap_or_else(|| self.default_verdict.clone())
    }
}

/// Mock notifier recording every delivered alert.
#[derive(Debug, Default)]
pub struct MockNotifier {
    delivered: Arc<Mutex<Vec<NewTokenAlert>>>,
    announcements: Arc<Mutex<Vec<Vec<String>>>>,
    fail_delivery: bool,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose deliveries always fail.
    pub fn failing() -> Self {
        Self {
            fail_delivery: true,
            ..Self::default()
        }
    }

    pub fn delivered(&self) -> Vec<NewTokenAlert> {
        self.delivered.lock().unwrap().clone()
    }

    pub fn announcements(&self) -> Vec<Vec<String>> {
        self.announcements.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotifierPort for MockNotifier {
    async fn announce_startup(&self, watched_chains: &[String]) -> Result<(), NotifyError> {
        self.announcements
            .lock()
            .unwrap()
            .push(watched_chains.to_vec());
        Ok(())
    }

    async fn deliver(&self, alert: &NewTokenAlert) -> Result<(), NotifyError> {
        if self.fail_delivery {
            return Err(NotifyError::Http(403));
        }
        self.delivered.lock().unwrap().push(alert.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TokenCandidate;

    #[tokio::test]
    async fn market_mock_scripts_batches_in_order() {
        let mock = MockMarketData::new().with_batch(CandidateBatch {
            candidates: vec![TokenCandidate::new("bsc", "0xabc")],
            primary_checked: true,
            primary_count: 1,
        });

        let first = mock
            .fetch_candidates(SourceMode::ProfilesOnly, 40)
            .await
            .unwrap();
        assert_eq!(first.candidates.len(), 1);

        let exhausted = mock
            .fetch_candidates(SourceMode::ProfilesOnly, 40)
            .await
            .unwrap();
        assert!(exhausted.candidates.is_empty());
        assert!(exhausted.primary_checked);
        assert_eq!(mock.fetch_count(), 2);
    }

    #[tokio::test]
    async fn risk_mock_records_calls() {
        let mock = MockRisk::new().with_verdict("0xabc", RiskVerdict::fail_closed("scripted"));
        let verdict = mock.assess("bsc", "0xabc", None).await;
        assert!(!verdict.ok);
        assert_eq!(mock.assess_calls(), vec!["0xabc".to_string()]);
    }

    #[tokio::test]
    async fn failing_notifier_errors_without_recording() {
        let mock = MockNotifier::failing();
        let alert = NewTokenAlert {
            token_id: "bsc:0xabc".to_string(),
            candidate: TokenCandidate::new("bsc", "0xabc"),
            pair: TradingPair::default(),
            verdict: passing_verdict(10.0),
            lock: crate::domain::LiquidityLock {
                locked: None,
                reason: "Not reported by source".to_string(),
            },
        };
        assert!(mock.deliver(&alert).await.is_err());
        assert!(mock.delivered().is_empty());
    }
}
