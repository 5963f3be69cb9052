//! Discovery Pipeline
//!
//! Orchestrates one poll cycle: candidate acquisition with source fallback,
//! the per-candidate filter chain, and dispatch to the notifier. All
//! process-wide mutable state lives in `PollContext`, owned by the scheduler
//! loop and passed explicitly so multiple pipeline instances can be tested
//! in isolation.

use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::domain::{
    derive_liquidity_lock, select_best_pairs, DedupLedger, TokenCandidate,
    DEFAULT_DEDUP_CAPACITY,
};
use crate::ports::{GatewayError, MarketDataPort, NewTokenAlert, NotifierPort, RiskPort, SourceMode};

/// Warn about an empty feed only every Nth consecutive empty cycle.
pub const EMPTY_WARN_EVERY: u32 = 10;

/// Pipeline tuning knobs, resolved once at configuration time.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Lowercase chain identifiers the pipeline reports on.
    pub watched_chains: Vec<String>,
    pub poll_interval: Duration,
    /// Maximum candidates taken from a feed per cycle.
    pub candidate_limit: usize,
    /// How many ranked pairs to keep per token; the first is the primary.
    pub max_pairs_per_token: usize,
    /// Candidates scoring at or above this are dropped.
    pub risk_score_threshold: f64,
    pub source_mode: SourceMode,
    pub dedup_capacity: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            watched_chains: [
                "ethereum", "bsc", "polygon", "arbitrum", "base", "optimism", "avalanche",
                "fantom",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            poll_interval: Duration::from_secs(45),
            candidate_limit: 40,
            max_pairs_per_token: 3,
            risk_score_threshold: 60.0,
            source_mode: SourceMode::ProfilesThenBoosts,
            dedup_capacity: DEFAULT_DEDUP_CAPACITY,
        }
    }
}

/// Mutable per-process pipeline state.
///
/// Touched only from the single orchestrator context; the `is_polling`
/// non-reentrancy guard is the only synchronization it needs.
#[derive(Debug)]
pub struct PollContext {
    pub ledger: DedupLedger,
    /// Consecutive cycles where the primary feed returned zero candidates.
    pub empty_profiles_streak: u32,
    /// Mutual-exclusion flag preventing overlapping cycles.
    pub is_polling: bool,
}

impl PollContext {
    pub fn new(dedup_capacity: usize) -> Self {
        Self {
            ledger: DedupLedger::new(dedup_capacity),
            empty_profiles_streak: 0,
            is_polling: false,
        }
    }
}

/// What one poll invocation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A cycle was already in progress; nothing ran.
    Skipped,
    Completed { processed: usize, notified: usize },
}

/// The discovery orchestrator, generic over its three port seams.
pub struct DiscoveryPipeline<M, R, N> {
    market: M,
    risk: R,
    notifier: N,
    config: DiscoveryConfig,
}

impl<M, R, N> DiscoveryPipeline<M, R, N>
where
    M: MarketDataPort,
    R: RiskPort,
    N: NotifierPort,
{
    pub fn new(config: DiscoveryConfig, market: M, risk: R, notifier: N) -> Self {
        let mut config = config;
        for chain in &mut config.watched_chains {
            *chain = chain.to_lowercase();
        }
        Self {
            market,
            risk,
            notifier,
            config,
        }
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    pub fn market(&self) -> &M {
        &self.market
    }

    pub fn risk(&self) -> &R {
        &self.risk
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Drive poll cycles on a fixed timer until the task is dropped.
    ///
    /// The first cycle runs immediately. Cycles are strictly sequential; a
    /// tick that fires while one is in flight is skipped, not queued.
    pub async fn run(&self, ctx: &mut PollContext) {
        let mut interval = tokio::time::interval(self.config.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            self.poll(ctx).await;
        }
    }

    /// Execute one poll cycle, unless one is already in progress.
    ///
    /// Never fails: cycle-level errors are logged here and `is_polling` is
    /// cleared on every path.
    pub async fn poll(&self, ctx: &mut PollContext) -> CycleOutcome {
        if ctx.is_polling {
            tracing::debug!("poll tick skipped, cycle already in progress");
            return CycleOutcome::Skipped;
        }
        ctx.is_polling = true;
        let outcome = match self.run_cycle(ctx).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(%err, "poll cycle failed");
                CycleOutcome::Completed {
                    processed: 0,
                    notified: 0,
                }
            }
        };
        ctx.is_polling = false;
        outcome
    }

    async fn run_cycle(&self, ctx: &mut PollContext) -> Result<CycleOutcome, GatewayError> {
        tracing::debug!(mode = ?self.config.source_mode, "polling candidate feeds");
        let batch = self
            .market
            .fetch_candidates(self.config.source_mode, self.config.candidate_limit)
            .await?;

        if batch.primary_checked {
            if batch.primary_count == 0 {
                ctx.empty_profiles_streak += 1;
            } else {
                ctx.empty_profiles_streak = 0;
            }
        }

        let mut candidates = batch.candidates;
        if candidates.is_empty() {
            if ctx.empty_profiles_streak % EMPTY_WARN_EVERY == 0 {
                tracing::warn!(
                    streak = ctx.empty_profiles_streak,
                    mode = ?self.config.source_mode,
                    "candidate feeds returned nothing"
                );
            }
            return Ok(CycleOutcome::Completed {
                processed: 0,
                notified: 0,
            });
        }

        // Feeds are newest-first; process oldest-first so that when the
        // source window shifts between polls, dedup suppression catches the
        // least-recently-seen items first.
        candidates.reverse();

        let processed = candidates.len();
        let mut notified = 0;
        for candidate in &candidates {
            match self.evaluate(ctx, candidate).await {
                Ok(true) => notified += 1,
                Ok(false) => {}
                Err(err) => {
                    tracing::error!(token_id = %candidate.token_id(), %err, "candidate evaluation failed");
                }
            }
        }
        Ok(CycleOutcome::Completed {
            processed,
            notified,
        })
    }

    /// Run one candidate through the filter chain.
    ///
    /// Returns whether a notification went out. The chain is strictly
    /// ordered and stops at the first failing predicate.
    async fn evaluate(
        &self,
        ctx: &mut PollContext,
        candidate: &TokenCandidate,
    ) -> Result<bool, GatewayError> {
        let token_id = candidate.token_id();
        let chain = candidate.chain.to_lowercase();

        if !self.config.watched_chains.contains(&chain) {
            // Remember anyway so unwatched tokens are not re-checked every
            // cycle while they sit in the feed window.
            ctx.ledger.remember(&token_id);
            tracing::info!(%token_id, %chain, reason = "chain_not_watched", "candidate dropped");
            return Ok(false);
        }

        if ctx.ledger.seen(&token_id) {
            return Ok(false);
        }

        let Some(token_address) = candidate.token_address.as_deref() else {
            tracing::info!(%token_id, reason = "no_token_address", "candidate dropped");
            return Ok(false);
        };

        ctx.ledger.remember(&token_id);

        let pairs = self
            .market
            .pairs_for_token(Some(&chain), token_address)
            .await?;
        tracing::debug!(%token_id, pairs = pairs.len(), "pairs fetched");
        if pairs.is_empty() {
            tracing::info!(%token_id, reason = "no_pairs", "candidate dropped");
            return Ok(false);
        }

        let best = select_best_pairs(&pairs, self.config.max_pairs_per_token);
        let Some(primary) = best.into_iter().next() else {
            tracing::info!(%token_id, reason = "no_primary_pair", "candidate dropped");
            return Ok(false);
        };

        let verdict = self
            .risk
            .assess(&chain, token_address, primary.pair_address.as_deref())
            .await;
        if !verdict.supported {
            tracing::info!(%token_id, %chain, reason = "risk_chain_unsupported", "candidate dropped");
            return Ok(false);
        }
        if !verdict.ok || verdict.risk_score >= self.config.risk_score_threshold {
            tracing::info!(
                %token_id,
                risk_score = verdict.risk_score,
                is_honeypot = verdict.is_honeypot,
                reason = verdict.reason.as_deref().unwrap_or("risk score at threshold"),
                "candidate dropped"
            );
            return Ok(false);
        }

        let lock = derive_liquidity_lock(&primary);
        let alert = NewTokenAlert {
            token_id: token_id.clone(),
            candidate: candidate.clone(),
            pair: primary,
            verdict,
            lock,
        };

        if let Err(err) = self.notifier.deliver(&alert).await {
            // The token stays remembered: a delivery hiccup must not cause
            // duplicate alerts on the next cycle.
            tracing::warn!(%token_id, %err, "notification delivery failed");
            return Ok(false);
        }

        tracing::info!(
            %token_id,
            price_usd = ?alert.pair.price_usd,
            liquidity_usd = alert.pair.liquidity_usd(),
            risk_score = alert.verdict.risk_score,
            "new token reported"
        );
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mocks::{MockMarketData, MockNotifier, MockRisk};
    use crate::ports::CandidateBatch;

    fn pipeline(
        market: MockMarketData,
        risk: MockRisk,
        notifier: MockNotifier,
    ) -> DiscoveryPipeline<MockMarketData, MockRisk, MockNotifier> {
        DiscoveryPipeline::new(DiscoveryConfig::default(), market, risk, notifier)
    }

    #[tokio::test]
    async fn poll_skips_when_already_in_progress() {
        let p = pipeline(MockMarketData::new(), MockRisk::new(), MockNotifier::new());
        let mut ctx = PollContext::new(10);
        ctx.is_polling = true;

        assert_eq!(p.poll(&mut ctx).await, CycleOutcome::Skipped);
        assert_eq!(p.market().fetch_count(), 0);
    }

    #[tokio::test]
    async fn is_polling_clears_after_cycle() {
        let p = pipeline(MockMarketData::new(), MockRisk::new(), MockNotifier::new());
        let mut ctx = PollContext::new(10);
        p.poll(&mut ctx).await;
        assert!(!ctx.is_polling);
    }

    #[tokio::test]
    async fn empty_primary_feed_grows_streak() {
        let p = pipeline(MockMarketData::new(), MockRisk::new(), MockNotifier::new());
        let mut ctx = PollContext::new(10);

        p.poll(&mut ctx).await;
        p.poll(&mut ctx).await;
        assert_eq!(ctx.empty_profiles_streak, 2);
    }

    #[tokio::test]
    async fn non_empty_primary_feed_resets_streak() {
        let market = MockMarketData::new().with_batch(CandidateBatch {
            candidates: vec![TokenCandidate::new("bsc", "0xabc")],
            primary_checked: true,
            primary_count: 1,
        });
        let p = pipeline(market, MockRisk::new(), MockNotifier::new());
        let mut ctx = PollContext::new(10);
        ctx.empty_profiles_streak = 7;

        p.poll(&mut ctx).await;
        assert_eq!(ctx.empty_profiles_streak, 0);
    }

    #[tokio::test]
    async fn watched_chains_are_lowercased_at_construction() {
        let config = DiscoveryConfig {
            watched_chains: vec!["BSC".to_string()],
            ..DiscoveryConfig::default()
        };
        let p = DiscoveryPipeline::new(
            config,
            MockMarketData::new(),
            MockRisk::new(),
            MockNotifier::new(),
        );
        assert_eq!(p.config().watched_chains, vec!["bsc".to_string()]);
    }
}
