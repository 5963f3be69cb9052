//! Ports Layer - Trait definitions for external dependencies
//!
//! Following hexagonal architecture, these traits abstract:
//! - Market data (candidate feeds, pairs per token)
//! - Risk assessment (honeypot/scam screening)
//! - Notification delivery (chat channel)
//!
//! The pipeline is generic over these traits; `mocks` provides recording
//! implementations for tests.

pub mod mocks;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{LiquidityLock, RiskVerdict, TokenCandidate, TradingPair};

/// Errors from the market data gateway.
///
/// Only hard failures surface here: a non-success HTTP status or a transport
/// breakdown. Malformed bodies degrade to empty results inside the gateway
/// and are never raised to the caller.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{endpoint} returned HTTP {status}")]
    Http { endpoint: String, status: u16 },

    #[error("transport failure: {0}")]
    Transport(String),
}

/// Errors from notification delivery.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("webhook returned HTTP {0}")]
    Http(u16),

    #[error("webhook transport failure: {0}")]
    Transport(String),
}

/// Which candidate feed(s) a poll cycle consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceMode {
    /// Primary profiles feed only.
    ProfilesOnly,
    /// Secondary boosts feed only.
    BoostsOnly,
    /// Primary feed, falling back to boosts when it returns nothing.
    ProfilesThenBoosts,
}

/// One cycle's worth of candidates, plus primary-feed statistics so the
/// pipeline can track consecutive empty cycles.
#[derive(Debug, Clone, Default)]
pub struct CandidateBatch {
    pub candidates: Vec<TokenCandidate>,
    /// Whether the primary profiles feed was consulted this cycle.
    pub primary_checked: bool,
    /// How many items the primary feed returned (0 when not consulted).
    pub primary_count: usize,
}

/// Market data port: candidate discovery and per-token pairs.
#[async_trait]
pub trait MarketDataPort: Send + Sync {
    /// Fetch the cycle's candidates according to the source mode, applying
    /// the primary-empty fallback for `ProfilesThenBoosts`.
    async fn fetch_candidates(
        &self,
        mode: SourceMode,
        limit: usize,
    ) -> Result<CandidateBatch, GatewayError>;

    /// Fetch trading pairs for a token, filtered to the given chain
    /// (case-insensitive) when one is supplied.
    async fn pairs_for_token(
        &self,
        chain: Option<&str>,
        token_address: &str,
    ) -> Result<Vec<TradingPair>, GatewayError>;
}

/// Risk assessment port.
///
/// Infallible by contract: transport and upstream failures come back as
/// fail-closed verdicts, unsupported chains as `supported: false`.
#[async_trait]
pub trait RiskPort: Send + Sync {
    async fn assess(
        &self,
        chain: &str,
        token_address: &str,
        pair_address: Option<&str>,
    ) -> RiskVerdict;
}

/// Everything the notifier needs to render one new-token alert.
#[derive(Debug, Clone)]
pub struct NewTokenAlert {
    pub token_id: String,
    pub candidate: TokenCandidate,
    pub pair: TradingPair,
    pub verdict: RiskVerdict,
    pub lock: LiquidityLock,
}

/// Notification port: startup announcement and per-token alerts.
#[async_trait]
pub trait NotifierPort: Send + Sync {
    /// Announce that the bot is online and which chains it watches.
    ///
    /// A failure here at startup is fatal to the process; it proves the
    /// channel is unreachable before the first poll cycle runs.
    async fn announce_startup(&self, watched_chains: &[String]) -> Result<(), NotifyError>;

    /// Deliver one new-token alert. Failures are logged by the pipeline and
    /// never undo the dedup ledger entry.
    async fn deliver(&self, alert: &NewTokenAlert) -> Result<(), NotifyError>;
}
