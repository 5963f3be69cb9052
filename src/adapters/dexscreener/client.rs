//! DexScreener API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;

use crate::domain::{candidate_from_value, TokenCandidate, TradingPair};
use crate::ports::{CandidateBatch, GatewayError, MarketDataPort, SourceMode};
use super::parse::extract_list;

const USER_AGENT: &str = concat!("tokenscout/", env!("CARGO_PKG_VERSION"));

/// DexScreener client configuration.
#[derive(Debug, Clone)]
pub struct DexScreenerConfig {
    /// Base URL for the DexScreener API.
    pub api_base: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for DexScreenerConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.dexscreener.com".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// DexScreener market data client.
#[derive(Debug, Clone)]
pub struct DexScreenerClient {
    config: DexScreenerConfig,
    http: Client,
}

impl DexScreenerClient {
    pub fn new(config: DexScreenerConfig) -> Result<Self, GatewayError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| GatewayError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    /// GET an endpoint and parse the body as JSON.
    ///
    /// A non-success status is a hard error. A body that fails to parse
    /// degrades to `Value::Null` (callers see an empty list) with a warning,
    /// keeping the poll loop alive through upstream hiccups.
    async fn get_json(&self, url: &str, endpoint: &str) -> Result<Value, GatewayError> {
        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Http {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        match serde_json::from_str(&body) {
            Ok(value) => Ok(value),
            Err(err) => {
                let sample: String = body.chars().take(200).collect();
                tracing::warn!(endpoint, %err, %sample, "unparseable response body");
                Ok(Value::Null)
            }
        }
    }

    /// Latest token profiles (primary candidate feed).
    pub async fn latest_profiles(&self, limit: usize) -> Result<Vec<TokenCandidate>, GatewayError> {
        let url = format!("{}/token-profiles/latest/v1", self.config.api_base);
        let value = self.get_json(&url, "token-profiles").await?;

        let mut candidates: Vec<TokenCandidate> = extract_list(&value, "profiles")
            .iter()
            .filter_map(candidate_from_value)
            .collect();
        candidates.truncate(limit);
        tracing::debug!(count = candidates.len(), "fetched token profiles");
        Ok(candidates)
    }

    /// Latest token boosts (secondary feed), mapped into the candidate
    /// shape. Items without a resolvable address are dropped.
    pub async fn latest_boosts(&self, limit: usize) -> Result<Vec<TokenCandidate>, GatewayError> {
        let url = format!("{}/token-boosts/latest/v1", self.config.api_base);
        let value = self.get_json(&url, "token-boosts").await?;

        let mut candidates: Vec<TokenCandidate> = extract_list(&value, "boosts")
            .iter()
            .filter_map(candidate_from_value)
            .filter(|c| c.token_address.is_some())
            .collect();
        candidates.truncate(limit);
        tracing::debug!(count = candidates.len(), "fetched token boosts");
        Ok(candidates)
    }
}

#[async_trait]
impl MarketDataPort for DexScreenerClient {
    async fn fetch_candidates(
        &self,
        mode: SourceMode,
        limit: usize,
    ) -> Result<CandidateBatch, GatewayError> {
        let mut candidates = Vec::new();
        let mut primary_checked = false;
        let mut primary_count = 0;

        if matches!(mode, SourceMode::ProfilesOnly | SourceMode::ProfilesThenBoosts) {
            candidates = self.latest_profiles(limit).await?;
            primary_checked = true;
            primary_count = candidates.len();
        }

        if candidates.is_empty()
            && matches!(mode, SourceMode::BoostsOnly | SourceMode::ProfilesThenBoosts)
        {
            candidates = self.latest_boosts(limit).await?;
        }

        Ok(CandidateBatch {
            candidates,
            primary_checked,
            primary_count,
        })
    }

    async fn pairs_for_token(
        &self,
        chain: Option<&str>,
        token_address: &str,
    ) -> Result<Vec<TradingPair>, GatewayError> {
        let mut url = format!("{}/latest/dex/tokens/{token_address}", self.config.api_base);
        if let Some(chain) = chain {
            url.push_str(&format!("?chainId={chain}"));
        }
        let value = self.get_json(&url, "token-pairs").await?;

        let pairs = extract_list(&value, "pairs")
            .into_iter()
            .filter_map(|item| serde_json::from_value::<TradingPair>(item).ok())
            .filter(|pair| match chain {
                Some(chain) => pair
                    .chain_id
                    .as_deref()
                    .map(|c| c.eq_ignore_ascii_case(chain))
                    .unwrap_or(false),
                None => true,
            })
            .collect();
        Ok(pairs)
    }
}
