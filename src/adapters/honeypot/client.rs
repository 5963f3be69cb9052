//! Honeypot.is API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;

use crate::domain::RiskVerdict;
use crate::ports::RiskPort;
use super::chains::chain_to_numeric_id;
use super::normalize::normalize_verdict;

/// Honeypot.is client configuration.
#[derive(Debug, Clone)]
pub struct HoneypotConfig {
    /// Base URL for the honeypot.is API.
    pub api_base: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for HoneypotConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.honeypot.is".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Honeypot.is risk assessment client.
///
/// Never returns an error: unsupported chains short-circuit to a
/// `supported: false` verdict without touching the network, and every
/// failure mode past that point collapses to a fail-closed verdict.
#[derive(Debug, Clone)]
pub struct HoneypotClient {
    config: HoneypotConfig,
    http: Client,
}

impl HoneypotClient {
    pub fn new(config: HoneypotConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, http })
    }
}

#[async_trait]
impl RiskPort for HoneypotClient {
    async fn assess(
        &self,
        chain: &str,
        token_address: &str,
        pair_address: Option<&str>,
    ) -> RiskVerdict {
        let Some(numeric_chain) = chain_to_numeric_id(chain) else {
            return RiskVerdict::unsupported(format!("chain {chain} not covered by risk API"));
        };

        let url = format!("{}/v2/IsHoneypot", self.config.api_base);
        let mut query: Vec<(&str, String)> = vec![
            ("address", token_address.to_string()),
            ("chainID", numeric_chain.to_string()),
        ];
        if let Some(pair) = pair_address {
            query.push(("pair", pair.to_string()));
        }

        let response = match self
            .http
            .get(&url)
            .query(&query)
            .header(ACCEPT, "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(%err, chain, token_address, "risk API unreachable");
                return RiskVerdict::fail_closed("network failure reaching risk API");
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), chain, token_address, "risk API returned non-success status");
            return RiskVerdict::fail_closed(format!("HTTP {}", status.as_u16()));
        }

        match response.json::<Value>().await {
            Ok(payload) => normalize_verdict(&payload),
            Err(err) => {
                tracing::warn!(%err, chain, token_address, "unparseable risk API body");
                RiskVerdict::fail_closed("unparseable response body")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_client() -> HoneypotClient {
        HoneypotClient::new(HoneypotConfig {
            api_base: "http://127.0.0.1:0".to_string(),
            timeout: Duration::from_millis(200),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn unmapped_chain_short_circuits_without_network_call() {
        // The base URL is unroutable: had a request been issued, the verdict
        // would be fail-closed (supported: true) rather than unsupported.
        let client = unreachable_client();
        let verdict = client.assess("solana", "0xabc", None).await;
        assert!(!verdict.supported);
        assert!(verdict.reason.unwrap().contains("solana"));
    }

    #[tokio::test]
    async fn transport_failure_is_fail_closed() {
        let client = unreachable_client();
        let verdict = client.assess("bsc", "0xabc", Some("0xpair")).await;
        assert!(verdict.supported);
        assert!(!verdict.ok);
        assert!(verdict.is_honeypot);
        assert_eq!(verdict.risk_score, 100.0);
    }
}
