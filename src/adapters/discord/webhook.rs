//! Discord webhook notifier.
//!
//! Plain HTTP POST to a webhook URL; no gateway session to maintain. The
//! startup announcement doubles as the connectivity check: if it cannot be
//! delivered, the process should not start polling.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::ports::{NewTokenAlert, NotifierPort, NotifyError};
use super::embed::build_alert_payload;
use super::sample::sample_alert;

/// Discord webhook configuration.
#[derive(Debug, Clone)]
pub struct DiscordWebhookConfig {
    /// Full webhook URL (treated as a secret).
    pub webhook_url: String,
    /// Role to mention in alerts, when set.
    pub mention_role_id: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
}

/// Webhook-based notifier.
#[derive(Debug, Clone)]
pub struct DiscordWebhook {
    config: DiscordWebhookConfig,
    http: reqwest::Client,
}

impl DiscordWebhook {
    pub fn new(config: DiscordWebhookConfig) -> Result<Self, NotifyError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| NotifyError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    async fn post(&self, payload: &Value) -> Result<(), NotifyError> {
        let response = self
            .http
            .post(&self.config.webhook_url)
            .json(payload)
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Http(status.as_u16()));
        }
        Ok(())
    }

    /// Deliver the sample alert, prefixed as a connectivity check.
    pub async fn send_preview(&self) -> Result<(), NotifyError> {
        let mut payload =
            build_alert_payload(&sample_alert(), self.config.mention_role_id.as_deref());
        payload["content"] = json!("🧪 Sample alert — webhook connectivity check");
        self.post(&payload).await
    }
}

#[async_trait]
impl NotifierPort for DiscordWebhook {
    async fn announce_startup(&self, watched_chains: &[String]) -> Result<(), NotifyError> {
        let mention = match &self.config.mention_role_id {
            Some(role) => format!(" <@&{role}>"),
            None => String::new(),
        };
        let payload = json!({
            "content": format!(
                "✅ Token scout online — watching: {}{mention}",
                watched_chains.join(", ")
            )
        });
        self.post(&payload).await
    }

    async fn deliver(&self, alert: &NewTokenAlert) -> Result<(), NotifyError> {
        let payload = build_alert_payload(alert, self.config.mention_role_id.as_deref());
        self.post(&payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_webhook() -> DiscordWebhook {
        DiscordWebhook::new(DiscordWebhookConfig {
            webhook_url: "http://127.0.0.1:0/webhook".to_string(),
            mention_role_id: None,
            timeout: Duration::from_millis(200),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn unreachable_webhook_is_a_transport_error() {
        let webhook = unreachable_webhook();
        let err = webhook.announce_startup(&["bsc".to_string()]).await.unwrap_err();
        assert!(matches!(err, NotifyError::Transport(_)));
    }

    #[tokio::test]
    async fn delivery_to_unreachable_webhook_fails() {
        let webhook = unreachable_webhook();
        assert!(webhook.deliver(&sample_alert()).await.is_err());
    }
}
