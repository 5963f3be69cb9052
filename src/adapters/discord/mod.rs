//! Discord Notifier Adapter
//!
//! Webhook-based implementation of the notifier port:
//! - `webhook`: HTTP delivery and startup announcement
//! - `embed`: alert rendering into Discord embed JSON
//! - `format`: display helpers (amounts, percentages, addresses, risk tiers)
//! - `sample`: fixture alert for connectivity/rendering checks

mod embed;
mod format;
mod sample;
mod webhook;

pub use embed::build_alert_payload;
pub use format::{format_number, format_percent, format_usd, risk_tier, short_address, RiskTier};
pub use sample::sample_alert;
pub use webhook::{DiscordWebhook, DiscordWebhookConfig};
