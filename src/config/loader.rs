//! Configuration Loader
//!
//! Loads and validates configuration from TOML files matching config.toml structure.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::application::DiscoveryConfig;
use crate::ports::SourceMode;

/// Main configuration structure matching config.toml
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub discovery: DiscoverySection,
    pub dexscreener: DexScreenerSection,
    pub honeypot: HoneypotSection,
    pub discord: DiscordSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Discovery pipeline configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverySection {
    /// Chains the pipeline reports on (lowercase identifiers)
    pub watched_chains: Vec<String>,
    /// Seconds between poll cycles
    pub poll_interval_secs: u64,
    /// Maximum candidates taken from a feed per cycle
    pub candidate_limit: usize,
    /// Ranked pairs kept per token; the first is the primary
    pub max_pairs_per_token: usize,
    /// Candidates scoring at or above this are dropped (0-100)
    pub risk_score_threshold: f64,
    /// Candidate feed selection: profiles_only, boosts_only, profiles_then_boosts
    pub source_mode: SourceMode,
    /// How many token ids the dedup ledger remembers
    pub dedup_capacity: usize,
}

/// DexScreener API configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct DexScreenerSection {
    /// DexScreener API base URL
    pub api_base: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Honeypot.is API configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct HoneypotSection {
    /// Honeypot.is API base URL
    pub api_base: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Discord webhook configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordSection {
    /// Webhook URL (prefer the DISCORD_WEBHOOK_URL env var; secrets do not
    /// belong in config files)
    #[serde(default)]
    pub webhook_url: String,
    /// Role id mentioned in alerts (empty = no mention)
    #[serde(default)]
    pub mention_role_id: String,
    /// Deliver a sample alert right after the startup announcement
    #[serde(default)]
    pub send_preview_on_start: bool,
    /// Webhook request timeout in seconds
    #[serde(default = "default_webhook_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_webhook_timeout_secs() -> u64 {
    15
}

/// Logging configuration section (optional)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Base log level when RUST_LOG and CLI flags are absent
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl DiscordSection {
    /// Webhook URL with environment variable override.
    /// Checks DISCORD_WEBHOOK_URL first, falls back to the config value.
    pub fn resolve_webhook_url(&self) -> Option<String> {
        if let Ok(url) = std::env::var("DISCORD_WEBHOOK_URL") {
            if !url.is_empty() {
                return Some(url);
            }
        }
        if self.webhook_url.is_empty() {
            None
        } else {
            Some(self.webhook_url.clone())
        }
    }

    pub fn mention_role(&self) -> Option<String> {
        if self.mention_role_id.is_empty() {
            None
        } else {
            Some(self.mention_role_id.clone())
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.discovery.watched_chains.is_empty()
            || self
                .discovery
                .watched_chains
                .iter()
                .any(|c| c.trim().is_empty())
        {
            return Err(ConfigError::ValidationError(
                "watched_chains must list at least one non-empty chain".to_string(),
            ));
        }

        if self.discovery.poll_interval_secs == 0 {
            return Err(ConfigError::ValidationError(
                "poll_interval_secs must be > 0".to_string(),
            ));
        }

        if self.discovery.candidate_limit == 0 {
            return Err(ConfigError::ValidationError(
                "candidate_limit must be > 0".to_string(),
            ));
        }

        if self.discovery.max_pairs_per_token == 0 {
            return Err(ConfigError::ValidationError(
                "max_pairs_per_token must be > 0".to_string(),
            ));
        }

        if !(0.0..=100.0).contains(&self.discovery.risk_score_threshold) {
            return Err(ConfigError::ValidationError(format!(
                "risk_score_threshold must be 0-100, got {}",
                self.discovery.risk_score_threshold
            )));
        }

        if self.discovery.dedup_capacity == 0 {
            return Err(ConfigError::ValidationError(
                "dedup_capacity must be > 0".to_string(),
            ));
        }

        if self.dexscreener.api_base.is_empty() {
            return Err(ConfigError::ValidationError(
                "dexscreener api_base cannot be empty".to_string(),
            ));
        }

        if self.honeypot.api_base.is_empty() {
            return Err(ConfigError::ValidationError(
                "honeypot api_base cannot be empty".to_string(),
            ));
        }

        if self.dexscreener.timeout_secs == 0 || self.honeypot.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_secs must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

// Conversion from Config to the pipeline's resolved settings
impl From<&Config> for DiscoveryConfig {
    fn from(config: &Config) -> Self {
        DiscoveryConfig {
            watched_chains: config
                .discovery
                .watched_chains
                .iter()
                .map(|c| c.trim().to_lowercase())
                .collect(),
            poll_interval: Duration::from_secs(config.discovery.poll_interval_secs),
            candidate_limit: config.discovery.candidate_limit,
            max_pairs_per_token: config.discovery.max_pairs_per_token,
            risk_score_threshold: config.discovery.risk_score_threshold,
            source_mode: config.discovery.source_mode,
            dedup_capacity: config.discovery.dedup_capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_valid_config() -> String {
        r#"
[discovery]
watched_chains = ["ethereum", "bsc", "base"]
poll_interval_secs = 45
candidate_limit = 40
max_pairs_per_token = 3
risk_score_threshold = 60.0
source_mode = "profiles_then_boosts"
dedup_capacity = 500

[dexscreener]
api_base = "https://api.dexscreener.com"
timeout_secs = 30

[honeypot]
api_base = "https://api.honeypot.is"
timeout_secs = 30

[discord]
webhook_url = "https://discord.com/api/webhooks/1/abc"
mention_role_id = "1466422195088654470"
send_preview_on_start = true

[logging]
level = "info"
"#
        .to_string()
    }

    fn load(contents: &str) -> Result<Config, ConfigError> {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        load_config(file.path())
    }

    #[test]
    fn test_load_valid_config() {
        let config = load(&create_valid_config()).unwrap();
        assert_eq!(config.discovery.watched_chains.len(), 3);
        assert_eq!(config.discovery.poll_interval_secs, 45);
        assert_eq!(config.discovery.source_mode, SourceMode::ProfilesThenBoosts);
        assert_eq!(config.discord.mention_role(), Some("1466422195088654470".to_string()));
        assert!(config.discord.send_preview_on_start);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config("/nonexistent/path/config.toml");
        assert!(matches!(result.unwrap_err(), ConfigError::IoError(_)));
    }

    #[test]
    fn test_invalid_source_mode_fails_parse() {
        let contents = create_valid_config().replace("profiles_then_boosts", "everything");
        assert!(matches!(load(&contents).unwrap_err(), ConfigError::ParseError(_)));
    }

    #[test]
    fn test_empty_chain_list_rejected() {
        let contents =
            create_valid_config().replace(r#"["ethereum", "bsc", "base"]"#, "[]");
        assert!(matches!(
            load(&contents).unwrap_err(),
            ConfigError::ValidationError(_)
        ));
    }

    #[test]
    fn test_out_of_range_threshold_rejected() {
        let contents = create_valid_config().replace("risk_score_threshold = 60.0", "risk_score_threshold = 140.0");
        assert!(matches!(
            load(&contents).unwrap_err(),
            ConfigError::ValidationError(_)
        ));
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let contents =
            create_valid_config().replace("poll_interval_secs = 45", "poll_interval_secs = 0");
        assert!(matches!(
            load(&contents).unwrap_err(),
            ConfigError::ValidationError(_)
        ));
    }

    #[test]
    fn test_logging_section_optional() {
        let contents = create_valid_config().replace("[logging]\nlevel = \"info\"", "");
        let config = load(&contents).unwrap();
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_to_discovery_config() {
        let config = load(&create_valid_config()).unwrap();
        let discovery = DiscoveryConfig::from(&config);
        assert_eq!(discovery.poll_interval, Duration::from_secs(45));
        assert_eq!(discovery.watched_chains, vec!["ethereum", "bsc", "base"]);
        assert_eq!(discovery.risk_score_threshold, 60.0);
        assert_eq!(discovery.dedup_capacity, 500);
    }

    #[test]
    fn test_webhook_url_from_config_value() {
        let config = load(&create_valid_config()).unwrap();
        // Env override is exercised operationally; here the TOML value wins.
        assert_eq!(
            config.discord.webhook_url,
            "https://discord.com/api/webhooks/1/abc"
        );
    }
}
