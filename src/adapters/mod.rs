//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - DexScreener: market data API client (candidate feeds, pairs)
//! - Honeypot: honeypot.is risk assessment client
//! - Discord: webhook notifier and embed rendering
//! - CLI: command-line interface definitions

pub mod cli;
pub mod dexscreener;
pub mod discord;
pub mod honeypot;

pub use cli::CliApp;
pub use dexscreener::{DexScreenerClient, DexScreenerConfig};
pub use discord::{DiscordWebhook, DiscordWebhookConfig};
pub use honeypot::{HoneypotClient, HoneypotConfig};
