//! DexScreener Market Data Adapter
//!
//! HTTP client for the DexScreener public API:
//! - latest token profiles (primary candidate feed)
//! - latest token boosts (secondary/fallback feed)
//! - trading pairs for a token
//!
//! List responses arrive in two wire shapes (bare array, or an object
//! wrapping the array); parsing tolerates both and degrades anything else
//! to an empty result.

mod client;
mod parse;

pub use client::{DexScreenerClient, DexScreenerConfig};
pub use parse::extract_list;
