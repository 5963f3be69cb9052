//! Honeypot.is Risk Assessment Adapter
//!
//! HTTP client for the honeypot.is IsHoneypot endpoint:
//! - chain alias mapping to the API's numeric chain ids
//! - fail-closed verdicts for HTTP and transport failures
//! - total normalization of the loosely shaped response payload
//!
//! The payload normalizer is a pure function so every known shape variant
//! can be covered with fixtures, independent of any network plumbing.

mod chains;
mod client;
mod normalize;

pub use chains::chain_to_numeric_id;
pub use client::{HoneypotClient, HoneypotConfig};
pub use normalize::normalize_verdict;
