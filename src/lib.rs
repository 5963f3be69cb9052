//! Tokenscout - New-Token Discovery and Risk Screening Bot
//!
//! Polls DexScreener for newly listed tokens, screens each candidate against
//! honeypot.is, and posts the survivors to a Discord channel.
//!
//! # Modules
//!
//! - `domain`: Core decision logic (candidates, pair ranking, dedup, lock derivation)
//! - `ports`: Trait abstractions (MarketDataPort, RiskPort, NotifierPort) and mocks
//! - `adapters`: External implementations (DexScreener, honeypot.is, Discord, CLI)
//! - `application`: Discovery pipeline orchestrator
//! - `config`: Configuration loading and validation

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
