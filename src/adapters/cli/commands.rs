//! CLI Command Definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tokenscout - New-token discovery and risk screening bot
#[derive(Parser, Debug)]
#[command(
    name = "tokenscout",
    version = env!("CARGO_PKG_VERSION"),
    about = "New-token discovery and risk screening bot",
    long_about = "Tokenscout polls DexScreener for newly listed tokens, screens each \
                  candidate against honeypot.is, and posts the survivors to a Discord \
                  channel via webhook."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the discovery loop
    Run(RunCmd),

    /// Deliver a sample alert to the webhook and exit
    Preview(PreviewCmd),
}

/// Start discovery loop
#[derive(Parser, Debug)]
pub struct RunCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config/default.toml")]
    pub config: PathBuf,
}

/// Deliver a sample alert
#[derive(Parser, Debug)]
pub struct PreviewCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config/default.toml")]
    pub config: PathBuf,
}
