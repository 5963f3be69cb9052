//! CLI Adapter
//!
//! Command-line interface for the token scout.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::{CliApp, Command, PreviewCmd, RunCmd};
