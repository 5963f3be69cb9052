//! Tokenscout - New-Token Discovery and Risk Screening Bot
//!
//! Polls DexScreener for newly listed tokens, screens each candidate against
//! honeypot.is, and posts the survivors to a Discord channel.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use tokenscout::adapters::cli::{CliApp, Command, PreviewCmd, RunCmd};
use tokenscout::adapters::{
    DexScreenerClient, DexScreenerConfig, DiscordWebhook, DiscordWebhookConfig, HoneypotClient,
    HoneypotConfig,
};
use tokenscout::application::{DiscoveryConfig, DiscoveryPipeline, PollContext};
use tokenscout::config::{load_config, Config};
use tokenscout::ports::NotifierPort;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (the webhook secret goes here, not in config.toml)
    dotenvy::dotenv().ok();

    let app = CliApp::parse();
    let (verbose, debug) = (app.verbose, app.debug);

    match app.command {
        Command::Run(cmd) => run_command(cmd, verbose, debug).await,
        Command::Preview(cmd) => preview_command(cmd, verbose, debug).await,
    }
}

/// CLI flags take precedence, then RUST_LOG, then the configured base level.
fn init_logging(verbose: bool, debug: bool, base_level: &str) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(base_level))
    };

    fmt().with_env_filter(filter).init();
}

async fn run_command(cmd: RunCmd, verbose: bool, debug: bool) -> Result<()> {
    let config = load_config(&cmd.config).context("Failed to load configuration")?;
    init_logging(verbose, debug, &config.logging.level);

    tracing::info!("Starting tokenscout...");

    let market = DexScreenerClient::new(DexScreenerConfig {
        api_base: config.dexscreener.api_base.clone(),
        timeout: Duration::from_secs(config.dexscreener.timeout_secs),
    })
    .context("Failed to create DexScreener client")?;

    let risk = HoneypotClient::new(HoneypotConfig {
        api_base: config.honeypot.api_base.clone(),
        timeout: Duration::from_secs(config.honeypot.timeout_secs),
    })
    .context("Failed to create honeypot.is client")?;

    let notifier = build_notifier(&config)?;
    let discovery = DiscoveryConfig::from(&config);

    // The startup announcement doubles as the channel connectivity check:
    // if the webhook is unreachable, abort before the first poll cycle.
    notifier
        .announce_startup(&discovery.watched_chains)
        .await
        .context("Failed to reach the Discord webhook at startup")?;

    if config.discord.send_preview_on_start {
        match notifier.send_preview().await {
            Ok(()) => tracing::info!("sample alert delivered"),
            Err(err) => {
                tracing::warn!(%err, "could not deliver the sample alert (permissions or channel?)")
            }
        }
    }

    tracing::info!(
        poll_interval_secs = config.discovery.poll_interval_secs,
        chains = ?discovery.watched_chains,
        "bot started"
    );

    let mut ctx = PollContext::new(discovery.dedup_capacity);
    let pipeline = DiscoveryPipeline::new(discovery, market, risk, notifier);

    tokio::select! {
        _ = pipeline.run(&mut ctx) => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    tracing::info!("Tokenscout stopped");
    Ok(())
}

async fn preview_command(cmd: PreviewCmd, verbose: bool, debug: bool) -> Result<()> {
    let config = load_config(&cmd.config).context("Failed to load configuration")?;
    init_logging(verbose, debug, &config.logging.level);

    let notifier = build_notifier(&config)?;
    notifier
        .send_preview()
        .await
        .context("Failed to deliver the sample alert")?;

    println!("Sample alert delivered to the configured webhook");
    Ok(())
}

fn build_notifier(config: &Config) -> Result<DiscordWebhook> {
    let webhook_url = config.discord.resolve_webhook_url().context(
        "Discord webhook URL missing - set DISCORD_WEBHOOK_URL or [discord].webhook_url",
    )?;

    DiscordWebhook::new(DiscordWebhookConfig {
        webhook_url,
        mention_role_id: config.discord.mention_role(),
        timeout: Duration::from_secs(config.discord.timeout_secs),
    })
    .context("Failed to create Discord webhook client")
}
