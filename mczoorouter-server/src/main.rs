//! mczoorouter - ServerSet to mcrouter config daemon
//!
//! Watches an Aurora job's ServerSet in ZooKeeper and rewrites the mcrouter
//! config file whenever the job's membership changes.

#![allow(clippy::print_stderr, reason = "errors before logging is up go to stderr")]

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing::info;

mod cli;
mod logging;
mod shutdown;

use cli::Cli;
use mczoorouter_core::{FilePublisher, ServerSetWatch, Synchronizer};
use mczoorouter_types::SyncSettings;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            e.print().ok();
            return ExitCode::from(cli::parse_exit_code(&e));
        }
    };

    if let Err(e) = logging::init(cli.verbose, cli.debug) {
        eprintln!("mczoorouter: {e:#}");
        return ExitCode::from(1);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("❌ {:#}", e);
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    info!("🚀 mczoorouter {} starting", env!("CARGO_PKG_VERSION"));

    let cancel = CancellationToken::new();
    tokio::spawn(shutdown::cancel_on_signal(cancel.clone()));

    let (settings, watch) =
        start_watch(&cli, cancel.child_token()).await.context("startup failed")?;
    info!("Writing mcrouter config to {}", settings.output_path.display());

    let publisher = FilePublisher::new(&settings.output_path);
    let stats = tokio::spawn(Synchronizer::new(watch, publisher).run(cancel.clone()))
        .await
        .context("synchronizer task failed")?;

    let stopped_on_request = cancel.is_cancelled();
    cancel.cancel();

    info!("👋 Stopped after {} render cycles", stats.cycles);
    if !stopped_on_request {
        anyhow::bail!("membership watch closed unexpectedly");
    }
    Ok(())
}

/// Validate settings and connect to the ServerSet. Any failure here is fatal.
async fn start_watch(
    cli: &Cli,
    cancel: CancellationToken,
) -> mczoorouter_types::Result<(SyncSettings, ServerSetWatch)> {
    let settings = cli.settings()?;
    info!("Using ServerSet path: {}", settings.serverset_path());

    let watch = ServerSetWatch::connect(&settings, cancel).await?;
    Ok((settings, watch))
}
