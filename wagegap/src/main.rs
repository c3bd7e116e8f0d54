//! # wagegap - Main Entry Point
//!
//! Loads and cleans the dataset, precomputes the static figures, then serves
//! the dashboard until Ctrl+C.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::sync::Arc;
use tokio::net::TcpListener;

use wagegap::cli::Args;
use wagegap::config::DashboardConfig;
use wagegap::domain::{DashboardError, IngestError};
use wagegap::ingest;
use wagegap::server::{self, AppState};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_USAGE: i32 = 2;

fn main() {
    let config = Args::parse().into_config();
    init_logging(config.debug);
    std::process::exit(match run(config) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            let code = exit_code_for(&e);
            eprintln!("error: {e:#}");
            code
        }
    });
}

/// `RUST_LOG` wins; otherwise `--debug` selects the debug level.
fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    // An unknown --encoding label is a bad flag value, not a data problem
    match err.downcast_ref::<DashboardError>() {
        Some(DashboardError::Ingest(IngestError::UnknownEncoding(_))) => EXIT_USAGE,
        _ => EXIT_ERROR,
    }
}

#[tokio::main]
async fn run(config: DashboardConfig) -> Result<()> {
    let quiet = config.quiet;

    if !quiet {
        println!("wagegap v{}", env!("CARGO_PKG_VERSION"));
        println!("data: {}", config.source);
    }

    // ── Startup: ingest, clean, precompute ──────────────────────────────
    let table = ingest::load(&config.source, &config.encoding).await?;
    if !quiet {
        println!("respondents: {}", table.len());
    }

    let state = Arc::new(AppState::build(table, config.missing_policy, config.debug));

    // ── Serve ───────────────────────────────────────────────────────────
    let listener = TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen))?;
    if !quiet {
        println!("dashboard: http://{}", listener.local_addr().unwrap_or(config.listen));
    }

    server::serve(listener, state).await.context("Server error")?;
    info!("Server stopped");
    Ok(())
}
