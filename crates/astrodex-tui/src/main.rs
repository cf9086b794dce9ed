//! `astrodex`: terminal viewer for Astroneer items and crafting recipes.
//!
//! Built on [ratatui](https://ratatui.rs). The data document is fetched once
//! at startup into `astrodex-core`'s `DataStore`; every table and card
//! derives from it. Screens: `1` Crafting (recipe tables by station and
//! type, plus a search table) and `2` Items (the catalog).
//!
//! Logs are written to a file (default `/tmp/astrodex.log`) to avoid
//! corrupting the terminal UI.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

#[cfg(test)]
mod test_support;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use astrodex_api::DataClient;
use astrodex_config::{Config, load_config, load_config_from};
use astrodex_core::{CardMode, DataStore};

use crate::app::App;

/// Browse Astroneer items and crafting recipes in the terminal.
#[derive(Parser, Debug)]
#[command(name = "astrodex", version, about)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Data source base: an http(s) URL or a local directory
    #[arg(short, long)]
    source: Option<String>,

    /// Log file path
    #[arg(long, default_value = "/tmp/astrodex.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. Nothing may log to stdout/stderr while the
/// TUI owns the terminal. Hold the returned guard so logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("astrodex={log_level}")));

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("astrodex.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Config file (explicit or canonical) + environment, then CLI overrides.
fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    if let Some(base) = &cli.source {
        config.source.base.clone_from(base);
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tui::install_hooks()?;
    let _log_guard = setup_tracing(&cli);

    let config = resolve_config(&cli)?;
    let result_mode = config.card_mode().unwrap_or_else(|e| {
        error!(error = %e, "ignoring configured card mode");
        CardMode::default()
    });

    let source = config.data_source()?;
    info!(%source, mode = %result_mode, panels = config.panels.len(), "starting astrodex");

    let client = DataClient::new(source)?;
    let mut app = App::new(DataStore::new(), Some(client), &Arc::new(config), result_mode);
    app.run().await?;

    Ok(())
}
