//! lolstats-worker - batch processing of recorded matches.
//!
//! Reads match files (`{match_id, platform_id, participants, events}`), runs the
//! normalizer and stats aggregator from `lolstats-core`, and prints JSON to stdout.
//! Logs go to stderr, or are appended to `LOLSTATS_LOG_PATH` when set.

mod commands;
mod config;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lolstats_types::formatting::format_clock;
use serde::Serialize;
use tracing_subscriber::filter::EnvFilter;

#[derive(Parser)]
#[command(name = "lolstats-worker", version, about = "Advanced stats for recorded matches")]
struct Cli {
    /// Worker config (TOML). Defaults to <config dir>/lolstats/worker.toml
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the canonical event stream of a raw match
    Normalize {
        #[arg(value_name = "MATCH")]
        path: PathBuf,
    },
    /// Compute advanced stats for one summoner, or all ten participants
    Stats {
        #[arg(value_name = "MATCH", required = true)]
        paths: Vec<PathBuf>,
        #[arg(short, long)]
        summoner: Option<i64>,
    },
    /// Average previously computed stats
    Average {
        #[arg(value_name = "STATS", required = true)]
        paths: Vec<PathBuf>,
    },
}

/// Initialize logging, writing to LOLSTATS_LOG_PATH if set, otherwise stderr.
///
/// `RUST_LOG` takes precedence over the configured filter.
fn init_logging(config_filter: Option<&str>) {
    let filter = match config_filter {
        Some(directives) if std::env::var_os(EnvFilter::DEFAULT_ENV).is_none() => {
            EnvFilter::builder()
                .with_default_directive(tracing::Level::INFO.into())
                .parse_lossy(directives)
        }
        _ => EnvFilter::builder()
            .with_default_directive(tracing::Level::INFO.into())
            .from_env_lossy(),
    };

    if let Ok(path) = std::env::var("LOLSTATS_LOG_PATH")
        && let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
    {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_ansi(false)
            .with_writer(file)
            .init();
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let mut out = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging needs the config's filter, so report config errors after it's up
    let config = config::load(cli.config.as_deref());
    init_logging(
        config
            .as_ref()
            .ok()
            .and_then(|c| c.log_filter.as_deref()),
    );
    let config = config.context("loading worker config")?;

    match &cli.command {
        Command::Normalize { path } => {
            let canonical = commands::normalize_file(path)?;
            tracing::info!(
                path = %path.display(),
                events = canonical.events.len(),
                duration = %format_clock(canonical.duration()),
                "normalized match"
            );
            print_json(&canonical, config.pretty_json)
        }
        Command::Stats { paths, summoner } => {
            let stats = commands::stats_files(paths, *summoner, &config)?;
            print_json(&stats, config.pretty_json)
        }
        Command::Average { paths } => {
            let average = commands::average_files(paths)?;
            print_json(&average, config.pretty_json)
        }
    }
}
