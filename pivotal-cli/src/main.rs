//! Pivotal CLI: one-shot trend and breakout report.
//!
//! Commands:
//! - `signal`: fetch a symbol, print headline metrics and the recommendation

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pivotal_core::data::{DataSource, SeriesCache};
use pivotal_core::pipeline::{self, SignalRequest};
use pivotal_core::{DashboardConfig, Report};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pivotal",
    about = "Pivotal CLI: trend filter and breakout check for a single symbol"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify the latest close of a symbol as breakout, watch or avoid.
    Signal {
        /// Ticker as the data source expects it (e.g. AAPL, 0700.HK, 600519.SS).
        /// Defaults to the configured symbol.
        symbol: Option<String>,

        /// Stop-loss percentage below the current price, strictly between 0 and 100.
        #[arg(long)]
        stop_loss: Option<f64>,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Read `{SYMBOL}.csv` files from this directory instead of Yahoo Finance.
        #[arg(long)]
        csv_dir: Option<PathBuf>,

        /// Print the report as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Signal {
            symbol,
            stop_loss,
            config,
            csv_dir,
            json,
        } => run_signal(symbol, stop_loss, config, csv_dir, json),
    }
}

fn run_signal(
    symbol: Option<String>,
    stop_loss: Option<f64>,
    config_path: Option<PathBuf>,
    csv_dir: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let config = resolve_config(config_path, csv_dir)?;
    let request = build_request(&config, symbol, stop_loss);
    debug!(?request, "signal request");

    let provider = config
        .build_provider()
        .context("initializing data provider")?;
    let mut cache = SeriesCache::new(config.cache_ttl());
    let outcome = pipeline::run(&mut cache, &*provider, &request)?;

    let report = Report::from_outcome(&request.symbol, &outcome);
    if json {
        let value = serde_json::json!({
            "report": report,
            "signal": outcome.signal(),
            "snapshot": outcome.snapshot(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print!("{report}");
    }

    if outcome.is_data_unavailable() {
        std::process::exit(1);
    }
    Ok(())
}

/// Config file (or defaults), with `--csv-dir` switching the provider to CSV.
fn resolve_config(
    config_path: Option<PathBuf>,
    csv_dir: Option<PathBuf>,
) -> Result<DashboardConfig> {
    let mut config = match config_path {
        Some(path) => DashboardConfig::from_file(&path)?,
        None => DashboardConfig::default(),
    };
    if let Some(dir) = csv_dir {
        config.provider = DataSource::Csv;
        config.csv_dir = Some(dir);
    }
    config.validate()?;
    Ok(config)
}

fn build_request(
    config: &DashboardConfig,
    symbol: Option<String>,
    stop_loss: Option<f64>,
) -> SignalRequest {
    let symbol = symbol.unwrap_or_else(|| config.symbol.clone());
    let mut request = config.request(symbol.trim(), config.stop_loss_pct);
    if let Some(pct) = stop_loss {
        request.stop_loss_pct = pct;
    }
    request
}
