mod clean;
mod config;
mod manager;
mod plot;
mod series;
mod source;
mod stats;
mod synth;

use crate::config::{Config, Source};
use crate::manager::Manager;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    /// TOML configuration file; built-in defaults are used without it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured data source.
    #[arg(long, value_enum)]
    source: Option<Source>,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    let mut cfg = match &args.config {
        Some(file) => Config::from_file(file).context("failed to construct cfg")?,
        None => Config::default(),
    };
    if let Some(source) = args.source {
        cfg.input.source = source;
    }
    log::info!("{cfg:#?}");

    let mgr = Manager::new(cfg);
    let report = mgr.run().context("failed to run analysis")?;
    log::info!(
        "kept {} of {} records from {}",
        report.n_clean,
        report.n_raw,
        report.origin
    );

    println!("{}", report.summary());

    Ok(())
}
