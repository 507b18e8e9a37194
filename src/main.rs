//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `probe_enrich` library that handles:
//! - Environment variable loading (.env file)
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use probe_enrich::initialization::init_logger_with;
use probe_enrich::{run_enrichment, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; anything set there (RUST_LOG, PROBE_ENRICH_API_URL)
    // must be loaded before clap reads env-backed flags
    let _ = dotenvy::dotenv();

    let config = Config::parse();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    match run_enrichment(config).await {
        Ok(report) => {
            println!(
                "✅ Enriched {} record{} ({} resolved, {} unresolved) in {:.1}s",
                report.total_records,
                if report.total_records == 1 { "" } else { "s" },
                report.resolved,
                report.unresolved,
                report.elapsed_seconds
            );
            println!("Results saved in {}", report.output_path.display());
            Ok(())
        }
        Err(e) => {
            eprintln!("probe_enrich error: {:#}", e);
            process::exit(1);
        }
    }
}
