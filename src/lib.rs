//! probe_enrich library: traceroute record enrichment
//!
//! This library takes traceroute measurement results keyed by probe id and
//! adds, for each record, the hop count, a defaulted destination name, the
//! mean round-trip time of the last hop, and the probe's country and
//! continent resolved through the probe lookup API. Lookups run concurrently
//! (bounded) and back off exponentially, with jitter, when the API answers
//! 429 Too Many Requests.
//!
//! # Example
//!
//! ```no_run
//! use probe_enrich::{run_enrichment, Config};
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     input: PathBuf::from("twitch.json"),
//!     output: PathBuf::from("twitch_probes.json"),
//!     ..Default::default()
//! };
//!
//! let report = run_enrichment(config).await?;
//! println!("Enriched {} records ({} unresolved)",
//!          report.total_records, report.unresolved);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod app;
pub mod config;
pub mod continent;
pub mod enrich;
pub mod error_handling;
pub mod file_io;
pub mod initialization;
pub mod models;
pub mod resolver;
pub mod rtt;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use enrich::{EnrichedBatch, Enricher};
pub use error_handling::{ResolveError, TransportError};
pub use models::{EnrichedRecord, HopResult, InputRecord, LocationInfo, ProbeId, Sample};
pub use resolver::{
    AtlasClient, BackoffPolicy, LocationLookup, LocationResolver, LookupResponse, ResolveOutcome,
};
pub use run::{run_enrichment, run_enrichment_with, EnrichReport};

// Internal run module (load, enrich, write, report)
mod run {
    use anyhow::{Context, Result};
    use log::info;
    use std::path::PathBuf;
    use std::sync::Arc;

    use crate::app::{print_continent_summary, print_error_statistics};
    use crate::config::Config;
    use crate::enrich::Enricher;
    use crate::error_handling::ProcessingStats;
    use crate::file_io::{read_records, write_records};
    use crate::initialization::init_resolver;
    use crate::resolver::LocationResolver;

    /// Results of an enrichment run.
    #[derive(Debug, Clone)]
    pub struct EnrichReport {
        /// Number of records read from the input file (and written to the output)
        pub total_records: usize,
        /// Records whose probe location was resolved
        pub resolved: usize,
        /// Records written with an unknown location
        pub unresolved: usize,
        /// Path of the written output file
        pub output_path: PathBuf,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs an enrichment with the provided configuration.
    ///
    /// Reads the input file, resolves every probe through the lookup API
    /// configured in `config`, and writes the enriched records to the output
    /// file.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The input file cannot be read or parsed
    /// - The HTTP client or lookup URL is invalid
    /// - The output file cannot be written
    ///
    /// Individual lookup failures are not errors; those records are written
    /// with an unknown location and counted in `EnrichReport::unresolved`.
    pub async fn run_enrichment(config: Config) -> Result<EnrichReport> {
        let resolver = init_resolver(&config).context("Failed to initialize probe resolver")?;
        run_enrichment_with(config, resolver).await
    }

    /// Runs an enrichment using a caller-supplied resolver.
    ///
    /// Identical to [`run_enrichment`] except that probe locations come from
    /// `resolver` instead of the configured lookup URL.
    pub async fn run_enrichment_with(
        config: Config,
        resolver: Arc<LocationResolver>,
    ) -> Result<EnrichReport> {
        let start_time = std::time::Instant::now();

        let records = read_records(&config.input).await?;
        info!(
            "Loaded {} record{} from {}",
            records.len(),
            if records.len() == 1 { "" } else { "s" },
            config.input.display()
        );

        let stats = Arc::new(ProcessingStats::new());
        let enricher =
            Enricher::new(resolver, config.max_concurrency).with_stats(Arc::clone(&stats));
        let batch = enricher.enrich_batch(&records).await;

        write_records(&config.output, &batch.records).await?;
        info!(
            "Wrote {} enriched records to {}",
            batch.records.len(),
            config.output.display()
        );

        print_error_statistics(&stats);
        print_continent_summary(&batch.records);

        Ok(EnrichReport {
            total_records: batch.records.len(),
            resolved: batch.resolved,
            unresolved: batch.unresolved,
            output_path: config.output,
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        })
    }
}
