//! Concurrent enrichment of a batch of records.
//!
//! Every input record gets exactly one output slot at its own index. Slots are
//! allocated and pre-filled with the locally derived fields (hop count,
//! destination, RTT) before any lookup starts; each lookup task then reports
//! the location for its index only. Lookups run as Tokio tasks bounded by a
//! semaphore, so the number of requests in flight never exceeds
//! `max_concurrency` regardless of batch size.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{debug, warn};

use crate::app::log_progress;
use crate::config::{LOGGING_INTERVAL, UNKNOWN};
use crate::error_handling::{update_error_stats, ErrorType, InfoType, ProcessingStats, WarningType};
use crate::initialization::init_semaphore;
use crate::models::{EnrichedRecord, InputRecord, LocationInfo};
use crate::resolver::{LocationResolver, ResolveOutcome};

/// Output of one enrichment pass.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedBatch {
    /// One record per input record, in input order.
    pub records: Vec<EnrichedRecord>,
    /// Records whose location lookup succeeded.
    pub resolved: usize,
    /// Records left with an unknown location because the lookup failed.
    pub unresolved: usize,
}

/// Fans lookups out over a batch and assembles the enriched records.
pub struct Enricher {
    resolver: Arc<LocationResolver>,
    max_concurrency: usize,
    stats: Arc<ProcessingStats>,
}

impl Enricher {
    pub fn new(resolver: Arc<LocationResolver>, max_concurrency: usize) -> Self {
        Self {
            resolver,
            max_concurrency: max_concurrency.max(1),
            stats: Arc::new(ProcessingStats::new()),
        }
    }

    /// Shares an existing statistics tracker instead of a private one.
    pub fn with_stats(mut self, stats: Arc<ProcessingStats>) -> Self {
        self.stats = stats;
        self
    }

    pub fn stats(&self) -> &Arc<ProcessingStats> {
        &self.stats
    }

    /// Enriches `records`, returning one output per input in the same order.
    pub async fn enrich(&self, records: &[InputRecord]) -> Vec<EnrichedRecord> {
        self.enrich_batch(records).await.records
    }

    /// Like [`Enricher::enrich`], also reporting how many lookups succeeded.
    ///
    /// Lookup failures never abort the batch: the affected record keeps its
    /// derived fields and an "Unknown" location.
    pub async fn enrich_batch(&self, records: &[InputRecord]) -> EnrichedBatch {
        let total = records.len();
        let mut slots: Vec<EnrichedRecord> = records.iter().map(EnrichedRecord::from_input).collect();
        self.record_local_findings(records, &slots);

        if total == 0 {
            return EnrichedBatch {
                records: slots,
                resolved: 0,
                unresolved: 0,
            };
        }

        let start_time = Instant::now();
        let completed = Arc::new(AtomicUsize::new(0));
        let failed = Arc::new(AtomicUsize::new(0));
        let progress_task = spawn_progress_logger(start_time, &completed, &failed, total);

        let semaphore = init_semaphore(self.max_concurrency);
        let mut tasks = FuturesUnordered::new();

        for (index, record) in records.iter().enumerate() {
            // Acquiring fails only on a closed semaphore, and this one is never closed
            let Ok(permit) = Arc::clone(&semaphore).acquire_owned().await else {
                break;
            };

            let resolver = Arc::clone(&self.resolver);
            let stats = Arc::clone(&self.stats);
            let completed = Arc::clone(&completed);
            let failed = Arc::clone(&failed);
            let probe_id = record.prb_id;

            tasks.push(tokio::spawn(async move {
                let _permit = permit;
                let outcome = resolver.resolve(probe_id).await;
                record_outcome(&stats, index, &outcome);

                if outcome.is_success() {
                    completed.fetch_add(1, Ordering::SeqCst);
                } else {
                    failed.fetch_add(1, Ordering::SeqCst);
                }
                (index, outcome.location)
            }));
        }

        while let Some(task_result) = tasks.next().await {
            match task_result {
                Ok((index, location)) => slots[index].set_location(location),
                Err(join_error) => {
                    // The slot keeps its pre-filled unknown location
                    failed.fetch_add(1, Ordering::SeqCst);
                    self.stats.increment_error(ErrorType::EnrichTaskPanicked);
                    warn!("Enrichment task panicked: {:?}", join_error);
                }
            }
        }

        progress_task.abort();
        log_progress(start_time, &completed, &failed, total);

        // Every slot not resolved keeps the unknown location it was created with
        let resolved = completed.load(Ordering::SeqCst);
        EnrichedBatch {
            records: slots,
            resolved,
            unresolved: total - resolved,
        }
    }

    /// Counts findings that need no lookup.
    fn record_local_findings(&self, records: &[InputRecord], slots: &[EnrichedRecord]) {
        for (record, slot) in records.iter().zip(slots) {
            if record.dst_name.is_empty() {
                self.stats.increment_info(InfoType::MissingDestinationName);
            }
            if slot.rtt_destino == 0.0 {
                self.stats.increment_warning(WarningType::NoDestinationReply);
            }
        }
    }
}

/// Logs and counts the result of one lookup.
fn record_outcome(stats: &ProcessingStats, index: usize, outcome: &ResolveOutcome) {
    if outcome.attempts > 1 {
        stats.add_info(InfoType::RateLimitedRetry, outcome.attempts - 1);
    }

    match &outcome.error {
        Some(error) => {
            warn!("Record {}: {}", index, error);
            update_error_stats(stats, error);
        }
        None => {
            let LocationInfo { country, continent } = &outcome.location;
            debug!("Record {}: located in {} ({})", index, country, continent);
            if country == UNKNOWN {
                stats.increment_warning(WarningType::MissingCountryCode);
            } else if continent == UNKNOWN {
                stats.increment_warning(WarningType::UnmappedCountryCode);
            }
        }
    }
}

fn spawn_progress_logger(
    start_time: Instant,
    completed: &Arc<AtomicUsize>,
    failed: &Arc<AtomicUsize>,
    total: usize,
) -> tokio::task::JoinHandle<()> {
    let completed = Arc::clone(completed);
    let failed = Arc::clone(failed);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(LOGGING_INTERVAL);
        // The first tick completes immediately
        interval.tick().await;
        loop {
            interval.tick().await;
            log_progress(start_time, &completed, &failed, total);
        }
    })
}
