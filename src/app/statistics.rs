//! End-of-run statistics.

use std::collections::BTreeMap;

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, InfoType, ProcessingStats, WarningType};
use crate::models::EnrichedRecord;

/// Record count and destination RTT for one continent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContinentSummary {
    /// Records located on this continent.
    pub records: usize,
    /// Records whose last hop answered (`rtt_destino > 0`).
    pub with_reply: usize,
    /// Mean `rtt_destino` over `with_reply` records, or 0.0.
    pub mean_rtt: f64,
}

/// Groups records by continent, ordered by continent name.
pub fn summarize_by_continent(records: &[EnrichedRecord]) -> BTreeMap<String, ContinentSummary> {
    let mut totals: BTreeMap<String, (usize, usize, f64)> = BTreeMap::new();
    for record in records {
        let entry = totals.entry(record.continent.clone()).or_default();
        entry.0 += 1;
        if record.rtt_destino > 0.0 {
            entry.1 += 1;
            entry.2 += record.rtt_destino;
        }
    }

    totals
        .into_iter()
        .map(|(continent, (records, with_reply, rtt_sum))| {
            let mean_rtt = if with_reply > 0 {
                rtt_sum / with_reply as f64
            } else {
                0.0
            };
            (
                continent,
                ContinentSummary {
                    records,
                    with_reply,
                    mean_rtt,
                },
            )
        })
        .collect()
}

/// Logs the per-continent summary.
pub fn print_continent_summary(records: &[EnrichedRecord]) {
    let summary = summarize_by_continent(records);
    if summary.is_empty() {
        return;
    }

    info!("Destination RTT by continent:");
    for (continent, stats) in summary {
        info!(
            "   {}: {} record{} ({} with reply), mean RTT {:.2} ms",
            continent,
            stats.records,
            if stats.records == 1 { "" } else { "s" },
            stats.with_reply,
            stats.mean_rtt
        );
    }
}

/// Prints error, warning, and info statistics to the log.
pub fn print_error_statistics(error_stats: &ProcessingStats) {
    let total_errors = error_stats.total_errors();
    let total_warnings = error_stats.total_warnings();
    let total_info = error_stats.total_info();

    if total_errors > 0 {
        info!("Error Counts ({} total):", total_errors);
        for error_type in ErrorType::iter() {
            let count = error_stats.get_error_count(error_type);
            if count > 0 {
                info!("   {}: {}", error_type.as_str(), count);
            }
        }
    }

    if total_warnings > 0 {
        info!("Warning Counts ({} total):", total_warnings);
        for warning_type in WarningType::iter() {
            let count = error_stats.get_warning_count(warning_type);
            if count > 0 {
                info!("   {}: {}", warning_type.as_str(), count);
            }
        }
    }

    if total_info > 0 {
        info!("Info Counts ({} total):", total_info);
        for info_type in InfoType::iter() {
            let count = error_stats.get_info_count(info_type);
            if count > 0 {
                info!("   {}: {}", info_type.as_str(), count);
            }
        }
    }
}
