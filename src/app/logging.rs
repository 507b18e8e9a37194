//! Progress logging utilities.

use log::info;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Logs progress information about record enrichment.
///
/// # Arguments
///
/// * `start_time` - The start time of processing
/// * `completed` - Records whose location was resolved
/// * `failed` - Records left with an unknown location
/// * `total` - Records in the batch
pub fn log_progress(
    start_time: std::time::Instant,
    completed: &AtomicUsize,
    failed: &AtomicUsize,
    total: usize,
) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let completed = completed.load(Ordering::SeqCst);
    let failed = failed.load(Ordering::SeqCst);
    let done = completed + failed;
    let rate = if elapsed_secs > 0.0 {
        done as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Enriched {}/{} records ({} resolved, {} unresolved) in {:.2} seconds (~{:.2} records/sec)",
        done, total, completed, failed, elapsed_secs, rate
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_progress_does_not_panic() {
        let completed = AtomicUsize::new(3);
        let failed = AtomicUsize::new(1);
        log_progress(std::time::Instant::now(), &completed, &failed, 10);
        log_progress(std::time::Instant::now(), &completed, &failed, 0);
    }
}
