//! Run reporting utilities.
//!
//! This module provides progress logging and the end-of-run statistics
//! printed by `run_enrichment`.

pub mod logging;
pub mod statistics;

// Re-export public API
pub use logging::log_progress;
pub use statistics::{print_continent_summary, print_error_statistics};
