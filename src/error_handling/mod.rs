//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions (initialization, transport, per-probe resolution)
//! - Processing statistics tracking (errors, warnings, info metrics)
//! - Error categorization for the end-of-run report
//!
//! Error types are categorized into:
//! - **Errors**: Failures that leave a record without a location
//! - **Warnings**: Resolved records with incomplete data
//! - **Info**: Informational metrics (retries, missing destination names)

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_resolve_error, update_error_stats};
pub use stats::ProcessingStats;
pub use types::{
    ErrorType, InfoType, InitializationError, ResolveError, TransportError, WarningType,
};
