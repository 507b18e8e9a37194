//! Configuration constants.
//!
//! This module defines the defaults used throughout the application:
//! lookup endpoint, concurrency, timeouts and the rate-limit backoff schedule.

use std::time::Duration;

/// Base URL of the probe lookup endpoint. Requests go to `{base}/{probe_id}/`.
pub const DEFAULT_API_BASE_URL: &str = "https://atlas.ripe.net/api/v2/probes";

/// Environment variable that overrides the lookup base URL.
pub const API_BASE_URL_ENV: &str = "PROBE_ENRICH_API_URL";

/// Default output file name.
pub const DEFAULT_OUTPUT_PATH: &str = "probes_enriched.json";

/// Maximum number of lookups in flight at once (semaphore permits).
///
/// Keeps the instantaneous request volume independent of batch size so a
/// large input file does not trip the remote rate limiter on its own.
pub const DEFAULT_MAX_CONCURRENCY: usize = 20;

/// Per-request HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default User-Agent string for lookup requests.
pub const DEFAULT_USER_AGENT: &str = concat!("probe_enrich/", env!("CARGO_PKG_VERSION"));

// Rate-limit retry strategy
/// Maximum number of lookup attempts per probe (initial attempt included).
pub const RETRY_MAX_ATTEMPTS: usize = 5;
/// Base backoff delay in milliseconds; attempt `n` waits `base * 2^n`.
pub const RETRY_BACKOFF_BASE_MS: u64 = 1000;
/// Exclusive upper bound of the random jitter added to each backoff, in milliseconds.
pub const RETRY_MAX_JITTER_MS: u64 = 1000;

/// Interval between progress log lines while a batch is running.
pub const LOGGING_INTERVAL: Duration = Duration::from_secs(5);

// HTTP status codes (for clarity and consistency)
/// HTTP 429 Too Many Requests, the only status the resolver retries.
pub const HTTP_STATUS_TOO_MANY_REQUESTS: u16 = 429;

/// Placeholder for any location or destination field that could not be determined.
pub const UNKNOWN: &str = "Unknown";
