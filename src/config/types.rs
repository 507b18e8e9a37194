//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    API_BASE_URL_ENV, DEFAULT_API_BASE_URL, DEFAULT_MAX_CONCURRENCY, DEFAULT_OUTPUT_PATH,
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, RETRY_BACKOFF_BASE_MS, RETRY_MAX_ATTEMPTS,
    RETRY_MAX_JITTER_MS,
};
use crate::resolver::BackoffPolicy;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Run configuration.
///
/// Parsed from the command line by the binary, or built programmatically by
/// library callers starting from `Config::default()`.
///
/// # Examples
///
/// ```no_run
/// use probe_enrich::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     input: PathBuf::from("traceroutes.json"),
///     output: PathBuf::from("traceroutes_probes.json"),
///     max_concurrency: 10,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "probe_enrich",
    version,
    about = "Adds probe country, continent, hop count and destination RTT to traceroute results."
)]
pub struct Config {
    /// Input file (JSON array of traceroute results)
    #[arg(value_parser)]
    pub input: PathBuf,

    /// Output file (pretty-printed JSON array)
    #[arg(long, short, value_parser, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Probe lookup base URL; requests go to `<api-url>/<probe id>/`
    #[arg(long, env = API_BASE_URL_ENV, default_value = DEFAULT_API_BASE_URL)]
    pub api_url: String,

    /// Maximum concurrent lookups
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Maximum lookup attempts per probe when the service answers 429
    #[arg(long, default_value_t = RETRY_MAX_ATTEMPTS)]
    pub max_attempts: usize,

    /// Backoff base in milliseconds (attempt n waits base * 2^n plus jitter)
    #[arg(long, default_value_t = RETRY_BACKOFF_BASE_MS)]
    pub backoff_base_ms: u64,

    /// Upper bound (exclusive) of the random jitter added to each backoff, in milliseconds
    #[arg(long, default_value_t = RETRY_MAX_JITTER_MS)]
    pub max_jitter_ms: u64,
}

impl Config {
    /// Builds the resolver backoff policy from the retry options.
    pub fn backoff_policy(&self) -> BackoffPolicy {
        BackoffPolicy::new(
            self.max_attempts,
            Duration::from_millis(self.backoff_base_ms),
            Duration::from_millis(self.max_jitter_ms),
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("traceroutes.json"),
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            api_url: DEFAULT_API_BASE_URL.to_string(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_attempts: RETRY_MAX_ATTEMPTS,
            backoff_base_ms: RETRY_BACKOFF_BASE_MS,
            max_jitter_ms: RETRY_MAX_JITTER_MS,
        }
    }
}
