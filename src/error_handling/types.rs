//! Error type definitions.
//!
//! This module defines all error, warning, and info types used throughout the application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::models::ProbeId;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// The lookup base URL cannot be parsed or cannot carry a path.
    #[error("Invalid lookup base URL '{url}': {reason}")]
    InvalidBaseUrlError { url: String, reason: String },
}

/// Failure to get any HTTP response out of the lookup service.
///
/// Never retried: the resolver only retries explicit rate limiting.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(#[source] BoxError),

    #[error("connection failed: {0}")]
    Connect(#[source] BoxError),

    #[error("request failed: {0}")]
    Request(#[source] BoxError),
}

impl From<ReqwestError> for TransportError {
    fn from(error: ReqwestError) -> Self {
        if error.is_timeout() {
            TransportError::Timeout(Box::new(error))
        } else if error.is_connect() {
            TransportError::Connect(Box::new(error))
        } else {
            TransportError::Request(Box::new(error))
        }
    }
}

/// Per-probe location lookup failure.
///
/// Every variant is contained to the record being resolved: the record is
/// still emitted with an unknown location.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The service could not be reached.
    #[error("lookup of probe {probe_id} failed: {source}")]
    Transport {
        probe_id: ProbeId,
        #[source]
        source: TransportError,
    },

    /// The service answered 429. Retried until the attempt ceiling.
    #[error("probe {probe_id} rate limited on attempt {attempt}")]
    RateLimited { probe_id: ProbeId, attempt: usize },

    /// The service answered with any status other than 200 or 429.
    #[error("lookup of probe {probe_id} returned status {status}")]
    Status { probe_id: ProbeId, status: u16 },

    /// A success response whose body is not the expected JSON document.
    #[error("could not decode lookup response for probe {probe_id}: {source}")]
    Decode {
        probe_id: ProbeId,
        #[source]
        source: serde_json::Error,
    },

    /// Every attempt was rate limited.
    #[error("exceeded maximum number of attempts ({attempts}) for probe {probe_id}")]
    Exhausted { probe_id: ProbeId, attempts: usize },
}

impl ResolveError {
    /// Returns `true` for the only failure worth another attempt.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ResolveError::RateLimited { .. })
    }
}

/// Types of errors that can occur while enriching a record.
///
/// Each variant degrades one record's location fields; none of them stop the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // Transport errors
    LookupTimeoutError,
    LookupConnectError,
    LookupRequestError,
    // Status errors
    LookupRateLimitExhausted,
    LookupNotFound,          // 404 Not Found
    LookupServerError,       // 5xx
    LookupOtherStatusError,
    // Body errors
    LookupDecodeError,
    // Task errors
    EnrichTaskPanicked,
}

/// Types of warnings that can occur while enriching a record.
///
/// Warnings flag data that was resolved but is incomplete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum WarningType {
    MissingCountryCode,   // Lookup succeeded without a country
    UnmappedCountryCode,  // Country not in the continent table
    NoDestinationReply,   // Last hop had no positive RTT
}

/// Types of informational metrics collected during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    RateLimitedRetry,       // A 429 that was followed by another attempt
    MissingDestinationName, // Record had no dst_name
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::LookupTimeoutError => "Lookup timeout error",
            ErrorType::LookupConnectError => "Lookup connect error",
            ErrorType::LookupRequestError => "Lookup request error",
            ErrorType::LookupRateLimitExhausted => "Rate limit retries exhausted",
            ErrorType::LookupNotFound => "Probe not found (404)",
            ErrorType::LookupServerError => "Lookup server error (5xx)",
            ErrorType::LookupOtherStatusError => "Lookup other status error",
            ErrorType::LookupDecodeError => "Lookup response decode error",
            ErrorType::EnrichTaskPanicked => "Enrichment task panicked",
        }
    }
}

impl WarningType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningType::MissingCountryCode => "Missing country code",
            WarningType::UnmappedCountryCode => "Country without continent mapping",
            WarningType::NoDestinationReply => "No reply from last hop",
        }
    }
}

impl InfoType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::RateLimitedRetry => "Rate-limited lookups retried",
            InfoType::MissingDestinationName => "Missing destination name",
        }
    }
}
