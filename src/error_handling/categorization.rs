//! Error categorization.
//!
//! Maps resolver failures onto the `ErrorType` counters reported at the end of a run.

use super::stats::ProcessingStats;
use super::types::{ErrorType, ResolveError, TransportError};

/// Categorizes a `ResolveError` into an `ErrorType`.
///
/// `RateLimited` never escapes the resolver on its own; if it does, it is
/// counted as an exhausted retry budget.
pub fn categorize_resolve_error(error: &ResolveError) -> ErrorType {
    match error {
        ResolveError::Transport { source, .. } => match source {
            TransportError::Timeout(_) => ErrorType::LookupTimeoutError,
            TransportError::Connect(_) => ErrorType::LookupConnectError,
            TransportError::Request(_) => ErrorType::LookupRequestError,
        },
        ResolveError::RateLimited { .. } | ResolveError::Exhausted { .. } => {
            ErrorType::LookupRateLimitExhausted
        }
        ResolveError::Status { status, .. } => match *status {
            404 => ErrorType::LookupNotFound,
            500..=599 => ErrorType::LookupServerError,
            _ => ErrorType::LookupOtherStatusError,
        },
        ResolveError::Decode { .. } => ErrorType::LookupDecodeError,
    }
}

/// Updates error statistics based on a `ResolveError`.
pub fn update_error_stats(error_stats: &ProcessingStats, error: &ResolveError) {
    error_stats.increment_error(categorize_resolve_error(error));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_transport_errors() {
        let timeout = ResolveError::Transport {
            probe_id: 1,
            source: TransportError::Timeout("deadline elapsed".into()),
        };
        let connect = ResolveError::Transport {
            probe_id: 1,
            source: TransportError::Connect("connection refused".into()),
        };
        let request = ResolveError::Transport {
            probe_id: 1,
            source: TransportError::Request("body closed".into()),
        };

        assert_eq!(
            categorize_resolve_error(&timeout),
            ErrorType::LookupTimeoutError
        );
        assert_eq!(
            categorize_resolve_error(&connect),
            ErrorType::LookupConnectError
        );
        assert_eq!(
            categorize_resolve_error(&request),
            ErrorType::LookupRequestError
        );
    }

    #[test]
    fn test_categorize_status_errors() {
        let status = |status| ResolveError::Status {
            probe_id: 9,
            status,
        };
        assert_eq!(
            categorize_resolve_error(&status(404)),
            ErrorType::LookupNotFound
        );
        assert_eq!(
            categorize_resolve_error(&status(500)),
            ErrorType::LookupServerError
        );
        assert_eq!(
            categorize_resolve_error(&status(503)),
            ErrorType::LookupServerError
        );
        assert_eq!(
            categorize_resolve_error(&status(403)),
            ErrorType::LookupOtherStatusError
        );
    }

    #[test]
    fn test_categorize_exhausted() {
        let exhausted = ResolveError::Exhausted {
            probe_id: 3,
            attempts: 5,
        };
        assert_eq!(
            categorize_resolve_error(&exhausted),
            ErrorType::LookupRateLimitExhausted
        );
    }

    #[test]
    fn test_update_error_stats_counts() {
        let stats = ProcessingStats::new();
        let err = ResolveError::Status {
            probe_id: 1,
            status: 404,
        };
        update_error_stats(&stats, &err);
        update_error_stats(&stats, &err);
        assert_eq!(stats.get_error_count(ErrorType::LookupNotFound), 2);
        assert_eq!(stats.total_errors(), 2);
    }
}
