//! Application initialization and resource setup.
//!
//! This module provides functions to initialize all shared resources:
//! - Logger
//! - HTTP client
//! - Probe lookup resolver
//! - Concurrency semaphore

mod client;
mod logger;

use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::config::Config;
use crate::error_handling::InitializationError;
use crate::resolver::{AtlasClient, LocationLookup, LocationResolver};

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;

/// Initializes a semaphore for controlling concurrency.
///
/// Creates a new semaphore with the specified permit count (at least one).
/// This semaphore limits the number of lookups in flight at once.
pub fn init_semaphore(count: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(count.max(1)))
}

/// Initializes the location resolver backed by the HTTP probe API.
///
/// # Errors
///
/// Returns an `InitializationError` if the HTTP client cannot be built or the
/// configured base URL is invalid.
pub fn init_resolver(config: &Config) -> Result<Arc<LocationResolver>, InitializationError> {
    let client = init_client(config)?;
    let lookup: Arc<dyn LocationLookup> = Arc::new(AtlasClient::new(client, &config.api_url)?);
    Ok(Arc::new(LocationResolver::new(
        lookup,
        config.backoff_policy(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_semaphore_permits() {
        assert_eq!(init_semaphore(7).available_permits(), 7);
    }

    #[test]
    fn test_init_semaphore_never_zero() {
        assert_eq!(init_semaphore(0).available_permits(), 1);
    }

    #[test]
    fn test_init_resolver_uses_config_policy() {
        let config = Config {
            max_attempts: 2,
            ..Default::default()
        };
        let resolver = init_resolver(&config).expect("default config is valid");
        assert_eq!(resolver.policy().max_attempts(), 2);
    }

    #[test]
    fn test_init_resolver_rejects_bad_url() {
        let config = Config {
            api_url: "::::".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            init_resolver(&config),
            Err(InitializationError::InvalidBaseUrlError { .. })
        ));
    }
}
