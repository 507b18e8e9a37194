//! Probe location resolution with rate-limit backoff.
//!
//! `LocationResolver::resolve` asks the lookup service for one probe and
//! retries only when the service answers 429, sleeping according to a
//! `BackoffPolicy` between attempts. Every other failure ends the loop
//! immediately. Whatever happens, the caller gets a `LocationInfo` back:
//! failures resolve to "Unknown"/"Unknown" alongside the error.

mod backoff;
mod lookup;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use log::{debug, warn};
use serde::Deserialize;
use tokio_retry::RetryIf;

use crate::config::{HTTP_STATUS_TOO_MANY_REQUESTS, UNKNOWN};
use crate::error_handling::ResolveError;
use crate::models::{LocationInfo, ProbeId};

pub use backoff::BackoffPolicy;
pub use lookup::{AtlasClient, LocationLookup, LookupResponse};

/// Fields of the probe document the resolver reads.
#[derive(Debug, Deserialize)]
struct ProbeApiResponse {
    #[serde(default)]
    country_code: Option<String>,
    #[serde(default)]
    continent_code: Option<String>,
}

/// Result of resolving one probe.
#[derive(Debug)]
pub struct ResolveOutcome {
    /// Resolved location, or "Unknown"/"Unknown" when `error` is set.
    pub location: LocationInfo,
    /// Number of requests issued (initial attempt included).
    pub attempts: usize,
    /// Why the lookup failed, if it did.
    pub error: Option<ResolveError>,
}

impl ResolveOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Splits the outcome into `(country, continent, error)`.
    pub fn into_parts(self) -> (String, String, Option<ResolveError>) {
        (self.location.country, self.location.continent, self.error)
    }
}

/// Resolves probe ids to locations through a `LocationLookup`.
///
/// Cheap to share: wrap in `Arc` and clone into tasks.
pub struct LocationResolver {
    lookup: Arc<dyn LocationLookup>,
    policy: BackoffPolicy,
}

impl LocationResolver {
    pub fn new(lookup: Arc<dyn LocationLookup>, policy: BackoffPolicy) -> Self {
        Self { lookup, policy }
    }

    pub fn policy(&self) -> &BackoffPolicy {
        &self.policy
    }

    /// Resolves `probe_id`, retrying rate-limited attempts up to the policy ceiling.
    pub async fn resolve(&self, probe_id: ProbeId) -> ResolveOutcome {
        let attempt_count = AtomicUsize::new(0);
        let counter = &attempt_count;

        let strategy = self.policy.strategy().inspect(move |delay| {
            debug!("Probe {}: waiting {:?} before next attempt", probe_id, delay);
        });

        let result = RetryIf::start(
            strategy,
            move || {
                let attempt = counter.fetch_add(1, Ordering::SeqCst);
                self.attempt(probe_id, attempt)
            },
            ResolveError::is_rate_limited,
        )
        .await;

        let attempts = attempt_count.load(Ordering::SeqCst);
        match result {
            Ok(location) => ResolveOutcome {
                location,
                attempts,
                error: None,
            },
            Err(ResolveError::RateLimited { .. }) => ResolveOutcome {
                location: LocationInfo::unknown(),
                attempts,
                error: Some(ResolveError::Exhausted { probe_id, attempts }),
            },
            Err(error) => ResolveOutcome {
                location: LocationInfo::unknown(),
                attempts,
                error: Some(error),
            },
        }
    }

    /// One request and the interpretation of its response.
    async fn attempt(&self, probe_id: ProbeId, attempt: usize) -> Result<LocationInfo, ResolveError> {
        let response = self
            .lookup
            .fetch(probe_id)
            .await
            .map_err(|source| ResolveError::Transport { probe_id, source })?;

        match response.status {
            200 => decode_location(probe_id, &response.body),
            HTTP_STATUS_TOO_MANY_REQUESTS => {
                warn!(
                    "Attempt {}/{} for probe {} was rate limited (429)",
                    attempt + 1,
                    self.policy.max_attempts(),
                    probe_id
                );
                Err(ResolveError::RateLimited {
                    probe_id,
                    attempt: attempt + 1,
                })
            }
            status => Err(ResolveError::Status { probe_id, status }),
        }
    }
}

fn decode_location(probe_id: ProbeId, body: &str) -> Result<LocationInfo, ResolveError> {
    let probe: ProbeApiResponse =
        serde_json::from_str(body).map_err(|source| ResolveError::Decode { probe_id, source })?;

    let country = probe
        .country_code
        .map(|code| code.trim().to_string())
        .filter(|code| !code.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string());

    debug!(
        "Probe {} located in {} (continent code {})",
        probe_id,
        country,
        probe.continent_code.as_deref().unwrap_or("-")
    );

    Ok(LocationInfo::from_country(country))
}
