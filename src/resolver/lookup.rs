//! Remote probe lookup service.
//!
//! `LocationLookup` is the seam between the resolver's retry loop and the
//! network: one call is one request, and the raw status and body are handed
//! back for the resolver to interpret. `AtlasClient` is the HTTP
//! implementation used by the binary.

use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use crate::error_handling::{InitializationError, TransportError};
use crate::models::ProbeId;

/// Raw response of one lookup request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResponse {
    pub status: u16,
    pub body: String,
}

impl LookupResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// A service that can be asked about one probe at a time.
#[async_trait]
pub trait LocationLookup: Send + Sync {
    /// Issues a single request for `probe_id`.
    ///
    /// Returns `Err` only when no HTTP response was obtained; every status
    /// code, including errors, comes back as `Ok`.
    async fn fetch(&self, probe_id: ProbeId) -> Result<LookupResponse, TransportError>;
}

/// HTTP lookup against the probe API (`GET {base}/{probe_id}/`).
#[derive(Debug, Clone)]
pub struct AtlasClient {
    client: Arc<reqwest::Client>,
    base_url: Url,
}

impl AtlasClient {
    /// Creates a client for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::InvalidBaseUrlError` if the URL does not
    /// parse or cannot carry a path (e.g. `mailto:`).
    pub fn new(client: Arc<reqwest::Client>, base_url: &str) -> Result<Self, InitializationError> {
        let invalid = |reason: String| InitializationError::InvalidBaseUrlError {
            url: base_url.to_string(),
            reason,
        };

        let mut url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(invalid("URL cannot be used as a base".to_string()));
        }
        // Without the trailing slash `join` would replace the last path segment.
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self {
            client,
            base_url: url,
        })
    }

    /// URL queried for `probe_id`.
    pub fn endpoint(&self, probe_id: ProbeId) -> Result<Url, url::ParseError> {
        self.base_url.join(&format!("{probe_id}/"))
    }
}

#[async_trait]
impl LocationLookup for AtlasClient {
    async fn fetch(&self, probe_id: ProbeId) -> Result<LookupResponse, TransportError> {
        let url = self
            .endpoint(probe_id)
            .map_err(|e| TransportError::Request(Box::new(e)))?;
        log::debug!("Looking up probe {} at {}", probe_id, url);

        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(LookupResponse { status, body })
    }
}
