// Shared test helpers: a scripted lookup service and resolver construction.
//
// Used by the pipeline tests that must not depend on a live HTTP server.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;

use probe_enrich::{
    BackoffPolicy, LocationLookup, LocationResolver, LookupResponse, ProbeId, TransportError,
};

/// What the stub answers for one request.
#[derive(Debug, Clone)]
pub struct StubReply {
    pub delay: Duration,
    pub response: Result<LookupResponse, &'static str>,
}

#[allow(dead_code)] // Each test file uses a different subset
impl StubReply {
    /// 200 with the given country code.
    pub fn country(code: &str) -> Self {
        Self {
            delay: Duration::ZERO,
            response: Ok(LookupResponse::new(
                200,
                format!(r#"{{"id": 1, "country_code": "{}"}}"#, code),
            )),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            delay: Duration::ZERO,
            response: Ok(LookupResponse::new(status, "")),
        }
    }

    /// No HTTP response at all.
    pub fn transport(reason: &'static str) -> Self {
        Self {
            delay: Duration::ZERO,
            response: Err(reason),
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

type Responder = dyn Fn(ProbeId) -> StubReply + Send + Sync;

/// Lookup service whose answers come from a closure.
pub struct StubLookup {
    responder: Box<Responder>,
    calls: AtomicUsize,
}

#[allow(dead_code)] // Each test file uses a different subset
impl StubLookup {
    pub fn new<F>(responder: F) -> Arc<Self>
    where
        F: Fn(ProbeId) -> StubReply + Send + Sync + 'static,
    {
        Arc::new(Self {
            responder: Box::new(responder),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocationLookup for StubLookup {
    async fn fetch(&self, probe_id: ProbeId) -> Result<LookupResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = (self.responder)(probe_id);
        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        reply
            .response
            .map_err(|reason| TransportError::Connect(reason.into()))
    }
}

/// Short backoff so rate-limit tests finish quickly.
#[allow(dead_code)] // Used by other test files
pub fn fast_policy() -> BackoffPolicy {
    BackoffPolicy::new(5, Duration::from_millis(10), Duration::from_millis(5))
}

/// Resolver over `lookup` with `fast_policy`.
#[allow(dead_code)] // Used by other test files
pub fn stub_resolver(lookup: Arc<StubLookup>) -> Arc<LocationResolver> {
    Arc::new(LocationResolver::new(lookup, fast_policy()))
}

/// Writes `contents` as `input.json` in a fresh temp dir.
#[allow(dead_code)] // Used by other test files
pub fn write_input(contents: &str) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("input.json");
    std::fs::write(&path, contents).expect("Failed to write input file");
    (dir, path)
}
