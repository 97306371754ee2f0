//! Catalog boundary
//!
//! Fetches the remote app catalog and parses it as untrusted input through
//! the same validators as user data. A monotonic request token lets the
//! store discard results from superseded in-flight fetches, so a retry
//! racing a slow earlier fetch can never apply stale data.

use crate::apps::record::{AppOrigin, AppRecord};
use crate::error::{LaunchdeckError, Result, StringError};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};

/// HTTP timeout for catalog requests
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of raw catalog entries
///
/// Implementations return already-validated records; everything that is
/// not a usable app entry has been dropped at this boundary.
pub trait CatalogSource: Send + Sync {
    /// Fetch the catalog
    fn fetch(&self) -> Result<Vec<AppRecord>>;
}

/// Parse a raw catalog payload, skipping entries that fail validation
///
/// Accepts any JSON value; anything that is not an array of app-like
/// objects contributes nothing.
pub fn parse_catalog(value: &Value) -> Vec<AppRecord> {
    let Some(entries) = value.as_array() else {
        return Vec::new();
    };
    let records: Vec<AppRecord> = entries
        .iter()
        .filter_map(|entry| AppRecord::from_untrusted(entry, AppOrigin::Catalog))
        .collect();
    if records.len() < entries.len() {
        debug!(
            "Dropped {} invalid catalog entries of {}",
            entries.len() - records.len(),
            entries.len()
        );
    }
    records
}

/// Catalog source backed by an HTTP endpoint serving a JSON array
pub struct HttpCatalogSource {
    url: String,
}

impl HttpCatalogSource {
    /// Create a source for the given endpoint URL
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl CatalogSource for HttpCatalogSource {
    fn fetch(&self) -> Result<Vec<AppRecord>> {
        info!("Fetching catalog from {}", self.url);

        let client = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(format!("launchdeck/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                warn!("Failed to create HTTP client: {}", e);
                LaunchdeckError::FetchFailed(Box::new(e))
            })?;

        let response = client.get(&self.url).send().map_err(|e| {
            warn!("Catalog request failed: {}", e);
            LaunchdeckError::FetchFailed(Box::new(e))
        })?;

        if !response.status().is_success() {
            warn!("Catalog endpoint returned {}", response.status());
            return Err(LaunchdeckError::FetchFailed(StringError::new(format!(
                "catalog endpoint returned {}",
                response.status()
            ))));
        }

        let payload: Value = response.json().map_err(|e| {
            warn!("Catalog payload is not JSON: {}", e);
            LaunchdeckError::FetchFailed(Box::new(e))
        })?;

        let records = parse_catalog(&payload);
        info!("Catalog fetch returned {} records", records.len());
        Ok(records)
    }
}

/// Monotonic request token for in-flight catalog fetches
///
/// `begin` issues a new token and supersedes all earlier ones; a result is
/// only applied when its token is still current. Abandoned fetches (caller
/// torn down, retry issued) simply never apply.
#[derive(Debug, Default)]
pub struct FetchCoordinator {
    issued: AtomicU64,
}

impl FetchCoordinator {
    /// Create a coordinator with no fetch outstanding
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch, superseding any earlier in-flight one
    pub fn begin(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether `token` still identifies the most recent fetch
    pub fn is_current(&self, token: u64) -> bool {
        token == self.issued.load(Ordering::SeqCst)
    }
}
