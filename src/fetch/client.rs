//! Gateway status client.
//!
//! # Responsibilities
//! - Resolve the status endpoint from the configured base URL
//! - Issue one GET per pass with a bounded timeout
//! - Classify failures (transport, timeout, status, decode)
//!
//! # Design Decisions
//! - No retries here; the next poller tick is the retry
//! - Body is decoded separately from the transfer so a malformed document
//!   is reported as `Decode`, not as a transport error

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::config::SourceConfig;
use crate::fetch::types::Snapshot;

/// Errors that make a poll pass skip reconciliation.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Base URL or status path could not form an endpoint.
    #[error("invalid status endpoint: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    /// Connection or transfer failed.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),

    /// No response within the configured timeout.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Gateway answered with a non-success status.
    #[error("gateway returned status {0}")]
    Status(u16),

    /// Body was not a valid status document.
    #[error("malformed status document: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Anything that can produce a status snapshot.
pub trait SnapshotSource: Send + Sync {
    fn fetch(&self) -> impl Future<Output = Result<Snapshot, FetchError>> + Send;
}

/// Fetches snapshots from the gateway over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSnapshotFetcher {
    client: reqwest::Client,
    url: Url,
    timeout_ms: u64,
}

impl HttpSnapshotFetcher {
    pub fn new(config: &SourceConfig) -> Result<Self, FetchError> {
        let url = status_url(&config.base_url, &config.status_path)?;
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(FetchError::Client)?;

        tracing::debug!(url = %url, timeout_ms = config.timeout_ms, "Status fetcher ready");

        Ok(Self {
            client,
            url,
            timeout_ms: config.timeout_ms,
        })
    }

    /// The resolved status endpoint.
    pub fn url(&self) -> &Url {
        &self.url
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout_ms)
        } else {
            FetchError::Transport(err)
        }
    }
}

impl SnapshotSource for HttpSnapshotFetcher {
    async fn fetch(&self) -> Result<Snapshot, FetchError> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Join the status path onto the base URL.
///
/// The base is treated as a directory even without a trailing slash, so
/// `http://gw/revolver` + `v1/metadata/status` keeps the `revolver` segment.
/// A status path starting with `/` is absolute on the host.
pub fn status_url(base_url: &str, status_path: &str) -> Result<Url, url::ParseError> {
    let mut base = Url::parse(base_url)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(status_path)
}
