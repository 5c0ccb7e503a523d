use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// One-shot HTTPS GET used by every adapter.
///
/// Implementations return the full response body as text; interpreting it
/// (including error payloads) is up to the adapter.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str) -> Result<String>;
}

/// Transport backed by a shared `reqwest` client with a request timeout
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport whose requests give up after `timeout`.
    ///
    /// # Panics
    /// Panics if the HTTP client cannot be created, which should only happen
    /// in extreme circumstances (e.g., TLS backend unavailable on the system).
    #[allow(clippy::expect_used)]
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

// Query strings carry app keys and signatures, keep them out of messages
fn map_reqwest_error(e: reqwest::Error) -> Error {
    let e = e.without_url();
    if e.is_timeout() {
        Error::TranslationTimeout
    } else {
        Error::Transport(e.to_string())
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<String> {
        let host = reqwest::Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_owned))
            .unwrap_or_default();
        debug!("GET {}", host);

        let response = self.client.get(url).send().await.map_err(|e| {
            let e = map_reqwest_error(e);
            warn!("Request to {} failed: {}", host, e);
            e
        })?;

        let status = response.status();
        if !status.is_success() {
            // Providers report most failures in the body, so keep reading it
            warn!("Upstream answered HTTP {}", status);
        }

        let body = response.text().await.map_err(map_reqwest_error)?;
        debug!("Received {} bytes (HTTP {})", body.len(), status);
        Ok(body)
    }
}
