//! Transport boundary
//!
//! A [`Transport`] performs one HTTP exchange for a [`RequestSpec`]. It
//! returns whatever response it received, success or not; only failures that
//! produced no response at all are errors. Retries, pooling and TLS belong to
//! the implementation, never to the client.

use std::time::Duration;
use async_trait::async_trait;
use tracing::debug;
use crate::http::builder::RequestSpec;
use crate::{Error, Result};

/// Raw response returned by a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub reason: Option<String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            reason: None,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8, replacing invalid sequences
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Performs HTTP exchanges on behalf of the client
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a request and return the raw response
    ///
    /// Returns `Error::Transport` only when no response was received.
    async fn execute(&self, request: &RequestSpec) -> Result<RawResponse>;
}

/// Default transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Create a transport with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Configuration {
                message: format!("Failed to create HTTP client: {}", e),
                source: Some(anyhow::Error::new(e)),
            })?;

        Ok(Self { client, timeout })
    }

    /// Wrap an existing `reqwest` client, e.g. to share a connection pool
    pub fn with_client(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: &RequestSpec) -> Result<RawResponse> {
        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .timeout(self.timeout);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| Error::Transport {
            message: e.to_string(),
            status_code: None,
            source: Some(anyhow::Error::new(e)),
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| Error::Transport {
            message: format!("Failed to read response body: {}", e),
            status_code: Some(status.as_u16()),
            source: Some(anyhow::Error::new(e)),
        })?;

        debug!(status = status.as_u16(), bytes = body.len(), "response received");

        Ok(RawResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().map(str::to_string),
            body: body.to_vec(),
        })
    }
}
