//! HTTP client orchestrating builder, transport and error normalization
//!
//! Each call is a single round trip: build, send, normalize. Nothing is
//! retried.

use std::sync::Arc;
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, warn};
use crate::config::{ClientConfig, Mode};
use crate::http::auth::Credentials;
use crate::http::builder::{check_path_tokens, Params, RequestBuilder, RequestSpec};
use crate::http::error;
use crate::http::transport::{RawResponse, ReqwestTransport, Transport};
use crate::{Error, Result};

/// Low-level client for the REST API
#[derive(Clone)]
pub struct HttpClient {
    transport: Arc<dyn Transport>,
    credentials: Credentials,
    config: ClientConfig,
    request_builder: RequestBuilder,
}

impl HttpClient {
    /// Create a client using the default `reqwest` transport
    pub fn new(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Self::with_transport(credentials, config, Arc::new(transport))
    }

    /// Create a client with a custom transport
    ///
    /// The configured timeout is not applied to custom transports.
    pub fn with_transport(
        credentials: Credentials,
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        credentials.validate_credentials()?;
        config.validate()?;

        let request_builder = RequestBuilder::new(&config, credentials.clone());
        Ok(Self {
            transport,
            credentials,
            config,
            request_builder,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn request_builder(&self) -> &RequestBuilder {
        &self.request_builder
    }

    /// Switch between live and test mode for this client only
    pub fn set_mode(&mut self, mode: Mode) {
        self.config.mode = mode;
        self.rebuild();
    }

    /// Point this client at a different base URI
    pub fn set_base_uri(&mut self, base_uri: impl Into<String>) -> Result<()> {
        let config = self.config.clone().with_base_uri(base_uri);
        config.validate()?;
        self.config = config;
        self.rebuild();
        Ok(())
    }

    fn rebuild(&mut self) {
        self.request_builder = RequestBuilder::new(&self.config, self.credentials.clone());
    }

    /// Build and send a request, returning the parsed response body
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        tokens: &[(&str, &str)],
        params: Option<&Params>,
    ) -> Result<Value> {
        check_path_tokens(tokens)?;
        let spec = self.request_builder.build(method, path, tokens, params);
        self.send(&spec).await
    }

    /// Send a pre-built request
    pub async fn send(&self, spec: &RequestSpec) -> Result<Value> {
        debug!(method = %spec.method, path = %spec.path, mode = %self.config.mode, "dispatching request");

        let response = self.transport.execute(spec).await.map_err(|e| {
            warn!(method = %spec.method, path = %spec.path, error = %e, "transport failure");
            e
        })?;

        parse_response(&response).map_err(|e| {
            warn!(
                method = %spec.method,
                path = %spec.path,
                status = response.status,
                kind = %e.kind(),
                error = %e,
                "request failed"
            );
            e
        })
    }
}

/// Parse a raw response into a JSON value or a normalized error
pub fn parse_response(response: &RawResponse) -> Result<Value> {
    if !response.is_success() {
        return Err(error::from_response(response));
    }

    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    serde_json::from_slice(&response.body).map_err(|e| Error::Transport {
        message: format!("Failed to parse response as JSON: {}", e),
        status_code: Some(response.status),
        source: Some(anyhow::Error::new(e)),
    })
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("credentials", &self.credentials)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
