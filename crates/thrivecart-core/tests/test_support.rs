//! Shared test support utilities for integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use serde_json::Value;
use thrivecart_core::{ClientConfig, Params, RawResponse, RequestSpec, Result, ThriveCart, Transport};

/// Transport that records every request and answers with a fixed response
pub struct RecordingTransport {
    requests: Mutex<Vec<RequestSpec>>,
    response: RawResponse,
}

impl RecordingTransport {
    pub fn new(response: RawResponse) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            response,
        })
    }

    pub fn ok() -> Arc<Self> {
        Self::new(RawResponse::new(200, r#"{"success":true}"#))
    }

    pub fn requests(&self) -> Vec<RequestSpec> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> RequestSpec {
        self.requests().pop().expect("no request was sent")
    }

    pub fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn execute(&self, request: &RequestSpec) -> Result<RawResponse> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.response.clone())
    }
}

/// Client wired to a recording transport
pub fn recording_client() -> (ThriveCart, Arc<RecordingTransport>) {
    let transport = RecordingTransport::ok();
    let client = ThriveCart::with_transport(
        "test-token",
        ClientConfig::default().with_base_uri("https://api.example.com"),
        transport.clone(),
    )
    .expect("client");
    (client, transport)
}

/// Client pointed at a mock server
pub fn client_for(base_uri: &str) -> ThriveCart {
    ThriveCart::with_config("test-token", ClientConfig::default().with_base_uri(base_uri))
        .expect("client")
}

/// Build a payload from a JSON object literal
pub fn params(value: Value) -> Params {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}
