//! HTTP request pipeline for the ThriveCart REST API
//!
//! This module provides:
//! - Request building with path-token substitution and query/body encoding
//! - Configurable header profiles (bearer or bare-token authentication)
//! - A pluggable transport boundary with a `reqwest` default
//! - Error classification and normalization

pub mod auth;
pub mod builder;
pub mod client;
pub mod error;
pub mod headers;
pub mod transport;

pub use auth::{AuthScheme, Credentials};
pub use builder::{Params, RequestBuilder, RequestSpec};
pub use client::HttpClient;
pub use error::{classify_error_body, ErrorPayload};
pub use headers::{HeaderProfile, HeaderSource};
pub use transport::{RawResponse, ReqwestTransport, Transport};

// Re-export commonly used types
pub use reqwest::{Method, StatusCode};
