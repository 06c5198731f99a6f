//! Authentication handling for the ThriveCart API
//!
//! Supports two `Authorization` header formats:
//! - Bearer tokens (current API)
//! - Bare tokens (earliest API revision)

use std::fmt;
use crate::{Error, Result};

/// How the access token is rendered into the `Authorization` header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthScheme {
    /// `Authorization: Bearer <token>`
    Bearer,
    /// `Authorization: <token>`
    BareToken,
}

/// Access token owned by a client for its lifetime
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_token: String,
}

impl Credentials {
    /// Create with an explicit access token
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }

    /// Create from the `THRIVECART_ACCESS_TOKEN` environment variable
    pub fn from_env() -> Result<Self> {
        std::env::var("THRIVECART_ACCESS_TOKEN")
            .map(Self::new)
            .map_err(|_| {
                Error::configuration(
                    "ThriveCart access token not found. Set THRIVECART_ACCESS_TOKEN environment variable",
                )
            })
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Render the `Authorization` header value for `scheme`
    pub fn authorization_value(&self, scheme: AuthScheme) -> String {
        match scheme {
            AuthScheme::Bearer => format!("Bearer {}", self.access_token),
            AuthScheme::BareToken => self.access_token.clone(),
        }
    }

    /// Validate that a usable token is present
    pub fn validate_credentials(&self) -> Result<()> {
        if self.access_token.trim().is_empty() {
            return Err(Error::configuration("ThriveCart access token not configured"));
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"***")
            .finish()
    }
}
