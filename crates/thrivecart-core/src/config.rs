//! Client configuration
//!
//! Mode and base URI live on each client instance; there is no shared
//! process-wide setting.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::http::headers::HeaderProfile;
use crate::{Error, Result};

/// Production base URI
pub const DEFAULT_BASE_URI: &str = "https://thrivecart.com";

/// Path prefix of the REST API below the base URI
pub const API_ENDPOINT: &str = "/api/external";

/// API version announced in the `X-TC-Version` header
pub const API_VERSION: &str = "1.0.0";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Operating environment sent to the API with every request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Live,
    Test,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Live => "live",
            Mode::Test => "test",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "live" => Ok(Mode::Live),
            "test" => Ok(Mode::Test),
            other => Err(Error::configuration(format!(
                "Invalid mode provided to the API (\"{}\").",
                other
            ))),
        }
    }
}

/// Configuration for a [`crate::ThriveCart`] client
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Scheme and host of the API, without trailing slash
    pub base_uri: String,
    /// Path prefix appended to `base_uri`
    pub endpoint: String,
    /// Live or test mode
    pub mode: Mode,
    /// Request timeout handed to the transport
    pub timeout: Duration,
    /// Version reported in the SDK header
    pub sdk_version: String,
    /// API version reported in the version header
    pub api_version: String,
    /// Headers attached to every request
    pub header_profile: HeaderProfile,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_uri: DEFAULT_BASE_URI.to_string(),
            endpoint: API_ENDPOINT.to_string(),
            mode: Mode::default(),
            timeout: DEFAULT_TIMEOUT,
            sdk_version: crate::VERSION.to_string(),
            api_version: API_VERSION.to_string(),
            header_profile: HeaderProfile::current(),
        }
    }
}

impl ClientConfig {
    /// Override the base URI (development and test environments)
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = base_uri.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_header_profile(mut self, profile: HeaderProfile) -> Self {
        self.header_profile = profile;
        self
    }

    /// Full URL prefix that request paths are appended to
    pub fn api_root(&self) -> String {
        format!("{}{}", self.base_uri, self.endpoint)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.base_uri).map_err(|e| Error::Configuration {
            message: format!("Invalid base URI: {}", self.base_uri),
            source: Some(anyhow::Error::new(e)),
        })?;

        if parsed.host_str().is_none() {
            return Err(Error::configuration(format!(
                "Base URI has no host: {}",
                self.base_uri
            )));
        }

        if self.timeout.is_zero() {
            return Err(Error::configuration("Request timeout cannot be zero"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_uri, "https://thrivecart.com");
        assert_eq!(config.api_root(), "https://thrivecart.com/api/external");
        assert_eq!(config.mode, Mode::Live);
        assert_eq!(config.timeout, Duration::from_secs(20));
        assert_eq!(config.api_version, "1.0.0");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("live".parse::<Mode>().unwrap(), Mode::Live);
        assert_eq!("test".parse::<Mode>().unwrap(), Mode::Test);

        let err = "staging".parse::<Mode>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid mode provided to the API (\"staging\")."
        );
    }

    #[test]
    fn test_base_uri_trailing_slash_trimmed() {
        let config = ClientConfig::default().with_base_uri("http://dev-thrivecart.com/");
        assert_eq!(config.api_root(), "http://dev-thrivecart.com/api/external");
    }

    #[test]
    fn test_invalid_config() {
        assert!(ClientConfig::default().with_base_uri("not a uri").validate().is_err());
        assert!(ClientConfig::default()
            .with_timeout(Duration::ZERO)
            .validate()
            .is_err());
    }
}
