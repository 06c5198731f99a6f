//! Error types for the ThriveCart client
//!
//! Every failure surfaced by the client falls into one of three families:
//! local validation failures (nothing was sent), transport failures (no usable
//! response) and remote failures (the API answered with an error payload).
//! Configuration and JSON errors cover the remaining plumbing.

use std::fmt;
use serde_json::Value;
use thiserror::Error;

/// Main error type for ThriveCart client operations
#[derive(Error, Debug)]
pub enum Error {
    /// A parameter failed a pre-flight check; no request was built or sent
    #[error("{message}")]
    Validation {
        /// Name of the offending parameter
        field: String,
        message: String,
    },

    /// The request could not be completed or the response could not be used
    #[error("{message}")]
    Transport {
        message: String,
        status_code: Option<u16>,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// The API responded with a structured error payload
    #[error("{message}")]
    Remote {
        message: String,
        status_code: Option<u16>,
        /// Server-supplied error code (`error` field or `status` in the older convention)
        code: Option<String>,
        /// Server-supplied reason string
        reason: Option<String>,
        /// The parsed error payload
        details: Option<Value>,
    },

    /// Client configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// JSON serialization errors for outgoing payloads
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Discriminant of [`Error`] for callers that only need the category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Transport,
    Remote,
    Configuration,
    Json,
}

impl Error {
    /// Create a validation error for `field`
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a transport error without an underlying source
    pub fn transport(message: impl Into<String>, status_code: Option<u16>) -> Self {
        Error::Transport {
            message: message.into(),
            status_code,
            source: None,
        }
    }

    /// Create a configuration error without an underlying source
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// The error category
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation { .. } => ErrorKind::Validation,
            Error::Transport { .. } => ErrorKind::Transport,
            Error::Remote { .. } => ErrorKind::Remote,
            Error::Configuration { .. } => ErrorKind::Configuration,
            Error::Json { .. } => ErrorKind::Json,
        }
    }

    /// Machine-checkable code, where one is available
    ///
    /// Validation errors report the offending field, transport errors the
    /// HTTP status, and remote errors the server error code (falling back to
    /// the HTTP status).
    pub fn code(&self) -> Option<String> {
        match self {
            Error::Validation { field, .. } => Some(field.clone()),
            Error::Transport { status_code, .. } => status_code.map(|s| s.to_string()),
            Error::Remote { code, status_code, .. } => code
                .clone()
                .or_else(|| status_code.map(|s| s.to_string())),
            Error::Configuration { .. } | Error::Json { .. } => None,
        }
    }

    /// HTTP status of the failed exchange, if a response was received
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Transport { status_code, .. } | Error::Remote { status_code, .. } => *status_code,
            _ => None,
        }
    }

    /// The human-readable message without any category prefix
    pub fn message(&self) -> &str {
        match self {
            Error::Validation { message, .. }
            | Error::Transport { message, .. }
            | Error::Remote { message, .. }
            | Error::Configuration { message, .. }
            | Error::Json { message, .. } => message,
        }
    }

    /// True when the failure happened before anything was sent
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Validation => write!(f, "validation"),
            ErrorKind::Transport => write!(f, "transport"),
            ErrorKind::Remote => write!(f, "remote"),
            ErrorKind::Configuration => write!(f, "configuration"),
            ErrorKind::Json => write!(f, "json"),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport {
            message: err.to_string(),
            status_code: err.status().map(|s| s.as_u16()),
            source: Some(anyhow::Error::new(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_is_bare_message() {
        let err = Error::validation("order_id", "You must provide a valid order ID to refund (you provided \"x\").");
        assert_eq!(
            err.to_string(),
            "You must provide a valid order ID to refund (you provided \"x\")."
        );
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.code().as_deref(), Some("order_id"));
        assert!(err.is_validation());
    }

    #[test]
    fn test_remote_code_falls_back_to_status() {
        let err = Error::Remote {
            message: "[not_found]".to_string(),
            status_code: Some(404),
            code: None,
            reason: None,
            details: None,
        };
        assert_eq!(err.code().as_deref(), Some("404"));
        assert_eq!(err.status_code(), Some(404));
    }

    #[test]
    fn test_transport_code_is_status() {
        let err = Error::transport("gateway timeout", Some(504));
        assert_eq!(err.code().as_deref(), Some("504"));
        assert_eq!(Error::transport("dns failure", None).code(), None);
    }

    #[test]
    fn test_configuration_display() {
        let err = Error::configuration("access token is empty");
        assert_eq!(err.to_string(), "Configuration error: access token is empty");
        assert_eq!(err.message(), "access token is empty");
        assert_eq!(err.kind().to_string(), "configuration");
    }
}
