//! Error types and handling for the CLI
//!
//! Wraps the library error and adds the failure modes of the CLI itself
//! (config files, argument parsing, serialization of output).

use std::io;
use std::path::PathBuf;
use thrivecart_core::ErrorKind;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from the ThriveCart client
    #[error("{0}")]
    Core(#[from] thrivecart_core::Error),

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Invalid file format
    #[error("Invalid file format for {}: expected {} format", path.display(), expected)]
    InvalidFormat { path: PathBuf, expected: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument value
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    /// No access token from any configuration layer
    #[error("Access token required. Set via --access-token, THRIVECART_ACCESS_TOKEN or the config file")]
    MissingToken,

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML deserialization error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Generic error with context
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid arguments error
    pub fn invalid_args(message: impl Into<String>) -> Self {
        Self::InvalidArgs(message.into())
    }

    /// Create a generic error with message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Core(e) => match e.kind() {
                ErrorKind::Validation => 2,
                ErrorKind::Configuration => 5,
                ErrorKind::Transport => 10,
                ErrorKind::Remote => 11,
                ErrorKind::Json => 12,
            },
            Self::FileNotFound { .. } => 3,
            Self::InvalidFormat { .. } => 4,
            Self::Config(_) => 5,
            Self::InvalidArgs(_) => 6,
            Self::MissingToken => 9,
            Self::Json(_) => 12,
            Self::Yaml(_) => 13,
            Self::Toml(_) => 14,
            Self::Other { .. } => 99,
        }
    }

    /// Check if this error should display usage help
    pub fn should_show_help(&self) -> bool {
        matches!(self, Self::InvalidArgs(_) | Self::MissingToken)
    }
}

/// Format an error for display to the user
///
/// Library errors are labelled with their category; remote errors also show
/// the HTTP status and server error code when present.
pub fn format_error(error: &Error, use_color: bool) -> String {
    let label = match error {
        Error::Core(core) => format!("Error ({}):", core.kind()),
        _ => "Error:".to_string(),
    };

    let mut message = error.to_string();
    if let Error::Core(core @ thrivecart_core::Error::Remote { .. }) = error {
        if let Some(status) = core.status_code() {
            message.push_str(&format!(" [HTTP {}", status));
            if let Some(code) = core.code().filter(|c| *c != status.to_string()) {
                message.push_str(&format!(", {}", code));
            }
            message.push(']');
        }
    }

    if use_color {
        use colored::Colorize;
        format!("{} {}", label.red().bold(), message)
    } else {
        format!("{} {}", label, message)
    }
}
