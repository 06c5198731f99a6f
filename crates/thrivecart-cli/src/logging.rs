//! Logging utilities for the ThriveCart CLI
//!
//! This module provides:
//! - Session request ID generation
//! - Token and secret redaction
//! - Timing spans
//! - Subscriber setup in compact, full or JSON format
//!
//! Logs always go to stderr so stdout stays machine-readable.

use crate::config::LoggingSettings;
use crate::error::{Error, Result};
use std::io::IsTerminal;
use std::sync::OnceLock;
use tracing::{field, Span};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Environment variable selecting the log format
pub const ENV_LOG_FORMAT: &str = "THRIVECART_LOG_FORMAT";

/// Global request ID for the current session
static REQUEST_ID: OnceLock<String> = OnceLock::new();

/// Logging configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Log level filter
    pub level: String,
    /// Output format: compact, full, json
    pub format: LogFormat,
    /// Include thread IDs
    pub thread_ids: bool,
    /// Include file and line numbers
    pub source_location: bool,
    /// Log span close events with their timing
    pub span_events: bool,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact format for everyday use
    Compact,
    /// Full format with all details
    Full,
    /// JSON structured format
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "compact" => Some(LogFormat::Compact),
            "full" => Some(LogFormat::Full),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Compact,
            thread_ids: false,
            source_location: false,
            span_events: false,
        }
    }
}

impl LoggingConfig {
    /// Create logging config from verbosity level
    pub fn from_verbosity(verbosity: u8) -> Self {
        let mut config = Self::default();

        match verbosity {
            0 => {}
            1 => {
                config.level = "info".to_string();
            }
            2 => {
                config.level = "debug".to_string();
                config.source_location = true;
            }
            _ => {
                config.level = "trace".to_string();
                config.format = LogFormat::Full;
                config.source_location = true;
                config.thread_ids = true;
                config.span_events = true;
            }
        }

        config
    }

    /// Quiet mode only logs errors
    pub fn quiet() -> Self {
        Self {
            level: "error".to_string(),
            ..Self::default()
        }
    }

    /// Apply the config file's logging section
    ///
    /// The file's level only applies when no -v flag raised verbosity.
    pub fn apply_settings(&mut self, settings: &LoggingSettings, verbosity: u8) {
        if verbosity == 0 {
            if let Some(level) = &settings.level {
                self.level = level.clone();
            }
        }
        if let Some(format) = settings.format.as_deref().and_then(LogFormat::parse) {
            self.format = format;
        }
    }

    /// Apply environment overrides
    pub fn merge_with_env(&mut self) {
        self.merge_with_env_from(|key| std::env::var(key).ok());
    }

    /// Apply environment overrides read through `lookup`
    pub fn merge_with_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // RUST_LOG takes precedence
        if let Some(rust_log) = lookup("RUST_LOG") {
            self.level = rust_log;
        }

        if let Some(format) = lookup(ENV_LOG_FORMAT) {
            match LogFormat::parse(&format) {
                Some(parsed) => self.format = parsed,
                None => tracing::warn!("Invalid log format: {}, using default", format),
            }
        }
    }
}

/// Initialize the global logging system
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_new(&config.level)
        .map_err(|e| Error::config(format!("Invalid log filter {:?}: {}", config.level, e)))?;
    let span_events = if config.span_events {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };
    let ansi = std::io::stderr().is_terminal();

    // One subscriber type per format
    match config.format {
        LogFormat::Compact => {
            let subscriber = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(ansi)
                .with_thread_ids(config.thread_ids)
                .with_file(config.source_location)
                .with_line_number(config.source_location)
                .with_span_events(span_events)
                .compact()
                .finish();

            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| Error::other(format!("Failed to initialize logging: {}", e)))?;
        }
        LogFormat::Json => {
            let subscriber = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(false)
                .with_thread_ids(config.thread_ids)
                .with_file(config.source_location)
                .with_line_number(config.source_location)
                .with_span_events(span_events)
                .json()
                .finish();

            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| Error::other(format!("Failed to initialize logging: {}", e)))?;
        }
        LogFormat::Full => {
            let subscriber = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(ansi)
                .with_thread_ids(config.thread_ids)
                .with_file(config.source_location)
                .with_line_number(config.source_location)
                .with_span_events(span_events)
                .finish();

            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| Error::other(format!("Failed to initialize logging: {}", e)))?;
        }
    }

    let request_id = generate_request_id();
    REQUEST_ID
        .set(request_id.clone())
        .map_err(|_| Error::other("Request ID already set"))?;

    tracing::debug!(request_id = %request_id, config = ?config, "Logging system initialized");

    Ok(())
}

/// Generate a unique request ID for this session
pub fn generate_request_id() -> String {
    format!("req_{}", Uuid::new_v4().simple())
}

/// Get the current request ID
pub fn current_request_id() -> Option<&'static str> {
    REQUEST_ID.get().map(|s| s.as_str())
}

/// Create a span tagged with the request ID
pub fn create_operation_span(operation: &str, details: Option<&str>) -> Span {
    tracing::info_span!(
        "operation",
        operation = operation,
        request_id = current_request_id().unwrap_or("unknown"),
        details = details.unwrap_or(""),
        duration_ms = field::Empty,
    )
}

/// Token and secret redaction
pub mod redaction {
    use regex::Regex;
    use serde_json::Value;
    use std::sync::OnceLock;

    const MASK: &str = "***";

    static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();
    static SECRET_REGEX: OnceLock<Regex> = OnceLock::new();

    fn token_regex() -> &'static Regex {
        TOKEN_REGEX.get_or_init(|| {
            Regex::new(r#"(?i)(access[_-]?token|refresh[_-]?token|token|bearer)([=:\s]+)['"]?[A-Za-z0-9_.~+/-]{6,}=*['"]?"#)
                .expect("token pattern is valid")
        })
    }

    fn secret_regex() -> &'static Regex {
        SECRET_REGEX.get_or_init(|| {
            Regex::new(r#"(?i)(client[_-]?secret|secret|api[_-]?key|password)([=:\s]+)['"]?[^\s'"&,}]{3,}['"]?"#)
                .expect("secret pattern is valid")
        })
    }

    /// Mask tokens and secrets in free text
    pub fn redact_sensitive(input: &str) -> String {
        let result = token_regex().replace_all(input, format!("${{1}}${{2}}{}", MASK));
        secret_regex()
            .replace_all(&result, format!("${{1}}${{2}}{}", MASK))
            .into_owned()
    }

    /// Mask sensitive keys and strings in a JSON value
    pub fn redact_json_value(value: &mut Value) {
        match value {
            Value::Object(map) => {
                for (key, val) in map.iter_mut() {
                    if is_sensitive_key(key) {
                        *val = Value::String(MASK.to_string());
                    } else {
                        redact_json_value(val);
                    }
                }
            }
            Value::Array(items) => items.iter_mut().for_each(redact_json_value),
            Value::String(s) => *s = redact_sensitive(s),
            _ => {}
        }
    }

    /// Check if a JSON key names credential material
    pub fn is_sensitive_key(key: &str) -> bool {
        let key = key.to_lowercase();
        key.contains("token")
            || key.contains("secret")
            || key.contains("password")
            || key == "authorization"
            || key.ends_with("api_key")
    }
}

/// Timing utilities
pub mod timing {
    use std::time::{Duration, Instant};
    use tracing::Span;

    /// A timer that logs its duration when dropped
    pub struct Timer {
        start: Instant,
        span: Span,
        operation: String,
    }

    impl Timer {
        pub fn new(operation: &str) -> Self {
            Self {
                start: Instant::now(),
                span: super::create_operation_span(operation, None),
                operation: operation.to_string(),
            }
        }

        pub fn with_details(operation: &str, details: &str) -> Self {
            Self {
                start: Instant::now(),
                span: super::create_operation_span(operation, Some(details)),
                operation: operation.to_string(),
            }
        }

        /// Span that work measured by this timer should run in
        pub fn span(&self) -> &Span {
            &self.span
        }

        /// Get elapsed time without finishing the timer
        pub fn elapsed(&self) -> Duration {
            self.start.elapsed()
        }
    }

    impl Drop for Timer {
        fn drop(&mut self) {
            let duration = self.start.elapsed();
            self.span.record("duration_ms", duration.as_millis() as u64);

            tracing::debug!(
                operation = %self.operation,
                duration_ms = duration.as_millis() as u64,
                "Operation completed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::redaction::*;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_id_format() {
        let id = generate_request_id();
        assert!(id.starts_with("req_"));
        assert_eq!(id.len(), 36);
        assert_ne!(id, generate_request_id());
    }

    #[test]
    fn test_from_verbosity() {
        assert_eq!(LoggingConfig::from_verbosity(0).level, "warn");
        assert_eq!(LoggingConfig::from_verbosity(1).level, "info");

        let debug = LoggingConfig::from_verbosity(2);
        assert_eq!(debug.level, "debug");
        assert!(debug.source_location);

        let trace = LoggingConfig::from_verbosity(5);
        assert_eq!(trace.level, "trace");
        assert_eq!(trace.format, LogFormat::Full);
        assert!(trace.span_events);
    }

    #[test]
    fn test_apply_settings() {
        let settings = LoggingSettings {
            level: Some("info".to_string()),
            format: Some("json".to_string()),
        };

        let mut config = LoggingConfig::from_verbosity(0);
        config.apply_settings(&settings, 0);
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Json);

        let mut config = LoggingConfig::from_verbosity(2);
        config.apply_settings(&settings, 2);
        assert_eq!(config.level, "debug");
    }

    #[test]
    fn test_merge_with_env() {
        let mut config = LoggingConfig::default();
        config.merge_with_env_from(|key| match key {
            "RUST_LOG" => Some("thrivecart_core=trace".to_string()),
            ENV_LOG_FORMAT => Some("JSON".to_string()),
            _ => None,
        });
        assert_eq!(config.level, "thrivecart_core=trace");
        assert_eq!(config.format, LogFormat::Json);

        let mut config = LoggingConfig::default();
        config.merge_with_env_from(|key| (key == ENV_LOG_FORMAT).then(|| "fancy".to_string()));
        assert_eq!(config.format, LogFormat::Compact);
    }

    #[test]
    fn test_redact_tokens() {
        let redacted = redact_sensitive("Authorization: Bearer abcdef123456");
        assert!(!redacted.contains("abcdef123456"));
        assert!(redacted.contains("Bearer ***"));

        let redacted = redact_sensitive("access_token=tok_9f8e7d6c5b");
        assert_eq!(redacted, "access_token=***");
    }

    #[test]
    fn test_redact_secrets() {
        let redacted = redact_sensitive("client_secret: s3cr3t-value");
        assert!(!redacted.contains("s3cr3t-value"));
        assert_eq!(redact_sensitive("order 1234 refunded"), "order 1234 refunded");
    }

    #[test]
    fn test_redact_json_value() {
        let mut value = json!({
            "access_token": "abc",
            "account": {"client_secret": "xyz", "name": "me@shop.test"},
            "notes": ["token=abcdefghijk"],
            "order_id": 12
        });
        redact_json_value(&mut value);
        assert_eq!(value["access_token"], "***");
        assert_eq!(value["account"]["client_secret"], "***");
        assert_eq!(value["account"]["name"], "me@shop.test");
        assert_eq!(value["notes"][0], "token=***");
        assert_eq!(value["order_id"], 12);
    }

    #[test]
    fn test_sensitive_keys() {
        assert!(is_sensitive_key("Authorization"));
        assert!(is_sensitive_key("refresh_token"));
        assert!(!is_sensitive_key("product_id"));
        assert!(!is_sensitive_key("author"));
    }
}
