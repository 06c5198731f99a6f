//! Configuration management for the CLI
//!
//! Configuration is layered, later layers winning:
//! - Default values
//! - Configuration file (YAML, JSON or TOML)
//! - Environment variables (a `.env` file is loaded first)
//! - Command-line flags

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thrivecart_core::config::{DEFAULT_BASE_URI, DEFAULT_TIMEOUT};
use thrivecart_core::{ClientConfig, Mode, OAuthConfig};

/// Environment variable holding the access token
pub const ENV_ACCESS_TOKEN: &str = "THRIVECART_ACCESS_TOKEN";
/// Environment variable selecting live or test mode
pub const ENV_MODE: &str = "THRIVECART_MODE";
/// Environment variable overriding the base URI
pub const ENV_BASE_URI: &str = "THRIVECART_BASE_URI";
/// Environment variable holding the timeout in seconds
pub const ENV_TIMEOUT: &str = "THRIVECART_TIMEOUT";

const REDACTED: &str = "***";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API access token
    pub access_token: Option<String>,

    /// Live or test mode
    pub mode: Mode,

    /// Scheme and host of the API
    pub base_uri: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// OAuth application settings
    pub oauth: OAuthSettings,

    /// Logging settings
    pub logging: LoggingSettings,
}

/// OAuth application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OAuthSettings {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
    /// Authorization server
    pub base_uri: String,
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level used when no -v flag or RUST_LOG is given
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,
}

/// Values taken from command-line flags
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub access_token: Option<String>,
    pub mode: Option<Mode>,
    pub base_uri: Option<String>,
    pub timeout: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_token: None,
            mode: Mode::default(),
            base_uri: DEFAULT_BASE_URI.to_string(),
            timeout: DEFAULT_TIMEOUT.as_secs(),
            oauth: OAuthSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for OAuthSettings {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            redirect_uri: None,
            base_uri: DEFAULT_BASE_URI.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;

        let config = match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            _ => {
                return Err(Error::InvalidFormat {
                    path: path.to_path_buf(),
                    expected: "YAML, JSON or TOML".to_string(),
                })
            }
        };

        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => {
                        tracing::debug!(path = %path.display(), "loaded configuration");
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "failed to load config");
                    }
                }
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// Resolve every layer: file, then environment, then flags
    pub fn resolve(file: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let mut config = Self::load_with_file(file)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        config.apply_overrides(overrides);
        Ok(config)
    }

    /// Get default configuration file paths to check
    pub fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".thrivecart.yaml"),
            PathBuf::from(".thrivecart.json"),
            PathBuf::from(".thrivecart.toml"),
        ];

        if let Some(dir) = Self::user_config_dir() {
            paths.push(dir.join("config.yaml"));
            paths.push(dir.join("config.json"));
            paths.push(dir.join("config.toml"));
        }

        paths
    }

    /// Per-user configuration directory
    pub fn user_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("thrivecart"))
    }

    /// Apply environment variables through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(ENV_ACCESS_TOKEN).filter(|t| !t.trim().is_empty()) {
            self.access_token = Some(token);
        }
        if let Some(mode) = lookup(ENV_MODE) {
            self.mode = mode.parse()?;
        }
        if let Some(base_uri) = lookup(ENV_BASE_URI) {
            self.base_uri = base_uri;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT) {
            self.timeout = timeout.trim().parse().map_err(|_| {
                Error::config(format!("{} must be a whole number of seconds, got {:?}", ENV_TIMEOUT, timeout))
            })?;
        }
        Ok(())
    }

    /// Apply command-line flags
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(token) = &overrides.access_token {
            self.access_token = Some(token.clone());
        }
        if let Some(mode) = overrides.mode {
            self.mode = mode;
        }
        if let Some(base_uri) = &overrides.base_uri {
            self.base_uri = base_uri.clone();
        }
        if let Some(timeout) = overrides.timeout {
            self.timeout = timeout;
        }
    }

    /// Client configuration for the library
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::default()
            .with_base_uri(self.base_uri.as_str())
            .with_mode(self.mode)
            .with_timeout(Duration::from_secs(self.timeout))
    }

    /// OAuth application configuration, with an optional client ID override
    pub fn oauth_config(&self, client_id: Option<&str>) -> Result<OAuthConfig> {
        let client_id = client_id
            .map(str::to_string)
            .or_else(|| self.oauth.client_id.clone())
            .ok_or_else(|| Error::config("OAuth client ID not configured (oauth.client_id or --client-id)"))?;

        let mut config = OAuthConfig::new(
            client_id,
            self.oauth.client_secret.clone().unwrap_or_default(),
        )
        .with_base_uri(self.oauth.base_uri.as_str());
        if let Some(redirect_uri) = &self.oauth.redirect_uri {
            config = config.with_redirect_uri(redirect_uri.as_str());
        }
        Ok(config)
    }

    /// Copy with secrets replaced, for display
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.access_token.is_some() {
            config.access_token = Some(REDACTED.to_string());
        }
        if config.oauth.client_secret.is_some() {
            config.oauth.client_secret = Some(REDACTED.to_string());
        }
        config
    }

    /// Write the configuration, format chosen by extension
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::to_string(self)?,
            Some("toml") => toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))?,
            Some("json") => serde_json::to_string_pretty(self)?,
            _ => {
                return Err(Error::InvalidFormat {
                    path: path.to_path_buf(),
                    expected: "YAML, JSON or TOML".to_string(),
                })
            }
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_config(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.mode, Mode::Live);
        assert_eq!(config.base_uri, "https://thrivecart.com");
        assert_eq!(config.timeout, 20);
        assert!(config.access_token.is_none());
    }

    #[test]
    fn test_load_yaml() {
        let file = temp_config(
            ".yaml",
            "access_token: tok-yaml\nmode: test\noauth:\n  client_id: app-1\n",
        );
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.access_token.as_deref(), Some("tok-yaml"));
        assert_eq!(config.mode, Mode::Test);
        assert_eq!(config.oauth.client_id.as_deref(), Some("app-1"));
        assert_eq!(config.timeout, 20);
    }

    #[test]
    fn test_load_json_and_toml() {
        let json = temp_config(".json", r#"{"base_uri": "http://dev-thrivecart.com", "timeout": 5}"#);
        let config = Config::from_file(json.path()).unwrap();
        assert_eq!(config.base_uri, "http://dev-thrivecart.com");
        assert_eq!(config.timeout, 5);

        let toml = temp_config(".toml", "mode = \"test\"\n\n[logging]\nformat = \"json\"\n");
        let config = Config::from_file(toml.path()).unwrap();
        assert_eq!(config.mode, Mode::Test);
        assert_eq!(config.logging.format.as_deref(), Some("json"));
    }

    #[test]
    fn test_missing_and_unknown_files() {
        let err = Config::from_file(Path::new("/nonexistent/thrivecart.yaml")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));

        let file = temp_config(".ini", "mode=test");
        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat { .. }));
    }

    #[test]
    fn test_env_layer() {
        let env: HashMap<&str, &str> = [
            (ENV_ACCESS_TOKEN, "tok-env"),
            (ENV_MODE, "test"),
            (ENV_TIMEOUT, "7"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.access_token.as_deref(), Some("tok-env"));
        assert_eq!(config.mode, Mode::Test);
        assert_eq!(config.timeout, 7);
        assert_eq!(config.base_uri, "https://thrivecart.com");
    }

    #[test]
    fn test_env_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config
            .apply_env(|key| (key == ENV_MODE).then(|| "staging".to_string()))
            .is_err());
        assert!(config
            .apply_env(|key| (key == ENV_TIMEOUT).then(|| "soon".to_string()))
            .is_err());
    }

    #[test]
    fn test_flags_win_over_env() {
        let mut config = Config::default();
        config
            .apply_env(|key| (key == ENV_ACCESS_TOKEN).then(|| "tok-env".to_string()))
            .unwrap();
        config.apply_overrides(&Overrides {
            access_token: Some("tok-flag".to_string()),
            mode: Some(Mode::Test),
            ..Default::default()
        });
        assert_eq!(config.access_token.as_deref(), Some("tok-flag"));
        assert_eq!(config.mode, Mode::Test);
    }

    #[test]
    fn test_client_config() {
        let config = Config {
            base_uri: "http://dev-thrivecart.com/".to_string(),
            mode: Mode::Test,
            timeout: 3,
            ..Default::default()
        };
        let client = config.client_config();
        assert_eq!(client.api_root(), "http://dev-thrivecart.com/api/external");
        assert_eq!(client.mode, Mode::Test);
        assert_eq!(client.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_oauth_config() {
        let mut config = Config::default();
        assert!(config.oauth_config(None).is_err());

        config.oauth.client_id = Some("app-1".to_string());
        config.oauth.redirect_uri = Some("https://app.example.com/cb".to_string());
        let oauth = config.oauth_config(None).unwrap();
        assert_eq!(oauth.client_id, "app-1");
        assert_eq!(oauth.redirect_uri.as_deref(), Some("https://app.example.com/cb"));

        assert_eq!(config.oauth_config(Some("app-2")).unwrap().client_id, "app-2");
    }

    #[test]
    fn test_redacted() {
        let mut config = Config::default();
        config.access_token = Some("secret-token".to_string());
        config.oauth.client_secret = Some("secret-2".to_string());
        let shown = serde_yaml::to_string(&config.redacted()).unwrap();
        assert!(!shown.contains("secret-token"));
        assert!(!shown.contains("secret-2"));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let mut config = Config::default();
        config.mode = Mode::Test;
        config.save(&path).unwrap();
        assert_eq!(Config::from_file(&path).unwrap(), config);
    }
}
