//! OAuth provider endpoints and response checks

use std::fmt;
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;
use super::resource_owner::ResourceOwner;
use crate::config::DEFAULT_BASE_URI;
use crate::http::{AuthScheme, Credentials, RawResponse, RequestSpec, Transport};
use crate::{Error, Result};

/// Separator between requested scopes
pub const SCOPE_SEPARATOR: &str = " ";

const AUTHORIZE_PATH: &str = "/authorization/new";
const TOKEN_PATH: &str = "/authorization/token";
const RESOURCE_OWNER_PATH: &str = "/authorization/me";

/// Registered OAuth application settings
#[derive(Clone, PartialEq, Eq)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: Option<String>,
    /// Authorization server, without trailing slash
    pub base_uri: String,
}

impl OAuthConfig {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: None,
            base_uri: DEFAULT_BASE_URI.to_string(),
        }
    }

    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = base_uri.into().trim_end_matches('/').to_string();
        self
    }
}

impl fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("redirect_uri", &self.redirect_uri)
            .field("base_uri", &self.base_uri)
            .finish()
    }
}

/// The ThriveCart authorization server
#[derive(Debug, Clone)]
pub struct OAuthProvider {
    config: OAuthConfig,
}

impl OAuthProvider {
    pub fn new(config: OAuthConfig) -> Result<Self> {
        if config.client_id.trim().is_empty() {
            return Err(Error::configuration("OAuth client ID not configured"));
        }
        Url::parse(&config.base_uri).map_err(|e| Error::Configuration {
            message: format!("Invalid authorization base URI: {}", config.base_uri),
            source: Some(anyhow::Error::new(e)),
        })?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }

    /// Scopes requested when the caller names none
    pub fn default_scopes(&self) -> &'static [&'static str] {
        &[]
    }

    /// Where the merchant is sent to approve access
    pub fn base_authorization_url(&self) -> String {
        format!("{}{}", self.config.base_uri, AUTHORIZE_PATH)
    }

    /// Token exchange endpoint
    pub fn access_token_url(&self) -> String {
        format!("{}{}", self.config.base_uri, TOKEN_PATH)
    }

    /// Account details endpoint for an issued token
    pub fn resource_owner_details_url(&self) -> String {
        format!("{}{}", self.config.base_uri, RESOURCE_OWNER_PATH)
    }

    /// Full authorization URL for the code grant
    ///
    /// `scope` is omitted when no scopes are requested and the defaults are
    /// empty.
    pub fn authorization_url(&self, state: &str, scopes: &[&str]) -> Result<String> {
        let mut url = Url::parse(&self.base_authorization_url()).map_err(|e| Error::Configuration {
            message: format!("Invalid authorization URL: {}", self.base_authorization_url()),
            source: Some(anyhow::Error::new(e)),
        })?;

        let scopes = if scopes.is_empty() { self.default_scopes() } else { scopes };

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("response_type", "code");
            query.append_pair("client_id", &self.config.client_id);
            if let Some(redirect_uri) = &self.config.redirect_uri {
                query.append_pair("redirect_uri", redirect_uri);
            }
            query.append_pair("state", state);
            if !scopes.is_empty() {
                query.append_pair("scope", &scopes.join(SCOPE_SEPARATOR));
            }
        }

        Ok(url.into())
    }

    /// Reject provider responses with an error status
    ///
    /// The message is the payload's `description`, falling back to the HTTP
    /// reason phrase.
    pub fn check_response(&self, status: u16, reason: Option<&str>, data: &Value) -> Result<()> {
        if status < 400 {
            return Ok(());
        }

        let message = data
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| reason.map(str::to_string))
            .unwrap_or_else(|| format!("HTTP {}", status));

        Err(Error::Remote {
            message,
            status_code: Some(status),
            code: data.get("error").and_then(Value::as_str).map(str::to_string),
            reason: reason.map(str::to_string),
            details: (!data.is_null()).then(|| data.clone()),
        })
    }

    /// Fetch and map the account behind `access_token`
    pub async fn fetch_resource_owner(
        &self,
        transport: &dyn Transport,
        access_token: &str,
    ) -> Result<ResourceOwner> {
        let credentials = Credentials::new(access_token);
        credentials.validate_credentials()?;

        let request = RequestSpec {
            method: Method::GET,
            path: RESOURCE_OWNER_PATH.to_string(),
            url: self.resource_owner_details_url(),
            headers: vec![
                (
                    "Authorization".to_string(),
                    credentials.authorization_value(AuthScheme::Bearer),
                ),
                ("Accept".to_string(), "application/json".to_string()),
            ],
            query: Vec::new(),
            body: None,
        };

        debug!(url = %request.url, "fetching resource owner");
        let response = transport.execute(&request).await?;
        let data = parse_provider_body(&response)?;

        self.check_response(response.status, response.reason.as_deref(), &data)
            .map_err(|e| {
                warn!(status = response.status, error = %e, "resource owner request rejected");
                e
            })?;

        Ok(ResourceOwner::new(data))
    }
}

/// Error statuses tolerate unparseable bodies so the status still surfaces
fn parse_provider_body(response: &RawResponse) -> Result<Value> {
    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    match serde_json::from_slice(&response.body) {
        Ok(value) => Ok(value),
        Err(_) if !response.is_success() => Ok(Value::Null),
        Err(e) => Err(Error::Transport {
            message: format!("Failed to parse resource owner response: {}", e),
            status_code: Some(response.status),
            source: Some(anyhow::Error::new(e)),
        }),
    }
}
