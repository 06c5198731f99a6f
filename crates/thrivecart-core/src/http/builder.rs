//! HTTP request builder for ThriveCart API requests
//!
//! Turns a method, a path template and a parameter payload into a
//! [`RequestSpec`]. Building is a pure transformation: the same inputs always
//! produce the same spec.

use reqwest::Method;
use serde_json::{Map, Value};
use crate::config::{ClientConfig, Mode};
use crate::http::auth::Credentials;
use crate::http::headers::{HeaderContext, HeaderProfile};
use crate::{Error, Result};

/// Ordered parameter payload sent with a request
pub type Params = Map<String, Value>;

/// A fully assembled request, ready for a [`crate::http::Transport`]
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub method: Method,
    /// Path after token substitution, relative to the API root
    pub path: String,
    /// Absolute URL without query string
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// Query pairs (GET requests only)
    pub query: Vec<(String, String)>,
    /// JSON object body (non-GET requests only)
    pub body: Option<Value>,
}

impl RequestSpec {
    /// Look up a header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Form-encoded query string, empty when there are no query pairs
    pub fn query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish()
    }
}

/// Builder for constructing requests against the REST API
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    api_root: String,
    credentials: Credentials,
    header_profile: HeaderProfile,
    mode: Mode,
    sdk_version: String,
    api_version: String,
}

impl RequestBuilder {
    /// Create a builder from client configuration and credentials
    pub fn new(config: &ClientConfig, credentials: Credentials) -> Self {
        Self {
            api_root: config.api_root(),
            credentials,
            header_profile: config.header_profile.clone(),
            mode: config.mode,
            sdk_version: config.sdk_version.clone(),
            api_version: config.api_version.clone(),
        }
    }

    /// Build a request
    ///
    /// Every `{name}` placeholder in `path_template` is replaced with the
    /// matching token value. Placeholders without a token are left as-is.
    /// `path` carries the values verbatim; in `url` each value is
    /// percent-encoded as a single path segment.
    /// GET parameters become query pairs; any other method sends them as a
    /// JSON object body. An empty payload produces neither.
    pub fn build(
        &self,
        method: Method,
        path_template: &str,
        tokens: &[(&str, &str)],
        params: Option<&Params>,
    ) -> RequestSpec {
        let path = substitute_tokens(path_template, tokens);
        let encoded: Vec<(&str, String)> = tokens
            .iter()
            .map(|(name, value)| (*name, encode_path_segment(value)))
            .collect();
        let encoded: Vec<(&str, &str)> = encoded
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
            .collect();
        let url = format!("{}{}", self.api_root, substitute_tokens(path_template, &encoded));

        let headers = self.header_profile.resolve(&HeaderContext {
            credentials: &self.credentials,
            mode: self.mode,
            sdk_version: &self.sdk_version,
            api_version: &self.api_version,
        });

        let (query, body) = match params.filter(|p| !p.is_empty()) {
            None => (Vec::new(), None),
            Some(params) if method == Method::GET => (encode_query(params), None),
            Some(params) => (Vec::new(), Some(Value::Object(params.clone()))),
        };

        RequestSpec {
            method,
            path,
            url,
            headers,
            query,
            body,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }
}

/// Replace `{name}` placeholders with token values
pub fn substitute_tokens(template: &str, tokens: &[(&str, &str)]) -> String {
    tokens
        .iter()
        .fold(template.to_string(), |path, (name, value)| {
            path.replace(&format!("{{{}}}", name), value)
        })
}

/// Percent-encode a token value as one path segment
///
/// `/`, `?`, `#` and `%` are escaped, so a value can never leave its segment.
pub fn encode_path_segment(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Reject token values that a URL parser would resolve as `.` or `..`
pub fn check_path_tokens(tokens: &[(&str, &str)]) -> Result<()> {
    match tokens.iter().find(|(_, value)| matches!(*value, "." | "..")) {
        Some((name, value)) => Err(Error::validation(
            name.to_string(),
            format!(r#"Path parameter {} cannot be "{}"."#, name, value),
        )),
        None => Ok(()),
    }
}

/// Flatten a payload into form-style query pairs
///
/// Nested arrays and objects use bracket notation (`key[0]`, `key[sub]`),
/// booleans become `1`/`0` and nulls are omitted.
pub fn encode_query(params: &Params) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in params {
        push_query_value(&mut pairs, key.clone(), value);
    }
    pairs
}

fn push_query_value(pairs: &mut Vec<(String, String)>, key: String, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(b) => pairs.push((key, if *b { "1" } else { "0" }.to_string())),
        Value::Number(n) => pairs.push((key, n.to_string())),
        Value::String(s) => pairs.push((key, s.clone())),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                push_query_value(pairs, format!("{}[{}]", key, index), item);
            }
        }
        Value::Object(map) => {
            for (sub, item) in map {
                push_query_value(pairs, format!("{}[{}]", key, sub), item);
            }
        }
    }
}
