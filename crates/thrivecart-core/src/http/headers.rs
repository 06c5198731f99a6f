//! Header profiles
//!
//! The set of headers attached to every request is data, not code: a profile
//! is an ordered list of `(header name, value source)` pairs resolved when a
//! request is built.

use crate::config::Mode;
use crate::http::auth::{AuthScheme, Credentials};

/// Where a header's value comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderSource {
    /// The access token, rendered with the given scheme
    Authorization(AuthScheme),
    /// The current mode (`live` or `test`)
    Mode,
    /// `rust/<sdk version>`
    Sdk,
    /// The configured API version
    ApiVersion,
    /// A fixed value
    Fixed(String),
}

/// Values a [`HeaderSource`] may draw from
#[derive(Debug, Clone, Copy)]
pub struct HeaderContext<'a> {
    pub credentials: &'a Credentials,
    pub mode: Mode,
    pub sdk_version: &'a str,
    pub api_version: &'a str,
}

impl HeaderSource {
    fn resolve(&self, ctx: &HeaderContext<'_>) -> String {
        match self {
            HeaderSource::Authorization(scheme) => ctx.credentials.authorization_value(*scheme),
            HeaderSource::Mode => ctx.mode.to_string(),
            HeaderSource::Sdk => format!("rust/{}", ctx.sdk_version),
            HeaderSource::ApiVersion => ctx.api_version.to_string(),
            HeaderSource::Fixed(value) => value.clone(),
        }
    }
}

/// Ordered header configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderProfile {
    entries: Vec<(String, HeaderSource)>,
}

impl HeaderProfile {
    /// Current API contract: bearer auth plus mode and version headers
    pub fn current() -> Self {
        Self {
            entries: vec![
                ("Authorization".to_string(), HeaderSource::Authorization(AuthScheme::Bearer)),
                ("X-TC-Mode".to_string(), HeaderSource::Mode),
                ("X-TC-Sdk".to_string(), HeaderSource::Sdk),
                ("X-TC-Version".to_string(), HeaderSource::ApiVersion),
            ],
        }
    }

    /// Earliest API contract: the bare token and nothing else
    pub fn legacy() -> Self {
        Self {
            entries: vec![(
                "Authorization".to_string(),
                HeaderSource::Authorization(AuthScheme::BareToken),
            )],
        }
    }

    /// Add or replace a header
    pub fn with_header(mut self, name: impl Into<String>, source: HeaderSource) -> Self {
        let name = name.into();
        match self
            .entries
            .iter()
            .position(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some(index) => self.entries[index].1 = source,
            None => self.entries.push((name, source)),
        }
        self
    }

    pub fn entries(&self) -> &[(String, HeaderSource)] {
        &self.entries
    }

    /// Resolve every entry against `ctx`, preserving order
    pub fn resolve(&self, ctx: &HeaderContext<'_>) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(name, source)| (name.clone(), source.resolve(ctx)))
            .collect()
    }
}

impl Default for HeaderProfile {
    fn default() -> Self {
        Self::current()
    }
}
