//! Validation rule catalog
//!
//! Rules are pure functions of the parameter payload (plus path tokens and
//! the validation context). Payload values use loose-number semantics: a
//! JSON number or a string that parses as a finite number counts as numeric.
//!
//! Copyright (c) 2025 ThriveCart SDK Contributors
//! Licensed under the MIT or Apache-2.0 license

use std::borrow::Cow;
use std::sync::OnceLock;
use regex::Regex;
use serde_json::Value;
use super::ValidationContext;
use crate::http::Params;
use crate::{Error, Result};

/// Minimum distance into the future for an auto-resume timestamp, in seconds
pub const MIN_AUTO_RESUME_OFFSET: i64 = 86_399;

/// Longest accepted email address
const MAX_EMAIL_LENGTH: usize = 254;

/// A single precondition over one field
#[derive(Debug, Clone, PartialEq)]
pub enum Check {
    /// Present and non-empty
    Required,
    /// Present, numeric and non-empty
    RequiredNumeric,
    /// When present and non-empty: numeric and strictly positive
    PositiveIfPresent,
    /// When present: numeric and not below the bound
    NumericAtLeast(f64),
    /// When present: not above the bound
    AtMost(f64),
    /// When present: numeric and non-empty
    NonEmptyNumericIfPresent,
    /// When present: at most this many characters
    MaxLength(usize),
    /// When present and non-empty: one of the listed values
    OneOf(&'static [&'static str]),
    /// Must be a plausible email address
    Email,
    /// When it contains `@`: must be a plausible email address
    EmailIfContainsAt,
    /// Must be an absolute URL
    Url,
    /// When present: numeric
    NumericIfPresent,
    /// When present: strictly after the context's current time
    AfterNow,
    /// When present: at least this many seconds after the current time
    AtLeastSecondsFromNow(i64),
}

/// A check bound to a field and its failure message
///
/// `{value}` in the message is replaced with the supplied value (or its
/// character count for [`Check::MaxLength`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub field: &'static str,
    pub check: Check,
    pub message: Cow<'static, str>,
}

impl Rule {
    pub fn new(field: &'static str, check: Check, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            field,
            check,
            message: message.into(),
        }
    }

    /// Evaluate the rule
    pub fn evaluate(
        &self,
        payload: &Params,
        tokens: &[(&str, &str)],
        ctx: &ValidationContext,
    ) -> Result<()> {
        let value = lookup(payload, tokens, self.field);
        let value = value.as_deref();

        match self.passes(value, ctx) {
            Ok(()) => Ok(()),
            Err(shown) => Err(Error::validation(
                self.field,
                self.message.replace("{value}", &shown),
            )),
        }
    }

    /// `Err` carries the text to show in the message
    fn passes(&self, value: Option<&Value>, ctx: &ValidationContext) -> std::result::Result<(), String> {
        let shown = || value.map(display_value).unwrap_or_default();
        let fail = |ok: bool| if ok { Ok(()) } else { Err(shown()) };

        match &self.check {
            Check::Required => fail(value.is_some_and(|v| !is_empty(v))),
            Check::RequiredNumeric => fail(value.is_some_and(|v| is_numeric(v) && !is_empty(v))),
            Check::PositiveIfPresent => match value {
                Some(v) if !is_empty(v) => fail(as_number(v).is_some_and(|n| n > 0.0)),
                _ => Ok(()),
            },
            Check::NumericAtLeast(min) => match value {
                Some(v) => fail(as_number(v).is_some_and(|n| n >= *min)),
                None => Ok(()),
            },
            Check::AtMost(max) => match value {
                Some(v) => fail(as_number(v).map_or(true, |n| n <= *max)),
                None => Ok(()),
            },
            Check::NonEmptyNumericIfPresent => match value {
                Some(v) => fail(is_numeric(v) && !is_empty(v)),
                None => Ok(()),
            },
            Check::MaxLength(max) => match value {
                Some(v) => {
                    let length = display_value(v).chars().count();
                    if length > *max {
                        Err(length.to_string())
                    } else {
                        Ok(())
                    }
                }
                None => Ok(()),
            },
            Check::OneOf(allowed) => match value {
                Some(v) if !is_empty(v) => fail(allowed.contains(&display_value(v).as_str())),
                _ => Ok(()),
            },
            Check::Email => fail(value.is_some_and(|v| is_valid_email(&display_value(v)))),
            Check::EmailIfContainsAt => match value {
                Some(v) => {
                    let text = display_value(v);
                    fail(!text.contains('@') || is_valid_email(&text))
                }
                None => Ok(()),
            },
            Check::Url => fail(value.is_some_and(|v| is_valid_url(&display_value(v)))),
            Check::NumericIfPresent => match value {
                Some(v) => fail(is_numeric(v)),
                None => Ok(()),
            },
            Check::AfterNow => match value.and_then(as_number) {
                Some(ts) => fail(ts > ctx.now as f64),
                None => Ok(()),
            },
            Check::AtLeastSecondsFromNow(offset) => match value.and_then(as_number) {
                Some(ts) => fail(ts - ctx.now as f64 >= *offset as f64),
                None => Ok(()),
            },
        }
    }
}

/// Find a field in the payload, falling back to path tokens
fn lookup<'a>(payload: &'a Params, tokens: &[(&str, &str)], field: &str) -> Option<Cow<'a, Value>> {
    match payload.get(field) {
        Some(Value::Null) => None,
        Some(value) => Some(Cow::Borrowed(value)),
        None => tokens
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| Cow::Owned(Value::String((*value).to_string()))),
    }
}

/// Text form of a value as shown in validation messages
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => String::new(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Loose numeric interpretation of a value
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
        }
        _ => None,
    }
}

pub fn is_numeric(value: &Value) -> bool {
    as_number(value).is_some()
}

/// Null, `""`, `"0"`, zero, `false` and empty collections are empty
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(
            r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?$",
        )
        .expect("Valid email regex pattern")
    })
}

/// RFC-plausible email address check
pub fn is_valid_email(candidate: &str) -> bool {
    if candidate.len() > MAX_EMAIL_LENGTH {
        return false;
    }
    match candidate.split_once('@') {
        Some((local, _)) if local.len() > 64 => false,
        Some(_) => email_regex().is_match(candidate),
        None => false,
    }
}

/// Absolute URL with a scheme, and a host for network schemes
pub fn is_valid_url(candidate: &str) -> bool {
    match url::Url::parse(candidate) {
        Ok(parsed) => match parsed.scheme() {
            "http" | "https" | "ftp" | "ws" | "wss" => {
                parsed.host_str().is_some_and(|h| !h.is_empty())
            }
            _ => true,
        },
        Err(_) => false,
    }
}
