//! Pre-flight parameter validation
//!
//! Every API operation runs a fixed, ordered list of rules against its
//! parameters before a request is built. The first failing rule produces an
//! [`crate::Error::Validation`]; later rules are not evaluated and nothing is
//! sent.
//!
//! The validator is organized into focused modules:
//! - `rules`: the rule catalog and value helpers
//! - `operations`: per-operation rule sets
//! - `tests`: test suite
//!
//! Copyright (c) 2025 ThriveCart SDK Contributors
//! Licensed under the MIT or Apache-2.0 license

pub mod operations;
pub mod rules;

use chrono::Utc;

pub use operations::Validator;
pub use rules::{is_valid_email, is_valid_url, Check, Rule};

/// Inputs to validation that do not come from the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
    /// Current time as a Unix timestamp
    pub now: i64,
}

impl ValidationContext {
    /// Context at the current wall-clock time
    pub fn current() -> Self {
        Self {
            now: Utc::now().timestamp(),
        }
    }

    /// Context pinned to a specific timestamp
    pub fn at(now: i64) -> Self {
        Self { now }
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::current()
    }
}
