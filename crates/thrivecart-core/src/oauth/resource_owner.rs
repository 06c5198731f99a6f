//! Resource owner mapping
//!
//! Fields are looked up by literal key first, then by dotted path through
//! nested objects and arrays. Missing fields are `None`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Account details returned by `GET /authorization/me`
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceOwner {
    response: Value,
}

/// Flat typed view of a [`ResourceOwner`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceOwnerProfile {
    pub user_id: Option<String>,
    pub account_id: Option<String>,
    pub account_name: Option<String>,
    pub account_email: Option<String>,
    pub role: Option<String>,
}

impl ResourceOwner {
    pub fn new(response: Value) -> Self {
        Self { response }
    }

    /// User ID (`user_id`)
    pub fn id(&self) -> Option<String> {
        self.text("user_id")
    }

    pub fn account_id(&self) -> Option<String> {
        self.text("account_id")
    }

    pub fn account_name(&self) -> Option<String> {
        self.text("account_name")
    }

    /// Account email, which the provider reports under `name`
    pub fn account_email(&self) -> Option<String> {
        self.text("name")
    }

    pub fn role(&self) -> Option<String> {
        self.text("role")
    }

    /// Value at `path`, trying the literal key before dotted traversal
    pub fn get(&self, path: &str) -> Option<&Value> {
        lookup(&self.response, path)
    }

    pub fn profile(&self) -> ResourceOwnerProfile {
        ResourceOwnerProfile {
            user_id: self.id(),
            account_id: self.account_id(),
            account_name: self.account_name(),
            account_email: self.account_email(),
            role: self.role(),
        }
    }

    /// The raw provider response
    pub fn to_value(&self) -> &Value {
        &self.response
    }

    fn text(&self, path: &str) -> Option<String> {
        match self.get(path)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl From<Value> for ResourceOwner {
    fn from(response: Value) -> Self {
        Self::new(response)
    }
}

fn lookup<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    if let Some(value) = data.get(path) {
        return Some(value);
    }
    if !path.contains('.') {
        return None;
    }

    path.split('.').try_fold(data, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}
