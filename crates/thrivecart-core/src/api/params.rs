//! Typed request parameters
//!
//! Each struct serializes to the payload its operation expects. Types
//! rule out most malformed input; the runtime validators still run on the
//! serialized payload, so ranges and formats are checked either way.

use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use crate::http::Params;
use crate::{Error, Result};

/// Transaction type filter for `GET /transactions`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Any,
    Charge,
    Rebill,
    Refund,
    Cancel,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Any => "any",
            TransactionType::Charge => "charge",
            TransactionType::Rebill => "rebill",
            TransactionType::Refund => "refund",
            TransactionType::Cancel => "cancel",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "any" => Ok(TransactionType::Any),
            "charge" => Ok(TransactionType::Charge),
            "rebill" => Ok(TransactionType::Rebill),
            "refund" => Ok(TransactionType::Refund),
            "cancel" => Ok(TransactionType::Cancel),
            other => Err(Error::validation(
                "transactionType",
                format!("Invalid transaction type provided (you provided \"{}\").", other),
            )),
        }
    }
}

/// Filters for `GET /transactions`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionQuery {
    /// Customer email, order ID, invoice ID and similar
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(rename = "transactionType", skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    /// Results per page, at most 25
    #[serde(rename = "perPage", skip_serializing_if = "Option::is_none")]
    pub per_page: Option<i64>,
    /// 1-based page number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
}

/// `POST /customer`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerQuery {
    pub email: String,
}

/// `POST /refund`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefundRequest {
    pub order_id: i64,
    /// Item reference within the order
    pub reference: String,
    /// Internal note, never shown to the customer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// `POST /cancelSubscription` and `POST /resumeSubscription`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRequest {
    pub order_id: i64,
    pub subscription_id: i64,
}

/// `POST /pauseSubscription`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauseRequest {
    pub order_id: i64,
    pub subscription_id: i64,
    /// Unix timestamp at least a day in the future
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_resume: Option<i64>,
}

impl PauseRequest {
    pub fn new(order_id: i64, subscription_id: i64) -> Self {
        Self {
            order_id,
            subscription_id,
            auto_resume: None,
        }
    }

    /// Resume automatically at `at`
    pub fn resume_at(mut self, at: DateTime<Utc>) -> Self {
        self.auto_resume = Some(at.timestamp());
        self
    }
}

/// Filters for `GET /affiliates`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AffiliateQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
    /// Affiliate name, email or affiliate ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(rename = "perPage", skip_serializing_if = "Option::is_none")]
    pub per_page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
}

/// `POST /subscribe`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSubscription {
    /// Event name, or `*` for every event
    pub event: String,
    pub target_url: String,
    /// Sent as `[]` when empty
    #[serde(
        default,
        serialize_with = "serialize_trigger_fields",
        deserialize_with = "deserialize_trigger_fields"
    )]
    pub trigger_fields: Params,
}

impl EventSubscription {
    pub fn new(event: impl Into<String>, target_url: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            target_url: target_url.into(),
            trigger_fields: Params::new(),
        }
    }

    pub fn with_trigger_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.trigger_fields.insert(name.into(), value.into());
        self
    }
}

fn serialize_trigger_fields<S: Serializer>(
    fields: &Params,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    if fields.is_empty() {
        serializer.collect_seq(std::iter::empty::<Value>())
    } else {
        fields.serialize(serializer)
    }
}

fn deserialize_trigger_fields<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Params, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Params::new()),
        Value::Array(items) if items.is_empty() => Ok(Params::new()),
        other => Err(serde::de::Error::custom(format!(
            "trigger_fields must be an object, got {}",
            other
        ))),
    }
}

/// Serialize typed parameters into a payload
pub fn to_params<T: Serialize>(value: &T) -> Result<Params> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Params::new()),
        other => Err(Error::configuration(format!(
            "Request parameters must serialize to an object, got {}",
            other
        ))),
    }
}

/// Replace structured values of `fields` with their JSON text
pub fn encode_json_fields(mut payload: Params, fields: &[&str]) -> Result<Params> {
    for field in fields {
        if let Some(value) = payload.get_mut(*field) {
            if matches!(value, Value::Array(_) | Value::Object(_)) {
                let text = serde_json::to_string(&*value)?;
                *value = Value::String(text);
            }
        }
    }
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_transaction_query_field_names() {
        let query = TransactionQuery {
            query: Some("buyer@example.com".into()),
            transaction_type: Some(TransactionType::Rebill),
            per_page: Some(10),
            page: None,
        };
        assert_eq!(
            Value::Object(to_params(&query).unwrap()),
            json!({"query": "buyer@example.com", "transactionType": "rebill", "perPage": 10})
        );
        assert!(to_params(&TransactionQuery::default()).unwrap().is_empty());
    }

    #[test]
    fn test_transaction_type_parse() {
        assert_eq!("charge".parse::<TransactionType>().unwrap(), TransactionType::Charge);
        let err = "upgrade".parse::<TransactionType>().unwrap_err();
        assert_eq!(err.to_string(), r#"Invalid transaction type provided (you provided "upgrade")."#);
        assert!(err.is_validation());
    }

    #[test]
    fn test_pause_request_resume_at() {
        let at = Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 5).unwrap();
        let request = PauseRequest::new(1, 2).resume_at(at);
        assert_eq!(request.auto_resume, Some(at.timestamp()));
        assert_eq!(
            Value::Object(to_params(&PauseRequest::new(1, 2)).unwrap()),
            json!({"order_id": 1, "subscription_id": 2})
        );
    }

    #[test]
    fn test_event_subscription_payload() {
        let subscription = EventSubscription::new("order.success", "https://example.com/hook")
            .with_trigger_field("product_id", 5);
        assert_eq!(
            Value::Object(to_params(&subscription).unwrap()),
            json!({
                "event": "order.success",
                "target_url": "https://example.com/hook",
                "trigger_fields": {"product_id": 5}
            })
        );
    }

    #[test]
    fn test_event_subscription_without_trigger_fields() {
        let subscription = EventSubscription::new("*", "https://example.com/hook");
        assert_eq!(
            Value::Object(to_params(&subscription).unwrap()),
            json!({"event": "*", "target_url": "https://example.com/hook", "trigger_fields": []})
        );

        let parse = |value: Value| serde_json::from_value::<EventSubscription>(value);
        let hook = "https://example.com/hook";
        assert_eq!(
            parse(json!({"event": "*", "target_url": hook, "trigger_fields": []})).unwrap(),
            subscription
        );
        assert_eq!(parse(json!({"event": "*", "target_url": hook})).unwrap(), subscription);
        assert!(parse(json!({"event": "*", "target_url": hook, "trigger_fields": [1]})).is_err());
    }

    #[test]
    fn test_encode_json_fields() {
        let payload = to_params(&json!({"product_ids": [1, 2], "name": "x"})).unwrap();
        let encoded = encode_json_fields(payload, &["product_ids"]).unwrap();
        assert_eq!(encoded["product_ids"], json!("[1,2]"));
        assert_eq!(encoded["name"], json!("x"));

        let pre_encoded = to_params(&json!({"product_ids": "[3]"})).unwrap();
        let unchanged = encode_json_fields(pre_encoded.clone(), &["product_ids"]).unwrap();
        assert_eq!(unchanged, pre_encoded);
    }

    #[test]
    fn test_to_params_rejects_scalars() {
        assert!(to_params(&5).is_err());
    }
}
