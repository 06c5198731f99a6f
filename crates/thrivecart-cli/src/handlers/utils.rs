//! Shared utilities for command handlers

use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use serde_json::Value;
use std::future::Future;
use thrivecart_core::{Params, ThriveCart};
use tracing::Instrument;

/// Build an API client from the effective configuration
pub fn build_client(config: &Config) -> Result<ThriveCart> {
    let token = config
        .access_token
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .ok_or(Error::MissingToken)?;

    Ok(ThriveCart::with_config(token, config.client_config())?)
}

/// Await a library call behind a spinner and a timing span
pub async fn send<F>(output: &mut OutputWriter, label: &str, request: F) -> Result<Value>
where
    F: Future<Output = thrivecart_core::Result<Value>>,
{
    let timer = Timer::with_details("api_request", label);
    let spinner = output.spinner(&format!("Calling {}", label));

    let result = request.instrument(timer.span().clone()).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    output.debug(&format!("{} finished in {} ms", label, timer.elapsed().as_millis()))?;

    Ok(result?)
}

/// Parse a `--data` argument into request parameters
pub fn parse_json_object(input: &str) -> Result<Params> {
    match serde_json::from_str::<Value>(input) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(Error::invalid_args(format!(
            "--data must be a JSON object, got {}",
            json_type_name(&other)
        ))),
        Err(e) => Err(Error::invalid_args(format!("--data is not valid JSON: {}", e))),
    }
}

/// Parse a `KEY=VALUE` trigger field
///
/// Values that read as JSON scalars (numbers, booleans) keep their type;
/// anything else is sent as text.
pub fn parse_trigger_field(input: &str) -> Result<(String, Value)> {
    let (key, raw) = input
        .split_once('=')
        .ok_or_else(|| Error::invalid_args(format!("trigger field must be KEY=VALUE, got {:?}", input)))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(Error::invalid_args(format!("trigger field has an empty key: {:?}", input)));
    }

    let value = match serde_json::from_str::<Value>(raw) {
        Ok(value @ (Value::Number(_) | Value::Bool(_))) => value,
        _ => Value::String(raw.to_string()),
    };

    Ok((key.to_string(), value))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use thrivecart_core::Mode;

    #[test]
    fn test_build_client_requires_token() {
        let err = build_client(&Config::default()).unwrap_err();
        assert!(matches!(err, Error::MissingToken));

        let config = Config {
            access_token: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(matches!(build_client(&config).unwrap_err(), Error::MissingToken));
    }

    #[test]
    fn test_build_client_uses_config() {
        let config = Config {
            access_token: Some("tok".to_string()),
            mode: Mode::Test,
            base_uri: "http://dev-thrivecart.com".to_string(),
            ..Default::default()
        };
        let client = build_client(&config).unwrap();
        assert_eq!(client.mode(), Mode::Test);
        assert_eq!(client.config().api_root(), "http://dev-thrivecart.com/api/external");
    }

    #[test]
    fn test_parse_json_object() {
        let params = parse_json_object(r#"{"product_ids": [1, 2], "name": "Ann"}"#).unwrap();
        assert_eq!(params["product_ids"], json!([1, 2]));

        let err = parse_json_object("[1]").unwrap_err();
        assert_eq!(err.to_string(), "Invalid arguments: --data must be a JSON object, got an array");
        assert!(parse_json_object("{oops").is_err());
    }

    #[test]
    fn test_parse_trigger_field() {
        assert_eq!(parse_trigger_field("product_id=5").unwrap(), ("product_id".to_string(), json!(5)));
        assert_eq!(parse_trigger_field("live=true").unwrap().1, json!(true));
        assert_eq!(parse_trigger_field("mode=test").unwrap().1, json!("test"));
        assert_eq!(parse_trigger_field("note=a=b").unwrap().1, json!("a=b"));
        assert!(parse_trigger_field("product_id").is_err());
        assert!(parse_trigger_field("=5").is_err());
    }
}
