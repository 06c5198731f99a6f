//! HTTP error classification and normalization
//!
//! Failed exchanges are normalized into [`Error::Remote`] when the body is a
//! structured JSON error, or [`Error::Transport`] otherwise.

use serde_json::Value;
use crate::http::transport::RawResponse;
use crate::Error;

/// Structured error payload in one of the two conventions the API has used
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorPayload {
    /// `{"error": "...", "reason": "..."}`
    Reason { error: String, reason: Option<String> },
    /// `{"status": ..., "title": "...", "detail": "...", "errors": ...}`
    Problem {
        status: String,
        title: String,
        detail: String,
        errors: Option<Value>,
    },
    /// A JSON object in neither convention
    Unrecognized,
}

impl ErrorPayload {
    /// Extract a payload from a parsed JSON body
    pub fn from_json(json: &Value) -> Self {
        if let Some(error) = json.get("error") {
            return ErrorPayload::Reason {
                error: scalar_text(error),
                reason: json.get("reason").filter(|r| !r.is_null()).map(scalar_text),
            };
        }

        if json.get("status").is_some() || json.get("title").is_some() || json.get("detail").is_some() {
            return ErrorPayload::Problem {
                status: json.get("status").map(scalar_text).unwrap_or_default(),
                title: json.get("title").map(scalar_text).unwrap_or_default(),
                detail: json.get("detail").map(scalar_text).unwrap_or_default(),
                errors: json.get("errors").filter(|e| !is_empty_value(e)).cloned(),
            };
        }

        ErrorPayload::Unrecognized
    }

    /// Compose the human-readable message
    pub fn message(&self, raw: &str) -> String {
        match self {
            ErrorPayload::Reason { error, reason: Some(reason) } => format!("[{}] {}", error, reason),
            ErrorPayload::Reason { error, reason: None } => format!("[{}]", error),
            ErrorPayload::Problem { status, title, detail, errors } => {
                let mut message = format!("{}: {} - {}", status, title, detail);
                if let Some(errors) = errors {
                    message.push(' ');
                    message.push_str(&errors.to_string());
                }
                message
            }
            ErrorPayload::Unrecognized => raw.to_string(),
        }
    }

    fn code(&self) -> Option<String> {
        match self {
            ErrorPayload::Reason { error, .. } => Some(error.clone()),
            ErrorPayload::Problem { status, .. } if !status.is_empty() => Some(status.clone()),
            _ => None,
        }
    }

    fn reason(&self) -> Option<String> {
        match self {
            ErrorPayload::Reason { reason, .. } => reason.clone(),
            ErrorPayload::Problem { detail, .. } if !detail.is_empty() => Some(detail.clone()),
            _ => None,
        }
    }
}

/// Classify an error body
///
/// A body starting with `{` is treated as a structured error and becomes
/// [`Error::Remote`]; anything else, including a `{` body that fails to
/// parse, becomes [`Error::Transport`] carrying the raw text.
pub fn classify_error_body(status_code: Option<u16>, body: &str) -> Error {
    if body.starts_with('{') {
        if let Ok(json) = serde_json::from_str::<Value>(body) {
            let payload = ErrorPayload::from_json(&json);
            return Error::Remote {
                message: payload.message(body),
                status_code,
                code: payload.code(),
                reason: payload.reason(),
                details: Some(json),
            };
        }
    }

    Error::Transport {
        message: body.to_string(),
        status_code,
        source: None,
    }
}

/// Normalize a non-success response
pub fn from_response(response: &RawResponse) -> Error {
    let body = response.text();
    if body.trim().is_empty() {
        let reason = response.reason.as_deref().unwrap_or("request failed");
        return Error::transport(format!("HTTP {} {}", response.status, reason), Some(response.status));
    }
    classify_error_body(Some(response.status), &body)
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Number(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_reason_payload() {
        let err = classify_error_body(
            Some(400),
            r#"{"error":"invalid_request","reason":"missing field"}"#,
        );
        assert_eq!(err.kind(), ErrorKind::Remote);
        assert_eq!(err.to_string(), "[invalid_request] missing field");
        assert_eq!(err.code().as_deref(), Some("invalid_request"));
        assert_eq!(err.status_code(), Some(400));
    }

    #[test]
    fn test_reason_payload_without_reason() {
        let err = classify_error_body(Some(401), r#"{"error":"unauthorized"}"#);
        assert_eq!(err.to_string(), "[unauthorized]");
    }

    #[test]
    fn test_problem_payload() {
        let err = classify_error_body(
            Some(422),
            r#"{"status":422,"title":"Unprocessable","detail":"Bad email","errors":{"email":"invalid"}}"#,
        );
        assert_eq!(
            err.to_string(),
            r#"422: Unprocessable - Bad email {"email":"invalid"}"#
        );
        assert_eq!(err.code().as_deref(), Some("422"));
        match err {
            Error::Remote { reason, .. } => assert_eq!(reason.as_deref(), Some("Bad email")),
            other => panic!("expected remote error, got {:?}", other),
        }
    }

    #[test]
    fn test_problem_payload_with_empty_errors() {
        let err = classify_error_body(
            Some(404),
            r#"{"status":404,"title":"Not Found","detail":"No product","errors":[]}"#,
        );
        assert_eq!(err.to_string(), "404: Not Found - No product");
    }

    #[test]
    fn test_non_json_body_is_transport() {
        let err = classify_error_body(Some(502), "<html>Bad Gateway</html>");
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.to_string(), "<html>Bad Gateway</html>");
    }

    #[test]
    fn test_malformed_json_is_transport() {
        let err = classify_error_body(Some(500), "{not json");
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.to_string(), "{not json");
    }

    #[test]
    fn test_empty_body_uses_status_line() {
        let mut response = RawResponse::new(503, "");
        response.reason = Some("Service Unavailable".to_string());
        let err = from_response(&response);
        assert_eq!(err.to_string(), "HTTP 503 Service Unavailable");
        assert_eq!(err.status_code(), Some(503));
    }
}
