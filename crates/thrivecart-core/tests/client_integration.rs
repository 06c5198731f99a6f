//! HTTP-level tests against a local mock server

mod test_support;

use std::time::Duration;
use serde_json::json;
use thrivecart_core::http::Method;
use thrivecart_core::{
    ClientConfig, ErrorKind, HeaderProfile, Mode, RefundRequest, ThriveCart, TransactionQuery,
    TransactionType,
};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_ping_sends_context_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/external/ping"))
        .and(header("Authorization", "Bearer test-token"))
        .and(header("X-TC-Mode", "live"))
        .and(header("X-TC-Sdk", format!("rust/{}", thrivecart_core::VERSION).as_str()))
        .and(header("X-TC-Version", "1.0.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"pong": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_support::client_for(&server.uri());
    let body = client.ping().await.unwrap();
    assert_eq!(body, json!({"pong": true}));
}

#[tokio::test]
async fn test_test_mode_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/external/products"))
        .and(header("X-TC-Mode", "test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = test_support::client_for(&server.uri());
    client.set_mode(Mode::Test);
    assert_eq!(client.products().list().await.unwrap(), json!([]));
}

#[tokio::test]
async fn test_legacy_profile_sends_bare_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/external/ping"))
        .and(header("Authorization", "test-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::default()
        .with_base_uri(server.uri())
        .with_header_profile(HeaderProfile::legacy());
    let client = ThriveCart::with_config("test-token", config).unwrap();
    assert_eq!(client.ping().await.unwrap(), serde_json::Value::Null);
}

#[tokio::test]
async fn test_get_parameters_travel_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/external/transactions"))
        .and(query_param("transactionType", "refund"))
        .and(query_param("perPage", "10"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"transactions": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_support::client_for(&server.uri());
    let query = TransactionQuery {
        transaction_type: Some(TransactionType::Refund),
        per_page: Some(10),
        page: Some(2),
        ..Default::default()
    };
    client.transactions().list(&query).await.unwrap();
}

#[tokio::test]
async fn test_post_parameters_travel_as_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/external/customer"))
        .and(body_json(json!({"email": "buyer@example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"customer": {"id": 1}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_support::client_for(&server.uri());
    let body = client.customers().get("buyer@example.com").await.unwrap();
    assert_eq!(body["customer"]["id"], 1);
}

#[tokio::test]
async fn test_path_tokens_substituted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/external/upsells/77/pricing_options"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"options": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_support::client_for(&server.uri());
    client.upsells().pricing_options(77).await.unwrap();
}

#[tokio::test]
async fn test_remote_error_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/external/refund"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"error": "invalid_request", "reason": "missing field"})),
        )
        .mount(&server)
        .await;

    let client = test_support::client_for(&server.uri());
    let err = client
        .refunds()
        .create(&RefundRequest {
            order_id: 5,
            reference: "ref".into(),
            reason: None,
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Remote);
    assert!(err.to_string().contains("invalid_request"));
    assert!(err.to_string().contains("missing field"));
    assert_eq!(err.code().as_deref(), Some("invalid_request"));
    assert_eq!(err.status_code(), Some(400));
}

#[tokio::test]
async fn test_problem_style_error_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/external/customer"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status": 404,
            "title": "Not Found",
            "detail": "No customer with that email"
        })))
        .mount(&server)
        .await;

    let client = test_support::client_for(&server.uri());
    let err = client.customers().get("nobody@example.com").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Remote);
    assert_eq!(err.to_string(), "404: Not Found - No customer with that email");
}

#[tokio::test]
async fn test_non_json_error_is_transport() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/external/ping"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let client = test_support::client_for(&server.uri());
    let err = client.ping().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.to_string(), "<html>Bad Gateway</html>");
    assert_eq!(err.status_code(), Some(502));
}

#[tokio::test]
async fn test_validation_failure_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_support::client_for(&server.uri());
    let err = client.customers().get("not-an-email").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(
        err.to_string(),
        r#"You must provide a valid email address (you provided "not-an-email")."#
    );
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let config = ClientConfig::default()
        .with_base_uri(server.uri())
        .with_timeout(Duration::from_millis(50));
    let client = ThriveCart::with_config("test-token", config).unwrap();
    let err = client.ping().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.status_code(), None);
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    let client = test_support::client_for("http://127.0.0.1:1");
    let err = client.ping().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.status_code(), None);
}

#[tokio::test]
async fn test_generic_request_skips_validation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/external/customer"))
        .and(body_json(json!({"email": "whatever"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_support::client_for(&server.uri());
    let payload = test_support::params(json!({"email": "whatever"}));
    let body = client
        .request(Method::POST, "/customer", &[], Some(&payload))
        .await
        .unwrap();
    assert_eq!(body, json!({"ok": true}));
}
