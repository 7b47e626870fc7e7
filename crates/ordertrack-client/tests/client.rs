//! Integration tests for `TrackingClient` using wiremock HTTP mocks.

use ordertrack_client::{ClientConfig, LookupMode, OrderSearch, SearchOutcome, TrackingClient};
use ordertrack_core::CredentialPolicy;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> TrackingClient {
    TrackingClient::new(ClientConfig::new(base_url)).expect("client construction should not fail")
}

fn shipped_order() -> serde_json::Value {
    json!({
        "order_number": "ABC123",
        "status": "shipped",
        "status_display": "Shipped",
        "is_delayed": false,
        "estimated_delivery": "2024-05-01T10:00:00Z",
        "history": []
    })
}

#[tokio::test]
async fn search_posts_order_number_and_returns_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/orders/search/"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "order_number": "ABC123" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(shipped_order()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&format!("{}/api", server.uri()));
    let outcome = client.search("ABC123").await;

    let order = outcome.data().expect("should return an order");
    assert_eq!(order.order_number, "ABC123");
    assert_eq!(order.status_display, "Shipped");
    assert_eq!(order.estimated_delivery.as_deref(), Some("2024-05-01T10:00:00Z"));
    assert!(outcome.error().is_none());
}

#[tokio::test]
async fn not_found_surfaces_server_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/orders/search/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Order not found" })))
        .mount(&server)
        .await;

    let client = test_client(&format!("{}/api", server.uri()));
    let outcome = client.search("NOPE").await;

    assert_eq!(outcome, SearchOutcome::Failed("Order not found".to_string()));
}

#[tokio::test]
async fn server_error_without_message_uses_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/orders/search/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let client = test_client(&format!("{}/api", server.uri()));
    let outcome = client.search("ABC123").await;

    assert_eq!(outcome.error(), Some("Error al buscar el pedido"));
    assert!(outcome.data().is_none());
}

#[tokio::test]
async fn success_with_unexpected_body_uses_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/orders/search/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
        .mount(&server)
        .await;

    let client = test_client(&format!("{}/api", server.uri()));
    let outcome = client.search("ABC123").await;

    assert_eq!(outcome.error(), Some("Error al buscar el pedido"));
}

#[tokio::test]
async fn network_failure_uses_fallback() {
    // Nothing listens on port 1, so the connection is refused.
    let mut config = ClientConfig::new("http://127.0.0.1:1/api");
    config.fallback_error = "Could not reach the tracking service".to_string();
    let client = TrackingClient::new(config).unwrap();
    let outcome = client.search("ABC123").await;

    assert_eq!(
        outcome.error(),
        Some("Could not reach the tracking service")
    );
}

#[tokio::test]
async fn try_search_exposes_typed_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/orders/search/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "Order number is required" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.try_search("x").await.unwrap_err();

    assert_eq!(err.server_message(), Some("Order number is required"));
    assert!(err.to_string().contains("400"), "got: {err}");
}

#[tokio::test]
async fn track_uses_get_lookup_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/orders/track/ABC123/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(shipped_order()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&format!("{}/api", server.uri()));
    let outcome = client.track("ABC123").await;

    assert_eq!(outcome.data().map(|o| o.order_number.as_str()), Some("ABC123"));
}

#[tokio::test]
async fn fetch_order_follows_configured_lookup_mode() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orders/track/ABC123/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(shipped_order()))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::new(&server.uri()).with_lookup(LookupMode::Track);
    let client = TrackingClient::new(config).unwrap();
    let outcome = client.fetch_order("ABC123").await;

    assert!(outcome.data().is_some());
}

#[tokio::test]
async fn forward_policy_sends_session_cookie_and_csrf_header() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/orders/search/"))
        .and(header("X-CSRFToken", "tok-123"))
        .and(header("cookie", "csrftoken=tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(shipped_order()))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::new(&server.uri()).with_credentials(CredentialPolicy::Forward {
        csrf_cookie: "csrftoken".to_string(),
        csrf_header: "X-CSRFToken".to_string(),
    });
    let client = TrackingClient::new(config).unwrap();
    client
        .cookie_jar()
        .expect("forward policy should own a cookie jar")
        .add_cookie_str("csrftoken=tok-123; Path=/", client.base_url());

    let outcome = client.search("ABC123").await;
    assert!(outcome.data().is_some(), "got: {outcome:?}");
}

#[tokio::test]
async fn forward_policy_echoes_csrf_cookie_set_by_backend() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/orders/search/"))
        .and(header("X-CSRFToken", "tok-abc"))
        .and(header("cookie", "csrftoken=tok-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(shipped_order()))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    // Without the token the backend rejects the request and hands one out.
    Mock::given(method("POST"))
        .and(path("/orders/search/"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("set-cookie", "csrftoken=tok-abc; Path=/")
                .set_body_json(json!({ "error": "CSRF cookie not set" })),
        )
        .with_priority(2)
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::new(&server.uri()).with_credentials(CredentialPolicy::Forward {
        csrf_cookie: "csrftoken".to_string(),
        csrf_header: "X-CSRFToken".to_string(),
    });
    let client = TrackingClient::new(config).unwrap();

    let first = client.search("ABC123").await;
    assert_eq!(first.error(), Some("CSRF cookie not set"));

    let second = client.search("ABC123").await;
    assert_eq!(
        second.data().map(|o| o.order_number.as_str()),
        Some("ABC123"),
        "got: {second:?}"
    );
}

#[tokio::test]
async fn omit_policy_sends_no_csrf_header() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/orders/search/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(shipped_order()))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let outcome = client.search("ABC123").await;
    assert!(outcome.data().is_some());

    let requests = server
        .received_requests()
        .await
        .expect("request recording is enabled by default");
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("x-csrftoken").is_none());
    assert!(requests[0].headers.get("cookie").is_none());
}

#[tokio::test]
async fn repeated_searches_are_independent_requests() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/orders/search/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(shipped_order()))
        .expect(2)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let first = client.search("ABC123").await;
    let second = client.search("ABC123").await;

    assert_eq!(first, second);
}
