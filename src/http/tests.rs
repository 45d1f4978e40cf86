//! Tests for the HTTP client module

use super::*;
use crate::error::Error;
use crate::types::Method;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    let config = HttpClientConfig::builder().base_url(server.uri()).build();
    HttpClient::with_config(config).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.base_url.is_none());
    assert!(config.api_key.is_none());
    assert!(config.user_agent.starts_with("mailapi-client/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.example.com/v1")
        .timeout(Duration::from_secs(60))
        .header("X-Tenant", "acme")
        .api_key("key_123")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(
        config.base_url,
        Some("https://api.example.com/v1".to_string())
    );
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(
        config.default_headers.get("X-Tenant"),
        Some(&"acme".to_string())
    );
    assert_eq!(config.api_key, Some("key_123".to_string()));
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[tokio::test]
async fn test_execute_get_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/domains"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Request-Id", "req-1")
                .set_body_json(json!({"data": [{"name": "example.com"}]})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client.execute(&RequestConfig::get("/domains")).await.unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body["data"][0]["name"], "example.com");
    assert_eq!(response.request_id(), Some("req-1"));
}

#[tokio::test]
async fn test_execute_sends_query_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/logs"))
        .and(query_param("page", "2"))
        .and(query_param("perPage", "50"))
        .and(query_param("status", "delivered"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = RequestConfig::get("/logs")
        .query("page", "2")
        .query("perPage", "50")
        .query("status", "delivered");

    let response = client.execute(&request).await.unwrap();
    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn test_execute_sends_api_key_and_default_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tenants"))
        .and(header("Authorization", "Bearer key_abc"))
        .and(header("X-Tenant", "acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .api_key("key_abc")
        .header("X-Tenant", "acme")
        .build();
    let client = HttpClient::with_config(config).unwrap();

    client.execute(&RequestConfig::get("/tenants")).await.unwrap();
}

#[tokio::test]
async fn test_execute_request_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/webhooks"))
        .and(header("X-Request-Id", "req-456"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = RequestConfig::get("/webhooks").header("X-Request-Id", "req-456");
    client.execute(&request).await.unwrap();
}

#[tokio::test]
async fn test_execute_post_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/suppressions"))
        .and(body_json(json!({"email": "bounce@example.com"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "sup_1"})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = RequestConfig::new(Method::POST, "/suppressions")
        .json(json!({"email": "bounce@example.com"}));

    let response = client.execute(&request).await.unwrap();
    assert_eq!(response.status, 201);
    assert_eq!(response.body["id"], "sup_1");
}

#[tokio::test]
async fn test_execute_empty_body_is_null() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/webhooks/wh_1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client
        .execute(&RequestConfig::new(Method::DELETE, "/webhooks/wh_1"))
        .await
        .unwrap();

    assert_eq!(response.status, 204);
    assert!(response.body.is_null());
}

#[tokio::test]
async fn test_execute_404_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/domains/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.execute(&RequestConfig::get("/domains/missing")).await;

    assert!(matches!(
        result,
        Err(Error::HttpStatus { status: 404, ref body }) if body == "Not found"
    ));
}

#[tokio::test]
async fn test_execute_does_not_retry_server_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/usage"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.execute(&RequestConfig::get("/usage")).await;

    assert_eq!(result.unwrap_err().status(), Some(503));
}

#[tokio::test]
async fn test_execute_invalid_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/logs"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.execute(&RequestConfig::get("/logs")).await;

    assert!(matches!(result, Err(Error::JsonParse(_))));
}

#[tokio::test]
async fn test_execute_request_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = RequestConfig::get("/slow").timeout(Duration::from_millis(50));
    let result = client.execute(&request).await;

    assert!(matches!(result, Err(Error::Timeout { timeout_ms: 50 })));
}

#[tokio::test]
async fn test_execute_absolute_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/full/url/test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&mock_server)
        .await;

    // Base URL points elsewhere; absolute URLs bypass it
    let config = HttpClientConfig::builder()
        .base_url("https://unused.example.com")
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let url = format!("{}/full/url/test", mock_server.uri());
    let response = client.execute(&RequestConfig::get(url)).await.unwrap();
    assert_eq!(response.body["ok"], true);
}

#[tokio::test]
async fn test_base_url_with_trailing_slash() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/emails"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(format!("{}/v1/", mock_server.uri()))
        .build();
    let client = HttpClient::with_config(config).unwrap();

    client.execute(&RequestConfig::get("/emails")).await.unwrap();
}

#[tokio::test]
async fn test_request_json_typed() {
    #[derive(serde::Deserialize)]
    struct Usage {
        sent: u64,
        limit: u64,
    }

    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/usage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sent": 10, "limit": 100})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let usage: Usage = client
        .request_json(&RequestConfig::get("/usage"))
        .await
        .unwrap();

    assert_eq!(usage.sent, 10);
    assert_eq!(usage.limit, 100);
}

#[test]
fn test_raw_response_headers_case_insensitive() {
    let response = RawResponse::new(200, json!(null)).with_header("X-Request-Id", "abc");
    assert_eq!(response.header("x-request-id"), Some("abc"));
    assert_eq!(response.header("X-REQUEST-ID"), Some("abc"));
    assert_eq!(response.request_id(), Some("abc"));
}

#[test]
fn test_http_client_debug_hides_key() {
    let config = HttpClientConfig::builder().api_key("secret").build();
    let client = HttpClient::with_config(config).unwrap();
    let debug_str = format!("{client:?}");
    assert!(debug_str.contains("HttpClient"));
    assert!(debug_str.contains("has_api_key: true"));
    assert!(!debug_str.contains("secret"));
}
