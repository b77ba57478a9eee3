//! End-to-end client flows against a local mock endpoint: token
//! acquisition, refresh, fault detection, and response decoding.

use linkshare_client::link_locator::LinkLocatorRequest;
use linkshare_client::product_search::ProductSearchQuery;
use linkshare_client::{AccessToken, ClientConfig, LinkshareClient, LinkshareError};
use serde_json::json;
use wiremock::matchers::{basic_auth, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::new("consumer-key", "consumer-secret")
        .with_credentials("publisher", "hunter2")
        .with_scope("12345")
        .with_base_url(server.uri())
}

fn token_blob(secret: &str, refresh: Option<&str>, expires_at: Option<&str>) -> AccessToken {
    serde_json::from_value(json!({
        "access_token": secret,
        "token_type": "Bearer",
        "refresh_token": refresh,
        "scope": "12345",
        "expires_at": expires_at,
    }))
    .unwrap()
}

async fn mount_token_endpoint(server: &MockServer, secret: &str) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(basic_auth("consumer-key", "consumer-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": secret,
            "token_type": "Bearer",
            "refresh_token": "refresh-secret",
            "scope": "12345",
            "expires_in": 3600,
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_first_call_acquires_token_and_decodes_merchants() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, "fresh-token").await;

    Mock::given(method("GET"))
        .and(path("/linklocator/1.0/getMerchByID/24164"))
        .and(header("authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<result><return><mid>24164</mid><name>Example Store</name></return></result>",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = LinkshareClient::new(config(&server)).unwrap();
    let result = client.link_locator(&LinkLocatorRequest::MerchantById(24164)).await.unwrap();

    assert!(!result.has_fault());
    assert_eq!(result.merchants().len(), 1);
    assert_eq!(result.merchants()[0].name.as_deref(), Some("Example Store"));

    // The acquired token is exposed for persistence.
    let token = client.token().unwrap();
    assert_eq!(token.secret(), "fresh-token");
    assert_eq!(token.refresh_token(), Some("refresh-secret"));
}

#[tokio::test]
async fn test_password_grant_submits_credentials_and_scope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(basic_auth("consumer-key", "consumer-secret"))
        .and(body_string_contains("grant_type=password"))
        .and(body_string_contains("username=publisher"))
        .and(body_string_contains("scope=12345"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "abc",
            "token_type": "Bearer",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = LinkshareClient::new(config(&server)).unwrap();
    let token = client.access_token().await.unwrap();
    assert_eq!(token.secret(), "abc");
}

#[tokio::test]
async fn test_expired_token_is_refreshed_before_the_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=stale-refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "renewed-token",
            "token_type": "Bearer",
            "expires_in": 3600,
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/productsearch/1.0"))
        .and(query_param("keyword", "shoes"))
        .and(header("authorization", "Bearer renewed-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<result><TotalMatches>0</TotalMatches></result>"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let expired = token_blob("stale-token", Some("stale-refresh"), Some("2000-01-01T00:00:00Z"));
    let mut client = LinkshareClient::with_token(config(&server), expired).unwrap();

    let result =
        client.product_search(&ProductSearchQuery::new().keyword("shoes")).await.unwrap();
    assert_eq!(result.total_matches(), Some(0));
    assert_eq!(client.token().unwrap().secret(), "renewed-token");
}

#[tokio::test]
async fn test_expired_token_without_refresh_falls_back_to_password_grant() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=password"))
        .and(body_string_contains("username=publisher"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "replacement-token",
            "token_type": "Bearer",
            "expires_in": 3600,
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/linklocator/1.0/getMerchByID/1"))
        .and(header("authorization", "Bearer replacement-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<result/>"))
        .expect(1)
        .mount(&server)
        .await;

    let expired = token_blob("stale-token", None, Some("2000-01-01T00:00:00Z"));
    let mut client = LinkshareClient::with_token(config(&server), expired).unwrap();

    let result = client.link_locator(&LinkLocatorRequest::MerchantById(1)).await.unwrap();
    assert!(!result.has_fault());
    assert_eq!(client.token().unwrap().secret(), "replacement-token");
}

#[tokio::test]
async fn test_live_token_is_reused_without_hitting_the_endpoint() {
    let server = MockServer::start().await;

    // No token endpoint mounted: acquiring one would 404 and fail.
    Mock::given(method("GET"))
        .and(path("/linklocator/1.0/getMerchByCategory/11"))
        .and(header("authorization", "Bearer live-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<result/>"))
        .expect(1)
        .mount(&server)
        .await;

    let live = token_blob("live-token", None, Some("2999-01-01T00:00:00Z"));
    let mut client = LinkshareClient::with_token(config(&server), live).unwrap();

    let result = client.link_locator(&LinkLocatorRequest::MerchantByCategory(11)).await.unwrap();
    assert!(result.merchants().is_empty());
}

#[tokio::test]
async fn test_password_grant_without_credentials_is_rejected() {
    let server = MockServer::start().await;
    let config = ClientConfig::new("consumer-key", "consumer-secret").with_base_url(server.uri());
    let mut client = LinkshareClient::new(config).unwrap();

    let error = client.access_token().await.unwrap_err();
    assert_eq!(error.to_string(), "missing fields: username, password");
}

#[tokio::test]
async fn test_refresh_without_a_token_is_rejected() {
    let server = MockServer::start().await;
    let mut client = LinkshareClient::new(config(&server)).unwrap();

    let error = client.refresh_token().await.unwrap_err();
    assert!(matches!(error, LinkshareError::Token(_)));
}

#[tokio::test]
async fn test_rejected_grant_surfaces_endpoint_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string(r#"{"error":"invalid_client"}"#),
        )
        .mount(&server)
        .await;

    let mut client = LinkshareClient::new(config(&server)).unwrap();
    let error = client.access_token().await.unwrap_err();

    match error {
        LinkshareError::Token(message) => {
            assert!(message.contains("401"));
            assert!(message.contains("invalid_client"));
        }
        other => panic!("expected Token, got {other:?}"),
    }
}

#[tokio::test]
async fn test_json_fault_body_means_resource_unavailable() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, "fresh-token").await;

    Mock::given(method("GET"))
        .and(path("/linklocator/1.0/getMerchByID/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"fault": {"code": 900908, "message": "Resource forbidden",
                "description": "Access failure for API: /linklocator/1.0"}}"#,
        ))
        .mount(&server)
        .await;

    let mut client = LinkshareClient::new(config(&server)).unwrap();
    let error = client.link_locator(&LinkLocatorRequest::MerchantById(1)).await.unwrap_err();

    match error {
        LinkshareError::ResourceUnavailable { code, message, .. } => {
            assert_eq!(code, 900908);
            assert_eq!(message, "Resource forbidden");
        }
        other => panic!("expected ResourceUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn test_xml_fault_body_means_authorization_failure() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, "fresh-token").await;

    Mock::given(method("GET"))
        .and(path("/productsearch/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<ams:fault xmlns:ams="http://wso2.org/apimanager/security">
                <ams:code>900901</ams:code>
                <ams:message>Invalid Credentials</ams:message>
                <ams:description>Access failure for API: /productsearch/1.0</ams:description>
            </ams:fault>"#,
        ))
        .mount(&server)
        .await;

    let mut client = LinkshareClient::new(config(&server)).unwrap();
    let error =
        client.product_search(&ProductSearchQuery::new().keyword("shoes")).await.unwrap_err();

    match error {
        LinkshareError::Authorization { code, message, .. } => {
            assert_eq!(code, 900901);
            assert_eq!(message, "Invalid Credentials");
        }
        other => panic!("expected Authorization, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unparseable_body_is_malformed_response() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, "fresh-token").await;

    Mock::given(method("GET"))
        .and(path("/linklocator/1.0/getMerchByID/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("gateway timeout"))
        .mount(&server)
        .await;

    let mut client = LinkshareClient::new(config(&server)).unwrap();
    let error = client.link_locator(&LinkLocatorRequest::MerchantById(1)).await.unwrap_err();
    assert!(matches!(error, LinkshareError::MalformedResponse(_)));
}
