//! Integration tests for the public Jobdeck HTTP client

#![cfg(feature = "client")]

use jobdeck_core::Role;
use jobdeck_http::client::{ClientError, PublicJobdeckClient, TypedClientBuilder};
use jobdeck_http::types::LoginRequest;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn builder_requires_base_url() {
    let result = TypedClientBuilder::new().build_public();
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn base_url_is_normalized() {
    let client = PublicJobdeckClient::new("http://localhost:8080/").unwrap();
    assert_eq!(client.base_url(), "http://localhost:8080");
}

#[tokio::test]
async fn login_hits_the_role_specific_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/company/login"))
        .and(body_json(json!({
            "email": "hr@acme.example",
            "password": "hunter2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "tok",
            "tokenType": "access_company"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = PublicJobdeckClient::new(server.uri()).unwrap();
    let response = client
        .login(
            Role::Company,
            LoginRequest {
                email: "hr@acme.example".into(),
                password: "hunter2".into(),
            },
        )
        .await
        .unwrap();

    let grant = response.into_grant().unwrap();
    assert_eq!(grant.token, "tok");
    assert_eq!(grant.kind, Some(jobdeck_core::TokenKind::CompanyAccess));
}

#[tokio::test]
async fn rejected_login_maps_to_an_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
        .mount(&server)
        .await;

    let client = PublicJobdeckClient::new(server.uri()).unwrap();
    let result = client
        .login(
            Role::User,
            LoginRequest {
                email: "a@b.example".into(),
                password: "nope".into(),
            },
        )
        .await;

    assert!(matches!(result, Err(ClientError::AuthenticationFailed(_))));
    assert!(result.err().unwrap().is_auth_expired());
}

#[tokio::test]
async fn logout_is_a_bare_delete() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = PublicJobdeckClient::new(server.uri()).unwrap();
    assert!(client.logout().await.is_ok());
}

#[tokio::test]
async fn server_errors_carry_status_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let client = PublicJobdeckClient::new(server.uri()).unwrap();
    let result = client.refresh(Role::User).await;
    match result {
        Err(ClientError::ServerError { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance");
        }
        other => panic!("expected server error, got {other:?}"),
    }
}
