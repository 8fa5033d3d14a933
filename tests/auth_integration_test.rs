//! Integration tests for the credential store against a fake token endpoint

use chrono::{Duration, Utc};
use ehrlink::auth::{AuthManager, TokenType};
use ehrlink::config::{secret_string, DrChronoConfig};
use ehrlink::domain::{EhrError, ProviderKind};
use mockito::{Matcher, Server};
use secrecy::ExposeSecret;

fn drchrono_config(server: &Server) -> DrChronoConfig {
    DrChronoConfig::new("abc", secret_string("xyz"))
        .with_base_url(format!("{}/api/", server.url()))
        .with_token_url(format!("{}/o/token/", server.url()))
}

#[tokio::test]
async fn test_client_credentials_grant() {
    let mut server = Server::new_async().await;
    let token = server
        .mock("POST", "/o/token/")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "client_credentials".into()),
            Matcher::UrlEncoded("client_id".into(), "abc".into()),
            Matcher::UrlEncoded("client_secret".into(), "xyz".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token":"tok1","expires_in":3600,"token_type":"Bearer"}"#)
        .create_async()
        .await;

    let mut auth = AuthManager::new();
    let before = Utc::now();
    let record = auth
        .authenticate_drchrono(&drchrono_config(&server))
        .await
        .unwrap();

    token.assert_async().await;
    assert_eq!(record.token_type, TokenType::Bearer);
    assert_eq!(record.access_token.expose_secret().as_str(), "tok1");
    assert!(record.refresh_token.is_none());
    assert!(record.expires_at > before + Duration::seconds(3599));
    assert!(record.expires_at <= Utc::now() + Duration::seconds(3601));
    assert!(auth.is_valid(ProviderKind::DrChrono));
    assert!(!auth.is_valid_at(ProviderKind::DrChrono, Utc::now() + Duration::seconds(3601)));
}

#[tokio::test]
async fn test_rejected_credentials_carry_status_text() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/o/token/")
        .with_status(401)
        .with_body(r#"{"error":"invalid_client"}"#)
        .create_async()
        .await;

    let mut auth = AuthManager::new();
    let err = auth
        .authenticate_drchrono(&drchrono_config(&server))
        .await
        .unwrap_err();

    match err {
        EhrError::Authentication { provider, message } => {
            assert_eq!(provider, ProviderKind::DrChrono);
            assert_eq!(message, "DrChrono authentication failed: Unauthorized");
        }
        other => panic!("expected authentication error, got {other:?}"),
    }
    assert!(!auth.is_valid(ProviderKind::DrChrono));
    assert!(auth.credentials(ProviderKind::DrChrono).is_none());
}

#[tokio::test]
async fn test_unreachable_token_endpoint_is_transport_error() {
    let config = DrChronoConfig::new("abc", secret_string("xyz"))
        .with_token_url("http://127.0.0.1:1/o/token/");

    let mut auth = AuthManager::new();
    let err = auth.authenticate_drchrono(&config).await.unwrap_err();
    assert!(matches!(err, EhrError::Transport { status: None, .. }));
}

#[tokio::test]
async fn test_refresh_keeps_refresh_token_when_omitted() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/o/token/")
        .match_body(Matcher::UrlEncoded(
            "grant_type".into(),
            "client_credentials".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token":"tok1","refresh_token":"r1","expires_in":3600}"#)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/o/token/")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "refresh_token".into()),
            Matcher::UrlEncoded("refresh_token".into(), "r1".into()),
            Matcher::UrlEncoded("client_id".into(), "abc".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token":"tok2","expires_in":7200,"token_type":"Bearer"}"#)
        .create_async()
        .await;

    let config = drchrono_config(&server);
    let mut auth = AuthManager::new();
    let first = auth.authenticate_drchrono(&config).await.unwrap();
    let refresh_token = first.refresh_token.clone().unwrap();

    let second = auth.refresh_drchrono(&config, &refresh_token).await.unwrap();

    refresh.assert_async().await;
    assert_eq!(second.access_token.expose_secret().as_str(), "tok2");
    assert_eq!(
        second.refresh_token.unwrap().expose_secret().as_str(),
        "r1"
    );

    let stored = auth.credentials(ProviderKind::DrChrono).unwrap();
    assert_eq!(stored.authorization_header(), "Bearer tok2");
}

#[tokio::test]
async fn test_refresh_failure_message() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/o/token/")
        .with_status(400)
        .create_async()
        .await;

    let mut auth = AuthManager::new();
    let err = auth
        .refresh_drchrono(&drchrono_config(&server), &secret_string("stale"))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Authentication error (drchrono): Token refresh failed: Bad Request"
    );
}

#[tokio::test]
async fn test_out_of_range_token_lifetime_is_rejected() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/o/token/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token":"tok1","expires_in":9000000000000000}"#)
        .create_async()
        .await;

    let mut auth = AuthManager::new();
    let err = auth
        .authenticate_drchrono(&drchrono_config(&server))
        .await
        .unwrap_err();

    match err {
        EhrError::Authentication { provider, message } => {
            assert_eq!(provider, ProviderKind::DrChrono);
            assert!(message.contains("invalid expires_in"));
        }
        other => panic!("expected authentication error, got {other:?}"),
    }
    assert!(auth.credentials(ProviderKind::DrChrono).is_none());
}
