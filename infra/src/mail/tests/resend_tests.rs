//! Tests for the Resend mail service against a mock HTTP server

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::mail::{verification_email, EmailService, ResendConfig, ResendMailService};
use crate::InfrastructureError;

fn config(base_url: &str) -> ResendConfig {
    ResendConfig {
        api_key: "re_test_key".to_string(),
        from_address: "WorkWrap <noreply@workwrap.dev>".to_string(),
        api_base_url: base_url.to_string(),
        max_retries: 3,
        retry_delay_ms: 1,
        request_timeout_secs: 5,
    }
}

#[tokio::test]
async fn test_send_verification_code_posts_expected_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .and(header("authorization", "Bearer re_test_key"))
        .and(body_partial_json(json!({
            "from": "WorkWrap <noreply@workwrap.dev>",
            "to": ["user@example.com"],
            "subject": "Your WorkWrap Verification Code",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "email_123" })))
        .expect(1)
        .mount(&server)
        .await;

    let service = ResendMailService::new(config(&server.uri())).unwrap();
    let id = service
        .send_verification_code("user@example.com", "482913")
        .await
        .unwrap();

    assert_eq!(id, "email_123");

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body["html"].as_str().unwrap().contains("482913"));
    assert!(body["text"].as_str().unwrap().contains("482913"));
}

#[tokio::test]
async fn test_retries_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "email_retry" })))
        .expect(1)
        .mount(&server)
        .await;

    let service = ResendMailService::new(config(&server.uri())).unwrap();
    let message = verification_email("user@example.com", "111111", 2026);

    assert_eq!(service.send_email(&message).await.unwrap(), "email_retry");
}

#[tokio::test]
async fn test_gives_up_after_max_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(429))
        .expect(3)
        .mount(&server)
        .await;

    let service = ResendMailService::new(config(&server.uri())).unwrap();
    let message = verification_email("user@example.com", "111111", 2026);

    let error = service.send_email(&message).await.unwrap_err();
    assert!(matches!(error, InfrastructureError::Mail(_)));
    assert!(error.to_string().contains("after 3 attempts"));
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "name": "validation_error",
            "message": "Invalid `to` field."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = ResendMailService::new(config(&server.uri())).unwrap();
    let message = verification_email("not-an-address", "111111", 2026);

    let error = service.send_email(&message).await.unwrap_err();
    assert!(error.to_string().contains("422"));
}

#[tokio::test]
async fn test_accepted_send_with_unreadable_body_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(200).set_body_string("queued"))
        .expect(1)
        .mount(&server)
        .await;

    let service = ResendMailService::new(config(&server.uri())).unwrap();
    let message = verification_email("user@example.com", "111111", 2026);

    let id = service.send_email(&message).await.unwrap();
    assert!(id.starts_with("resend-"), "unexpected id {}", id);
}

#[test]
fn test_config_requires_credentials() {
    let mut mail = ww_shared::config::MailConfig::default();
    assert!(ResendConfig::from_mail_config(&mail).is_err());

    mail.api_key = "re_test".to_string();
    mail.from_address = "noreply@workwrap.dev".to_string();
    mail.api_base_url = "https://api.resend.com/".to_string();

    let config = ResendConfig::from_mail_config(&mail).unwrap();
    assert_eq!(config.api_base_url, "https://api.resend.com");
    assert_eq!(config.max_retries, 3);
}
