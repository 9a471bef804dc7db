//! Tests for mail dispatcher selection

use ww_shared::config::{MailConfig, MailProvider};

use crate::mail::create_mail_dispatcher;

#[tokio::test]
async fn test_log_provider_dispatches() {
    let config = MailConfig::default();
    let dispatcher = create_mail_dispatcher(&config).unwrap();

    assert_eq!(dispatcher.provider_name(), "log");
    let id = dispatcher
        .send_verification_code("user@example.com", "123456")
        .await
        .unwrap();
    assert!(id.starts_with("log-"));
}

#[test]
fn test_resend_without_credentials_is_rejected() {
    let config = MailConfig {
        provider: MailProvider::Resend,
        ..Default::default()
    };

    assert!(create_mail_dispatcher(&config).is_err());
}

#[cfg(feature = "resend-mail")]
#[test]
fn test_resend_with_credentials() {
    let config = MailConfig {
        provider: MailProvider::Resend,
        api_key: "re_test".to_string(),
        from_address: "noreply@workwrap.dev".to_string(),
        ..Default::default()
    };

    let dispatcher = create_mail_dispatcher(&config).unwrap();
    assert_eq!(dispatcher.provider_name(), "Resend");
}
