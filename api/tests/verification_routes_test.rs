use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use actix_web::{http::StatusCode, test, web};
use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use serde_json::{json, Value};

use ww_api::{create_app, AppState, HealthCheck};
use ww_core::repositories::InMemoryVerificationRepository;
use ww_core::services::{BcryptCodeHasher, ManualClock, RecordingMailDispatcher, VerificationService};
use ww_shared::config::{Environment, ServerConfig};

const EMAIL: &str = "user@example.com";

type TestState = AppState<InMemoryVerificationRepository, RecordingMailDispatcher>;

struct TestContext {
    repo: Arc<InMemoryVerificationRepository>,
    mail: Arc<RecordingMailDispatcher>,
    clock: Arc<ManualClock>,
    state: web::Data<TestState>,
}

/// Helper function to create test application state
fn create_test_context() -> TestContext {
    let repo = Arc::new(InMemoryVerificationRepository::new());
    let mail = Arc::new(RecordingMailDispatcher::new());
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
    ));

    let service = VerificationService::new(
        Arc::clone(&repo),
        Arc::clone(&mail),
        Arc::new(BcryptCodeHasher::new(4)),
    )
    .with_clock(clock.clone());

    TestContext {
        repo,
        mail,
        clock,
        state: web::Data::new(AppState::new(Arc::new(service))),
    }
}

fn send_code_request(email: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/auth/send-code")
        .set_json(json!({ "email": email }))
}

fn verify_code_request(email: &str, code: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/auth/verify-code")
        .set_json(json!({ "email": email, "code": code }))
}

/// Database stand-in whose reachability the test controls
struct StubDatabase {
    reachable: AtomicBool,
}

#[async_trait]
impl HealthCheck for StubDatabase {
    fn name(&self) -> &str {
        "database"
    }

    async fn check(&self) -> Result<(), String> {
        if self.reachable.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err("connection refused".to_string())
        }
    }
}

/// A well-formed code guaranteed to differ from `code`
fn wrong_code(code: &str) -> &'static str {
    if code == "111111" {
        "222222"
    } else {
        "111111"
    }
}

#[actix_web::test]
async fn test_health_check() {
    let ctx = create_test_context();
    let app = test::init_service(create_app(
        ctx.state.clone(),
        Environment::Development,
        &ServerConfig::default(),
    ))
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "workwrap-api");
}

#[actix_web::test]
async fn test_health_check_reports_database_state() {
    let ctx = create_test_context();
    let database = Arc::new(StubDatabase {
        reachable: AtomicBool::new(true),
    });
    let state = web::Data::new(
        ctx.state
            .get_ref()
            .clone()
            .with_health_check(database.clone()),
    );
    let app = test::init_service(create_app(
        state,
        Environment::Development,
        &ServerConfig::default(),
    ))
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["database"]["status"], "healthy");

    database.reachable.store(false, Ordering::SeqCst);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["services"]["database"]["status"], "unhealthy");
}

#[actix_web::test]
async fn test_send_code_success() {
    let ctx = create_test_context();
    let app = test::init_service(create_app(
        ctx.state.clone(),
        Environment::Development,
        &ServerConfig::default(),
    ))
    .await;

    let resp = test::call_service(&app, send_code_request(EMAIL).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["resend_after"], 60);
    assert_eq!(body["data"]["expires_at"], "2026-03-01T09:05:00Z");

    let sent = ctx.mail.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].address, EMAIL);
    assert_eq!(ctx.repo.len().await, 1);
}

#[actix_web::test]
async fn test_send_code_validation_errors() {
    let ctx = create_test_context();
    let app = test::init_service(create_app(
        ctx.state.clone(),
        Environment::Development,
        &ServerConfig::default(),
    ))
    .await;

    let cases = [("", "errors.emailRequired"), ("not-an-email", "errors.emailInvalid")];
    for (email, key) in cases {
        let resp = test::call_service(&app, send_code_request(email).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert_eq!(body["message"], key);
    }

    // Missing field is treated like an empty one
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/send-code")
        .set_json(json!({}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "errors.emailRequired");

    assert!(ctx.mail.sent().await.is_empty());
    assert!(ctx.repo.is_empty().await);
}

#[actix_web::test]
async fn test_send_code_malformed_json() {
    let ctx = create_test_context();
    let app = test::init_service(create_app(
        ctx.state.clone(),
        Environment::Development,
        &ServerConfig::default(),
    ))
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/send-code")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"email\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "errors.invalidRequest");
}

#[actix_web::test]
async fn test_send_code_cooldown() {
    let ctx = create_test_context();
    let app = test::init_service(create_app(
        ctx.state.clone(),
        Environment::Development,
        &ServerConfig::default(),
    ))
    .await;

    let resp = test::call_service(&app, send_code_request(EMAIL).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    ctx.clock.advance(Duration::seconds(30));
    let resp = test::call_service(&app, send_code_request(EMAIL).to_request()).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "errors.sendTooFrequent");

    ctx.clock.advance(Duration::seconds(31));
    let resp = test::call_service(&app, send_code_request(EMAIL).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(ctx.mail.sent().await.len(), 2);
}

#[actix_web::test]
async fn test_send_code_mail_failure_keeps_code() {
    let ctx = create_test_context();
    let app = test::init_service(create_app(
        ctx.state.clone(),
        Environment::Development,
        &ServerConfig::default(),
    ))
    .await;
    ctx.mail.set_failing(true);

    let resp = test::call_service(&app, send_code_request(EMAIL).to_request()).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "errors.emailSendFailed");

    // The undelivered code is still accepted
    let code = ctx.mail.last_code_for(EMAIL).await.unwrap();
    let resp = test::call_service(&app, verify_code_request(EMAIL, &code).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_send_code_storage_failure() {
    let ctx = create_test_context();
    let app = test::init_service(create_app(
        ctx.state.clone(),
        Environment::Development,
        &ServerConfig::default(),
    ))
    .await;
    ctx.repo.set_unavailable(true);

    let resp = test::call_service(&app, send_code_request(EMAIL).to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INTERNAL_ERROR");
    assert_eq!(body["message"], "errors.sendCodeFailed");
    assert!(!body.to_string().contains("unavailable"));
}

#[actix_web::test]
async fn test_verify_code_success_consumes_code() {
    let ctx = create_test_context();
    let app = test::init_service(create_app(
        ctx.state.clone(),
        Environment::Development,
        &ServerConfig::default(),
    ))
    .await;

    test::call_service(&app, send_code_request(EMAIL).to_request()).await;
    let code = ctx.mail.last_code_for(EMAIL).await.unwrap();

    let resp = test::call_service(&app, verify_code_request(EMAIL, &code).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["verified"], true);
    assert_eq!(body["data"]["email"], EMAIL);
    assert!(ctx.repo.is_empty().await);

    // A consumed code cannot be replayed
    let resp = test::call_service(&app, verify_code_request(EMAIL, &code).to_request()).await;
    assert_eq!(resp.status(), StatusCode::GONE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "errors.codeExpired");
}

#[actix_web::test]
async fn test_verify_code_without_issued_code() {
    let ctx = create_test_context();
    let app = test::init_service(create_app(
        ctx.state.clone(),
        Environment::Development,
        &ServerConfig::default(),
    ))
    .await;

    let resp = test::call_service(&app, verify_code_request(EMAIL, "123456").to_request()).await;
    assert_eq!(resp.status(), StatusCode::GONE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VERIFICATION_CODE_EXPIRED");
}

#[actix_web::test]
async fn test_verify_code_after_expiry() {
    let ctx = create_test_context();
    let app = test::init_service(create_app(
        ctx.state.clone(),
        Environment::Development,
        &ServerConfig::default(),
    ))
    .await;

    test::call_service(&app, send_code_request(EMAIL).to_request()).await;
    let code = ctx.mail.last_code_for(EMAIL).await.unwrap();

    ctx.clock.advance(Duration::minutes(5));
    let resp = test::call_service(&app, verify_code_request(EMAIL, &code).to_request()).await;
    assert_eq!(resp.status(), StatusCode::GONE);
}

#[actix_web::test]
async fn test_verify_code_malformed_candidate() {
    let ctx = create_test_context();
    let app = test::init_service(create_app(
        ctx.state.clone(),
        Environment::Development,
        &ServerConfig::default(),
    ))
    .await;

    test::call_service(&app, send_code_request(EMAIL).to_request()).await;

    for candidate in ["12345", "1234567", "12a456", ""] {
        let req = verify_code_request(EMAIL, candidate).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert_eq!(body["message"], "errors.codeInvalid");
    }

    // Rejected before reaching the store
    let records = ctx.repo.records_for(EMAIL).await;
    assert_eq!(records[0].attempts, 0);
}

#[actix_web::test]
async fn test_verify_code_lockout_flow() {
    let ctx = create_test_context();
    let app = test::init_service(create_app(
        ctx.state.clone(),
        Environment::Development,
        &ServerConfig::default(),
    ))
    .await;

    test::call_service(&app, send_code_request(EMAIL).to_request()).await;
    let code = ctx.mail.last_code_for(EMAIL).await.unwrap();
    let wrong = wrong_code(&code);

    for _ in 0..4 {
        ctx.clock.advance(Duration::seconds(1));
        let resp = test::call_service(&app, verify_code_request(EMAIL, wrong).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "errors.codeInvalid");
    }

    ctx.clock.advance(Duration::seconds(1));
    let resp = test::call_service(&app, verify_code_request(EMAIL, wrong).to_request()).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "errors.tooManyAttempts");

    // Even the right code is refused while locked
    let resp = test::call_service(&app, verify_code_request(EMAIL, &code).to_request()).await;
    assert_eq!(resp.status(), StatusCode::LOCKED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "errors.accountLocked");

    ctx.clock.advance(Duration::minutes(2));
    let resp = test::call_service(&app, send_code_request(EMAIL).to_request()).await;
    assert_eq!(resp.status(), StatusCode::LOCKED);
}

#[actix_web::test]
async fn test_verify_code_storage_failure() {
    let ctx = create_test_context();
    let app = test::init_service(create_app(
        ctx.state.clone(),
        Environment::Development,
        &ServerConfig::default(),
    ))
    .await;
    ctx.repo.set_unavailable(true);

    let resp = test::call_service(&app, verify_code_request(EMAIL, "123456").to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "errors.verifyCodeFailed");
}

#[actix_web::test]
async fn test_unknown_route_returns_not_found() {
    let ctx = create_test_context();
    let app = test::init_service(create_app(
        ctx.state.clone(),
        Environment::Development,
        &ServerConfig::default(),
    ))
    .await;

    let req = test::TestRequest::get().uri("/api/v1/auth/unknown").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
