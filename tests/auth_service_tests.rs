use chrono::{Duration, Utc};
use foodie::{
    repositories::{
        otp_repository::SqliteOtpRepository, user_repository::SqliteUserRepository,
    },
    services::{
        auth_service::{AuthService, AuthServiceError, RegisterRequest},
        token_service::TokenService,
    },
    test_utils::test_helpers::{self, RecordingEmailService},
};
use sqlx::SqlitePool;
use std::sync::Arc;

const TEST_SECRET: &str = "integration-test-secret";

fn auth_service(pool: &SqlitePool, email: RecordingEmailService) -> AuthService {
    AuthService::new(
        Arc::new(SqliteUserRepository::new(pool.clone())),
        Arc::new(SqliteOtpRepository::new(pool.clone())),
        Box::new(email),
        Arc::new(TokenService::new(TEST_SECRET)),
    )
}

fn register_request(name: &str, email: &str, password: &str) -> RegisterRequest {
    RegisterRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn register_succeeds_once_then_conflicts() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let service = auth_service(&pool, RecordingEmailService::new());

    let user = service
        .register(register_request("Ana", "ana@x.com", "secret1"))
        .await
        .unwrap();
    assert_eq!(user.name, "Ana");
    assert_eq!(user.email, "ana@x.com");

    let result = service
        .register(register_request("Impostor", "ana@x.com", "other"))
        .await;
    assert!(matches!(result, Err(AuthServiceError::EmailTaken)));
}

#[tokio::test]
async fn request_code_requires_prior_registration() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let email = RecordingEmailService::new();
    let service = auth_service(&pool, email.clone());

    let result = service.request_code("nobody@x.com").await;
    assert!(matches!(result, Err(AuthServiceError::UserNotFound)));
    assert!(email.sent().is_empty());
}

#[tokio::test]
async fn full_flow_issues_token_and_summary() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let email = RecordingEmailService::new();
    let service = auth_service(&pool, email.clone());

    service
        .register(register_request("Ana", "ana@x.com", "secret1"))
        .await
        .unwrap();

    service.request_code("ana@x.com").await.unwrap();

    let sent = email.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "ana@x.com");

    let code = email.last_code().unwrap();
    let session = service.verify_code("ana@x.com", &code).await.unwrap();
    assert_eq!(session.user.name, "Ana");
    assert_eq!(session.user.email, "ana@x.com");

    let identity = TokenService::new(TEST_SECRET)
        .validate(&session.token)
        .unwrap();
    assert_eq!(identity.user_id, session.user.id);
    assert_eq!(identity.email, "ana@x.com");
}

#[tokio::test]
async fn a_code_verifies_exactly_once() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let email = RecordingEmailService::new();
    let service = auth_service(&pool, email.clone());

    service
        .register(register_request("Ana", "ana@x.com", "secret1"))
        .await
        .unwrap();
    service.request_code("ana@x.com").await.unwrap();

    let code = email.last_code().unwrap();
    service.verify_code("ana@x.com", &code).await.unwrap();

    let again = service.verify_code("ana@x.com", &code).await;
    assert!(matches!(again, Err(AuthServiceError::NoSuchCode)));
}

#[tokio::test]
async fn wrong_code_does_not_consume_the_record() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let email = RecordingEmailService::new();
    let service = auth_service(&pool, email.clone());

    service
        .register(register_request("Ana", "ana@x.com", "secret1"))
        .await
        .unwrap();
    service.request_code("ana@x.com").await.unwrap();

    let code = email.last_code().unwrap();
    let wrong = if code == "000000" { "000001" } else { "000000" };

    let result = service.verify_code("ana@x.com", wrong).await;
    assert!(matches!(result, Err(AuthServiceError::InvalidCode)));

    // The outstanding code still works.
    service.verify_code("ana@x.com", &code).await.unwrap();
}

#[tokio::test]
async fn a_second_request_supersedes_the_first_code() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let email = RecordingEmailService::new();
    let service = auth_service(&pool, email.clone());

    service
        .register(register_request("Ana", "ana@x.com", "secret1"))
        .await
        .unwrap();

    service.request_code("ana@x.com").await.unwrap();
    let first_code = email.last_code().unwrap();

    service.request_code("ana@x.com").await.unwrap();
    let second_code = email.last_code().unwrap();

    // Well within the TTL, yet the first code is dead.
    if first_code != second_code {
        let result = service.verify_code("ana@x.com", &first_code).await;
        assert!(matches!(result, Err(AuthServiceError::InvalidCode)));
    }

    service.verify_code("ana@x.com", &second_code).await.unwrap();
}

#[tokio::test]
async fn codes_expire_after_five_minutes() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let service = auth_service(&pool, RecordingEmailService::new());

    test_helpers::insert_test_user(&pool, "Ana", "ana@x.com", "secret1")
        .await
        .unwrap();
    test_helpers::insert_otp_code(&pool, "ana@x.com", "123456", Utc::now() - Duration::minutes(6))
        .await
        .unwrap();

    let result = service.verify_code("ana@x.com", "123456").await;
    assert!(matches!(result, Err(AuthServiceError::NoSuchCode)));
}

#[tokio::test]
async fn codes_within_the_ttl_still_verify() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let service = auth_service(&pool, RecordingEmailService::new());

    test_helpers::insert_test_user(&pool, "Ana", "ana@x.com", "secret1")
        .await
        .unwrap();
    test_helpers::insert_otp_code(&pool, "ana@x.com", "123456", Utc::now() - Duration::minutes(4))
        .await
        .unwrap();

    service.verify_code("ana@x.com", "123456").await.unwrap();
}

#[tokio::test]
async fn failed_delivery_is_surfaced_but_the_record_survives() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let email = RecordingEmailService::failing();
    let service = auth_service(&pool, email.clone());

    service
        .register(register_request("Ana", "ana@x.com", "secret1"))
        .await
        .unwrap();

    let result = service.request_code("ana@x.com").await;
    assert!(matches!(result, Err(AuthServiceError::Email(_))));

    // The record was written before the send, so the code (had it reached
    // the user another way) still verifies.
    let code = email.last_code().unwrap();
    service.verify_code("ana@x.com", &code).await.unwrap();
}

#[tokio::test]
async fn login_probe_confirms_existence_only() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let service = auth_service(&pool, RecordingEmailService::new());

    service
        .register(register_request("Ana", "ana@x.com", "secret1"))
        .await
        .unwrap();

    let name = service.login("ana@x.com").await.unwrap();
    assert_eq!(name, "Ana");

    let result = service.login("nobody@x.com").await;
    assert!(matches!(result, Err(AuthServiceError::UserNotFound)));
}
