use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use foodie::test_utils::test_helpers::{self, RecordingEmailService};
use serde_json::{json, Value};
use tower::util::ServiceExt;

const TEST_SECRET: &str = "api-test-secret";

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn register_returns_201_then_400() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let state = test_helpers::build_app_state(&pool, RecordingEmailService::new(), TEST_SECRET);
    let app = foodie::app(state);

    let body = json!({ "name": "Ana", "email": "ana@x.com", "password": "secret1" });

    let response = app
        .clone()
        .oneshot(post_json("/api/auth/register", body.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        body_json(response).await["message"],
        "User registered successfully"
    );

    let response = app
        .oneshot(post_json("/api/auth/register", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "User already exists");
}

#[tokio::test]
async fn send_otp_unknown_email_is_404() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let state = test_helpers::build_app_state(&pool, RecordingEmailService::new(), TEST_SECRET);
    let app = foodie::app(state);

    let response = app
        .oneshot(post_json(
            "/api/auth/send-otp",
            json!({ "email": "nobody@x.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "User not found");
}

#[tokio::test]
async fn verify_otp_without_a_code_on_file_is_400() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let state = test_helpers::build_app_state(&pool, RecordingEmailService::new(), TEST_SECRET);
    let app = foodie::app(state);

    test_helpers::insert_test_user(&pool, "Ana", "ana@x.com", "secret1")
        .await
        .unwrap();

    let response = app
        .oneshot(post_json(
            "/api/auth/verify-otp",
            json!({ "email": "ana@x.com", "otp": "123456" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "OTP expired or invalid");
}

#[tokio::test]
async fn login_probe_over_http() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let state = test_helpers::build_app_state(&pool, RecordingEmailService::new(), TEST_SECRET);
    let app = foodie::app(state);

    test_helpers::insert_test_user(&pool, "Ana", "ana@x.com", "secret1")
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(post_json("/api/auth/login", json!({ "email": "ana@x.com" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Use OTP to login");
    assert_eq!(body["name"], "Ana");

    let response = app
        .oneshot(post_json(
            "/api/auth/login",
            json!({ "email": "nobody@x.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn full_flow_from_registration_to_paid_order() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let email = RecordingEmailService::new();
    let state = test_helpers::build_app_state(&pool, email.clone(), TEST_SECRET);
    let app = foodie::app(state);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/register",
            json!({ "name": "Ana", "email": "ana@x.com", "password": "secret1" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/send-otp",
            json!({ "email": "ana@x.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "OTP sent successfully");

    let code = email.last_code().unwrap();
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/verify-otp",
            json!({ "email": "ana@x.com", "otp": code }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "OTP verified successfully");
    assert_eq!(body["user"]["name"], "Ana");
    assert_eq!(body["user"]["email"], "ana@x.com");
    let token = body["token"].as_str().unwrap().to_string();

    // Paying without a token is refused before the handler runs.
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/payment/process",
            json!({ "amount": 498, "items": [] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // With the bearer token the mock payment succeeds and records an order.
    let request = Request::builder()
        .method("POST")
        .uri("/api/payment/process")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            json!({
                "amount": 498,
                "items": [{ "id": 1, "name": "Paneer Tikka", "price": 249, "quantity": 2 }],
            })
            .to_string(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Payment successful");
    assert!(body["orderId"].as_str().unwrap().starts_with("ORD"));
}

#[tokio::test]
async fn payment_rejects_a_garbage_token() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let state = test_helpers::build_app_state(&pool, RecordingEmailService::new(), TEST_SECRET);
    let app = foodie::app(state);

    let request = Request::builder()
        .method("POST")
        .uri("/api/payment/process")
        .header("content-type", "application/json")
        .header("authorization", "Bearer not-a-real-token")
        .body(Body::from(json!({ "amount": 100, "items": [] }).to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["message"], "Invalid session token");
}

#[tokio::test]
async fn menu_filters_over_http() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let state = test_helpers::build_app_state(&pool, RecordingEmailService::new(), TEST_SECRET);
    let app = foodie::app(state);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/menu?isVeg=true")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let items = body_json(response).await;
    let items = items.as_array().unwrap();
    assert!(!items.is_empty());
    assert!(items.iter().all(|i| i["isVeg"] == true));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/menu?search=CHICKEN")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let items = body_json(response).await;
    let items = items.as_array().unwrap();
    assert!(!items.is_empty());
    for item in items {
        let name = item["name"].as_str().unwrap().to_lowercase();
        let description = item["description"].as_str().unwrap().to_lowercase();
        assert!(name.contains("chicken") || description.contains("chicken"));
    }
}
