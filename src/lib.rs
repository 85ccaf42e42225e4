pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;

// Make test_utils available for both unit tests and integration tests
pub mod test_utils;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<services::auth_service::AuthService>,
    pub catalog_service: Arc<services::catalog_service::CatalogService>,
    pub payment_service: Arc<services::payment_service::PaymentService>,
    pub token_service: Arc<services::token_service::TokenService>,
}

/// The REST surface. Layers that only matter in production (CORS, tracing)
/// are added by the server binary on top of this.
pub fn app(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/payment/process", post(handlers::process_payment))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_session,
        ));

    Router::new()
        .route("/api/auth/register", post(handlers::register))
        .route("/api/auth/send-otp", post(handlers::send_otp))
        .route("/api/auth/verify-otp", post(handlers::verify_otp))
        .route("/api/auth/login", post(handlers::login))
        .route("/api/menu", get(handlers::list_menu))
        .merge(protected)
        .with_state(state)
}
