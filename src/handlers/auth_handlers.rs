use crate::error::AppError;
use crate::services::auth_service::RegisterRequest;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct RegisterBody {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct SendOtpBody {
    pub email: String,
}

#[derive(Deserialize)]
pub struct VerifyOtpBody {
    pub email: String,
    pub otp: String,
}

#[derive(Deserialize)]
pub struct LoginBody {
    pub email: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<impl IntoResponse, AppError> {
    state
        .auth_service
        .register(RegisterRequest {
            name: body.name,
            email: body.email,
            password: body.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully" })),
    ))
}

pub async fn send_otp(
    State(state): State<AppState>,
    Json(body): Json<SendOtpBody>,
) -> Result<impl IntoResponse, AppError> {
    state.auth_service.request_code(&body.email).await?;

    Ok(Json(json!({ "message": "OTP sent successfully" })))
}

pub async fn verify_otp(
    State(state): State<AppState>,
    Json(body): Json<VerifyOtpBody>,
) -> Result<impl IntoResponse, AppError> {
    let session = state
        .auth_service
        .verify_code(&body.email, &body.otp)
        .await?;

    Ok(Json(json!({
        "message": "OTP verified successfully",
        "token": session.token,
        "user": session.user,
    })))
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<impl IntoResponse, AppError> {
    let name = state.auth_service.login(&body.email).await?;

    Ok(Json(json!({ "message": "Use OTP to login", "name": name })))
}
