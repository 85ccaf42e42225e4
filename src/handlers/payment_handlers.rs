use crate::error::AppError;
use crate::services::token_service::SessionIdentity;
use crate::AppState;
use axum::{
    extract::State,
    response::{IntoResponse, Json},
    Extension,
};
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct PaymentBody {
    pub amount: i64,
    pub items: serde_json::Value,
}

pub async fn process_payment(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
    Json(body): Json<PaymentBody>,
) -> Result<impl IntoResponse, AppError> {
    let order_id = state
        .payment_service
        .process(identity.user_id, body.amount, &body.items)
        .await?;

    Ok(Json(json!({
        "success": true,
        "orderId": order_id,
        "message": "Payment successful",
    })))
}
