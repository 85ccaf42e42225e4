use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub user_id: i64,
    /// The item list exactly as the client sent it, stored as JSON text.
    pub items: String,
    pub total_amount: i64,
    pub status: String,
    pub created_at: String,
}
