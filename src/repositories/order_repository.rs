use crate::models::order::Order;
use crate::repositories::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use sqlx::SqlitePool;

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait OrderRepository: Send + Sync {
    /// Insert an order under a caller-chosen id. Fails with `AlreadyExists`
    /// if the id is taken, so callers can pick a fresh one.
    async fn create_order(
        &self,
        id: &str,
        user_id: i64,
        items: &str,
        total_amount: i64,
        status: &str,
    ) -> RepositoryResult<()>;
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Order>>;
}

pub struct SqliteOrderRepository {
    pool: SqlitePool,
}

impl SqliteOrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for SqliteOrderRepository {
    async fn create_order(
        &self,
        id: &str,
        user_id: i64,
        items: &str,
        total_amount: i64,
        status: &str,
    ) -> RepositoryResult<()> {
        let result = sqlx::query(
            "INSERT INTO orders (id, user_id, items, total_amount, status) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(user_id)
        .bind(items)
        .bind(total_amount)
        .bind(status)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                if e.to_string().contains("UNIQUE") {
                    Err(RepositoryError::AlreadyExists)
                } else {
                    Err(RepositoryError::Database(e))
                }
            }
        }
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            "SELECT id, user_id, items, total_amount, status, created_at FROM orders WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }
}
