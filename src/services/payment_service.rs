use crate::repositories::order_repository::OrderRepository;
use crate::repositories::RepositoryError;
use rand::Rng;
use std::sync::Arc;

/// Regeneration attempts when a random order id is already taken.
const ID_ATTEMPTS: u32 = 5;

#[derive(Debug, thiserror::Error)]
pub enum PaymentServiceError {
    #[error("Could not allocate an order id")]
    IdExhausted,
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Mock checkout: no gateway is involved. Every authenticated payment is
/// accepted and recorded as a confirmed order under a fresh order id.
pub struct PaymentService {
    orders: Arc<dyn OrderRepository>,
}

impl PaymentService {
    pub fn new(orders: Arc<dyn OrderRepository>) -> Self {
        Self { orders }
    }

    /// Record the order and return its id.
    pub async fn process(
        &self,
        user_id: i64,
        amount: i64,
        items: &serde_json::Value,
    ) -> Result<String, PaymentServiceError> {
        let items_json = items.to_string();

        for _ in 0..ID_ATTEMPTS {
            let order_id = generate_order_id();
            match self
                .orders
                .create_order(&order_id, user_id, &items_json, amount, "confirmed")
                .await
            {
                Ok(()) => return Ok(order_id),
                Err(RepositoryError::AlreadyExists) => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(PaymentServiceError::IdExhausted)
    }
}

fn generate_order_id() -> String {
    format!("ORD{:06}", rand::thread_rng().gen_range(0..1_000_000))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::order_repository::MockOrderRepository;
    use serde_json::json;

    #[tokio::test]
    async fn process_records_a_confirmed_order() {
        let mut orders = MockOrderRepository::new();
        orders
            .expect_create_order()
            .withf(|id, user_id, items, total, status| {
                id.starts_with("ORD")
                    && id.len() == 9
                    && *user_id == 7
                    && items.contains("Paneer Tikka")
                    && *total == 498
                    && status == "confirmed"
            })
            .times(1)
            .returning(|_, _, _, _, _| Box::pin(async { Ok(()) }));

        let service = PaymentService::new(Arc::new(orders));

        let items = json!([{"id": 1, "name": "Paneer Tikka", "price": 249, "quantity": 2}]);
        let order_id = service.process(7, 498, &items).await.unwrap();
        assert!(order_id.starts_with("ORD"));
    }

    #[tokio::test]
    async fn process_retries_on_id_collision() {
        let mut orders = MockOrderRepository::new();
        let mut calls = 0;
        orders
            .expect_create_order()
            .times(2)
            .returning_st(move |_, _, _, _, _| {
                calls += 1;
                if calls == 1 {
                    Box::pin(async { Err(RepositoryError::AlreadyExists) })
                } else {
                    Box::pin(async { Ok(()) })
                }
            });

        let service = PaymentService::new(Arc::new(orders));

        let order_id = service.process(1, 100, &json!([])).await.unwrap();
        assert!(order_id.starts_with("ORD"));
    }

    #[tokio::test]
    async fn process_surfaces_store_failure() {
        let mut orders = MockOrderRepository::new();
        orders
            .expect_create_order()
            .times(1)
            .returning(|_, _, _, _, _| {
                Box::pin(async { Err(RepositoryError::Database(sqlx::Error::PoolClosed)) })
            });

        let service = PaymentService::new(Arc::new(orders));

        let result = service.process(1, 100, &json!([])).await;
        assert!(matches!(result, Err(PaymentServiceError::Repository(_))));
    }

    #[test]
    fn order_ids_have_the_expected_shape() {
        for _ in 0..50 {
            let id = generate_order_id();
            assert!(id.starts_with("ORD"));
            assert_eq!(id.len(), 9);
            assert!(id[3..].chars().all(|c| c.is_ascii_digit()));
        }
    }
}
