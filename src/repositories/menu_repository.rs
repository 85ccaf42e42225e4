use crate::models::menu::{MenuFilter, MenuItem};
use crate::repositories::RepositoryResult;
use async_trait::async_trait;
use sqlx::SqlitePool;

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait MenuRepository: Send + Sync {
    async fn list_items(&self, filter: MenuFilter) -> RepositoryResult<Vec<MenuItem>>;
}

pub struct SqliteMenuRepository {
    pool: SqlitePool,
}

impl SqliteMenuRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MenuRepository for SqliteMenuRepository {
    async fn list_items(&self, filter: MenuFilter) -> RepositoryResult<Vec<MenuItem>> {
        let mut sql = String::from(
            "SELECT id, name, description, price, image, category, is_veg FROM menu_items WHERE 1 = 1",
        );
        if filter.is_veg.is_some() {
            sql.push_str(" AND is_veg = ?");
        }
        if filter.search.is_some() {
            // SQLite LIKE is case-insensitive for ASCII, matching the
            // catalog's case-insensitive substring contract.
            sql.push_str(" AND (name LIKE ? OR description LIKE ?)");
        }
        sql.push_str(" ORDER BY id");

        let mut query = sqlx::query_as::<_, MenuItem>(&sql);
        if let Some(is_veg) = filter.is_veg {
            query = query.bind(is_veg);
        }
        if let Some(ref term) = filter.search {
            let pattern = format!("%{}%", term);
            query = query.bind(pattern.clone()).bind(pattern);
        }

        let items = query.fetch_all(&self.pool).await?;
        Ok(items)
    }
}
