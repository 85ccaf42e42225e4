use crate::models::menu::{MenuFilter, MenuItem};
use crate::repositories::menu_repository::MenuRepository;
use crate::repositories::RepositoryError;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum CatalogServiceError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Read-only passthrough over the menu store.
pub struct CatalogService {
    menu: Arc<dyn MenuRepository>,
}

impl CatalogService {
    pub fn new(menu: Arc<dyn MenuRepository>) -> Self {
        Self { menu }
    }

    pub async fn list_items(&self, filter: MenuFilter) -> Result<Vec<MenuItem>, CatalogServiceError> {
        Ok(self.menu.list_items(filter).await?)
    }
}
