use crate::error::AppError;
use crate::models::menu::MenuFilter;
use crate::AppState;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct MenuQuery {
    /// Literal boolean-string: "true" selects vegetarian items, any other
    /// value selects non-vegetarian ones.
    #[serde(rename = "isVeg")]
    pub is_veg: Option<String>,
    pub search: Option<String>,
}

pub async fn list_menu(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = MenuFilter {
        is_veg: query.is_veg.map(|v| v == "true"),
        search: query.search,
    };

    let items = state.catalog_service.list_items(filter).await?;

    Ok(Json(items))
}
