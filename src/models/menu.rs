use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub image: String,
    pub category: String,
    #[serde(rename = "isVeg")]
    pub is_veg: bool,
}

/// Filters accepted by the menu listing.
///
/// `is_veg` is matched against the literal string "true", mirroring the wire
/// contract: `isVeg=true` selects vegetarian items, any other value selects
/// non-vegetarian items, absent means no filter.
#[derive(Debug, Clone, Default)]
pub struct MenuFilter {
    pub is_veg: Option<bool>,
    pub search: Option<String>,
}
