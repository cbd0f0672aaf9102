//! Menu Item Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    /// Category reference
    #[serde(with = "serde_helpers::record_id")]
    pub category_id: RecordId,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub available: bool,
    #[serde(default)]
    pub created_at: i64,
}

fn default_true() -> bool {
    true
}

/// Create/update menu item payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuItemCreate {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[serde(with = "serde_helpers::record_id")]
    pub category_id: RecordId,
    #[validate(range(min = 0.0))]
    pub price: f64,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub available: bool,
}
