//! Settings Model
//!
//! 门店设置单例。首次读取时写入默认值。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// Restaurant settings (singleton)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub restaurant_name: String,
    pub address: String,
    pub phone: String,
    pub tax_percentage: f64,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub updated_at: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            id: None,
            restaurant_name: "Restoran Saya".to_string(),
            address: "Jl. Contoh No. 123, Jakarta".to_string(),
            phone: "021-12345678".to_string(),
            tax_percentage: 10.0,
            logo_url: None,
            updated_at: 0,
        }
    }
}

/// Partial settings update payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}
