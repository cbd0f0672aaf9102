//! Dining Table Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// Table occupancy status — closed variant set, unknown values rejected at
/// the boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    Available,
    Occupied,
    Reserved,
}

impl TableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableStatus::Available => "available",
            TableStatus::Occupied => "occupied",
            TableStatus::Reserved => "reserved",
        }
    }
}

impl Default for TableStatus {
    fn default() -> Self {
        TableStatus::Available
    }
}

/// Dining table entity (桌台)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTable {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub table_number: String,
    #[serde(default)]
    pub capacity: i32,
    #[serde(default)]
    pub status: TableStatus,
    #[serde(default)]
    pub created_at: i64,
}

/// Create/update dining table payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DiningTableCreate {
    #[validate(length(min = 1, max = 32))]
    pub table_number: String,
    #[validate(range(min = 1))]
    pub capacity: i32,
    #[serde(default)]
    pub status: TableStatus,
}
