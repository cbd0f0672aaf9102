//! Order Model
//!
//! 订单实体和建单 DTO。
//!
//! 金额不变式在 repository 建单时强制成立：
//! `line.subtotal = price * quantity`，`subtotal = Σ line.subtotal`，
//! `total = subtotal + tax`。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// Order fulfillment mode — only dine-in orders bind a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    DineIn,
    Takeaway,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::DineIn => "dine-in",
            OrderType::Takeaway => "takeaway",
        }
    }
}

/// Order lifecycle status
///
/// `Completed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

/// Order line item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(with = "serde_helpers::record_id")]
    pub menu_item_id: RecordId,
    pub menu_item_name: String,
    pub quantity: i32,
    pub price: f64,
    /// `price * quantity`, computed at creation
    pub subtotal: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// `ORD-YYYYMMDD-NNNN`, assigned at creation, immutable
    pub order_number: String,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub table_id: Option<RecordId>,
    #[serde(default)]
    pub table_number: Option<String>,
    pub order_type: OrderType,
    pub items: Vec<OrderLine>,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub status: OrderStatus,
    pub created_by: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub completed_at: Option<i64>,
}

/// Order line input — subtotal is recomputed server-side, never trusted
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderLineInput {
    #[serde(with = "serde_helpers::record_id")]
    pub menu_item_id: RecordId,
    #[validate(length(min = 1))]
    pub menu_item_name: String,
    #[validate(range(min = 1))]
    pub quantity: i32,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderCreate {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub table_id: Option<RecordId>,
    #[serde(default)]
    pub table_number: Option<String>,
    pub order_type: OrderType,
    #[validate(length(min = 1), nested)]
    pub items: Vec<OrderLineInput>,
    #[validate(range(min = 0.0))]
    pub tax: f64,
}
