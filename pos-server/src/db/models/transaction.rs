//! Transaction Model
//!
//! 支付交易实体。落库后不可变。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// Payment method — closed variant set, unknown values rejected at the
/// boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Debit,
    Credit,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Debit => "debit",
            PaymentMethod::Credit => "credit",
        }
    }
}

/// Payment transaction entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// `TRX-YYYYMMDD-NNNN`, assigned at creation, immutable
    pub transaction_number: String,
    #[serde(with = "serde_helpers::record_id")]
    pub order_id: RecordId,
    pub payment_method: PaymentMethod,
    pub amount_paid: f64,
    /// Caller-supplied; not cross-checked against `amount_paid - total`
    pub change_amount: f64,
    pub total: f64,
    pub cashier: String,
    #[serde(default)]
    pub created_at: i64,
}

/// Create transaction payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TransactionCreate {
    #[serde(with = "serde_helpers::record_id")]
    pub order_id: RecordId,
    pub payment_method: PaymentMethod,
    #[validate(range(min = 0.0))]
    pub amount_paid: f64,
    pub change_amount: f64,
    #[validate(range(min = 0.0))]
    pub total: f64,
}
