//! User Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// User entity (收银员/管理员)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub username: String,
    pub full_name: String,
    /// "admin" | "kasir"
    pub role: String,
    /// Argon2 hash — never serialized back out (API responses, broadcasts)
    #[serde(default, skip_serializing)]
    pub hashed_password: String,
    #[serde(default)]
    pub created_at: i64,
}

/// Registration payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserCreate {
    #[validate(length(min = 3, max = 64))]
    pub username: String,
    #[validate(length(min = 6))]
    pub password: String,
    #[validate(length(min = 1))]
    pub full_name: String,
    pub role: String,
}

/// Login payload
#[derive(Debug, Clone, Deserialize)]
pub struct UserLogin {
    pub username: String,
    pub password: String,
}
