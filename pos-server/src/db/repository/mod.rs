//! Repository Module
//!
//! Provides CRUD operations for SurrealDB tables.

// Auth
pub mod user;

// Catalog
pub mod category;
pub mod menu_item;

// Floor
pub mod dining_table;

// Orders and payments
pub mod order;
pub mod transaction;

// Store settings
pub mod settings;

// Re-exports
pub use category::CategoryRepository;
pub use dining_table::DiningTableRepository;
pub use menu_item::MenuItemRepository;
pub use order::OrderRepository;
pub use settings::SettingsRepository;
pub use transaction::TransactionRepository;
pub use user::UserRepository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Convert repository errors to API errors at the handler boundary
impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::not_found(msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 格式
// =============================================================================
//
// 使用 surrealdb::RecordId 处理所有 ID：
//   - 解析: let id: RecordId = "order:abc".parse()?;
//   - CRUD: db.select(id) / db.delete(id) 直接使用 RecordId

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
