//! Database Module
//!
//! 嵌入式 SurrealDB (RocksDB 引擎) 连接和 schema 定义。

pub mod models;
pub mod repository;
pub mod sequence;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the embedded database at the given path
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {}", e)))?;

        db.use_ns("pos")
            .use_db("pos")
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {}", e)))?;

        define_schema(&db).await?;

        tracing::info!("Database connection established (SurrealDB embedded, RocksDB)");

        Ok(Self { db })
    }
}

/// Define indexes — idempotent, run at every startup
pub async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(
        r#"
        DEFINE INDEX IF NOT EXISTS idx_user_username ON TABLE user COLUMNS username UNIQUE;
        DEFINE INDEX IF NOT EXISTS idx_order_created_at ON TABLE order COLUMNS created_at;
        DEFINE INDEX IF NOT EXISTS idx_transactions_created_at ON TABLE transactions COLUMNS created_at;
        "#,
    )
    .await
    .map_err(|e| AppError::database(format!("Failed to define schema: {}", e)))?;
    Ok(())
}

/// In-memory database for tests
#[cfg(test)]
pub async fn open_test_db() -> Surreal<Db> {
    let db = Surreal::new::<surrealdb::engine::local::Mem>(())
        .await
        .expect("Failed to open in-memory database");
    db.use_ns("test")
        .use_db("test")
        .await
        .expect("Failed to select test namespace");
    define_schema(&db).await.expect("Failed to define schema");
    db
}
