//! Health API Handlers

use axum::Json;
use serde_json::{Value, json};

/// GET /health - 存活检查
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
