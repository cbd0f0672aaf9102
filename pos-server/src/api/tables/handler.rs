//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{DiningTable, DiningTableCreate};
use crate::db::repository::DiningTableRepository;
use crate::utils::AppResult;
use crate::utils::time::now_millis;

/// GET /api/tables - 获取所有桌台
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<DiningTable>>> {
    let repo = DiningTableRepository::new(state.get_db());
    let tables = repo.find_all().await?;
    Ok(Json(tables))
}

/// POST /api/tables - 创建桌台
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<Json<DiningTable>> {
    payload.validate()?;
    let repo = DiningTableRepository::new(state.get_db());
    let table = repo.create(payload, now_millis()).await?;
    Ok(Json(table))
}

/// PUT /api/tables/{id} - 更新桌台
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<Json<DiningTable>> {
    payload.validate()?;
    let repo = DiningTableRepository::new(state.get_db());
    let table = repo.update(&id, payload).await?;
    Ok(Json(table))
}

/// DELETE /api/tables/{id} - 删除桌台
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let repo = DiningTableRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(Json(json!({"message": "Table deleted successfully"})))
}
