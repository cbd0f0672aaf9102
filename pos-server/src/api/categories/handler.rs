//! Category API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{Category, CategoryCreate};
use crate::db::repository::CategoryRepository;
use crate::utils::AppResult;
use crate::utils::time::now_millis;

/// GET /api/categories - 获取所有分类
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Category>>> {
    let repo = CategoryRepository::new(state.get_db());
    let categories = repo.find_all().await?;
    Ok(Json(categories))
}

/// POST /api/categories - 创建分类
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<Category>> {
    payload.validate()?;
    let repo = CategoryRepository::new(state.get_db());
    let category = repo.create(payload, now_millis()).await?;
    Ok(Json(category))
}

/// PUT /api/categories/{id} - 更新分类
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<Category>> {
    payload.validate()?;
    let repo = CategoryRepository::new(state.get_db());
    let category = repo.update(&id, payload).await?;
    Ok(Json(category))
}

/// DELETE /api/categories/{id} - 删除分类
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let repo = CategoryRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(Json(json!({"message": "Category deleted successfully"})))
}
