//! Menu Item API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{MenuItem, MenuItemCreate};
use crate::db::repository::MenuItemRepository;
use crate::utils::AppResult;
use crate::utils::time::now_millis;

/// GET /api/menu-items - 获取所有菜品
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItem>>> {
    let repo = MenuItemRepository::new(state.get_db());
    let items = repo.find_all().await?;
    Ok(Json(items))
}

/// POST /api/menu-items - 创建菜品
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    payload.validate()?;
    let repo = MenuItemRepository::new(state.get_db());
    let item = repo.create(payload, now_millis()).await?;
    Ok(Json(item))
}

/// PUT /api/menu-items/{id} - 更新菜品
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    payload.validate()?;
    let repo = MenuItemRepository::new(state.get_db());
    let item = repo.update(&id, payload).await?;
    Ok(Json(item))
}

/// DELETE /api/menu-items/{id} - 删除菜品
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let repo = MenuItemRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(Json(json!({"message": "Menu item deleted successfully"})))
}
