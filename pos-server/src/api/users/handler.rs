//! User Management API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use crate::core::ServerState;
use crate::db::models::User;
use crate::db::repository::UserRepository;
use crate::utils::AppResult;

/// GET /api/users - 所有用户 (密码哈希不出库)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<User>>> {
    let repo = UserRepository::new(state.get_db());
    let users = repo.find_all().await?;
    Ok(Json(users))
}

/// DELETE /api/users/{id} - 删除用户
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let repo = UserRepository::new(state.get_db());
    repo.delete(&id).await?;
    tracing::info!(user_id = %id, "User deleted");
    Ok(Json(json!({"message": "User deleted successfully"})))
}
