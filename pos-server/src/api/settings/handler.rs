//! Settings API Handlers

use axum::{Json, extract::State};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{Settings, SettingsUpdate};
use crate::db::repository::SettingsRepository;
use crate::utils::AppResult;
use crate::utils::time::now_millis;

/// GET /api/settings - 门店设置 (公开，首次读取写入默认值)
pub async fn get(State(state): State<ServerState>) -> AppResult<Json<Settings>> {
    let repo = SettingsRepository::new(state.get_db());
    let settings = repo.get_or_create(now_millis()).await?;
    Ok(Json(settings))
}

/// PUT /api/settings - 部分更新门店设置
pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<SettingsUpdate>,
) -> AppResult<Json<Settings>> {
    payload.validate()?;
    let repo = SettingsRepository::new(state.get_db());
    let settings = repo.update(payload, now_millis()).await?;
    tracing::info!(restaurant_name = %settings.restaurant_name, "Settings updated");
    Ok(Json(settings))
}
