//! Auth API Handlers

use axum::{Json, extract::State};
use serde::Serialize;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::auth::password::{hash_password, verify_password};
use crate::core::ServerState;
use crate::db::models::{User, UserCreate, UserLogin};
use crate::db::repository::UserRepository;
use crate::utils::time::now_millis;
use crate::utils::{AppError, AppResult};

/// 登录响应
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: User,
}

/// 当前登录身份 (从令牌解析，不回查数据库)
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub role: String,
}

/// POST /api/auth/register - 注册用户 (公开)
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<User>> {
    payload.validate()?;

    let hashed = hash_password(&payload.password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {}", e)))?;
    let repo = UserRepository::new(state.get_db());
    let user = repo.create(payload, hashed, now_millis()).await?;

    tracing::info!(username = %user.username, role = %user.role, "User registered");
    Ok(Json(user))
}

/// POST /api/auth/login - 登录，签发令牌 (公开)
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<UserLogin>,
) -> AppResult<Json<LoginResponse>> {
    let repo = UserRepository::new(state.get_db());
    let user = repo
        .find_by_username(&payload.username)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(&payload.password, &user.hashed_password)
        .map_err(|_| AppError::invalid_credentials())?
    {
        tracing::warn!(username = %payload.username, "Login failed: bad password");
        return Err(AppError::invalid_credentials());
    }

    let user_id = user
        .id
        .as_ref()
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("Persisted user has no id"))?;
    let token = state
        .get_jwt_service()
        .generate_token(&user_id, &user.username, &user.full_name, &user.role)
        .map_err(|e| AppError::internal(format!("Token generation failed: {}", e)))?;

    tracing::info!(username = %user.username, "Login successful");
    Ok(Json(LoginResponse {
        access_token: token,
        token_type: "bearer".to_string(),
        user,
    }))
}

/// GET /api/auth/me - 当前用户信息
pub async fn me(user: CurrentUser) -> AppResult<Json<MeResponse>> {
    Ok(Json(MeResponse {
        id: user.id,
        username: user.username,
        full_name: user.full_name,
        role: user.role,
    }))
}
