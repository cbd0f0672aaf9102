//! Order API Handlers
//!
//! 建单操作显式接收当前登录身份，`created_by` 落库为用户名。

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Order, OrderCreate, OrderStatus};
use crate::db::repository::OrderRepository;
use crate::utils::time::now_millis;
use crate::utils::{AppError, AppResult};

/// 订单列表查询参数
///
/// `status` 是封闭枚举，未知状态值直接 400。
#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<OrderStatus>,
}

/// POST /api/orders - 建单
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    payload.validate()?;

    let repo = OrderRepository::new(state.get_db());
    let order = repo.create(payload, &user.username, now_millis()).await?;

    tracing::info!(
        order_number = %order.order_number,
        order_type = order.order_type.as_str(),
        total = order.total,
        created_by = %order.created_by,
        "Order created"
    );
    Ok(Json(order))
}

/// GET /api/orders?status= - 订单列表，最新在前
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let repo = OrderRepository::new(state.get_db());
    let orders = repo.find_all(query.status).await?;
    Ok(Json(orders))
}

/// GET /api/orders/{id} - 单个订单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.get_db());
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    Ok(Json(order))
}

/// PUT /api/orders/{id}/complete - 标记完成
pub async fn complete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let repo = OrderRepository::new(state.get_db());
    let order = repo.complete(&id, now_millis()).await?;

    tracing::info!(order_number = %order.order_number, "Order completed");
    Ok(Json(json!({"message": "Order completed successfully"})))
}
