//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 认证相关接口
//! - [`users`] - 用户管理接口 (仅管理员)
//! - [`categories`] - 分类管理接口
//! - [`menu_items`] - 菜品管理接口
//! - [`tables`] - 桌台管理接口
//! - [`orders`] - 订单生命周期接口
//! - [`transactions`] - 收银交易接口
//! - [`reports`] - 日/周/月报表接口
//! - [`dashboard`] - 仪表盘汇总接口
//! - [`settings`] - 门店设置接口

pub mod auth;
pub mod health;
pub mod users;

// Catalog and floor APIs
pub mod categories;
pub mod menu_items;
pub mod tables;

// Core lifecycle APIs
pub mod orders;
pub mod transactions;

// Analytics APIs
pub mod dashboard;
pub mod reports;

// Store settings
pub mod settings;

use axum::{Router, middleware};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(users::router())
        .merge(categories::router())
        .merge(menu_items::router())
        .merge(tables::router())
        .merge(orders::router())
        .merge(transactions::router())
        .merge(reports::router())
        .merge(dashboard::router())
        .merge(settings::router())
}

/// Attach state and middleware, producing the final service
///
/// require_auth 在 Router 级别应用，内部跳过公共路由。
pub fn build_router(state: ServerState) -> Router {
    build_app()
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(CorsLayer::permissive())
                .layer(CompressionLayer::new()),
        )
}
