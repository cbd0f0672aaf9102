//! Dining Table API 模块

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tables", routes())
}

fn routes() -> Router<ServerState> {
    // 增删仅管理员；更新开放给所有登录用户 (收银员改桌台状态)
    let admin = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", delete(handler::delete))
        .route_layer(middleware::from_fn(require_admin));

    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", put(handler::update))
        .merge(admin)
}
