//! Settings API 模块

mod handler;

use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/settings", routes())
}

fn routes() -> Router<ServerState> {
    // GET 公开 (小票打印需要门店信息)；PUT 仅管理员
    let admin = Router::new()
        .route("/", put(handler::update))
        .route_layer(middleware::from_fn(require_admin));

    Router::new().route("/", get(handler::get)).merge(admin)
}
