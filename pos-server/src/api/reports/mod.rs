//! Report API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reports", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/daily", get(handler::daily))
        .route("/weekly", get(handler::weekly))
        .route("/monthly", get(handler::monthly))
}
