//! Supplier API routes (admin only)

mod handler;

use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/suppliers", get(handler::list).post(handler::create))
        .route(
            "/api/suppliers/{id}",
            put(handler::update).delete(handler::delete),
        )
        .route_layer(middleware::from_fn(require_admin))
}
