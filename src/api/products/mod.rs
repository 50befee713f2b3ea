//! Product API routes
//!
//! Reads are open to any authenticated user; mutations require admin.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let admin_routes = Router::new()
        .route("/api/products", post(handler::create))
        .route("/api/products/{id}", put(handler::update))
        .route_layer(middleware::from_fn(require_admin));

    Router::new()
        .route("/api/products", get(handler::list))
        .route("/api/products/{id}", get(handler::get_by_id))
        .merge(admin_routes)
}
