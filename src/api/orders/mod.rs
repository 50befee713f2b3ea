//! Order API routes
//!
//! Placement and own-history are available to any authenticated user;
//! the full listing and status updates require admin.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let admin_routes = Router::new()
        .route("/api/orders", get(handler::list))
        .route("/api/orders/{id}", put(handler::update_status))
        .route_layer(middleware::from_fn(require_admin));

    Router::new()
        .route("/api/orders", post(handler::create))
        .route("/api/order-history", get(handler::history))
        .route("/api/order-history/{id}", get(handler::history_by_id))
        .merge(admin_routes)
}
