//! Payment record routes (admin only)
//!
//! Payments are standalone records; nothing in the order flow reads or
//! writes them.

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/payments", get(handler::list).post(handler::create))
        .route_layer(middleware::from_fn(require_admin))
}
