//! Activity log routes (admin only)

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/activities", get(handler::list).post(handler::create))
        .route_layer(middleware::from_fn(require_admin))
}
