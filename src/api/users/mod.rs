//! User self-service routes (profile, cart, favorites)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/user/profile",
            get(handler::get_profile).put(handler::update_profile),
        )
        .route(
            "/api/user/cart",
            get(handler::get_cart).put(handler::update_cart),
        )
        .route(
            "/api/user/favorites",
            get(handler::get_favorites).put(handler::update_favorites),
        )
}
