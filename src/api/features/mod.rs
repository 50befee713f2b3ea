//! Public storefront feature list
//!
//! Static content consumed by the landing page; no database involved.

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::core::ServerState;

async fn list() -> Json<Value> {
    Json(json!([
        {
            "icon": "FaShoppingCart",
            "title": "Seamless Shopping",
            "desc": "Browse, cart, and checkout in Naira—fast and intuitive."
        },
        {
            "icon": "FaCogs",
            "title": "Smart Admin Tools",
            "desc": "Manage stock, orders, and suppliers with ease."
        },
        {
            "icon": "FaChartLine",
            "title": "Real-Time Analytics",
            "desc": "Gain insights with live sales and stock data."
        }
    ]))
}

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/features", get(list))
}
