//! Hub API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/hub/orders/{code}", get(handler::orders_for_party))
}
