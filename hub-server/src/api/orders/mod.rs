//! Order API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/{order_id}", get(handler::get_by_id))
        .route("/{order_id}/actions", post(handler::apply_action))
        .route("/{order_id}/archive", post(handler::archive))
        .route("/{order_id}/restore", post(handler::restore))
}
