//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON cart API and the product lookup endpoints under
//! a single Axum router. Anything that is not an API route falls through to
//! the static client served from `STATIC_DIR`.

pub mod cart;
pub mod error;
pub mod products;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// JSON API routes.
fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/product/{product_id}", get(products::get_product))
        .route("/api/debug/random-product-id", get(products::random_product_id))
        .route("/api/session/{session_id}", get(cart::session_view))
        .route("/api/session/{session_id}/cart", get(cart::list_cart))
        .route("/api/session/{session_id}/add", post(cart::add_item))
        .route("/api/session/{session_id}/cart/{item_id}", delete(cart::remove_item))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

/// Full application: API routes plus the static client as fallback.
#[must_use]
pub fn app(state: AppState) -> Router {
    let static_service = ServeDir::new(&state.config.static_dir).append_index_html_on_directories(true);

    api_routes(state)
        .fallback_service(static_service)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
