//! Session cart routes.
//!
//! DESIGN
//! ======
//! Handlers are thin: they extract path and body, call into `SessionStore`,
//! and let `ApiError` pick the status. The cart list and add endpoints create
//! the session on first use; delete and the mirror view never do.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::routes::error::ApiError;
use crate::services::session::{CartError, CartItem};
use crate::state::AppState;

/// Body of `POST /api/session/{session_id}/add`. Missing fields read as empty
/// strings; `productId` is matched against the catalog exactly, so an empty
/// or padded ID is rejected as an unknown product.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemBody {
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub color: String,
}

/// Read-only view served to the smart mirror.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub session_id: String,
    pub clicked_products: Vec<CartItem>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// `GET /api/session/{session_id}/cart`
pub async fn list_cart(State(state): State<AppState>, Path(session_id): Path<String>) -> Json<Vec<CartItem>> {
    Json(state.sessions.list_items(&session_id))
}

/// `POST /api/session/{session_id}/add`
pub async fn add_item(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    body: Result<Json<AddItemBody>, JsonRejection>,
) -> Result<Json<CartItem>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let item = state.sessions.add_item(&session_id, &body.product_id, &body.size, &body.color)?;
    Ok(Json(item))
}

/// `DELETE /api/session/{session_id}/cart/{item_id}`
pub async fn remove_item(
    State(state): State<AppState>,
    Path((session_id, item_id)): Path<(String, String)>,
) -> Result<Json<DeleteResponse>, ApiError> {
    // Item ids are numeric; anything else can never match.
    let Ok(id) = item_id.trim().parse::<i64>() else {
        if !state.sessions.contains(&session_id) {
            return Err(CartError::SessionNotFound(session_id).into());
        }
        return Err(CartError::ItemNotFound(item_id).into());
    };
    state.sessions.remove_item(&session_id, id)?;
    Ok(Json(DeleteResponse { success: true }))
}

/// `GET /api/session/{session_id}`: mirror view. Never creates or refreshes.
pub async fn session_view(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionView>, ApiError> {
    let session = state
        .sessions
        .snapshot(&session_id)
        .ok_or_else(|| CartError::SessionNotFound(session_id))?;
    Ok(Json(SessionView { session_id: session.session_id, clicked_products: session.cart_items }))
}

#[cfg(test)]
#[path = "cart_test.rs"]
mod tests;
