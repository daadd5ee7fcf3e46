//! HTTP error mapping.
//!
//! Every failure leaves the handler as `{"error": "<message>"}` with a status
//! derived from the service error kind. Nothing here is retried and nothing is
//! fatal to the process.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use tracing::debug;

use crate::services::catalog::CatalogError;
use crate::services::session::CartError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Cart(#[from] CartError),
    #[error("malformed request: {0}")]
    BadRequest(String),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Catalog(CatalogError::NotFound(_))
            | Self::Cart(CartError::SessionNotFound(_) | CartError::ItemNotFound(_)) => StatusCode::NOT_FOUND,
            Self::Cart(CartError::InvalidProduct(_) | CartError::InvalidOption { .. }) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        debug!(%status, error = %message, "request rejected");
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
