pub mod health;
pub mod history;
pub mod simulate;

use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};

use crate::error::ApiError;

/// Unknown `/api/*` routes get the JSON envelope; anything else a bare 404.
pub async fn not_found(uri: Uri) -> Response {
    if uri.path().starts_with("/api/") {
        ApiError::route_not_found().into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}
