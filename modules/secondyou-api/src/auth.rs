use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::ApiError;

/// Header carrying the caller's id, set by the upstream auth provider.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Longest user id accepted from the header.
const MAX_USER_ID_LEN: usize = 128;

/// Caller identity for history routes. Missing or blank header is a 401.
#[derive(Debug, Clone)]
pub struct UserId(pub String);

impl<S: Send + Sync> FromRequestParts<S> for UserId {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty() && id.len() <= MAX_USER_ID_LEN)
            .map(|id| UserId(id.to_string()))
            .ok_or_else(ApiError::unauthorized)
    }
}
