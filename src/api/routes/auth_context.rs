//! Authentication context utilities.
//!
//! Authentication itself is an external collaborator; the upstream proxy
//! resolves the caller and forwards their id in the `x-user-id` header.
//! This extractor only surfaces that identity to handlers.

use super::error::ApiError;
use axum::{extract::FromRequestParts, http::StatusCode, http::request::Parts};
use uuid::Uuid;

/// The authenticated caller of a request.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Uuid,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                ApiError::new(StatusCode::UNAUTHORIZED, "Missing x-user-id header")
            })?;

        let user_id = header.parse::<Uuid>().map_err(|_| {
            ApiError::new(StatusCode::UNAUTHORIZED, "Invalid x-user-id header")
        })?;

        Ok(AuthUser { user_id })
    }
}
