//! Admin authentication extractor
//!
//! Checks the `Authorization: Bearer` header against the configured admin
//! token. When no token is configured the admin routes are open.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use subtle::ConstantTimeEq;

use crate::response::ApiError;
use crate::state::AppState;

/// Marker proving the request passed the admin token check
#[derive(Debug, Clone, Copy)]
pub struct AdminAuth;

#[async_trait]
impl<S> FromRequestParts<S> for AdminAuth
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let Some(expected) = app_state.admin_token() else {
            return Ok(AdminAuth);
        };

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        if token_matches(bearer.token(), expected) {
            Ok(AdminAuth)
        } else {
            tracing::warn!("Rejected admin request with invalid token");
            Err(ApiError::InvalidToken)
        }
    }
}

fn token_matches(given: &str, expected: &str) -> bool {
    given.as_bytes().ct_eq(expected.as_bytes()).into()
}
