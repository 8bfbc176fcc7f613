//! Bearer-token extractor backed by the identity provider

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use portal_core::AuthUser;

use crate::error::ApiError;
use crate::state::AppState;

/// Caller resolved from `Authorization: Bearer <token>`
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub AuthUser);

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(ApiError::MissingToken)?;

        let user = state.identity.get_user(token).await?;
        Ok(AuthenticatedUser(user))
    }
}
