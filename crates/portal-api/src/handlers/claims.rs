use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use portal_core::{Claim, ClaimFilter, NewClaim};

use crate::dto::CreateClaimRequest;
use crate::error::ApiError;
use crate::extract::AuthenticatedUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /v1/claims
pub async fn list_claims(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(filter): Query<ClaimFilter>,
) -> Result<Json<ApiResponse<Vec<Claim>>>, ApiError> {
    let claims = state.claims.list_claims(&filter).await?;
    Ok(Json(ApiResponse::list(claims)))
}

/// GET /v1/claims/{id}
pub async fn get_claim(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Claim>>, ApiError> {
    let claim = state.claims.get_claim(&id).await?;
    Ok(Json(ApiResponse::success(claim)))
}

/// POST /v1/claims
pub async fn create_claim(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(payload): Json<CreateClaimRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Claim>>), ApiError> {
    payload.validate()?;
    let claim = state.claims.create_claim(&NewClaim::from(payload)).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(claim))))
}
