use axum::{
    extract::{Path, Query, State},
    Json,
};

use portal_core::{PolicyDetail, PolicyFilter, PolicySummary};

use crate::error::ApiError;
use crate::extract::AuthenticatedUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /v1/policies
pub async fn list_policies(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(filter): Query<PolicyFilter>,
) -> Result<Json<ApiResponse<Vec<PolicySummary>>>, ApiError> {
    let policies = state.policies.list_policies(&filter).await?;
    Ok(Json(ApiResponse::list(policies)))
}

/// GET /v1/policies/{id}
pub async fn get_policy(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<PolicyDetail>>, ApiError> {
    let policy = state.policies.get_policy(&id).await?;
    Ok(Json(ApiResponse::success(policy)))
}
