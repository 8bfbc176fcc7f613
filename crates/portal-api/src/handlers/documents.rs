use axum::{
    extract::{Path, Query, State},
    Json,
};

use portal_core::{DocumentDetail, DocumentFilter, DocumentSummary};

use crate::error::ApiError;
use crate::extract::AuthenticatedUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /v1/documents
pub async fn list_documents(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(filter): Query<DocumentFilter>,
) -> Result<Json<ApiResponse<Vec<DocumentSummary>>>, ApiError> {
    let documents = state.documents.list_documents(&filter).await?;
    Ok(Json(ApiResponse::list(documents)))
}

/// GET /v1/documents/{id}
pub async fn get_document(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DocumentDetail>>, ApiError> {
    let document = state.documents.get_document(&id).await?;
    Ok(Json(ApiResponse::success(document)))
}
