use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use super::types::{DocumentFilter, split_list};
use super::{ApiError, ApiResponse, AppState};
use crate::models::DocumentWithOutcome;

/// `GET /api/documents?type=a,b`. Without `type` every document is returned.
pub async fn list_documents(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<DocumentFilter>,
) -> Result<Json<ApiResponse<Vec<DocumentWithOutcome>>>, ApiError> {
    let types = filter.document_type.as_deref().map(split_list);
    let documents = state.store().get_legal_documents(types.as_deref()).await?;
    Ok(Json(ApiResponse::success(documents)))
}
