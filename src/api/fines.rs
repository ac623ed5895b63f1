use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::validation::validate_id;
use super::{ApiError, ApiResponse, AppState};
use crate::db::OptionExt;
use crate::models::{DefenseWithFine, FineWithUser};

/// `GET /api/fines/{id}`: the fine joined with its owner.
pub async fn get_fine(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<FineWithUser>>, ApiError> {
    let id = validate_id("fine", id)?;
    let fine = state.store().get_fine_with_user(id).await?.found("Fine", id)?;
    Ok(Json(ApiResponse::success(fine)))
}

/// `GET /api/fines/{id}/defenses`: empty list when the fine has none.
pub async fn list_fine_defenses(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<DefenseWithFine>>>, ApiError> {
    let id = validate_id("fine", id)?;
    let defenses = state.store().get_defenses_by_fine(id).await?;
    Ok(Json(ApiResponse::success(defenses)))
}
