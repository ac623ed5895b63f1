use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::validation::validate_id;
use super::{ApiError, ApiResponse, AppState};
use crate::db::OptionExt;
use crate::models::DefenseWithFine;

pub async fn get_defense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<DefenseWithFine>>, ApiError> {
    let id = validate_id("defense", id)?;
    let defense = state
        .store()
        .get_defense_with_fine(id)
        .await?
        .found("Defense", id)?;
    Ok(Json(ApiResponse::success(defense)))
}
