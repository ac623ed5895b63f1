use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use super::types::{EventFilter, split_list};
use super::validation::{validate_limit, validate_type_list};
use super::{ApiError, ApiResponse, AppState};
use crate::entities::analytics_events;

/// `GET /api/analytics/events?types=a,b&limit=n`, newest first.
pub async fn list_events(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<EventFilter>,
) -> Result<Json<ApiResponse<Vec<analytics_events::Model>>>, ApiError> {
    let types = validate_type_list(
        "types",
        filter.types.as_deref().map(split_list).unwrap_or_default(),
    )?;
    let limit = filter.limit.map(validate_limit).transpose()?;

    let events = state.store().get_analytics_events(&types, limit).await?;
    Ok(Json(ApiResponse::success(events)))
}
