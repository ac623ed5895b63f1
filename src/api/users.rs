//! Per-user collections. An unknown user yields empty lists, not 404:
//! these endpoints never look the user row up.

use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::validation::validate_id;
use super::{ApiError, ApiResponse, AppState};
use crate::models::{
    DefenseWithFine, FineWithDefenses, PaymentWithCustomer, SubscriptionWithCustomer,
};

pub async fn list_user_fines(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<FineWithDefenses>>>, ApiError> {
    let user_id = validate_id("user", user_id)?;
    let fines = state.store().get_fines_with_defenses(user_id).await?;
    Ok(Json(ApiResponse::success(fines)))
}

pub async fn list_user_defenses(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<DefenseWithFine>>>, ApiError> {
    let user_id = validate_id("user", user_id)?;
    let defenses = state.store().get_defenses_by_user(user_id).await?;
    Ok(Json(ApiResponse::success(defenses)))
}

pub async fn list_user_subscriptions(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<SubscriptionWithCustomer>>>, ApiError> {
    let user_id = validate_id("user", user_id)?;
    let subscriptions = state.store().get_subscriptions_by_user(user_id).await?;
    Ok(Json(ApiResponse::success(subscriptions)))
}

pub async fn list_user_payments(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<PaymentWithCustomer>>>, ApiError> {
    let user_id = validate_id("user", user_id)?;
    let payments = state.store().get_payments_by_user(user_id).await?;
    Ok(Json(ApiResponse::success(payments)))
}
