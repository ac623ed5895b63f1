use axum::{Router, http::HeaderValue, middleware, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Store;

mod analytics;
mod defenses;
mod documents;
mod error;
mod fines;
mod observability;
mod system;
mod types;
mod users;
mod validation;

pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

/// Read-only HTTP surface over the query layer. Handlers only translate
/// paths and query strings into [`Store`] calls.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,

    pub store: Store,

    pub start_time: std::time::Instant,

    pub started_at: chrono::DateTime<chrono::Utc>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let store = Store::connect(&config.database).await?;
    Ok(create_app_state(config, store, prometheus_handle))
}

#[must_use]
pub fn create_app_state(
    config: Config,
    store: Store,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        config: Arc::new(config),
        store,
        start_time: std::time::Instant::now(),
        started_at: chrono::Utc::now(),
        prometheus_handle,
    })
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = &state.config.server.cors_allowed_origins;

    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    let api_router = Router::new()
        .route("/fines/{id}", get(fines::get_fine))
        .route("/fines/{id}/defenses", get(fines::list_fine_defenses))
        .route("/defenses/{id}", get(defenses::get_defense))
        .route("/users/{id}/fines", get(users::list_user_fines))
        .route("/users/{id}/defenses", get(users::list_user_defenses))
        .route(
            "/users/{id}/subscriptions",
            get(users::list_user_subscriptions),
        )
        .route("/users/{id}/payments", get(users::list_user_payments))
        .route("/documents", get(documents::list_documents))
        .route("/analytics/events", get(analytics::list_events))
        .route("/system/health/live", get(system::health_live))
        .route("/system/health/ready", get(system::health_ready))
        .route("/system/stats", get(system::get_stats))
        .route("/metrics", get(observability::get_metrics))
        .route_layer(middleware::from_fn(observability::track_requests))
        .with_state(state);

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
