//! Integration tests for the read-only HTTP surface.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use finedefense::api::AppState;
use finedefense::config::Config;
use finedefense::entities::{defenses, fines, users};
use http_body_util::BodyExt;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set};
use std::sync::Arc;
use tower::ServiceExt;

const NOW: &str = "2026-03-01T09:00:00+00:00";

async fn spawn_app() -> (Router, Arc<AppState>) {
    let db_path =
        std::env::temp_dir().join(format!("finedefense-api-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.database.url = format!("sqlite:{}", db_path.display());

    let state = finedefense::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");

    (finedefense::api::router(Arc::clone(&state)), state)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

/// One user owning one fine with a single defense.
async fn seed(state: &AppState) -> (users::Model, fines::Model, defenses::Model) {
    let conn = &state.store().conn;

    let user = users::ActiveModel {
        email: Set("ana@example.com".to_string()),
        username: Set("ana".to_string()),
        password_hash: Set("$argon2id$placeholder".to_string()),
        full_name: Set(Some("Ana Costa".to_string())),
        phone: Set(None),
        is_active: Set(true),
        is_verified: Set(true),
        created_at: Set(NOW.to_string()),
        updated_at: Set(NOW.to_string()),
        last_login: Set(None),
        ..Default::default()
    }
    .insert(conn)
    .await
    .unwrap();

    let fine = fines::ActiveModel {
        user_id: Set(user.id),
        fine_date: Set("2026-02-14".to_string()),
        location: Set("Avenida da Liberdade".to_string()),
        infraction_code: Set("CE-48-2".to_string()),
        amount: Set(60.0),
        status: Set("pending".to_string()),
        created_at: Set(NOW.to_string()),
        ..Default::default()
    }
    .insert(conn)
    .await
    .unwrap();

    let defense = defenses::ActiveModel {
        fine_id: Set(fine.id),
        content: Set("The parking meter was out of order.".to_string()),
        defense_type: Set("equipment".to_string()),
        status: Set("submitted".to_string()),
        created_at: Set(NOW.to_string()),
        ..Default::default()
    }
    .insert(conn)
    .await
    .unwrap();

    (user, fine, defense)
}

#[tokio::test]
async fn test_health_live() {
    let (app, _) = spawn_app().await;

    let (status, body) = get_json(&app, "/api/system/health/live").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["success"].as_bool().unwrap_or(false));
    assert_eq!(body["data"]["status"], "alive");
}

#[tokio::test]
async fn test_health_ready() {
    let (app, _) = spawn_app().await;

    let (status, body) = get_json(&app, "/api/system/health/ready").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["ready"], true);
    assert_eq!(body["data"]["checks"]["database"], true);
}

#[tokio::test]
async fn test_get_fine_includes_user_without_password_hash() {
    let (app, state) = spawn_app().await;
    let (user, fine, _) = seed(&state).await;

    let (status, body) = get_json(&app, &format!("/api/fines/{}", fine.id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], fine.id);
    assert_eq!(body["data"]["user"]["id"], user.id);
    assert_eq!(body["data"]["user"]["username"], "ana");
    assert!(body["data"]["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_missing_singletons_are_404() {
    let (app, _) = spawn_app().await;

    let (status, body) = get_json(&app, "/api/fines/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap_or_default().contains("999"));

    let (status, _) = get_json(&app, "/api/defenses/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_positive_id_is_rejected() {
    let (app, _) = spawn_app().await;

    let (status, body) = get_json(&app, "/api/fines/0").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_empty_collections_are_empty_arrays() {
    let (app, state) = spawn_app().await;
    let (user, _, _) = seed(&state).await;

    for uri in [
        "/api/users/999/fines".to_string(),
        "/api/users/999/defenses".to_string(),
        format!("/api/users/{}/subscriptions", user.id),
        format!("/api/users/{}/payments", user.id),
        "/api/documents".to_string(),
    ] {
        let (status, body) = get_json(&app, &uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body["data"], serde_json::json!([]), "{uri}");
    }
}

#[tokio::test]
async fn test_user_fines_nest_defenses() {
    let (app, state) = spawn_app().await;
    let (user, fine, defense) = seed(&state).await;

    let (status, body) = get_json(&app, &format!("/api/users/{}/fines", user.id)).await;

    assert_eq!(status, StatusCode::OK);
    let fines = body["data"].as_array().expect("data should be an array");
    assert_eq!(fines.len(), 1);
    assert_eq!(fines[0]["id"], fine.id);
    assert_eq!(fines[0]["defenses"][0]["id"], defense.id);
}

#[tokio::test]
async fn test_defense_includes_fine() {
    let (app, state) = spawn_app().await;
    let (_, fine, defense) = seed(&state).await;

    let (status, body) = get_json(&app, &format!("/api/defenses/{}", defense.id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], defense.id);
    assert_eq!(body["data"]["fine"]["id"], fine.id);

    let (status, body) = get_json(&app, &format!("/api/fines/{}/defenses", fine.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["fine_id"], fine.id);
}

#[tokio::test]
async fn test_analytics_events_require_types() {
    let (app, _) = spawn_app().await;

    let (status, body) = get_json(&app, "/api/analytics/events").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, body) = get_json(&app, "/api/analytics/events?types=fine_uploaded&limit=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], serde_json::json!([]));

    let (status, _) = get_json(&app, "/api/analytics/events?types=fine_uploaded&limit=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_stats_count_statements() {
    let (app, state) = spawn_app().await;
    let (_, fine, _) = seed(&state).await;

    let before = state.store().query_counter().total();
    let (status, _) = get_json(&app, &format!("/api/fines/{}", fine.id)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get_json(&app, "/api/system/stats").await;
    assert_eq!(status, StatusCode::OK);
    let issued = body["data"]["statements_issued"].as_u64().unwrap_or_default();
    assert!(issued > before);
}

#[tokio::test]
async fn test_storage_fault_is_generic_500() {
    let (app, state) = spawn_app().await;
    let (_, fine, _) = seed(&state).await;

    state
        .store()
        .conn
        .execute_unprepared("DROP TABLE defenses")
        .await
        .unwrap();

    let (status, body) = get_json(&app, &format!("/api/fines/{}/defenses", fine.id)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "A database error occurred");
    assert!(body.get("data").is_none());
}
