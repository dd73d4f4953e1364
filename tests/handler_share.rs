mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use common::MemoryStore;
use serde_json::{Value, json};
use share_unlock::api::handlers::share_handler;
use share_unlock::infrastructure::persistence::UnavailableStore;
use share_unlock::state::AppState;
use std::sync::Arc;

fn server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/api/share", get(share_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_share_reaching_threshold_unlocks() {
    let store = MemoryStore::new();
    let resume_id = store.seed_resume(4, 5, false);
    store.seed_link(resume_id, "promo-link");
    let server = server(common::create_test_state(store.clone()));

    let response = server.get("/api/share").add_query_param("code", "promo-link").await;

    response.assert_status_ok();
    response.assert_json(&json!({
        "success": true,
        "message": "Export unlocked! Thanks for sharing.",
        "unlocked": true
    }));

    let resume = store.resume(resume_id);
    assert_eq!(resume.actual_clicks, 5);
    assert!(resume.export_unlocked);
    assert_eq!(store.link_clicks("promo-link"), 1);
    assert_eq!(store.unlock_transitions(), 1);
}

#[tokio::test]
async fn test_share_below_threshold_stays_locked() {
    let store = MemoryStore::new();
    let resume_id = store.seed_resume(2, 5, false);
    store.seed_link(resume_id, "friend-link");
    let server = server(common::create_test_state(store.clone()));

    let response = server.get("/api/share?code=friend-link").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["success"], true);
    assert_eq!(json["unlocked"], false);
    assert_eq!(
        json["message"],
        "Click recorded. 2 more clicks needed to unlock export."
    );

    let resume = store.resume(resume_id);
    assert_eq!(resume.actual_clicks, 3);
    assert!(!resume.export_unlocked);
    assert_eq!(store.unlock_transitions(), 0);
}

#[tokio::test]
async fn test_unknown_code_is_not_found_and_changes_nothing() {
    let store = MemoryStore::new();
    let resume_id = store.seed_resume(2, 5, false);
    store.seed_link(resume_id, "real-code");
    let server = server(common::create_test_state(store.clone()));

    let response = server.get("/api/share?code=abc123").await;

    response.assert_status_not_found();
    let json = response.json::<Value>();
    assert!(json["error"].is_string());
    assert!(json.get("success").is_none());

    assert_eq!(store.resume(resume_id).actual_clicks, 2);
    assert_eq!(store.link_clicks("real-code"), 0);
}

#[tokio::test]
async fn test_already_unlocked_stays_unlocked() {
    let store = MemoryStore::new();
    let resume_id = store.seed_resume(9, 5, true);
    store.seed_link(resume_id, "late-visit");
    let server = server(common::create_test_state(store.clone()));

    let response = server.get("/api/share?code=late-visit").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["unlocked"], true);

    let resume = store.resume(resume_id);
    assert_eq!(resume.actual_clicks, 10);
    assert!(resume.export_unlocked);
    assert_eq!(store.unlock_transitions(), 0);
}

#[tokio::test]
async fn test_unlocked_flag_is_absorbing_below_threshold() {
    let store = MemoryStore::new();
    let resume_id = store.seed_resume(0, 5, true);
    store.seed_link(resume_id, "sticky-flag");
    let server = server(common::create_test_state(store.clone()));

    let response = server.get("/api/share?code=sticky-flag").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["unlocked"], true);
    assert!(store.resume(resume_id).export_unlocked);
}

#[tokio::test]
async fn test_missing_code_is_bad_request() {
    let store = MemoryStore::new();
    let server = server(common::create_test_state(store));

    let response = server.get("/api/share").await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"],
        "Share code is required"
    );
}

#[tokio::test]
async fn test_empty_code_is_bad_request() {
    let store = MemoryStore::new();
    let resume_id = store.seed_resume(0, 5, false);
    store.seed_link(resume_id, "untouched");
    let server = server(common::create_test_state(store.clone()));

    let response = server.get("/api/share?code=").await;

    response.assert_status_bad_request();
    assert_eq!(store.resume(resume_id).actual_clicks, 0);
}

#[tokio::test]
async fn test_unconfigured_store_is_service_unavailable() {
    let store = Arc::new(UnavailableStore::new());
    let server = server(AppState::new(store.clone(), store));

    let response = server.get("/api/share?code=anything").await;

    response.assert_status_service_unavailable();
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_resume_increment_failure_keeps_link_click() {
    let store = MemoryStore::new();
    let resume_id = store.seed_resume(1, 5, false);
    store.seed_link(resume_id, "half-counted");
    store.fail_resume_increment(true);
    let server = server(common::create_test_state(store.clone()));

    let response = server.get("/api/share?code=half-counted").await;

    response.assert_status_service_unavailable();
    assert_eq!(store.link_clicks("half-counted"), 1);
    assert_eq!(store.resume(resume_id).actual_clicks, 1);
}

#[tokio::test]
async fn test_flag_write_failure_is_repaired_by_next_click() {
    let store = MemoryStore::new();
    let resume_id = store.seed_resume(4, 5, false);
    store.seed_link(resume_id, "retry-link");
    store.fail_unlock(true);
    let server = server(common::create_test_state(store.clone()));

    server
        .get("/api/share?code=retry-link")
        .await
        .assert_status_service_unavailable();
    assert_eq!(store.resume(resume_id).actual_clicks, 5);
    assert!(!store.resume(resume_id).export_unlocked);

    store.fail_unlock(false);
    let response = server.get("/api/share?code=retry-link").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["unlocked"], true);
    assert!(store.resume(resume_id).export_unlocked);
    assert_eq!(store.unlock_transitions(), 1);
}
