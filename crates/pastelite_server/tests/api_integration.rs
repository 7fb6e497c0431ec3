//! Integration tests for the PasteLite HTTP API.

mod support;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use std::future::IntoFuture;
use support::{millis, setup_test_server, setup_test_server_with_mode, TEST_NOW};

async fn create(server: &TestServer, body: Value) -> String {
    let response = server.post("/api/pastes").json(&body).await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let created: Value = response.json();
    created["id"].as_str().expect("id").to_string()
}

/// Read a paste once and return its `expires_at` in epoch millis.
async fn expires_at_ms(server: &TestServer, id: &str) -> i64 {
    let response = server.get(&format!("/api/pastes/{}", id)).await;
    let body: Value = response.json();
    let expires_at = body["expires_at"].as_str().expect("expires_at");
    chrono::DateTime::parse_from_rfc3339(expires_at)
        .expect("rfc3339")
        .timestamp_millis()
}

#[tokio::test]
async fn healthz_reports_ok() {
    let (server, _temp) = setup_test_server();
    let response = server.get("/api/healthz").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "ok": true }));
}

#[tokio::test]
async fn create_returns_id_and_share_url() {
    let (server, _temp) = setup_test_server();
    let response = server
        .post("/api/pastes")
        .json(&json!({ "content": "Hello, World!" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    let id = body["id"].as_str().expect("id");
    assert_eq!(
        body["url"].as_str().expect("url"),
        format!("http://paste.test/api/pastes/{}", id)
    );
}

#[tokio::test]
async fn fetch_round_trip_without_limits() {
    let (server, _temp) = setup_test_server();
    let id = create(&server, json!({ "content": "Hello, World!" })).await;

    for _ in 0..3 {
        let response = server.get(&format!("/api/pastes/{}", id)).await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["content"], "Hello, World!");
        assert!(body["remaining_views"].is_null());
        assert!(body["expires_at"].is_null());
    }
}

#[tokio::test]
async fn blank_content_is_bad_request() {
    let (server, _temp) = setup_test_server();
    for content in ["", "   ", "\n\t"] {
        let response = server
            .post("/api/pastes")
            .json(&json!({ "content": content }))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["error"].as_str().is_some());
    }
}

#[tokio::test]
async fn malformed_bodies_are_bad_request() {
    let (server, _temp) = setup_test_server();
    let cases = [
        json!({}),
        json!({ "content": 42 }),
        json!({ "content": "x", "max_views": -1 }),
        json!({ "content": "x", "ttl_seconds": "soon" }),
    ];
    for body in cases {
        let response = server.post("/api/pastes").json(&body).await;
        assert_eq!(
            response.status_code(),
            StatusCode::BAD_REQUEST,
            "body: {}",
            body
        );
    }
}

#[tokio::test]
async fn oversized_content_is_bad_request() {
    let (server, _temp) = setup_test_server();
    let response = server
        .post("/api/pastes")
        .json(&json!({ "content": "x".repeat(1025) }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn view_limit_counts_down_then_hides_paste() {
    let (server, _temp) = setup_test_server();
    let id = create(&server, json!({ "content": "twice", "max_views": 2 })).await;

    let first: Value = server.get(&format!("/api/pastes/{}", id)).await.json();
    assert_eq!(first["remaining_views"], 1);
    let second: Value = server.get(&format!("/api/pastes/{}", id)).await.json();
    assert_eq!(second["remaining_views"], 0);

    let third = server.get(&format!("/api/pastes/{}", id)).await;
    assert_eq!(third.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn ttl_boundary_follows_test_clock() {
    let (server, _temp) = setup_test_server();
    let id = create(&server, json!({ "content": "ttl", "ttl_seconds": 60 })).await;
    let expires_ms = expires_at_ms(&server, &id).await;

    let at_deadline = server
        .get(&format!("/api/pastes/{}", id))
        .add_header(TEST_NOW, millis(expires_ms))
        .await;
    assert_eq!(at_deadline.status_code(), StatusCode::OK);

    let after = server
        .get(&format!("/api/pastes/{}", id))
        .add_header(TEST_NOW, millis(expires_ms + 1_000))
        .await;
    assert_eq!(after.status_code(), StatusCode::NOT_FOUND);

    let before = server
        .get(&format!("/api/pastes/{}", id))
        .add_header(TEST_NOW, millis(expires_ms - 1_000))
        .await;
    assert_eq!(before.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_clock_is_ignored_outside_test_mode() {
    let (server, _temp) = setup_test_server_with_mode(false);
    let id = create(&server, json!({ "content": "ttl", "ttl_seconds": 3600 })).await;
    let far_future = chrono::Utc::now().timestamp_millis() + 86_400_000;

    let response = server
        .get(&format!("/api/pastes/{}", id))
        .add_header(TEST_NOW, millis(far_future))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn non_positive_ttl_never_expires() {
    let (server, _temp) = setup_test_server();
    let id = create(&server, json!({ "content": "forever", "ttl_seconds": 0 })).await;
    let far_future = chrono::Utc::now().timestamp_millis() + 10 * 365 * 86_400_000;

    let response = server
        .get(&format!("/api/pastes/{}", id))
        .add_header(TEST_NOW, millis(far_future))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.json::<Value>()["expires_at"].is_null());
}

#[tokio::test]
async fn unreadable_pastes_share_one_response() {
    let (server, _temp) = setup_test_server();

    let exhausted = create(&server, json!({ "content": "once", "max_views": 1 })).await;
    server.get(&format!("/api/pastes/{}", exhausted)).await;

    let expired = create(&server, json!({ "content": "brief", "ttl_seconds": 1 })).await;
    let late = chrono::Utc::now().timestamp_millis() + 60_000;

    let missing = server.get("/api/pastes/nonexistent-id").await;
    let exhausted = server.get(&format!("/api/pastes/{}", exhausted)).await;
    let expired = server
        .get(&format!("/api/pastes/{}", expired))
        .add_header(TEST_NOW, millis(late))
        .await;

    for response in [&missing, &exhausted, &expired] {
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }
    assert_eq!(missing.text(), exhausted.text());
    assert_eq!(missing.text(), expired.text());
    assert_eq!(missing.json::<Value>(), json!({ "error": "Paste not found" }));
}

#[tokio::test]
async fn simultaneous_fetches_of_last_view_have_one_winner() {
    let (server, _temp) = setup_test_server();
    let id = create(&server, json!({ "content": "race", "max_views": 1 })).await;
    let path = format!("/api/pastes/{}", id);

    let (a, b) = tokio::join!(
        server.get(&path).into_future(),
        server.get(&path).into_future()
    );
    let mut statuses = [a.status_code(), b.status_code()];
    statuses.sort_by_key(|status| status.as_u16());
    assert_eq!(statuses, [StatusCode::OK, StatusCode::NOT_FOUND]);
}
