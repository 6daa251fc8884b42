//! Public route tests.
//!
//! These run without a database: the pool is created lazily and never used.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;

use common::TestContext;

/// Test health check.
#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::without_database();
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.text(), "OK");
}

/// Test pinyin conversion of a mixed sentence.
#[tokio::test]
async fn test_convert_pinyin() {
    let ctx = TestContext::without_database();
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server
        .post("/api/pinyin/convert")
        .json(&json!({ "text": "Zhong1guo2 lv4 ma5!" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["text"], "Zhong1guo2 lv4 ma5!");
    assert_eq!(body["accented"], "Zhōngguó lǜ ma!");
}

/// Test conversion leaves invalid tone digits alone.
#[tokio::test]
async fn test_convert_pinyin_passthrough() {
    let ctx = TestContext::without_database();
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server
        .post("/api/pinyin/convert")
        .json(&json!({ "text": "ma9 你好" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["accented"], "ma9 你好");
}

/// Test protected routes reject requests without a token.
#[tokio::test]
async fn test_protected_routes_require_auth() {
    let ctx = TestContext::without_database();
    let server = TestServer::new(ctx.router()).unwrap();

    server
        .get("/api/words")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .get("/api/progress")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .post("/api/packs/open")
        .json(&json!({ "target_level": 1 }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

/// Test malformed Authorization header is rejected with a JSON error body.
#[tokio::test]
async fn test_malformed_auth_header() {
    let ctx = TestContext::without_database();
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server
        .get("/api/cards")
        .add_header(axum::http::header::AUTHORIZATION, "Token abc".to_string())
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "unauthorized");
}
