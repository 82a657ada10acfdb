// ABOUTME: Integration tests for registration, login, and profile routes
// ABOUTME: Exercises the full router through in-process requests
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;
mod helpers;

use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

#[tokio::test]
async fn test_register_and_login_round_trip() {
    let resources = common::create_test_resources().await;
    let app = common::test_router(&resources);

    let response = AxumTestRequest::post("/api/auth/register")
        .json(&json!({
            "username": "ada",
            "email": "ada@example.com",
            "password": "correct-horse"
        }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);
    let body: Value = response.json();
    assert!(body["user_id"].is_string());

    let response = AxumTestRequest::post("/api/auth/login")
        .json(&json!({
            "email": "ada@example.com",
            "password": "correct-horse"
        }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    let token = body["jwt_token"].as_str().unwrap().to_owned();
    assert_eq!(body["user"]["username"], "ada");
    assert_eq!(body["user"]["role"], "user");

    // The minted token authenticates, and the login stamped last_login.
    let response = AxumTestRequest::get("/api/auth/profile")
        .bearer(&token)
        .send(app)
        .await;
    assert_eq!(response.status(), 200);
    let profile: Value = response.json();
    assert_eq!(profile["email"], "ada@example.com");
    assert!(profile["last_login"].is_string());
}

#[tokio::test]
async fn test_register_duplicate_rejected() {
    let resources = common::create_test_resources().await;
    let app = common::test_router(&resources);

    let payload = json!({
        "username": "ada",
        "email": "ada@example.com",
        "password": "correct-horse"
    });

    let response = AxumTestRequest::post("/api/auth/register")
        .json(&payload)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);

    let response = AxumTestRequest::post("/api/auth/register")
        .json(&payload)
        .send(app)
        .await;
    assert_eq!(response.status(), 409);

    // No second row was persisted.
    let count = resources.database.users().count().await.unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_register_validation_errors() {
    let resources = common::create_test_resources().await;
    let app = common::test_router(&resources);

    let response = AxumTestRequest::post("/api/auth/register")
        .json(&json!({
            "username": "ada",
            "email": "not-an-email",
            "password": "correct-horse"
        }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);

    let response = AxumTestRequest::post("/api/auth/register")
        .json(&json!({
            "username": "ada",
            "email": "ada@example.com",
            "password": "short"
        }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);

    let response = AxumTestRequest::post("/api/auth/register")
        .json(&json!({
            "username": "",
            "email": "ada@example.com",
            "password": "correct-horse"
        }))
        .send(app)
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_login_wrong_password_rejected() {
    let resources = common::create_test_resources().await;
    let app = common::test_router(&resources);

    AxumTestRequest::post("/api/auth/register")
        .json(&json!({
            "username": "ada",
            "email": "ada@example.com",
            "password": "correct-horse"
        }))
        .send(app.clone())
        .await;

    let response = AxumTestRequest::post("/api/auth/login")
        .json(&json!({
            "email": "ada@example.com",
            "password": "wrong-horse"
        }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 401);

    let response = AxumTestRequest::post("/api/auth/login")
        .json(&json!({
            "email": "nobody@example.com",
            "password": "correct-horse"
        }))
        .send(app)
        .await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_protected_route_rejects_bad_tokens() {
    let resources = common::create_test_resources().await;
    let app = common::test_router(&resources);

    let response = AxumTestRequest::get("/api/auth/profile").send(app.clone()).await;
    assert_eq!(response.status(), 401);

    let response = AxumTestRequest::get("/api/auth/profile")
        .bearer("garbage-token")
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 401);

    let response = AxumTestRequest::get("/api/auth/profile")
        .header("authorization", "Basic abc123")
        .send(app)
        .await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_update_profile() {
    let resources = common::create_test_resources().await;
    let app = common::test_router(&resources);
    let (_, token) = common::create_test_user(&resources, "ada", "ada@example.com").await;
    common::create_test_user(&resources, "grace", "grace@example.com").await;

    let response = AxumTestRequest::put("/api/auth/profile")
        .bearer(&token)
        .json(&json!({ "username": "ada_l" }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["username"], "ada_l");
    assert_eq!(body["email"], "ada@example.com");

    // Taking another user's email is a conflict.
    let response = AxumTestRequest::put("/api/auth/profile")
        .bearer(&token)
        .json(&json!({ "email": "grace@example.com" }))
        .send(app)
        .await;
    assert_eq!(response.status(), 409);
}

#[tokio::test]
async fn test_error_body_shape() {
    let resources = common::create_test_resources().await;
    let app = common::test_router(&resources);

    let response = AxumTestRequest::get("/api/auth/profile").send(app).await;
    assert_eq!(response.status(), 401);
    let body: Value = response.json();
    assert!(body["error"]["code"].is_string());
    assert!(body["error"]["message"].is_string());
    // Source detail stays out of responses unless explicitly enabled.
    assert!(body["error"].get("debug").is_none());
}
