// ABOUTME: Integration tests for health tip and workout suggestion content routes
// ABOUTME: Covers public reads, admin-gated writes, enum validation, and ordering
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;
mod helpers;

use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

#[tokio::test]
async fn test_health_tip_crud() {
    let resources = common::create_test_resources().await;
    let app = common::test_router(&resources);
    let (_, admin_token) = common::create_admin_user(&resources, "root", "root@example.com").await;

    let response = AxumTestRequest::post("/api/health-tips")
        .bearer(&admin_token)
        .json(&json!({
            "title": "Hydrate",
            "content": "Drink water before training.",
            "category": "wellness",
            "tags": ["water", " basics "],
            "priority": 5
        }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);
    let tip: Value = response.json();
    let tip_id = tip["id"].as_str().unwrap().to_owned();
    assert_eq!(tip["is_active"], true);
    // Tags are trimmed on the way in.
    assert_eq!(tip["tags"], json!(["water", "basics"]));

    // Reads are public.
    let response = AxumTestRequest::get(&format!("/api/health-tips/{tip_id}"))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);

    let response = AxumTestRequest::put(&format!("/api/health-tips/{tip_id}"))
        .bearer(&admin_token)
        .json(&json!({ "priority": 9, "is_active": false }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let updated: Value = response.json();
    assert_eq!(updated["priority"], 9);
    assert_eq!(updated["is_active"], false);
    assert_eq!(updated["title"], "Hydrate");

    let response = AxumTestRequest::delete(&format!("/api/health-tips/{tip_id}"))
        .bearer(&admin_token)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);

    let response = AxumTestRequest::get(&format!("/api/health-tips/{tip_id}"))
        .send(app)
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_invalid_category_rejected_and_not_persisted() {
    let resources = common::create_test_resources().await;
    let app = common::test_router(&resources);
    let (_, admin_token) = common::create_admin_user(&resources, "root", "root@example.com").await;

    let response = AxumTestRequest::post("/api/health-tips")
        .bearer(&admin_token)
        .json(&json!({
            "title": "Bad",
            "content": "Bad category.",
            "category": "astrology"
        }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Invalid category"));

    // Nothing was persisted.
    let count = resources.database.health_tips().count().await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_content_writes_require_admin() {
    let resources = common::create_test_resources().await;
    let app = common::test_router(&resources);
    let (_, user_token) = common::create_test_user(&resources, "ada", "ada@example.com").await;

    let payload = json!({
        "title": "Hydrate",
        "content": "Drink water.",
        "category": "wellness"
    });

    let response = AxumTestRequest::post("/api/health-tips")
        .bearer(&user_token)
        .json(&payload)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 403);

    // And without any token at all, 401.
    let response = AxumTestRequest::post("/api/health-tips")
        .json(&payload)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 401);

    let response = AxumTestRequest::get("/api/health-tips/all")
        .bearer(&user_token)
        .send(app)
        .await;
    assert_eq!(response.status(), 403);
}

#[tokio::test]
async fn test_active_listing_filters_and_orders() {
    let resources = common::create_test_resources().await;
    let app = common::test_router(&resources);
    let (_, admin_token) = common::create_admin_user(&resources, "root", "root@example.com").await;

    for (title, priority, active) in [("low", 1, true), ("high", 8, true), ("hidden", 10, false)] {
        let response = AxumTestRequest::post("/api/health-tips")
            .bearer(&admin_token)
            .json(&json!({
                "title": title,
                "content": "body",
                "category": "exercise",
                "priority": priority,
                "is_active": active
            }))
            .send(app.clone())
            .await;
        assert_eq!(response.status(), 201);
    }

    // Public listing: active only, priority descending.
    let response = AxumTestRequest::get("/api/health-tips/active").send(app.clone()).await;
    assert_eq!(response.status(), 200);
    let tips: Vec<Value> = response.json();
    assert_eq!(tips.len(), 2);
    assert_eq!(tips[0]["title"], "high");
    assert_eq!(tips[1]["title"], "low");

    // Admin listing sees everything.
    let response = AxumTestRequest::get("/api/health-tips/all")
        .bearer(&admin_token)
        .send(app)
        .await;
    let tips: Vec<Value> = response.json();
    assert_eq!(tips.len(), 3);
}

#[tokio::test]
async fn test_priority_out_of_range_rejected() {
    let resources = common::create_test_resources().await;
    let app = common::test_router(&resources);
    let (_, admin_token) = common::create_admin_user(&resources, "root", "root@example.com").await;

    let response = AxumTestRequest::post("/api/health-tips")
        .bearer(&admin_token)
        .json(&json!({
            "title": "Hydrate",
            "content": "Drink water.",
            "category": "wellness",
            "priority": 11
        }))
        .send(app)
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_workout_suggestion_crud_and_validation() {
    let resources = common::create_test_resources().await;
    let app = common::test_router(&resources);
    let (_, admin_token) = common::create_admin_user(&resources, "root", "root@example.com").await;

    // Invalid difficulty.
    let response = AxumTestRequest::post("/api/workout-suggestions")
        .bearer(&admin_token)
        .json(&json!({
            "title": "5x5",
            "description": "Linear progression.",
            "category": "strength",
            "difficulty": "impossible",
            "duration_minutes": 60
        }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);

    // Duration below one minute.
    let response = AxumTestRequest::post("/api/workout-suggestions")
        .bearer(&admin_token)
        .json(&json!({
            "title": "5x5",
            "description": "Linear progression.",
            "category": "strength",
            "duration_minutes": 0
        }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);

    let response = AxumTestRequest::post("/api/workout-suggestions")
        .bearer(&admin_token)
        .json(&json!({
            "title": "5x5",
            "description": "Linear progression.",
            "category": "strength",
            "difficulty": "intermediate",
            "duration_minutes": 60,
            "tags": ["barbell"]
        }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);
    let suggestion: Value = response.json();
    let suggestion_id = suggestion["id"].as_str().unwrap().to_owned();
    assert_eq!(suggestion["difficulty"], "intermediate");

    // Public read and active listing.
    let response = AxumTestRequest::get(&format!("/api/workout-suggestions/{suggestion_id}"))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);

    let response = AxumTestRequest::get("/api/workout-suggestions/active")
        .send(app.clone())
        .await;
    let suggestions: Vec<Value> = response.json();
    assert_eq!(suggestions.len(), 1);

    let response = AxumTestRequest::delete(&format!("/api/workout-suggestions/{suggestion_id}"))
        .bearer(&admin_token)
        .send(app)
        .await;
    assert_eq!(response.status(), 200);
}
