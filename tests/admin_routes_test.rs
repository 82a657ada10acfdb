// ABOUTME: Integration tests for admin user management routes
// ABOUTME: Covers role gating, cascade delete, and last-admin protection
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;
mod helpers;

use chrono::{Duration, Utc};
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

#[tokio::test]
async fn test_list_users_requires_admin() {
    let resources = common::create_test_resources().await;
    let app = common::test_router(&resources);
    let (_, user_token) = common::create_test_user(&resources, "ada", "ada@example.com").await;
    let (_, admin_token) = common::create_admin_user(&resources, "root", "root@example.com").await;

    let response = AxumTestRequest::get("/api/admin/users")
        .bearer(&user_token)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 403);

    let response = AxumTestRequest::get("/api/admin/users")
        .bearer(&admin_token)
        .send(app)
        .await;
    assert_eq!(response.status(), 200);
    let users: Vec<Value> = response.json();
    assert_eq!(users.len(), 2);
    // Password hashes never appear in admin listings.
    for user in &users {
        assert!(user.get("password_hash").is_none());
    }
}

#[tokio::test]
async fn test_admin_updates_role() {
    let resources = common::create_test_resources().await;
    let app = common::test_router(&resources);
    let (user_id, _) = common::create_test_user(&resources, "ada", "ada@example.com").await;
    let (_, admin_token) = common::create_admin_user(&resources, "root", "root@example.com").await;

    let response = AxumTestRequest::put(&format!("/api/admin/users/{user_id}"))
        .bearer(&admin_token)
        .json(&json!({ "role": "admin" }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let updated: Value = response.json();
    assert_eq!(updated["role"], "admin");

    // Unknown role names are rejected.
    let response = AxumTestRequest::put(&format!("/api/admin/users/{user_id}"))
        .bearer(&admin_token)
        .json(&json!({ "role": "superuser" }))
        .send(app)
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_delete_user_cascades() {
    let resources = common::create_test_resources().await;
    let app = common::test_router(&resources);
    let (user_id, user_token) = common::create_test_user(&resources, "ada", "ada@example.com").await;
    let (_, admin_token) = common::create_admin_user(&resources, "root", "root@example.com").await;

    // Give the user a workout, a goal, and a snapshot.
    AxumTestRequest::post("/api/workouts")
        .bearer(&user_token)
        .json(&json!({
            "workout_type": "cardio",
            "duration_minutes": 30.0,
            "calories_burned": 200.0,
        }))
        .send(app.clone())
        .await;
    AxumTestRequest::post("/api/goals")
        .bearer(&user_token)
        .json(&json!({
            "goal_type": "workout_frequency",
            "target": 5.0,
            "unit": "workouts",
            "timeframe": "weekly",
            "end_date": (Utc::now() + Duration::days(7)).to_rfc3339(),
        }))
        .send(app.clone())
        .await;
    AxumTestRequest::post("/api/analytics/generate")
        .bearer(&user_token)
        .json(&json!({ "time_range": "week" }))
        .send(app.clone())
        .await;

    let response = AxumTestRequest::delete(&format!("/api/admin/users/{user_id}"))
        .bearer(&admin_token)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);

    // Everything the user owned is gone.
    assert!(resources
        .database
        .workouts()
        .list(user_id)
        .await
        .unwrap()
        .is_empty());
    assert!(resources.database.goals().list(user_id).await.unwrap().is_empty());
    assert_eq!(
        resources
            .database
            .analytics()
            .count_for_user(user_id)
            .await
            .unwrap(),
        0
    );

    // The deleted user's token no longer authenticates.
    let response = AxumTestRequest::get("/api/workouts")
        .bearer(&user_token)
        .send(app)
        .await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_last_admin_cannot_be_deleted() {
    let resources = common::create_test_resources().await;
    let app = common::test_router(&resources);
    let (admin_id, admin_token) =
        common::create_admin_user(&resources, "root", "root@example.com").await;

    let response = AxumTestRequest::delete(&format!("/api/admin/users/{admin_id}"))
        .bearer(&admin_token)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("last admin"));

    // With a second admin present the first becomes deletable.
    let (_, other_admin_token) =
        common::create_admin_user(&resources, "root2", "root2@example.com").await;
    let response = AxumTestRequest::delete(&format!("/api/admin/users/{admin_id}"))
        .bearer(&other_admin_token)
        .send(app)
        .await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_delete_unknown_user_is_not_found() {
    let resources = common::create_test_resources().await;
    let app = common::test_router(&resources);
    let (_, admin_token) = common::create_admin_user(&resources, "root", "root@example.com").await;

    let response = AxumTestRequest::delete(&format!("/api/admin/users/{}", uuid::Uuid::new_v4()))
        .bearer(&admin_token)
        .send(app)
        .await;
    assert_eq!(response.status(), 404);
}
