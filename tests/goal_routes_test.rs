// ABOUTME: Integration tests for goal CRUD, progress recomputation, and stats routes
// ABOUTME: Covers status transitions, clamping, read-repair, and ownership scoping
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;
mod helpers;

use chrono::{Duration, Utc};
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

async fn create_goal(
    app: &axum::Router,
    token: &str,
    goal_type: &str,
    target: f64,
    unit: &str,
    ends_in_days: i64,
) -> Value {
    let now = Utc::now();
    let response = AxumTestRequest::post("/api/goals")
        .bearer(token)
        .json(&json!({
            "goal_type": goal_type,
            "target": target,
            "unit": unit,
            "timeframe": "weekly",
            "start_date": (now - Duration::days(7)).to_rfc3339(),
            "end_date": (now + Duration::days(ends_in_days)).to_rfc3339(),
        }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);
    response.json()
}

async fn log_workouts(app: &axum::Router, token: &str, count: usize, calories: f64) {
    for _ in 0..count {
        let response = AxumTestRequest::post("/api/workouts")
            .bearer(token)
            .json(&json!({
                "workout_type": "cardio",
                "duration_minutes": 30.0,
                "calories_burned": calories,
                "date": Utc::now().to_rfc3339(),
            }))
            .send(app.clone())
            .await;
        assert_eq!(response.status(), 201);
    }
}

#[tokio::test]
async fn test_frequency_goal_overshoot_completes() {
    let resources = common::create_test_resources().await;
    let app = common::test_router(&resources);
    let (_, token) = common::create_test_user(&resources, "ada", "ada@example.com").await;

    let goal = create_goal(&app, &token, "workout_frequency", 10.0, "workouts", 7).await;
    let goal_id = goal["id"].as_str().unwrap().to_owned();

    log_workouts(&app, &token, 12, 100.0).await;

    let response = AxumTestRequest::patch(&format!("/api/goals/{goal_id}/progress"))
        .bearer(&token)
        .json(&json!({}))
        .send(app)
        .await;
    assert_eq!(response.status(), 200);
    let updated: Value = response.json();
    assert_eq!(updated["progress"], 100.0);
    assert_eq!(updated["status"], "completed");
}

#[tokio::test]
async fn test_calories_goal_partial_progress() {
    let resources = common::create_test_resources().await;
    let app = common::test_router(&resources);
    let (_, token) = common::create_test_user(&resources, "ada", "ada@example.com").await;

    let goal = create_goal(&app, &token, "calories_burned", 2000.0, "calories", 7).await;
    let goal_id = goal["id"].as_str().unwrap().to_owned();

    log_workouts(&app, &token, 3, 500.0).await;

    let response = AxumTestRequest::patch(&format!("/api/goals/{goal_id}/progress"))
        .bearer(&token)
        .json(&json!({}))
        .send(app)
        .await;
    let updated: Value = response.json();
    assert_eq!(updated["progress"], 75.0);
    assert_eq!(updated["status"], "active");
}

#[tokio::test]
async fn test_expired_goal_fails() {
    let resources = common::create_test_resources().await;
    let app = common::test_router(&resources);
    let (_, token) = common::create_test_user(&resources, "ada", "ada@example.com").await;

    // Window entirely in the past.
    let now = Utc::now();
    let response = AxumTestRequest::post("/api/goals")
        .bearer(&token)
        .json(&json!({
            "goal_type": "weight_loss",
            "target": 5.0,
            "unit": "kg",
            "timeframe": "monthly",
            "start_date": (now - Duration::days(30)).to_rfc3339(),
            "end_date": (now - Duration::days(1)).to_rfc3339(),
        }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);
    let goal: Value = response.json();
    let goal_id = goal["id"].as_str().unwrap().to_owned();

    let response = AxumTestRequest::patch(&format!("/api/goals/{goal_id}/progress"))
        .bearer(&token)
        .json(&json!({ "progress": 40.0 }))
        .send(app)
        .await;
    let updated: Value = response.json();
    assert_eq!(updated["progress"], 40.0);
    assert_eq!(updated["status"], "failed");
}

#[tokio::test]
async fn test_progress_clamped_to_range() {
    let resources = common::create_test_resources().await;
    let app = common::test_router(&resources);
    let (_, token) = common::create_test_user(&resources, "ada", "ada@example.com").await;

    let goal = create_goal(&app, &token, "weight_loss", 200.0, "kg", 7).await;
    let goal_id = goal["id"].as_str().unwrap().to_owned();

    let response = AxumTestRequest::patch(&format!("/api/goals/{goal_id}/progress"))
        .bearer(&token)
        .json(&json!({ "progress": -20.0 }))
        .send(app)
        .await;
    let updated: Value = response.json();
    assert_eq!(updated["progress"], 0.0);
    assert_eq!(updated["status"], "active");
}

#[tokio::test]
async fn test_list_read_repair_promotes_reached_targets() {
    let resources = common::create_test_resources().await;
    let app = common::test_router(&resources);
    let (_, token) = common::create_test_user(&resources, "ada", "ada@example.com").await;

    let goal = create_goal(&app, &token, "weight_loss", 50.0, "kg", 7).await;
    let goal_id = goal["id"].as_str().unwrap().to_owned();

    // Stored progress passes the raw target without reaching 100.
    let response = AxumTestRequest::patch(&format!("/api/goals/{goal_id}/progress"))
        .bearer(&token)
        .json(&json!({ "progress": 60.0 }))
        .send(app.clone())
        .await;
    let updated: Value = response.json();
    assert_eq!(updated["status"], "active");
    assert_eq!(updated["progress"], 60.0);

    // Listing repairs it to completed at exactly 100.
    let response = AxumTestRequest::get("/api/goals").bearer(&token).send(app).await;
    let goals: Vec<Value> = response.json();
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0]["status"], "completed");
    assert_eq!(goals[0]["progress"], 100.0);
}

#[tokio::test]
async fn test_goal_validation() {
    let resources = common::create_test_resources().await;
    let app = common::test_router(&resources);
    let (_, token) = common::create_test_user(&resources, "ada", "ada@example.com").await;
    let now = Utc::now();

    // Unknown goal type.
    let response = AxumTestRequest::post("/api/goals")
        .bearer(&token)
        .json(&json!({
            "goal_type": "world_domination",
            "target": 1.0,
            "unit": "custom",
            "timeframe": "weekly",
            "end_date": (now + Duration::days(7)).to_rfc3339(),
        }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);

    // End date before start date.
    let response = AxumTestRequest::post("/api/goals")
        .bearer(&token)
        .json(&json!({
            "goal_type": "custom",
            "target": 1.0,
            "unit": "custom",
            "timeframe": "weekly",
            "start_date": now.to_rfc3339(),
            "end_date": (now - Duration::days(1)).to_rfc3339(),
        }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);

    // Non-positive target.
    let response = AxumTestRequest::post("/api/goals")
        .bearer(&token)
        .json(&json!({
            "goal_type": "custom",
            "target": 0.0,
            "unit": "custom",
            "timeframe": "weekly",
            "end_date": (now + Duration::days(7)).to_rfc3339(),
        }))
        .send(app)
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_goal_stats_always_reports_all_statuses() {
    let resources = common::create_test_resources().await;
    let app = common::test_router(&resources);
    let (_, token) = common::create_test_user(&resources, "ada", "ada@example.com").await;

    let response = AxumTestRequest::get("/api/goals/stats")
        .bearer(&token)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let stats: Value = response.json();
    for status in ["active", "completed", "failed"] {
        assert_eq!(stats[status]["count"], 0);
        assert_eq!(stats[status]["average_progress"], 0.0);
    }

    create_goal(&app, &token, "workout_frequency", 10.0, "workouts", 7).await;
    let response = AxumTestRequest::get("/api/goals/stats")
        .bearer(&token)
        .send(app)
        .await;
    let stats: Value = response.json();
    assert_eq!(stats["active"]["count"], 1);
}

#[tokio::test]
async fn test_goals_are_owner_scoped() {
    let resources = common::create_test_resources().await;
    let app = common::test_router(&resources);
    let (_, ada_token) = common::create_test_user(&resources, "ada", "ada@example.com").await;
    let (_, grace_token) = common::create_test_user(&resources, "grace", "grace@example.com").await;

    let goal = create_goal(&app, &ada_token, "workout_frequency", 10.0, "workouts", 7).await;
    let goal_id = goal["id"].as_str().unwrap().to_owned();

    let response = AxumTestRequest::get(&format!("/api/goals/{goal_id}"))
        .bearer(&grace_token)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 404);

    let response = AxumTestRequest::delete(&format!("/api/goals/{goal_id}"))
        .bearer(&ada_token)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);

    let response = AxumTestRequest::get(&format!("/api/goals/{goal_id}"))
        .bearer(&ada_token)
        .send(app)
        .await;
    assert_eq!(response.status(), 404);
}
