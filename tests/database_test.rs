// ABOUTME: Integration tests for database connection, migrations, and manager round-trips
// ABOUTME: Exercises both in-memory and file-backed SQLite stores
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use fitlog::database::workouts::CreateWorkoutRequest;
use fitlog::database::Database;
use fitlog::models::{Intensity, User, WorkoutType};

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let database = Database::new("sqlite::memory:").await.unwrap();
    // Running migrations again over an initialized store is a no-op.
    database.migrate().await.unwrap();
}

#[tokio::test]
async fn test_file_backed_database_persists() {
    common::init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("fitlog-test.db");
    let url = format!("sqlite:{}", db_path.display());

    let user_id = {
        let database = Database::new(&url).await.unwrap();
        let user = User::new("ada".into(), "ada@example.com".into(), "hash".into());
        database.users().create(&user).await.unwrap();
        user.id
    };

    // A fresh connection to the same file sees the row.
    let database = Database::new(&url).await.unwrap();
    let user = database.users().get(user_id).await.unwrap().unwrap();
    assert_eq!(user.username, "ada");
    assert_eq!(user.email, "ada@example.com");
}

#[tokio::test]
async fn test_workout_round_trip_preserves_exercises() {
    let database = Database::new("sqlite::memory:").await.unwrap();
    let user = User::new("ada".into(), "ada@example.com".into(), "hash".into());
    database.users().create(&user).await.unwrap();

    let request = CreateWorkoutRequest {
        workout_type: WorkoutType::Strength,
        duration_minutes: 45.0,
        calories_burned: 320.0,
        date: chrono::Utc::now(),
        exercises: vec![fitlog::models::Exercise {
            name: "squat".into(),
            sets: Some(5),
            reps: Some(5),
            weight_kg: Some(102.5),
            duration_minutes: None,
        }],
        notes: Some("heavy day".into()),
        intensity: Intensity::High,
    };
    let created = database.workouts().create(user.id, &request).await.unwrap();

    let fetched = database
        .workouts()
        .get(created.id, user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.exercises, request.exercises);
    assert_eq!(fetched.intensity, Intensity::High);
    assert_eq!(fetched.notes.as_deref(), Some("heavy day"));
}

#[tokio::test]
async fn test_duplicate_username_violates_unique_constraint() {
    let database = Database::new("sqlite::memory:").await.unwrap();
    let first = User::new("ada".into(), "ada@example.com".into(), "hash".into());
    database.users().create(&first).await.unwrap();

    let second = User::new("ada".into(), "other@example.com".into(), "hash".into());
    assert!(database.users().create(&second).await.is_err());
}
