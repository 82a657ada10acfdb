// ABOUTME: Goal progress recomputation against live workout activity
// ABOUTME: Pure progress arithmetic plus status derivation with [0, 100] clamping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

//! Goal progress engine.
//!
//! Frequency and calorie goals derive progress from activity since the
//! goal's start; every other type is caller-supplied (pass-through).
//! Status rules: completed once progress reaches 100 (or stored progress
//! reaches the target), failed once the end date passes with progress
//! short of 100, active otherwise. Progress never leaves [0, 100].

use chrono::{DateTime, Utc};

use crate::models::{Goal, GoalStatus, GoalType};

/// Workout activity within a goal's window, as fetched by the caller
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivitySummary {
    /// Workouts logged between the goal's start date and now
    pub workout_count: u32,
    /// Calories burned between the goal's start date and now
    pub calories_burned: f64,
}

fn clamp_progress(progress: f64) -> f64 {
    if progress.is_finite() {
        progress.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Compute raw (unclamped) progress for a goal
///
/// `provided` is the caller-supplied value used for pass-through types;
/// when absent, the stored progress carries over.
#[must_use]
pub fn compute_progress(goal: &Goal, activity: ActivitySummary, provided: Option<f64>) -> f64 {
    match goal.goal_type {
        GoalType::WorkoutFrequency => f64::from(activity.workout_count) / goal.target * 100.0,
        GoalType::CaloriesBurned => activity.calories_burned / goal.target * 100.0,
        GoalType::WeightLoss
        | GoalType::Strength
        | GoalType::Endurance
        | GoalType::Custom => provided.unwrap_or(goal.progress),
    }
}

/// Derive the goal's status from freshly computed progress
///
/// Returns the final (clamped, and capped at exactly 100 on completion)
/// progress together with the status.
#[must_use]
pub fn derive_status(goal: &Goal, progress: f64, now: DateTime<Utc>) -> (f64, GoalStatus) {
    if progress >= 100.0 || goal.progress >= goal.target {
        (100.0, GoalStatus::Completed)
    } else if now > goal.end_date {
        (clamp_progress(progress), GoalStatus::Failed)
    } else {
        (clamp_progress(progress), GoalStatus::Active)
    }
}

/// Recompute a goal's progress and status in one step
#[must_use]
pub fn recompute(
    goal: &Goal,
    activity: ActivitySummary,
    provided: Option<f64>,
    now: DateTime<Utc>,
) -> (f64, GoalStatus) {
    let progress = compute_progress(goal, activity, provided);
    derive_status(goal, progress, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GoalUnit, Timeframe};
    use chrono::Duration;
    use uuid::Uuid;

    fn goal(goal_type: GoalType, target: f64, ends_in_days: i64) -> Goal {
        let now = Utc::now();
        Goal {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            goal_type,
            target,
            unit: GoalUnit::Workouts,
            timeframe: Timeframe::Weekly,
            start_date: now - Duration::days(7),
            end_date: now + Duration::days(ends_in_days),
            progress: 0.0,
            status: GoalStatus::Active,
            description: None,
            custom_type: None,
            custom_unit: None,
            milestones: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_frequency_goal_overshoot_completes_at_100() {
        let g = goal(GoalType::WorkoutFrequency, 10.0, 7);
        let activity = ActivitySummary {
            workout_count: 12,
            calories_burned: 0.0,
        };
        let (progress, status) = recompute(&g, activity, None, Utc::now());
        assert_eq!(progress, 100.0);
        assert_eq!(status, GoalStatus::Completed);
    }

    #[test]
    fn test_frequency_goal_partial() {
        let g = goal(GoalType::WorkoutFrequency, 10.0, 7);
        let activity = ActivitySummary {
            workout_count: 4,
            calories_burned: 0.0,
        };
        let (progress, status) = recompute(&g, activity, None, Utc::now());
        assert_eq!(progress, 40.0);
        assert_eq!(status, GoalStatus::Active);
    }

    #[test]
    fn test_calories_goal() {
        let g = goal(GoalType::CaloriesBurned, 2000.0, 7);
        let activity = ActivitySummary {
            workout_count: 3,
            calories_burned: 1500.0,
        };
        let (progress, status) = recompute(&g, activity, None, Utc::now());
        assert_eq!(progress, 75.0);
        assert_eq!(status, GoalStatus::Active);
    }

    #[test]
    fn test_expired_goal_fails() {
        let g = goal(GoalType::WeightLoss, 5.0, -1);
        let (progress, status) = recompute(&g, ActivitySummary::default(), Some(40.0), Utc::now());
        assert_eq!(progress, 40.0);
        assert_eq!(status, GoalStatus::Failed);
    }

    #[test]
    fn test_pass_through_falls_back_to_stored_progress() {
        let mut g = goal(GoalType::Custom, 5.0, 7);
        g.progress = 33.0;
        let (progress, status) = recompute(&g, ActivitySummary::default(), None, Utc::now());
        assert_eq!(progress, 33.0);
        assert_eq!(status, GoalStatus::Active);
    }

    #[test]
    fn test_stored_progress_reaching_target_completes() {
        // The original compares stored progress against the raw target,
        // not against 100; preserved here.
        let mut g = goal(GoalType::WeightLoss, 5.0, 7);
        g.progress = 6.0;
        let (progress, status) = recompute(&g, ActivitySummary::default(), Some(6.0), Utc::now());
        assert_eq!(progress, 100.0);
        assert_eq!(status, GoalStatus::Completed);
    }

    #[test]
    fn test_progress_clamped_to_range() {
        let g = goal(GoalType::WeightLoss, 200.0, 7);
        let (progress, _) = recompute(&g, ActivitySummary::default(), Some(-20.0), Utc::now());
        assert_eq!(progress, 0.0);
    }
}
