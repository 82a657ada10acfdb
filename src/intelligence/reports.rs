// ABOUTME: Analytics report aggregation: single-pass reduction over fetched workouts and goals
// ABOUTME: Resolves symbolic time ranges, buckets activity per day, ranks exercises
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

//! Report aggregation.
//!
//! [`build_report`] is one pass over the fetched workout list plus one over
//! the goal list. Every rate field defaults to 0 when its denominator is
//! empty; an empty window produces an all-zero report, never an error.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Months, NaiveDate, TimeZone, Utc};

use crate::models::{
    AnalyticsReport, DailyActivity, ExerciseFrequency, Goal, GoalStatus, ProgressPoint, TimeRange,
    Workout,
};

use crate::constants::limits;

/// Clamp an instant to the start of its calendar day
fn start_of_day(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.date_naive()
        .and_hms_opt(0, 0, 0)
        .map_or(dt, |naive| Utc.from_utc_datetime(&naive))
}

/// Clamp an instant to the end of its calendar day
fn end_of_day(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.date_naive()
        .and_hms_milli_opt(23, 59, 59, 999)
        .map_or(dt, |naive| Utc.from_utc_datetime(&naive))
}

/// Resolve a symbolic range into absolute day-clamped instants ending now
#[must_use]
pub fn resolve_window(range: TimeRange, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let raw_start = match range {
        TimeRange::Week => now - Duration::days(7),
        TimeRange::Month => now
            .checked_sub_months(Months::new(1))
            .unwrap_or_else(|| now - Duration::days(30)),
        TimeRange::Year => now
            .checked_sub_months(Months::new(12))
            .unwrap_or_else(|| now - Duration::days(365)),
    };
    (start_of_day(raw_start), end_of_day(now))
}

/// Per-day accumulator used while bucketing workouts
#[derive(Default)]
struct DayBucket {
    count: u32,
    duration: f64,
    calories: f64,
}

/// Build the activity report for one window
///
/// `workouts` must already be filtered to `date ∈ [start, end]`; `goals` to
/// those whose start or end date falls inside the window. Exercise ranking
/// ties break by first appearance in the given workout order.
#[must_use]
pub fn build_report(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    workouts: &[Workout],
    goals: &[Goal],
) -> AnalyticsReport {
    let mut report = AnalyticsReport::empty();
    let mut day_buckets: HashMap<NaiveDate, DayBucket> = HashMap::new();
    // Ranking entries keep insertion order; the index map avoids a linear
    // scan per exercise occurrence.
    let mut exercise_counts: Vec<ExerciseFrequency> = Vec::new();
    let mut exercise_index: HashMap<String, usize> = HashMap::new();

    for workout in workouts {
        report.total_workouts += 1;
        report.total_duration += workout.duration_minutes;
        report.total_calories_burned += workout.calories_burned;

        *report
            .workout_type_distribution
            .entry(workout.workout_type.as_str().to_owned())
            .or_insert(0) += 1;

        let bucket = day_buckets.entry(workout.date.date_naive()).or_default();
        bucket.count += 1;
        bucket.duration += workout.duration_minutes;
        bucket.calories += workout.calories_burned;

        for exercise in &workout.exercises {
            if let Some(&idx) = exercise_index.get(&exercise.name) {
                exercise_counts[idx].count += 1;
            } else {
                exercise_index.insert(exercise.name.clone(), exercise_counts.len());
                exercise_counts.push(ExerciseFrequency {
                    name: exercise.name.clone(),
                    count: 1,
                });
            }
        }
    }

    // One entry per calendar day of the window, zero-filled for quiet days.
    let mut day = start.date_naive();
    let last = end.date_naive();
    while day <= last {
        let bucket = day_buckets.remove(&day).unwrap_or_default();
        report.daily_activity.push(DailyActivity {
            date: day.format("%Y-%m-%d").to_string(),
            count: bucket.count,
            duration: bucket.duration,
            calories_burned: bucket.calories,
        });
        day = day + Duration::days(1);
    }

    report.progress_over_time = report
        .daily_activity
        .iter()
        .map(|entry| ProgressPoint {
            date: entry.date.clone(),
            progress: if report.total_workouts == 0 {
                0.0
            } else {
                f64::from(entry.count) / f64::from(report.total_workouts) * 100.0
            },
        })
        .collect();

    let completed = goals
        .iter()
        .filter(|goal| goal.status == GoalStatus::Completed)
        .count();
    report.goal_completion_rate = if goals.is_empty() {
        0.0
    } else {
        completed as f64 / goals.len() as f64 * 100.0
    };

    // Stable sort keeps first-seen order for equal counts.
    exercise_counts.sort_by(|a, b| b.count.cmp(&a.count));
    exercise_counts.truncate(limits::TOP_EXERCISES);
    report.most_common_exercises = exercise_counts;

    report
}

/// Relative change between the first and last of a value series, in percent
///
/// Returns 0 for fewer than two points or a zero first value.
#[must_use]
pub fn trend(values: &[f64]) -> f64 {
    match (values.first(), values.last()) {
        (Some(&first), Some(&last)) if values.len() >= 2 && first != 0.0 => {
            (last - first) / first * 100.0
        }
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Exercise, Intensity, WorkoutType};
    use uuid::Uuid;

    fn workout(date: DateTime<Utc>, duration: f64, calories: f64, exercises: &[&str]) -> Workout {
        Workout {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            workout_type: WorkoutType::Strength,
            duration_minutes: duration,
            calories_burned: calories,
            date,
            exercises: exercises
                .iter()
                .map(|name| Exercise {
                    name: (*name).to_owned(),
                    sets: None,
                    reps: None,
                    weight_kg: None,
                    duration_minutes: None,
                })
                .collect(),
            notes: None,
            intensity: Intensity::Medium,
            created_at: date,
            updated_at: date,
        }
    }

    fn day(s: &str) -> DateTime<Utc> {
        format!("{s}T12:00:00Z").parse().unwrap()
    }

    #[test]
    fn test_empty_window_is_all_zero() {
        let now = Utc::now();
        let (start, end) = resolve_window(TimeRange::Week, now);
        let report = build_report(start, end, &[], &[]);

        assert_eq!(report.total_workouts, 0);
        assert_eq!(report.total_duration, 0.0);
        assert_eq!(report.goal_completion_rate, 0.0);
        assert!(report.most_common_exercises.is_empty());
        // The day series still covers the window.
        assert_eq!(report.daily_activity.len(), 8);
        assert!(report.progress_over_time.iter().all(|p| p.progress == 0.0));
    }

    #[test]
    fn test_totals_are_field_sums() {
        let (start, end) = (day("2025-06-01"), day("2025-06-07"));
        let workouts = vec![
            workout(day("2025-06-02"), 30.0, 250.0, &[]),
            workout(day("2025-06-02"), 45.0, 400.0, &[]),
            workout(day("2025-06-05"), 20.0, 150.0, &[]),
        ];
        let report = build_report(start_of_day(start), end_of_day(end), &workouts, &[]);

        assert_eq!(report.total_workouts, 3);
        assert_eq!(report.total_duration, 95.0);
        assert_eq!(report.total_calories_burned, 800.0);
        assert_eq!(report.workout_type_distribution["strength"], 3);

        let june2 = report
            .daily_activity
            .iter()
            .find(|d| d.date == "2025-06-02")
            .unwrap();
        assert_eq!(june2.count, 2);
        assert_eq!(june2.duration, 75.0);
    }

    #[test]
    fn test_exercise_ranking_descending_with_insertion_tie_break() {
        let (start, end) = (day("2025-06-01"), day("2025-06-01"));
        let workouts = vec![
            workout(day("2025-06-01"), 30.0, 100.0, &["squat", "bench", "row"]),
            workout(day("2025-06-01"), 30.0, 100.0, &["bench", "curl", "press"]),
            workout(day("2025-06-01"), 30.0, 100.0, &["bench", "squat", "dip"]),
        ];
        let report = build_report(start_of_day(start), end_of_day(end), &workouts, &[]);

        let names: Vec<&str> = report
            .most_common_exercises
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        // bench: 3, squat: 2, then the count-1 entries in first-seen order,
        // truncated to five.
        assert_eq!(names, vec!["bench", "squat", "row", "curl", "press"]);
        let counts: Vec<u32> = report
            .most_common_exercises
            .iter()
            .map(|e| e.count)
            .collect();
        assert_eq!(counts, vec![3, 2, 1, 1, 1]);
    }

    #[test]
    fn test_goal_completion_rate() {
        let (start, end) = (day("2025-06-01"), day("2025-06-07"));
        let mut goals = Vec::new();
        for status in [
            GoalStatus::Completed,
            GoalStatus::Active,
            GoalStatus::Failed,
            GoalStatus::Completed,
        ] {
            let mut goal = crate::models::Goal {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                goal_type: crate::models::GoalType::WorkoutFrequency,
                target: 10.0,
                unit: crate::models::GoalUnit::Workouts,
                timeframe: crate::models::Timeframe::Weekly,
                start_date: start,
                end_date: end,
                progress: 0.0,
                status: GoalStatus::Active,
                description: None,
                custom_type: None,
                custom_unit: None,
                milestones: Vec::new(),
                created_at: start,
                updated_at: start,
            };
            goal.status = status;
            goals.push(goal);
        }
        let report = build_report(start_of_day(start), end_of_day(end), &[], &goals);
        assert_eq!(report.goal_completion_rate, 50.0);
    }

    #[test]
    fn test_resolve_window_clamps_to_day_boundaries() {
        let now = day("2025-06-15");
        let (start, end) = resolve_window(TimeRange::Month, now);
        assert_eq!(start.to_rfc3339(), "2025-05-15T00:00:00+00:00");
        assert!(end.to_rfc3339().starts_with("2025-06-15T23:59:59"));
    }

    #[test]
    fn test_trend() {
        assert_eq!(trend(&[]), 0.0);
        assert_eq!(trend(&[5.0]), 0.0);
        assert_eq!(trend(&[0.0, 10.0]), 0.0);
        assert_eq!(trend(&[10.0, 15.0]), 50.0);
        assert_eq!(trend(&[10.0, 12.0, 5.0]), -50.0);
    }
}
