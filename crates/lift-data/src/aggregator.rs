//! Folding normalized sets into per-exercise time series.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use lift_core::models::{ExercisePoint, ExerciseSeries, LiftingSet};

/// Group `sets` by exercise name, then by exact timestamp within each
/// exercise, folding every (exercise, timestamp) bucket into one
/// [`ExercisePoint`].
///
/// The inner BTreeMap is keyed by timestamp, so flattening its values
/// yields each exercise's points already in chronological order. The fold
/// itself is max/max/sum, so input row order never affects the result.
///
/// Cannot fail: empty input produces an empty series.
pub fn calculate_exercise_series(sets: &[LiftingSet]) -> ExerciseSeries {
    let mut buckets: HashMap<String, BTreeMap<DateTime<Utc>, ExercisePoint>> = HashMap::new();

    for set in sets {
        buckets
            .entry(set.exercise.clone())
            .or_default()
            .entry(set.timestamp)
            .or_insert_with(|| ExercisePoint::new(set.timestamp))
            .add_set(set);
    }

    buckets
        .into_iter()
        .map(|(exercise, points)| (exercise, points.into_values().collect()))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
