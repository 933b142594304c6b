use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ── Dialect ───────────────────────────────────────────────────────────────────

/// The delimiter/column-layout convention of one of the two supported
/// Strong export formats.
///
/// The two vendor exports are mutually exclusive on delimiter, so the
/// dialect doubles as the schema selector (see [`Dialect::layout`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// iOS export: comma-delimited.
    Comma,
    /// Android export: semicolon-delimited.
    Semicolon,
}

impl Dialect {
    /// The field delimiter byte used by this dialect.
    pub fn delimiter(self) -> u8 {
        match self {
            Dialect::Comma => b',',
            Dialect::Semicolon => b';',
        }
    }

    /// Column positions of the four fields Liftlog consumes.
    ///
    /// iOS header:
    /// `Date,Workout Name,Duration,Exercise Name,Set Order,Weight,Reps,Distance,Seconds,Notes,Workout Notes,RPE`
    ///
    /// Android header:
    /// `Date;Workout Name;Exercise Name;Set Order;Weight;Weight Unit;Reps;RPE;Distance;Distance Unit;Seconds;Notes;Workout Notes;Workout Duration`
    pub fn layout(self) -> ColumnLayout {
        match self {
            Dialect::Comma => ColumnLayout {
                timestamp: 0,
                exercise: 3,
                weight: 5,
                reps: 6,
            },
            Dialect::Semicolon => ColumnLayout {
                timestamp: 0,
                exercise: 2,
                weight: 4,
                reps: 6,
            },
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Comma => write!(f, "comma"),
            Dialect::Semicolon => write!(f, "semicolon"),
        }
    }
}

/// Column indices of the consumed fields within one dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Index of the `Date` column.
    pub timestamp: usize,
    /// Index of the `Exercise Name` column.
    pub exercise: usize,
    /// Index of the `Weight` column.
    pub weight: usize,
    /// Index of the `Reps` column.
    pub reps: usize,
}

// ── LiftingSet ────────────────────────────────────────────────────────────────

/// One normalized strength-training set parsed from an export row.
#[derive(Debug, Clone, PartialEq)]
pub struct LiftingSet {
    /// When the set was performed (second precision, UTC).
    pub timestamp: DateTime<Utc>,
    /// Exercise name, taken verbatim from the export.
    pub exercise: String,
    /// Weight lifted; unit-less (lb and kg are opaque to Liftlog).
    pub weight: f64,
    /// Number of repetitions.
    pub reps: u32,
    /// Estimated one-repetition maximum for this set.
    pub one_rep_max: f64,
}

impl LiftingSet {
    /// Build a set record, deriving [`one_rep_max`](Self::one_rep_max) from
    /// weight and reps.
    pub fn new(timestamp: DateTime<Utc>, exercise: String, weight: f64, reps: u32) -> Self {
        Self {
            timestamp,
            exercise,
            weight,
            reps,
            one_rep_max: one_rep_max_estimate(weight, reps),
        }
    }

    /// Weight lifted multiplied by repetitions.
    pub fn volume(&self) -> f64 {
        self.weight * f64::from(self.reps)
    }
}

/// Brzycki one-repetition-maximum estimate: `weight * 36 / (37 - reps)`.
///
/// The estimator is only defined for rep counts below 37; past that the
/// denominator is zero or negative, so the raw bar weight is returned
/// instead (a true lower bound on the 1RM).
pub fn one_rep_max_estimate(weight: f64, reps: u32) -> f64 {
    if reps >= 37 {
        return weight;
    }
    weight * (36.0 / (37.0 - f64::from(reps)))
}

// ── ExercisePoint ─────────────────────────────────────────────────────────────

/// The folded summary of all sets sharing one exercise and exact timestamp.
///
/// Field names serialize to the camelCase keys the web client expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExercisePoint {
    /// The shared timestamp of every contributing set.
    pub timestamp: DateTime<Utc>,
    /// Heaviest weight lifted at this timestamp.
    pub max_weight: f64,
    /// Highest estimated one-rep max at this timestamp.
    pub max_one_rep_max: f64,
    /// Sum of weight × reps over all contributing sets.
    pub total_volume: f64,
}

impl ExercisePoint {
    /// An empty aggregate point at `timestamp`, ready to fold sets into.
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            max_weight: 0.0,
            max_one_rep_max: 0.0,
            total_volume: 0.0,
        }
    }

    /// Fold one set into the aggregate. Max and sum are commutative, so
    /// fold order never affects the result.
    pub fn add_set(&mut self, set: &LiftingSet) {
        self.max_weight = self.max_weight.max(set.weight);
        self.max_one_rep_max = self.max_one_rep_max.max(set.one_rep_max);
        self.total_volume += set.volume();
    }
}

/// Per-exercise chronological sequence of aggregate points.
pub type ExerciseSeries = HashMap<String, Vec<ExercisePoint>>;

// ── Tests ─────────────────────────────────────────────────────────────────────
