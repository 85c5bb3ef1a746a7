//! Logged exercise models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single logged movement instance.
///
/// Belongs to exactly one session and one exercise type. There is no owner
/// column here: ownership is transitive through the session, which is the
/// single source of truth.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Exercise {
    /// Unique identifier
    pub id: i64,

    /// Parent session (ownership root)
    pub session_id: i64,

    /// Catalog type reference
    pub exercise_type_id: i64,

    /// Exercise name (required)
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Duration in seconds (0..=86400)
    pub duration_seconds: i64,

    /// Repetitions per set (0..=10000)
    pub reps: i64,

    /// Number of sets (1..=1000)
    pub set_count: i64,

    /// Load in kilograms, if any (0..=10000)
    pub load_kg: Option<f64>,

    /// Optimistic-concurrency token
    pub version: i64,
}

/// Draft for a new exercise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExercise {
    pub session_id: i64,
    pub exercise_type_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub duration_seconds: i64,
    pub reps: i64,
    pub set_count: i64,
    pub load_kg: Option<f64>,
}

/// Exercise joined with its type and session names, for list views.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ExerciseDetail {
    pub id: i64,
    pub session_id: i64,
    pub exercise_type_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub duration_seconds: i64,
    pub reps: i64,
    pub set_count: i64,
    pub load_kg: Option<f64>,
    pub version: i64,

    /// Joined catalog type name
    pub type_name: String,

    /// Joined parent session title
    pub session_title: String,
}
