//! Exercise-type catalog models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An administrator-curated exercise category (e.g. "Strength", "Cardio").
///
/// The catalog is global: every user's exercises reference these rows, and
/// only administrators may change them.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ExerciseType {
    /// Unique identifier
    pub id: i64,

    /// Category name (unique in practice, required)
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Optimistic-concurrency token
    pub version: i64,
}

/// Draft for a new catalog entry (id and version are assigned on insert).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewExerciseType {
    pub name: String,
    pub description: Option<String>,
}
