//! Workout session models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A workout occasion owned by exactly one user.
///
/// Sessions group zero or more exercises. Ownership is the authorization
/// root: a caller may read or write a session, and everything under it,
/// iff `user_id` matches the caller.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier
    pub id: i64,

    /// Owning user (opaque identity-provider id)
    pub user_id: String,

    /// Session title (required)
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// When the workout started
    pub started_at: DateTime<Utc>,

    /// When the workout ended, if recorded (never before `started_at`)
    pub ended_at: Option<DateTime<Utc>>,

    /// Optimistic-concurrency token
    pub version: i64,
}

/// Draft for a new session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSession {
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}
