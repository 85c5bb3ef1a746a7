//! Per-type exercise aggregation queries.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::error::DbResult;

/// Aggregated activity for one catalog type, scoped to a single user.
///
/// Contract: every catalog type appears exactly once, zero-filled when the
/// user logged nothing for it in the window. `avg_load` and `max_load`
/// ignore exercises without a load; both are 0.0 when no exercise in the
/// group carries one.
#[derive(Debug, Clone, FromRow)]
pub struct TypeUsage {
    pub exercise_type_id: i64,
    pub type_name: String,
    pub exercise_count: i64,
    pub total_reps: i64,
    pub total_duration_seconds: i64,
    pub avg_load: f64,
    pub max_load: f64,
}

/// Roll up a user's exercises by catalog type.
///
/// Scope: exercises whose parent session belongs to `user_id` and started
/// on or after `since`. Rows come back ordered by type name, matching the
/// catalog listing order.
pub async fn type_usage_for_user(
    pool: &SqlitePool,
    user_id: &str,
    since: DateTime<Utc>,
) -> DbResult<Vec<TypeUsage>> {
    let rows = sqlx::query_as::<_, TypeUsage>(
        r#"
        SELECT
            t.id AS exercise_type_id,
            t.name AS type_name,
            COUNT(e.id) AS exercise_count,
            COALESCE(SUM(e.reps), 0) AS total_reps,
            COALESCE(SUM(e.duration_seconds), 0) AS total_duration_seconds,
            COALESCE(AVG(e.load_kg), 0.0) AS avg_load,
            COALESCE(MAX(e.load_kg), 0.0) AS max_load
        FROM exercise_types t
        LEFT JOIN exercises e
            ON e.exercise_type_id = t.id
            AND e.session_id IN (
                SELECT id FROM sessions WHERE user_id = ? AND started_at >= ?
            )
        GROUP BY t.id, t.name
        ORDER BY t.name ASC
        "#,
    )
    .bind(user_id)
    .bind(since)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
