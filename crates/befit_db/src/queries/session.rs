//! Workout session queries.
//!
//! Every query here is owner-scoped: the `user_id` filter is part of the
//! WHERE clause, never applied after the fact, so a foreign row is
//! indistinguishable from an absent one.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::models::{NewSession, Session};

const SESSION_COLUMNS: &str = "id, user_id, title, description, started_at, ended_at, version";

/// List a user's sessions, most recently started first.
pub async fn list_sessions_for_user(pool: &SqlitePool, user_id: &str) -> DbResult<Vec<Session>> {
    let sessions = sqlx::query_as::<_, Session>(&format!(
        "SELECT {SESSION_COLUMNS} FROM sessions WHERE user_id = ? ORDER BY started_at DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(sessions)
}

/// Get a session by ID, only if it belongs to the user.
pub async fn get_session_for_user(
    pool: &SqlitePool,
    user_id: &str,
    id: i64,
) -> DbResult<Option<Session>> {
    let session = sqlx::query_as::<_, Session>(&format!(
        "SELECT {SESSION_COLUMNS} FROM sessions WHERE id = ? AND user_id = ?"
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(session)
}

/// Check whether a session exists and belongs to the user.
pub async fn session_owned_by(pool: &SqlitePool, user_id: &str, id: i64) -> DbResult<bool> {
    let exists: (i64,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM sessions WHERE id = ? AND user_id = ?)")
            .bind(id)
            .bind(user_id)
            .fetch_one(pool)
            .await?;
    Ok(exists.0 != 0)
}

/// Insert a new session, returning its assigned ID.
pub async fn create_session(pool: &SqlitePool, new: &NewSession) -> DbResult<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO sessions (user_id, title, description, started_at, ended_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&new.user_id)
    .bind(&new.title)
    .bind(&new.description)
    .bind(new.started_at)
    .bind(new.ended_at)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Update a session if it still belongs to the user and its version matches.
///
/// The owner column is never touched: it stays bound to the user who
/// created the row. Returns false on a missing, foreign, or stale row.
#[allow(clippy::too_many_arguments)]
pub async fn update_session_owned(
    pool: &SqlitePool,
    user_id: &str,
    id: i64,
    title: &str,
    description: Option<&str>,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
    expected_version: i64,
) -> DbResult<bool> {
    let result = sqlx::query(
        r#"
        UPDATE sessions
        SET title = ?, description = ?, started_at = ?, ended_at = ?, version = version + 1
        WHERE id = ? AND user_id = ? AND version = ?
        "#,
    )
    .bind(title)
    .bind(description)
    .bind(started_at)
    .bind(ended_at)
    .bind(id)
    .bind(user_id)
    .bind(expected_version)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Delete a session together with all of its exercises.
///
/// Both deletions run in one transaction: a partially-applied cascade must
/// never be observable. Returns false (and removes nothing) when the
/// session is absent or owned by someone else.
pub async fn delete_session_cascade(pool: &SqlitePool, user_id: &str, id: i64) -> DbResult<bool> {
    let mut tx = pool.begin().await?;

    let owned: (i64,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM sessions WHERE id = ? AND user_id = ?)")
            .bind(id)
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;
    if owned.0 == 0 {
        return Ok(false);
    }

    let exercises = sqlx::query("DELETE FROM exercises WHERE session_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM sessions WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    debug!(
        session_id = id,
        cascaded = exercises.rows_affected(),
        "session deleted"
    );
    Ok(true)
}
