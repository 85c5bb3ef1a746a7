//! Exercise queries.
//!
//! Ownership is transitive: every filter joins through `sessions` and
//! matches on its `user_id`. An exercise under someone else's session is
//! indistinguishable from an absent one.

use sqlx::SqlitePool;

use crate::error::DbResult;
use crate::models::{Exercise, ExerciseDetail, NewExercise};

const EXERCISE_COLUMNS: &str = "e.id, e.session_id, e.exercise_type_id, e.name, e.description, \
     e.duration_seconds, e.reps, e.set_count, e.load_kg, e.version";

/// List a user's exercises joined with type and session names, newest first.
pub async fn list_exercises_for_user(
    pool: &SqlitePool,
    user_id: &str,
) -> DbResult<Vec<ExerciseDetail>> {
    let list = sqlx::query_as::<_, ExerciseDetail>(&format!(
        r#"
        SELECT {EXERCISE_COLUMNS}, t.name AS type_name, s.title AS session_title
        FROM exercises e
        JOIN sessions s ON s.id = e.session_id AND s.user_id = ?
        JOIN exercise_types t ON t.id = e.exercise_type_id
        ORDER BY e.id DESC
        "#
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(list)
}

/// Get an exercise by ID, only if its session belongs to the user.
pub async fn get_exercise_for_user(
    pool: &SqlitePool,
    user_id: &str,
    id: i64,
) -> DbResult<Option<Exercise>> {
    let exercise = sqlx::query_as::<_, Exercise>(&format!(
        r#"
        SELECT {EXERCISE_COLUMNS}
        FROM exercises e
        JOIN sessions s ON s.id = e.session_id AND s.user_id = ?
        WHERE e.id = ?
        "#
    ))
    .bind(user_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(exercise)
}

/// Get an exercise with joined names, only if its session belongs to the user.
pub async fn get_exercise_detail_for_user(
    pool: &SqlitePool,
    user_id: &str,
    id: i64,
) -> DbResult<Option<ExerciseDetail>> {
    let exercise = sqlx::query_as::<_, ExerciseDetail>(&format!(
        r#"
        SELECT {EXERCISE_COLUMNS}, t.name AS type_name, s.title AS session_title
        FROM exercises e
        JOIN sessions s ON s.id = e.session_id AND s.user_id = ?
        JOIN exercise_types t ON t.id = e.exercise_type_id
        WHERE e.id = ?
        "#
    ))
    .bind(user_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(exercise)
}

/// Insert a new exercise, returning its assigned ID.
///
/// Session ownership is the caller's responsibility; the service layer
/// verifies it before reaching this point.
pub async fn create_exercise(pool: &SqlitePool, new: &NewExercise) -> DbResult<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO exercises
            (session_id, exercise_type_id, name, description, duration_seconds, reps, set_count, load_kg)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(new.session_id)
    .bind(new.exercise_type_id)
    .bind(&new.name)
    .bind(&new.description)
    .bind(new.duration_seconds)
    .bind(new.reps)
    .bind(new.set_count)
    .bind(new.load_kg)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Update an exercise if the user still owns its current session and the
/// version matches.
///
/// `exercise.version` is the expected token; the stored row's version is
/// incremented. Returns false on a missing, foreign, or stale row.
pub async fn update_exercise_owned(
    pool: &SqlitePool,
    user_id: &str,
    exercise: &Exercise,
) -> DbResult<bool> {
    let result = sqlx::query(
        r#"
        UPDATE exercises
        SET session_id = ?, exercise_type_id = ?, name = ?, description = ?,
            duration_seconds = ?, reps = ?, set_count = ?, load_kg = ?,
            version = version + 1
        WHERE id = ? AND version = ?
          AND session_id IN (SELECT id FROM sessions WHERE user_id = ?)
        "#,
    )
    .bind(exercise.session_id)
    .bind(exercise.exercise_type_id)
    .bind(&exercise.name)
    .bind(&exercise.description)
    .bind(exercise.duration_seconds)
    .bind(exercise.reps)
    .bind(exercise.set_count)
    .bind(exercise.load_kg)
    .bind(exercise.id)
    .bind(exercise.version)
    .bind(user_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Delete an exercise if the user owns its session. Returns false otherwise.
pub async fn delete_exercise_for_user(pool: &SqlitePool, user_id: &str, id: i64) -> DbResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM exercises
        WHERE id = ? AND session_id IN (SELECT id FROM sessions WHERE user_id = ?)
        "#,
    )
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}
