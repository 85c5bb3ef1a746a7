//! Exercise-type catalog queries.

use sqlx::SqlitePool;

use crate::error::DbResult;
use crate::models::{ExerciseType, NewExerciseType};

/// List the full catalog, ordered by name.
///
/// This ordering is a contract: pick lists in presentation layers rely on it.
pub async fn list_exercise_types(pool: &SqlitePool) -> DbResult<Vec<ExerciseType>> {
    let types = sqlx::query_as::<_, ExerciseType>(
        "SELECT id, name, description, version FROM exercise_types ORDER BY name ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(types)
}

/// Get a catalog entry by ID.
pub async fn get_exercise_type(pool: &SqlitePool, id: i64) -> DbResult<Option<ExerciseType>> {
    let row = sqlx::query_as::<_, ExerciseType>(
        "SELECT id, name, description, version FROM exercise_types WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Insert a new catalog entry, returning its assigned ID.
pub async fn create_exercise_type(pool: &SqlitePool, new: &NewExerciseType) -> DbResult<i64> {
    let result = sqlx::query("INSERT INTO exercise_types (name, description) VALUES (?, ?)")
        .bind(&new.name)
        .bind(&new.description)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

/// Update a catalog entry if its version still matches.
///
/// Returns false when the row is gone or another writer got there first;
/// the caller distinguishes the two by re-fetching.
pub async fn update_exercise_type(
    pool: &SqlitePool,
    id: i64,
    name: &str,
    description: Option<&str>,
    expected_version: i64,
) -> DbResult<bool> {
    let result = sqlx::query(
        r#"
        UPDATE exercise_types
        SET name = ?, description = ?, version = version + 1
        WHERE id = ? AND version = ?
        "#,
    )
    .bind(name)
    .bind(description)
    .bind(id)
    .bind(expected_version)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Delete a catalog entry. Returns false if it was already absent.
pub async fn delete_exercise_type(pool: &SqlitePool, id: i64) -> DbResult<bool> {
    let result = sqlx::query("DELETE FROM exercise_types WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Count exercises referencing a catalog type, across all users.
///
/// Used to block deletion of a type that is still in use.
pub async fn exercise_count_for_type(pool: &SqlitePool, type_id: i64) -> DbResult<i64> {
    let count: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM exercises WHERE exercise_type_id = ?")
            .bind(type_id)
            .fetch_one(pool)
            .await?;
    Ok(count.0)
}
