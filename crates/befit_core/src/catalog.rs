//! Exercise-type catalog service.
//!
//! Reads are open to everyone, including anonymous callers; writes require
//! the Administrator role. The catalog is shared state, so the write path
//! re-checks existence around the update in case another administrator
//! deleted the row concurrently.

use befit_db::{queries, BefitDb, ExerciseType, NewExerciseType};
use tracing::{info, warn};

use crate::error::{CoreError, CoreResult};
use crate::identity::Caller;
use crate::validate::Validator;

pub const NAME_MAX: usize = 100;
pub const DESCRIPTION_MAX: usize = 500;

/// Input payload for creating or updating a catalog entry.
#[derive(Debug, Clone)]
pub struct CatalogInput {
    pub name: String,
    pub description: Option<String>,
}

/// Administrator-managed CRUD over exercise types.
#[derive(Debug, Clone)]
pub struct CatalogService {
    db: BefitDb,
}

impl CatalogService {
    pub fn new(db: BefitDb) -> Self {
        Self { db }
    }

    /// List the catalog ordered by name. Open to all callers.
    pub async fn list(&self) -> CoreResult<Vec<ExerciseType>> {
        Ok(queries::list_exercise_types(self.db.pool()).await?)
    }

    /// Fetch one catalog entry. Open to all callers.
    pub async fn get(&self, id: i64) -> CoreResult<ExerciseType> {
        queries::get_exercise_type(self.db.pool(), id)
            .await?
            .ok_or_else(|| CoreError::not_found("exercise type", id))
    }

    /// Create a catalog entry. Administrator only.
    pub async fn create(&self, caller: &Caller, input: CatalogInput) -> CoreResult<ExerciseType> {
        caller.require_admin()?;
        validate(&input)?;

        let new = NewExerciseType {
            name: input.name,
            description: input.description,
        };
        let id = queries::create_exercise_type(self.db.pool(), &new).await?;
        info!(type_id = id, name = %new.name, "exercise type created");
        self.get(id).await
    }

    /// Update a catalog entry. Administrator only.
    ///
    /// A concurrent delete surfaces as NotFound; any other concurrent write
    /// as a Conflict the caller can retry.
    pub async fn update(
        &self,
        caller: &Caller,
        id: i64,
        input: CatalogInput,
    ) -> CoreResult<ExerciseType> {
        caller.require_admin()?;

        let existing = self.get(id).await?;
        validate(&input)?;

        let updated = queries::update_exercise_type(
            self.db.pool(),
            id,
            &input.name,
            input.description.as_deref(),
            existing.version,
        )
        .await?;

        if !updated {
            // Zero rows: the entry vanished or moved on under us.
            return match queries::get_exercise_type(self.db.pool(), id).await? {
                None => Err(CoreError::not_found("exercise type", id)),
                Some(_) => {
                    warn!(type_id = id, "stale exercise-type update rejected");
                    Err(CoreError::conflict("exercise type", id))
                }
            };
        }

        self.get(id).await
    }

    /// Delete a catalog entry. Administrator only.
    ///
    /// A type still referenced by exercises cannot be removed. Deleting an
    /// entry that is already gone is a success no-op.
    pub async fn delete(&self, caller: &Caller, id: i64) -> CoreResult<()> {
        caller.require_admin()?;

        let references = queries::exercise_count_for_type(self.db.pool(), id).await?;
        if references > 0 {
            return Err(CoreError::field(
                "id",
                format!("type is referenced by {references} exercise(s)"),
            ));
        }

        if queries::delete_exercise_type(self.db.pool(), id).await? {
            info!(type_id = id, "exercise type deleted");
        }
        Ok(())
    }
}

fn validate(input: &CatalogInput) -> CoreResult<()> {
    let mut v = Validator::new();
    v.require_text("name", &input.name, NAME_MAX);
    v.optional_text("description", input.description.as_deref(), DESCRIPTION_MAX);
    v.finish()
}
