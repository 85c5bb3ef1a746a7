//! Exercise service.
//!
//! Exercises have no owner of their own: they belong to whoever owns their
//! session. Both create and update therefore verify the target session
//! against the caller, so an exercise can never be attached to, or moved
//! into, a session the caller does not own.

use befit_db::{queries, BefitDb, Exercise, ExerciseDetail, ExerciseType, NewExercise, Session};
use tracing::{info, warn};

use crate::error::{CoreError, CoreResult};
use crate::guard::OwnershipGuard;
use crate::identity::Caller;
use crate::validate::Validator;

pub const NAME_MAX: usize = 120;
pub const DESCRIPTION_MAX: usize = 1000;
pub const DURATION_MAX_SECONDS: i64 = 86_400;
pub const REPS_MAX: i64 = 10_000;
pub const SET_COUNT_MAX: i64 = 1_000;
pub const LOAD_MAX_KG: f64 = 10_000.0;

/// Input payload for creating or updating an exercise.
#[derive(Debug, Clone)]
pub struct ExerciseInput {
    pub session_id: i64,
    pub exercise_type_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub duration_seconds: i64,
    pub reps: i64,
    pub set_count: i64,
    pub load_kg: Option<f64>,
}

impl Default for ExerciseInput {
    fn default() -> Self {
        Self {
            session_id: 0,
            exercise_type_id: 0,
            name: String::new(),
            description: None,
            duration_seconds: 0,
            reps: 0,
            set_count: 1,
            load_kg: None,
        }
    }
}

/// Ordered selection lists for type and session pickers.
///
/// Ordering is a contract presentation layers rely on: types by name,
/// sessions by start date descending.
#[derive(Debug, Clone)]
pub struct PickLists {
    pub types: Vec<ExerciseType>,
    pub sessions: Vec<Session>,
}

/// CRUD over exercises, ownership transitive through the session.
#[derive(Debug, Clone)]
pub struct ExerciseService {
    db: BefitDb,
    guard: OwnershipGuard,
}

impl ExerciseService {
    pub fn new(db: BefitDb) -> Self {
        let guard = OwnershipGuard::new(db.clone());
        Self { db, guard }
    }

    /// List the caller's exercises with type and session names, newest first.
    pub async fn list(&self, caller: &Caller) -> CoreResult<Vec<ExerciseDetail>> {
        Ok(queries::list_exercises_for_user(self.db.pool(), &caller.user_id).await?)
    }

    /// Fetch one of the caller's exercises with joined names.
    pub async fn get(&self, caller: &Caller, id: i64) -> CoreResult<ExerciseDetail> {
        queries::get_exercise_detail_for_user(self.db.pool(), &caller.user_id, id)
            .await?
            .ok_or_else(|| CoreError::not_found("exercise", id))
    }

    /// Create an exercise in one of the caller's sessions.
    pub async fn create(&self, caller: &Caller, input: ExerciseInput) -> CoreResult<ExerciseDetail> {
        self.validate(caller, &input).await?;

        let new = NewExercise {
            session_id: input.session_id,
            exercise_type_id: input.exercise_type_id,
            name: input.name,
            description: input.description,
            duration_seconds: input.duration_seconds,
            reps: input.reps,
            set_count: input.set_count,
            load_kg: input.load_kg,
        };
        let id = queries::create_exercise(self.db.pool(), &new).await?;
        info!(exercise_id = id, session_id = new.session_id, "exercise created");
        self.get(caller, id).await
    }

    /// Update one of the caller's exercises.
    ///
    /// Re-verifies ownership of the stored row's session AND of the new
    /// target session, then applies a versioned write.
    pub async fn update(
        &self,
        caller: &Caller,
        id: i64,
        input: ExerciseInput,
    ) -> CoreResult<ExerciseDetail> {
        let existing = queries::get_exercise_for_user(self.db.pool(), &caller.user_id, id)
            .await?
            .ok_or_else(|| CoreError::not_found("exercise", id))?;

        self.validate(caller, &input).await?;

        let changed = Exercise {
            id,
            session_id: input.session_id,
            exercise_type_id: input.exercise_type_id,
            name: input.name,
            description: input.description,
            duration_seconds: input.duration_seconds,
            reps: input.reps,
            set_count: input.set_count,
            load_kg: input.load_kg,
            version: existing.version,
        };
        let updated =
            queries::update_exercise_owned(self.db.pool(), &caller.user_id, &changed).await?;

        if !updated {
            return match queries::get_exercise_for_user(self.db.pool(), &caller.user_id, id).await?
            {
                None => Err(CoreError::not_found("exercise", id)),
                Some(_) => {
                    warn!(exercise_id = id, "stale exercise update rejected");
                    Err(CoreError::conflict("exercise", id))
                }
            };
        }

        self.get(caller, id).await
    }

    /// Delete one of the caller's exercises.
    pub async fn delete(&self, caller: &Caller, id: i64) -> CoreResult<()> {
        let deleted =
            queries::delete_exercise_for_user(self.db.pool(), &caller.user_id, id).await?;
        if !deleted {
            return Err(CoreError::not_found("exercise", id));
        }
        info!(exercise_id = id, user = %caller.user_id, "exercise deleted");
        Ok(())
    }

    /// Selection lists for the type and session pickers.
    pub async fn pick_lists(&self, caller: &Caller) -> CoreResult<PickLists> {
        let types = queries::list_exercise_types(self.db.pool()).await?;
        let sessions = queries::list_sessions_for_user(self.db.pool(), &caller.user_id).await?;
        Ok(PickLists { types, sessions })
    }

    async fn validate(&self, caller: &Caller, input: &ExerciseInput) -> CoreResult<()> {
        let mut v = Validator::new();
        v.require_text("name", &input.name, NAME_MAX);
        v.optional_text("description", input.description.as_deref(), DESCRIPTION_MAX);
        v.range_i64("duration_seconds", input.duration_seconds, 0, DURATION_MAX_SECONDS);
        v.range_i64("reps", input.reps, 0, REPS_MAX);
        v.range_i64("set_count", input.set_count, 1, SET_COUNT_MAX);
        v.optional_range_f64("load_kg", input.load_kg, 0.0, LOAD_MAX_KG);
        v.selected("exercise_type_id", input.exercise_type_id);
        v.selected("session_id", input.session_id);

        if input.exercise_type_id > 0
            && queries::get_exercise_type(self.db.pool(), input.exercise_type_id)
                .await?
                .is_none()
        {
            v.fail("exercise_type_id", "selected type does not exist");
        }

        if input.session_id > 0
            && !self
                .guard
                .owns_session(&caller.user_id, input.session_id)
                .await?
        {
            v.fail("session_id", "selected session does not belong to you");
        }

        v.finish()
    }
}
