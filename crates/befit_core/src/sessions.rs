//! Workout session service.
//!
//! Sessions are the ownership root: every row is bound to the user who
//! created it, and the owner column is force-set from the caller on every
//! write, never taken from the payload.

use befit_db::{queries, BefitDb, NewSession, Session};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::error::{CoreError, CoreResult};
use crate::identity::Caller;
use crate::validate::Validator;

pub const TITLE_MAX: usize = 150;
pub const DESCRIPTION_MAX: usize = 1000;

/// Input payload for creating or updating a session.
///
/// `started_at: None` means "default it": current time on create, the
/// stored value on update.
#[derive(Debug, Clone, Default)]
pub struct SessionInput {
    pub title: String,
    pub description: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
}

/// Owner-scoped CRUD over workout sessions.
#[derive(Debug, Clone)]
pub struct SessionService {
    db: BefitDb,
}

impl SessionService {
    pub fn new(db: BefitDb) -> Self {
        Self { db }
    }

    /// List the caller's sessions, most recently started first.
    pub async fn list(&self, caller: &Caller) -> CoreResult<Vec<Session>> {
        Ok(queries::list_sessions_for_user(self.db.pool(), &caller.user_id).await?)
    }

    /// Fetch one of the caller's sessions.
    pub async fn get(&self, caller: &Caller, id: i64) -> CoreResult<Session> {
        queries::get_session_for_user(self.db.pool(), &caller.user_id, id)
            .await?
            .ok_or_else(|| CoreError::not_found("session", id))
    }

    /// Create a session owned by the caller.
    pub async fn create(&self, caller: &Caller, input: SessionInput) -> CoreResult<Session> {
        let started_at = input.started_at.unwrap_or_else(Utc::now);
        validate(&input, started_at)?;

        let new = NewSession {
            user_id: caller.user_id.clone(),
            title: input.title,
            description: input.description,
            started_at,
            ended_at: input.ended_at,
        };
        let id = queries::create_session(self.db.pool(), &new).await?;
        info!(session_id = id, user = %caller.user_id, "session created");
        self.get(caller, id).await
    }

    /// Update one of the caller's sessions.
    ///
    /// Ownership is re-verified against the stored row, and an unset start
    /// date keeps the stored value instead of being overwritten.
    pub async fn update(
        &self,
        caller: &Caller,
        id: i64,
        input: SessionInput,
    ) -> CoreResult<Session> {
        let existing = self.get(caller, id).await?;

        let started_at = input.started_at.unwrap_or(existing.started_at);
        validate(&input, started_at)?;

        let updated = queries::update_session_owned(
            self.db.pool(),
            &caller.user_id,
            id,
            &input.title,
            input.description.as_deref(),
            started_at,
            input.ended_at,
            existing.version,
        )
        .await?;

        if !updated {
            // Zero rows: deleted, re-owned, or versioned past us meanwhile.
            return match queries::get_session_for_user(self.db.pool(), &caller.user_id, id).await?
            {
                None => Err(CoreError::not_found("session", id)),
                Some(_) => {
                    warn!(session_id = id, "stale session update rejected");
                    Err(CoreError::conflict("session", id))
                }
            };
        }

        self.get(caller, id).await
    }

    /// Delete one of the caller's sessions and, atomically, every exercise
    /// logged under it.
    pub async fn delete(&self, caller: &Caller, id: i64) -> CoreResult<()> {
        let deleted = queries::delete_session_cascade(self.db.pool(), &caller.user_id, id).await?;
        if !deleted {
            return Err(CoreError::not_found("session", id));
        }
        info!(session_id = id, user = %caller.user_id, "session deleted");
        Ok(())
    }
}

fn validate(input: &SessionInput, started_at: DateTime<Utc>) -> CoreResult<()> {
    let mut v = Validator::new();
    v.require_text("title", &input.title, TITLE_MAX);
    v.optional_text("description", input.description.as_deref(), DESCRIPTION_MAX);
    if let Some(ended_at) = input.ended_at {
        if ended_at < started_at {
            v.fail("ended_at", "cannot be earlier than the start date");
        }
    }
    v.finish()
}
