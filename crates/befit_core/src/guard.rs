//! Session-ownership checks.
//!
//! Every session and exercise mutation consults this guard before touching
//! input. It is read-only: the authoritative enforcement still happens in
//! the owner-scoped WHERE clauses at write time.

use befit_db::{queries, BefitDb, Session};

use crate::error::{CoreError, CoreResult};

/// Decides whether a user may act on a session (and, transitively, on the
/// exercises under it).
#[derive(Debug, Clone)]
pub struct OwnershipGuard {
    db: BefitDb,
}

impl OwnershipGuard {
    pub fn new(db: BefitDb) -> Self {
        Self { db }
    }

    /// True iff the session exists and belongs to the user.
    pub async fn owns_session(&self, user_id: &str, session_id: i64) -> CoreResult<bool> {
        Ok(queries::session_owned_by(self.db.pool(), user_id, session_id).await?)
    }

    /// Fetch a session the user owns; absence and foreign ownership both
    /// come back as NotFound.
    pub async fn resolve_owned_session(
        &self,
        user_id: &str,
        session_id: i64,
    ) -> CoreResult<Session> {
        queries::get_session_for_user(self.db.pool(), user_id, session_id)
            .await?
            .ok_or_else(|| CoreError::not_found("session", session_id))
    }
}
