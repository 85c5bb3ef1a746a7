//! Per-type statistics over a trailing window.

use befit_db::{queries, BefitDb, TypeUsage};
use chrono::{Duration, NaiveTime, Utc};

use crate::error::CoreResult;
use crate::identity::Caller;

/// Default trailing window, in days.
pub const DEFAULT_WINDOW_DAYS: i64 = 28;

/// Aggregates the caller's exercise history by catalog type.
#[derive(Debug, Clone)]
pub struct StatsService {
    db: BefitDb,
}

impl StatsService {
    pub fn new(db: BefitDb) -> Self {
        Self { db }
    }

    /// Roll up the caller's exercises by type over the trailing window.
    ///
    /// The window covers sessions started on or after midnight UTC of
    /// `today - window_days`, inclusive. Every catalog type comes back
    /// exactly once, zero-filled when the caller logged nothing for it.
    pub async fn summarize(
        &self,
        caller: &Caller,
        window_days: Option<i64>,
    ) -> CoreResult<Vec<TypeUsage>> {
        let window_days = window_days.unwrap_or(DEFAULT_WINDOW_DAYS);
        let start_day = Utc::now().date_naive() - Duration::days(window_days);
        let since = start_day.and_time(NaiveTime::MIN).and_utc();

        Ok(queries::type_usage_for_user(self.db.pool(), &caller.user_id, since).await?)
    }
}
