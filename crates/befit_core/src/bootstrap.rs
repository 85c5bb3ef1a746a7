//! Idempotent startup seeding.
//!
//! Ensures the two built-in roles, a seed administrator account, and a
//! default exercise-type catalog. Safe to run on every startup. Failures
//! come back as errors so the embedder can decide; the documented contract
//! is log-and-continue (an incomplete seed must not stop request serving).

use befit_db::{queries, BefitDb, NewExerciseType};
use tracing::{info, warn};

use crate::config::BootstrapConfig;
use crate::error::CoreResult;
use crate::identity::{IdentityProvider, ROLE_ADMINISTRATOR, ROLE_USER};

/// Default catalog seeded into an empty database.
const DEFAULT_EXERCISE_TYPES: [(&str, &str); 3] = [
    ("Cardio", "Running, cycling, rowing"),
    ("Strength", "Weight and resistance training"),
    ("Mobility", "Stretching and mobility work"),
];

/// What the bootstrap pass actually changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub roles_created: Vec<String>,
    pub admin_created: bool,
    pub types_seeded: usize,
}

/// Ensure roles, the seed administrator, and the default catalog exist.
pub async fn ensure_defaults(
    db: &BefitDb,
    identity: &dyn IdentityProvider,
    config: &BootstrapConfig,
) -> CoreResult<BootstrapReport> {
    let mut report = BootstrapReport::default();

    for role in [ROLE_ADMINISTRATOR, ROLE_USER] {
        if !identity.role_exists(role).await? {
            identity.create_role(role).await?;
            report.roles_created.push(role.to_string());
        }
    }

    let admin = identity.find_user_by_email(&config.admin_email).await?;
    if admin.is_none() {
        let admin = identity
            .create_user(&config.admin_email, &config.admin_email)
            .await?;
        identity.add_role(&admin.id, ROLE_ADMINISTRATOR).await?;
        report.admin_created = true;
        info!(admin = %config.admin_email, "seed administrator created");
    }

    if config.seed_catalog {
        let existing = queries::list_exercise_types(db.pool()).await?;
        if existing.is_empty() {
            for (name, description) in DEFAULT_EXERCISE_TYPES {
                let new = NewExerciseType {
                    name: name.to_string(),
                    description: Some(description.to_string()),
                };
                queries::create_exercise_type(db.pool(), &new).await?;
            }
            report.types_seeded = DEFAULT_EXERCISE_TYPES.len();
            info!(count = report.types_seeded, "default exercise types seeded");
        }
    }

    if report == BootstrapReport::default() {
        info!("bootstrap: nothing to do");
    } else {
        let stats = db.stats().await?;
        info!(
            types = stats.exercise_type_count,
            sessions = stats.session_count,
            exercises = stats.exercise_count,
            "bootstrap complete"
        );
    }

    Ok(report)
}

/// Run [`ensure_defaults`] and log instead of failing.
///
/// This matches the startup contract: an incomplete seed is reported
/// loudly but does not prevent the process from serving requests.
pub async fn ensure_defaults_logged(
    db: &BefitDb,
    identity: &dyn IdentityProvider,
    config: &BootstrapConfig,
) -> Option<BootstrapReport> {
    match ensure_defaults(db, identity, config).await {
        Ok(report) => Some(report),
        Err(e) => {
            warn!("bootstrap seeding incomplete: {e}");
            None
        }
    }
}
