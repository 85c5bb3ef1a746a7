//! BeFit Domain Core
//!
//! Authorization and aggregation logic for the fitness tracker, sitting on
//! top of [`befit_db`].
//!
//! # Architecture
//!
//! - **Explicit caller identity** - every service call takes a [`Caller`];
//!   nothing reads identity out of ambient state
//! - **Ownership at the query boundary** - sessions belong to one user,
//!   exercises belong to their session's owner, and foreign rows surface
//!   as NotFound rather than Forbidden
//! - **Optimistic concurrency** - stale writes are rejected and classified
//!   as NotFound (row gone) or Conflict (row changed, retry)
//!
//! The identity provider is an external collaborator behind the
//! [`IdentityProvider`] trait; [`InMemoryIdentity`] ships for tests and
//! embedding demos.

pub mod bootstrap;
pub mod catalog;
pub mod config;
pub mod error;
pub mod exercises;
pub mod guard;
pub mod identity;
pub mod roles;
pub mod sessions;
pub mod stats;
pub mod validate;

pub use error::{CoreError, CoreResult, FieldError};
pub use guard::OwnershipGuard;
pub use identity::{
    Caller, IdentityError, IdentityProvider, InMemoryIdentity, UserAccount, ROLE_ADMINISTRATOR,
    ROLE_USER,
};

pub use bootstrap::{ensure_defaults, ensure_defaults_logged, BootstrapReport};
pub use catalog::{CatalogInput, CatalogService};
pub use config::{BefitConfig, BootstrapConfig, ConfigError, DatabaseConfig};
pub use exercises::{ExerciseInput, ExerciseService, PickLists};
pub use roles::{RoleAdminService, RoleAssignment, RoleCheckbox, UserWithRoles};
pub use sessions::{SessionInput, SessionService};
pub use stats::{StatsService, DEFAULT_WINDOW_DAYS};

// Re-export the persistence layer for embedders.
pub use befit_db::{self as db, BefitDb};
