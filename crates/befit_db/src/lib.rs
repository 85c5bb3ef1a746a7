//! BeFit Database Layer
//!
//! SQLite-based storage for the fitness tracker.
//!
//! # Architecture
//!
//! - **One shared database** - catalog, sessions, and exercises in one file
//! - **Owner-scoped queries** - `user_id` filters are part of every WHERE
//!   clause, so foreign rows look absent rather than forbidden
//! - **Version columns** - optimistic-concurrency tokens on every table
//!
//! # Usage
//!
//! ```rust,ignore
//! use befit_db::BefitDb;
//!
//! let db = BefitDb::open("path/to/befit.db").await?;
//! ```

pub mod connection;
pub mod error;
pub mod models;
pub mod queries;

pub use connection::{BefitDb, DbStats};
pub use error::{DbError, DbResult};

// Re-export key model types for convenience
pub use models::{
    Exercise, ExerciseDetail, ExerciseType, NewExercise, NewExerciseType, NewSession, Session,
};

// Re-export the aggregation projection
pub use queries::TypeUsage;
