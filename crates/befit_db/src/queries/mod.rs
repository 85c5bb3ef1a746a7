//! Database query functions.
//!
//! Organized by domain:
//! - `exercise_type`: admin-managed catalog CRUD
//! - `session`: owner-scoped workout session CRUD
//! - `exercise`: exercise CRUD, ownership transitive through the session
//! - `stats`: per-type aggregation over a user's exercise history

mod exercise;
mod exercise_type;
mod session;
mod stats;

pub use exercise::*;
pub use exercise_type::*;
pub use session::*;
pub use stats::*;
