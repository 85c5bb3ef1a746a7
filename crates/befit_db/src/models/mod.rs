//! Database models.
//!
//! These structs map directly to database tables via sqlx.

mod exercise;
mod exercise_type;
mod session;

pub use exercise::{Exercise, ExerciseDetail, NewExercise};
pub use exercise_type::{ExerciseType, NewExerciseType};
pub use session::{NewSession, Session};
