//! Error taxonomy for the domain services.
//!
//! The split follows the authorization rules: ownership failures surface as
//! `NotFound` (deliberately indistinguishable from absence, so callers
//! cannot probe for other users' data), role failures as `Forbidden`, and
//! stale writes as `Conflict`. Raw store errors are wrapped and logged
//! server-side; their text is never meant for untrusted callers.

use befit_db::DbError;
use miette::Diagnostic;
use thiserror::Error;

use crate::identity::IdentityError;

/// Result type alias for service operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The input field the message applies to
    pub field: &'static str,
    /// Human-readable reason, suitable for display next to the field
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Service error types.
#[derive(Debug, Error, Diagnostic)]
pub enum CoreError {
    /// One or more input fields failed validation; correct and resubmit.
    #[error("Validation failed: {}", format_field_errors(.0))]
    #[diagnostic(code(befit_core::validation))]
    Validation(Vec<FieldError>),

    /// Entity absent, or the caller does not own it.
    #[error("{entity} not found: {id}")]
    #[diagnostic(code(befit_core::not_found))]
    NotFound { entity: &'static str, id: String },

    /// Caller lacks the required role.
    #[error("Forbidden: {reason}")]
    #[diagnostic(code(befit_core::forbidden))]
    Forbidden { reason: &'static str },

    /// Another writer changed the row between read and write.
    #[error("{entity} {id} was modified concurrently")]
    #[diagnostic(
        code(befit_core::conflict),
        help("Reload the entity and retry the change")
    )]
    Conflict { entity: &'static str, id: String },

    /// Duplicate entity (currently only role names).
    #[error("{entity} already exists: {name}")]
    #[diagnostic(code(befit_core::already_exists))]
    AlreadyExists { entity: &'static str, name: String },

    /// Underlying persistence failure. Logged in full; surfaced generically.
    #[error("Storage failure")]
    #[diagnostic(
        code(befit_core::store),
        help("The operation may succeed on retry; details are in the server log")
    )]
    Store(#[source] DbError),

    /// Identity-provider failure.
    #[error("Identity provider failure")]
    #[diagnostic(code(befit_core::identity))]
    Identity(#[source] IdentityError),
}

impl CoreError {
    /// Create a not-found error.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Create a concurrency-conflict error.
    pub fn conflict(entity: &'static str, id: impl ToString) -> Self {
        Self::Conflict {
            entity,
            id: id.to_string(),
        }
    }

    /// Create a validation error for a single field.
    pub fn field(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation(vec![FieldError::new(field, message)])
    }
}

impl From<DbError> for CoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity_type, id } => CoreError::NotFound {
                entity: entity_type,
                id,
            },
            DbError::AlreadyExists { entity_type, id } => CoreError::AlreadyExists {
                entity: entity_type,
                name: id,
            },
            other => CoreError::Store(other),
        }
    }
}

impl From<IdentityError> for CoreError {
    fn from(err: IdentityError) -> Self {
        CoreError::Identity(err)
    }
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
