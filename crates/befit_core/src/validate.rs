//! Field-level input validation.
//!
//! Services collect every failing field before rejecting, so a caller can
//! fix a whole form in one round trip.

use crate::error::{CoreError, CoreResult, FieldError};

/// Accumulates field errors across a validation pass.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Required text field with a maximum length.
    pub fn require_text(&mut self, field: &'static str, value: &str, max_len: usize) {
        if value.trim().is_empty() {
            self.errors.push(FieldError::new(field, "is required"));
        } else if value.chars().count() > max_len {
            self.errors.push(FieldError::new(
                field,
                format!("must be at most {max_len} characters"),
            ));
        }
    }

    /// Optional text field with a maximum length.
    pub fn optional_text(&mut self, field: &'static str, value: Option<&str>, max_len: usize) {
        if let Some(value) = value {
            if value.chars().count() > max_len {
                self.errors.push(FieldError::new(
                    field,
                    format!("must be at most {max_len} characters"),
                ));
            }
        }
    }

    /// Integer field constrained to an inclusive range.
    pub fn range_i64(&mut self, field: &'static str, value: i64, min: i64, max: i64) {
        if value < min || value > max {
            self.errors.push(FieldError::new(
                field,
                format!("must be between {min} and {max}"),
            ));
        }
    }

    /// Optional float field constrained to an inclusive range.
    pub fn optional_range_f64(
        &mut self,
        field: &'static str,
        value: Option<f64>,
        min: f64,
        max: f64,
    ) {
        if let Some(value) = value {
            if !(min..=max).contains(&value) {
                self.errors.push(FieldError::new(
                    field,
                    format!("must be between {min} and {max}"),
                ));
            }
        }
    }

    /// Foreign-key picker: zero means nothing was selected.
    pub fn selected(&mut self, field: &'static str, id: i64) {
        if id <= 0 {
            self.errors.push(FieldError::new(field, "must be selected"));
        }
    }

    /// Push an arbitrary failure (cross-field or externally checked rules).
    pub fn fail(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Finish the pass: `Ok(())` when clean, the collected errors otherwise.
    pub fn finish(self) -> CoreResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(self.errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_all_failures() {
        let mut v = Validator::new();
        v.require_text("title", "", 150);
        v.range_i64("reps", -1, 0, 10000);
        v.selected("session_id", 0);

        let err = v.finish().unwrap_err();
        match err {
            CoreError::Validation(errors) => {
                let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
                assert_eq!(fields, ["title", "reps", "session_id"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_length_counted_in_chars() {
        let mut v = Validator::new();
        v.require_text("name", &"ł".repeat(100), 100);
        assert!(v.finish().is_ok());
    }

    #[test]
    fn test_optional_fields_skip_none() {
        let mut v = Validator::new();
        v.optional_text("description", None, 10);
        v.optional_range_f64("load_kg", None, 0.0, 10000.0);
        assert!(v.finish().is_ok());
    }
}
