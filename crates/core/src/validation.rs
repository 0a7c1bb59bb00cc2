//! Turning field-level validation failures into a [`CoreError`].

use validator::ValidationErrors;

use crate::error::CoreError;

/// A single failing input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Flatten `validator` output into field errors, sorted by field name.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                FieldError::new(field.to_string(), message)
            })
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

/// Build a validation error naming every failing field.
///
/// Produces e.g. `Invalid fields: author (may not be blank); body (may not be blank)`.
pub fn invalid_fields(errors: &[FieldError]) -> CoreError {
    let detail = errors
        .iter()
        .map(|e| format!("{} ({})", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");
    CoreError::Validation(format!("Invalid fields: {detail}"))
}
