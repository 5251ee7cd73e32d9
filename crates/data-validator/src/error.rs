//! Validation Error Types

use thiserror::Error;

/// Errors during input validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Field not present in the catalogue
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Value of the wrong shape for the field
    #[error("{field} expects {expected}, got {actual}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    /// Value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Category label not in the field's label list
    #[error("{field} has no category {label:?}")]
    UnknownLabel { field: &'static str, label: String },

    /// Encoded category index outside the label list
    #[error("{field} index {index} is outside [0, {max}]")]
    IndexOutOfRange {
        field: &'static str,
        index: f64,
        max: usize,
    },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &str {
        match self {
            ValidationError::UnknownField(field) => field.as_str(),
            ValidationError::MissingField(field)
            | ValidationError::TypeMismatch { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::UnknownLabel { field, .. }
            | ValidationError::IndexOutOfRange { field, .. } => *field,
        }
    }

    /// Stable machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::MissingField(_) => "missing_field",
            ValidationError::UnknownField(_) => "unknown_field",
            ValidationError::TypeMismatch { .. } => "type_mismatch",
            ValidationError::OutOfRange { .. } => "out_of_range",
            ValidationError::UnknownLabel { .. } => "unknown_label",
            ValidationError::IndexOutOfRange { .. } => "index_out_of_range",
        }
    }
}
