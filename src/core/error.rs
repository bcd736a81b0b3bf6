//! # Form Errors
//!
//! One error type for building, editing and driving a form.

use std::fmt;

use crate::core::value::ExpectedType;

/// Errors raised while building or editing a form.
///
/// `Configuration` is fatal and only happens before a session starts.
/// `TypeCoercion` and `AttributeWrite` are recovered inside the session:
/// the edit is discarded and the user is told why.
#[derive(Debug)]
pub enum FormError {
    /// Malformed entry or form definition.
    Configuration(String),
    /// Edit text does not parse as the entry's expected type.
    TypeCoercion {
        field: String,
        expected: ExpectedType,
        raw: String,
    },
    /// A bound commit could not be written to its target.
    AttributeWrite { field: String, reason: String },
    /// The input or render collaborator failed.
    Io(std::io::Error),
}

impl FormError {
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FormError::TypeCoercion { .. } | FormError::AttributeWrite { .. }
        )
    }
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::Configuration(msg) => write!(f, "configuration error: {msg}"),
            FormError::TypeCoercion {
                field,
                expected,
                raw,
            } => write!(f, "'{raw}' is not a valid {expected} for {field}"),
            FormError::AttributeWrite { field, reason } => {
                write!(f, "could not write {field}: {reason}")
            }
            FormError::Io(e) => write!(f, "terminal I/O error: {e}"),
        }
    }
}

impl std::error::Error for FormError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FormError {
    fn from(e: std::io::Error) -> Self {
        FormError::Io(e)
    }
}
