//! Crate error type.

use crate::validation::{ValidationError, ValidationErrorKind};

/// Errors surfaced by an optimization run.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    /// Structurally invalid input; raised before any population work.
    #[error("InvalidConfiguration: {}", join_messages(.0))]
    InvalidConfiguration(Vec<ValidationError>),
    /// Unexpected failure while scoring a roster. Aborts the whole run.
    #[error("ComputationError: {0}")]
    Computation(String),
    /// The run was cancelled before its first generation completed.
    #[error("Cancelled before generation {generation} completed")]
    Cancelled { generation: usize },
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl RosterError {
    /// Wraps a single validation failure.
    pub fn invalid(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(vec![ValidationError::new(kind, message)])
    }

    /// HTTP status a transport adapter should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidConfiguration(_) => 400,
            Self::Computation(_) => 500,
            Self::Cancelled { .. } => 503,
        }
    }
}

impl From<Vec<ValidationError>> for RosterError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::InvalidConfiguration(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_validation_messages() {
        let err = RosterError::InvalidConfiguration(vec![
            ValidationError::new(
                ValidationErrorKind::NonPositiveDays,
                "days must be positive, got 0",
            ),
            ValidationError::new(
                ValidationErrorKind::EmptyShifts,
                "at least one shift is required",
            ),
        ]);
        assert_eq!(
            err.to_string(),
            "InvalidConfiguration: days must be positive, got 0; at least one shift is required"
        );
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(RosterError::Computation("nan".into()).status_code(), 500);
        assert_eq!(RosterError::Cancelled { generation: 0 }.status_code(), 503);
    }
}
