//! Input validation for rostering problems.
//!
//! Checks structural integrity of the horizon, shifts, and employees
//! before any population work. Detects:
//! - Non-positive horizon length
//! - A `days × shifts` grid larger than [`MAX_ROSTER_CELLS`]
//! - Empty shift list
//! - Demand that no employee could ever fill (empty employee list)
//! - Duplicate shift names and duplicate employee ids
//!
//! Everything else (rule values, GA parameters, demand entries for unknown
//! shifts) is defaulted or tolerated rather than rejected.

use std::collections::HashSet;
use std::fmt;

use crate::models::DemandProfile;

/// Largest `days × shifts` grid accepted for one run.
pub const MAX_ROSTER_CELLS: u64 = 100_000;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The horizon has zero or negative length.
    NonPositiveDays,
    /// The `days × shifts` grid exceeds [`MAX_ROSTER_CELLS`].
    HorizonTooLarge,
    /// No shifts were configured.
    EmptyShifts,
    /// Demand is non-zero but there are no employees.
    NoEmployees,
    /// Two shifts or two employees share the same identifier.
    DuplicateId,
    /// The request body could not be parsed at all.
    MalformedRequest,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates the structural inputs of a rostering problem.
///
/// Checks:
/// 1. `days > 0`
/// 2. At least one shift
/// 3. `days × shifts` within [`MAX_ROSTER_CELLS`]
/// 4. No duplicate shift names
/// 5. No duplicate employee ids
/// 6. At least one employee when any configured shift has demand
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input<S: AsRef<str>, E: AsRef<str>>(
    days: i64,
    shifts: &[S],
    employees: &[E],
    demand: &DemandProfile,
) -> ValidationResult {
    let mut errors = Vec::new();

    if days <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveDays,
            format!("days must be positive, got {days}"),
        ));
    }

    if shifts.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyShifts,
            "at least one shift is required",
        ));
    }

    if days > 0 {
        let cells = (days as u64).checked_mul(shifts.len().max(1) as u64);
        if cells.map_or(true, |c| c > MAX_ROSTER_CELLS) {
            errors.push(ValidationError::new(
                ValidationErrorKind::HorizonTooLarge,
                format!(
                    "{days} days x {} shifts exceeds the limit of {MAX_ROSTER_CELLS} roster cells",
                    shifts.len()
                ),
            ));
        }
    }

    let mut shift_names = HashSet::new();
    for s in shifts {
        if !shift_names.insert(s.as_ref()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate shift name: {}", s.as_ref()),
            ));
        }
    }

    let mut employee_ids = HashSet::new();
    for e in employees {
        if !employee_ids.insert(e.as_ref()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate employee id: {}", e.as_ref()),
            ));
        }
    }

    let total_demand: u64 = demand
        .for_shifts(shifts)
        .into_iter()
        .map(u64::from)
        .sum();
    if employees.is_empty() && total_demand > 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoEmployees,
            format!("demand of {total_demand} per day cannot be staffed without employees"),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_demand() -> DemandProfile {
        DemandProfile::new().with("Pagi", 2).with("Malam", 1)
    }

    #[test]
    fn test_valid_input() {
        let shifts = ["Pagi", "Siang", "Malam"];
        let employees = ["A", "B", "C"];
        assert!(validate_input(7, &shifts, &employees, &sample_demand()).is_ok());
    }

    #[test]
    fn test_non_positive_days() {
        for days in [0, -3] {
            let errors = validate_input(days, &["Pagi"], &["A"], &sample_demand()).unwrap_err();
            assert!(errors
                .iter()
                .any(|e| e.kind == ValidationErrorKind::NonPositiveDays));
        }
    }

    #[test]
    fn test_horizon_too_large() {
        let shifts = ["Pagi", "Siang", "Malam"];
        for days in [9_000_000_000_000_000_000, i64::MAX, 40_000] {
            let errors = validate_input(days, &shifts, &["A"], &sample_demand()).unwrap_err();
            assert!(errors
                .iter()
                .any(|e| e.kind == ValidationErrorKind::HorizonTooLarge));
        }
        // Exactly at the limit is still accepted.
        let days = (MAX_ROSTER_CELLS / 4) as i64;
        assert!(validate_input(days, &["P", "S", "M", "N"], &["A"], &sample_demand()).is_ok());
    }

    #[test]
    fn test_empty_shifts() {
        let shifts: [&str; 0] = [];
        let errors = validate_input(7, &shifts, &["A"], &sample_demand()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyShifts));
    }

    #[test]
    fn test_no_employees_with_demand() {
        let employees: [&str; 0] = [];
        let errors = validate_input(7, &["Pagi"], &employees, &sample_demand()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NoEmployees));
    }

    #[test]
    fn test_no_employees_without_demand_is_fine() {
        let employees: [&str; 0] = [];
        // Demand only for a shift that is not configured.
        assert!(validate_input(7, &["Siang"], &employees, &sample_demand()).is_ok());
    }

    #[test]
    fn test_duplicate_ids() {
        let errors =
            validate_input(7, &["Pagi", "Pagi"], &["A", "B", "A"], &sample_demand()).unwrap_err();
        let dupes: Vec<_> = errors
            .iter()
            .filter(|e| e.kind == ValidationErrorKind::DuplicateId)
            .collect();
        assert_eq!(dupes.len(), 2);
        assert!(dupes.iter().any(|e| e.message.contains("shift")));
        assert!(dupes.iter().any(|e| e.message.contains("employee")));
    }

    #[test]
    fn test_multiple_errors() {
        let shifts: [&str; 0] = [];
        let employees: [&str; 0] = [];
        let errors = validate_input(0, &shifts, &employees, &sample_demand()).unwrap_err();
        assert!(errors.len() >= 2);
    }
}
