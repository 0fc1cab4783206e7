//! Rostering GA problem definition.
//!
//! Bridges the caller's named inputs (shift names, employee ids, demand
//! map, rules) to the index-based representation the GA works on. All
//! lookups that would otherwise repeat per evaluation (demand per column,
//! night/morning columns, rotation targets) are resolved here once.

use tracing::debug;

use crate::error::RosterError;
use crate::models::{ClosureCalendar, DemandProfile, EmployeeId, RosterMode, RuleConfig};
use crate::validation::validate_input;

use super::RotationPolicy;

/// Run-scoped, immutable description of one rostering problem.
#[derive(Debug, Clone)]
pub struct RosterProblem {
    days: usize,
    shifts: Vec<String>,
    employees: Vec<String>,
    demand: Vec<u32>,
    rules: RuleConfig,
    rotation: RotationPolicy,
    night_shift: Option<usize>,
    morning_shift: Option<usize>,
}

impl RosterProblem {
    /// Validates the inputs and resolves them into a problem.
    ///
    /// # Errors
    /// [`RosterError::InvalidConfiguration`] when `days <= 0`, `shifts` is
    /// empty or has duplicates, `employees` has duplicates, or demand is
    /// non-zero with no employees.
    pub fn new(
        days: i64,
        shifts: Vec<String>,
        employees: Vec<String>,
        demand: &DemandProfile,
        rules: RuleConfig,
    ) -> Result<Self, RosterError> {
        validate_input(days, &shifts, &employees, demand)?;

        let demand = demand.for_shifts(&shifts);
        let rotation = RotationPolicy::new(&rules.rotation_order, &shifts);
        let night_shift = resolve_role(&shifts, rules.night_shift_name.as_deref(), "night");
        let morning_shift = resolve_role(&shifts, rules.morning_shift_name.as_deref(), "morning");

        Ok(Self {
            days: days as usize,
            shifts,
            employees,
            demand,
            rules,
            rotation,
            night_shift,
            morning_shift,
        })
    }

    /// Number of days in the horizon.
    #[inline]
    pub fn days(&self) -> usize {
        self.days
    }

    /// Shift names in column order.
    pub fn shifts(&self) -> &[String] {
        &self.shifts
    }

    /// Number of shift columns.
    #[inline]
    pub fn shift_count(&self) -> usize {
        self.shifts.len()
    }

    /// Employee ids in table order.
    pub fn employees(&self) -> &[String] {
        &self.employees
    }

    /// Number of employees.
    #[inline]
    pub fn employee_count(&self) -> usize {
        self.employees.len()
    }

    /// All employee indices, in table order.
    pub fn employee_ids(&self) -> Vec<EmployeeId> {
        (0..self.employees.len()).map(EmployeeId).collect()
    }

    /// Required headcount of a shift column.
    #[inline]
    pub fn demand(&self, shift: usize) -> u32 {
        self.demand[shift]
    }

    /// Rules of this run.
    pub fn rules(&self) -> &RuleConfig {
        &self.rules
    }

    /// Closure calendar of this run.
    #[inline]
    pub fn calendar(&self) -> &ClosureCalendar {
        &self.rules.calendar
    }

    /// Whether rotation mode is active.
    #[inline]
    pub fn is_rotation(&self) -> bool {
        self.rules.mode == RosterMode::Rotation
    }

    /// Rotation policy (resolved even in normal mode).
    pub fn rotation(&self) -> &RotationPolicy {
        &self.rotation
    }

    /// Column playing the night role, if any.
    #[inline]
    pub fn night_shift(&self) -> Option<usize> {
        self.night_shift
    }

    /// Column playing the morning role, if any.
    #[inline]
    pub fn morning_shift(&self) -> Option<usize> {
        self.morning_shift
    }
}

fn resolve_role(shifts: &[String], label: Option<&str>, role: &str) -> Option<usize> {
    let label = label?;
    let column = shifts.iter().position(|s| s == label);
    if column.is_none() {
        debug!(
            role,
            label,
            "shift role label matches no configured shift; rules using it are disabled"
        );
    }
    column
}
