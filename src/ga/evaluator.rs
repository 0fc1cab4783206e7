//! Constraint-penalty evaluation.
//!
//! Scores a roster against its problem. Lower penalty is better;
//! `fitness = 1 / (1 + penalty)` maps it into `(0, 1]`.
//!
//! # Penalty Terms
//!
//! | Term | Weight |
//! |------|--------|
//! | Missing headcount per shift | 10 per person |
//! | Extra headcount per shift | 2 per person |
//! | Off-rotation assignment (rotation mode) | `rotation_strictness` |
//! | Same-day double shift | 50 per extra shift |
//! | Night followed by next morning | 30 per employee |
//! | Weekly shift / night cap exceeded | 15 per unit |
//! | Workload variance | 1.5 × population variance |
//!
//! Closed days are never read, so an unstamped roster scores the same as
//! its stamped copy and the roster itself is never touched.

use serde::{Deserialize, Serialize};

use crate::error::RosterError;
use crate::models::{ClosureCalendar, Roster};

use super::RosterProblem;

/// Penalty per missing person on a shift.
pub const SHORTFALL_WEIGHT: f64 = 10.0;
/// Penalty per surplus person on a shift.
pub const SURPLUS_WEIGHT: f64 = 2.0;
/// Penalty per extra shift worked on the same day.
pub const DOUBLE_SHIFT_WEIGHT: f64 = 50.0;
/// Penalty per night shift followed by the next day's morning shift.
pub const NIGHT_TO_MORNING_WEIGHT: f64 = 30.0;
/// Penalty per unit above a weekly cap.
pub const WEEKLY_LIMIT_WEIGHT: f64 = 15.0;
/// Multiplier on workload variance.
pub const FAIRNESS_WEIGHT: f64 = 1.5;

/// Per-employee workload counts, indexed like the employee table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationStats {
    /// Shifts worked over the horizon.
    pub total_shifts: Vec<u32>,
    /// Night shifts worked over the horizon.
    pub night_shifts: Vec<u32>,
    /// Population variance of `total_shifts`.
    pub variance: f64,
}

/// Penalty split by rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PenaltyBreakdown {
    pub demand: f64,
    pub rotation: f64,
    pub double_shift: f64,
    pub night_to_morning: f64,
    pub weekly_limits: f64,
    pub fairness: f64,
}

impl PenaltyBreakdown {
    /// Sum of all components.
    pub fn total(&self) -> f64 {
        self.demand
            + self.rotation
            + self.double_shift
            + self.night_to_morning
            + self.weekly_limits
            + self.fairness
    }
}

/// Result of scoring one roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub fitness: f64,
    pub penalty: f64,
    pub stats: EvaluationStats,
    pub breakdown: PenaltyBreakdown,
}

/// Scores `roster` against `problem`.
///
/// # Errors
/// [`RosterError::Computation`] when the roster's dimensions disagree with
/// the problem, a cell names an employee outside the table, or the penalty
/// is not finite.
pub fn evaluate(problem: &RosterProblem, roster: &Roster) -> Result<Evaluation, RosterError> {
    check_shape(problem, roster)?;

    let rules = problem.rules();
    let calendar = problem.calendar();
    let days = problem.days();
    let n_shifts = problem.shift_count();
    let n_emp = problem.employee_count();
    let weeks = ClosureCalendar::week_count(days);

    let mut breakdown = PenaltyBreakdown::default();
    let mut total_shifts = vec![0u32; n_emp];
    let mut night_shifts = vec![0u32; n_emp];
    let mut total_by_week = vec![0u32; n_emp * weeks];
    let mut night_by_week = vec![0u32; n_emp * weeks];
    let mut worked_today = vec![0u32; n_emp];

    for day in calendar.open_days(days) {
        let week = ClosureCalendar::week_index(day);
        worked_today.fill(0);

        for shift in 0..n_shifts {
            let cell = roster.cell(day, shift);
            let need = problem.demand(shift) as usize;
            let assigned = cell.len();
            if assigned < need {
                breakdown.demand += (need - assigned) as f64 * SHORTFALL_WEIGHT;
            } else if assigned > need {
                breakdown.demand += (assigned - need) as f64 * SURPLUS_WEIGHT;
            }

            let is_night = problem.night_shift() == Some(shift);
            for &emp in cell {
                let i = emp.index();
                total_shifts[i] += 1;
                total_by_week[i * weeks + week] += 1;
                worked_today[i] += 1;

                if problem.is_rotation() && !problem.rotation().is_target(emp, week, shift) {
                    breakdown.rotation += rules.rotation_strictness;
                }
                if is_night {
                    night_shifts[i] += 1;
                    night_by_week[i * weeks + week] += 1;
                }
            }
        }

        if rules.forbid_double_shift_per_day {
            let extra: u32 = worked_today.iter().map(|&c| c.saturating_sub(1)).sum();
            breakdown.double_shift += extra as f64 * DOUBLE_SHIFT_WEIGHT;
        }

        if rules.forbid_night_to_morning && day + 1 < days && !calendar.is_closed(day + 1) {
            if let (Some(night), Some(morning)) = (problem.night_shift(), problem.morning_shift()) {
                let next_morning = roster.cell(day + 1, morning);
                let clashes = roster
                    .cell(day, night)
                    .iter()
                    .filter(|&e| next_morning.binary_search(e).is_ok())
                    .count();
                breakdown.night_to_morning += clashes as f64 * NIGHT_TO_MORNING_WEIGHT;
            }
        }
    }

    let max_shifts = rules.max_shifts_per_week;
    let max_nights = rules.max_night_per_week;
    for (&t, &n) in total_by_week.iter().zip(&night_by_week) {
        breakdown.weekly_limits += t.saturating_sub(max_shifts) as f64 * WEEKLY_LIMIT_WEIGHT;
        breakdown.weekly_limits += n.saturating_sub(max_nights) as f64 * WEEKLY_LIMIT_WEIGHT;
    }

    let variance = population_variance(&total_shifts);
    breakdown.fairness = variance * FAIRNESS_WEIGHT;

    let penalty = breakdown.total();
    if !penalty.is_finite() {
        return Err(RosterError::Computation(format!("non-finite penalty {penalty}")));
    }

    Ok(Evaluation {
        fitness: 1.0 / (1.0 + penalty),
        penalty,
        stats: EvaluationStats {
            total_shifts,
            night_shifts,
            variance,
        },
        breakdown,
    })
}

fn check_shape(problem: &RosterProblem, roster: &Roster) -> Result<(), RosterError> {
    if roster.days() != problem.days() || roster.shift_count() != problem.shift_count() {
        return Err(RosterError::Computation(format!(
            "roster is {}x{}, problem expects {}x{}",
            roster.days(),
            roster.shift_count(),
            problem.days(),
            problem.shift_count()
        )));
    }
    let n_emp = problem.employee_count();
    for day in 0..roster.days() {
        for cell in roster.day(day) {
            if let Some(bad) = cell.iter().find(|e| e.index() >= n_emp) {
                return Err(RosterError::Computation(format!(
                    "day {day} references unknown employee #{}",
                    bad.index()
                )));
            }
        }
    }
    Ok(())
}

fn population_variance(values: &[u32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().map(|&v| v as f64).sum::<f64>() / n;
    values.iter().map(|&v| (v as f64 - mean).powi(2)).sum::<f64>() / n
}
