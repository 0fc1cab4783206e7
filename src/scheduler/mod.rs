//! Optimization entry point, projections and KPI evaluation.
//!
//! # Entry Point
//!
//! [`optimize`] takes an [`OptimizeInput`] (horizon, shifts, employees,
//! demand, rules, GA settings) and returns the best roster found together
//! with its score, workload stats and per-generation history.
//!
//! # Outputs
//!
//! - [`DayCodeProjection`] flattens a roster into one letter per employee
//!   per day for spreadsheet exports.
//! - [`RosterKpi`] summarises demand coverage.
//!
//! # References
//!
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of
//!   applications, methods and models"

mod kpi;
mod optimize;
mod projection;

pub use kpi::RosterKpi;
pub use optimize::{
    optimize, optimize_with, BestStats, OptimizeInput, OptimizeResult, DEFAULT_DAYS,
    DEFAULT_EMPLOYEES, DEFAULT_SHIFTS,
};
pub use projection::{DayCodeProjection, DayCodeRow, OFF_CODE};
