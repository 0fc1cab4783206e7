//! Roster quality metrics (KPIs).
//!
//! Summarises how well a finished roster covers demand. Only open days
//! count; closed days are reported separately.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Required slots | Σ demand over open days and shifts |
//! | Filled slots | Σ min(assigned, demand) |
//! | Shortfall | Σ max(0, demand - assigned) |
//! | Surplus | Σ max(0, assigned - demand) |
//! | Coverage rate | filled / required (1.0 when nothing is required) |

use serde::{Deserialize, Serialize};

use crate::ga::RosterProblem;
use crate::models::Roster;

/// Demand coverage indicators of one roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterKpi {
    pub required_slots: u64,
    pub filled_slots: u64,
    pub shortfall: u64,
    pub surplus: u64,
    /// Fraction of required slots filled (0.0..=1.0).
    pub coverage_rate: f64,
    pub open_days: usize,
    pub closed_days: usize,
}

impl RosterKpi {
    /// Computes KPIs of `roster` under `problem`'s demand and calendar.
    pub fn calculate(problem: &RosterProblem, roster: &Roster) -> Self {
        let calendar = problem.calendar();
        let days = roster.days().min(problem.days());
        let shifts = roster.shift_count().min(problem.shift_count());

        let mut kpi = Self {
            required_slots: 0,
            filled_slots: 0,
            shortfall: 0,
            surplus: 0,
            coverage_rate: 1.0,
            open_days: 0,
            closed_days: calendar.closed_days(days).count(),
        };

        for day in calendar.open_days(days) {
            kpi.open_days += 1;
            for shift in 0..shifts {
                let need = u64::from(problem.demand(shift));
                let assigned = roster.cell(day, shift).len() as u64;
                kpi.required_slots += need;
                kpi.filled_slots += assigned.min(need);
                kpi.shortfall += need.saturating_sub(assigned);
                kpi.surplus += assigned.saturating_sub(need);
            }
        }

        if kpi.required_slots > 0 {
            kpi.coverage_rate = kpi.filled_slots as f64 / kpi.required_slots as f64;
        }
        kpi
    }

    /// Whether coverage reaches `min_coverage`.
    pub fn meets_coverage(&self, min_coverage: f64) -> bool {
        self.coverage_rate >= min_coverage
    }
}
