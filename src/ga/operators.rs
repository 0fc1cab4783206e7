//! Genetic operators for rosters.
//!
//! # Crossover
//! Single day-cut: days before a uniform cut in `[1, days-1]` come from
//! the first parent, the rest from the second. Cells are deep-copied.
//!
//! # Mutation
//! Re-draws the staff of one (day, shift) cell. Employees already on
//! another shift that day are excluded; in rotation mode the week's target
//! pool for the shift is preferred.
//!
//! Both operators stamp closed days on their result.
//!
//! # Usage
//!
//! ```
//! use u_roster::ga::GeneticOperators;
//!
//! let ops = GeneticOperators::default();
//! assert_eq!(ops.mutation_rate, 0.25);
//! ```

use rand::Rng;

use crate::models::{ClosureCalendar, EmployeeId, Roster};

use super::sampling::sample_unique;
use super::RosterProblem;

/// Redraws allowed when the drawn mutation day is closed.
pub const MAX_DAY_DRAWS: usize = 30;

/// Crossover and mutation for roster individuals.
#[derive(Debug, Clone)]
pub struct GeneticOperators {
    /// Probability that [`mutate`](Self::mutate) changes anything.
    /// Clamped to `[0, 1]` when used.
    pub mutation_rate: f64,
}

impl Default for GeneticOperators {
    fn default() -> Self {
        Self { mutation_rate: 0.25 }
    }
}

impl GeneticOperators {
    /// Creates operators with the given mutation rate.
    pub fn new(mutation_rate: f64) -> Self {
        Self { mutation_rate }
    }

    /// Day-cut crossover. A horizon shorter than two days yields a copy of `a`.
    pub fn crossover<R: Rng>(
        &self,
        problem: &RosterProblem,
        a: &Roster,
        b: &Roster,
        rng: &mut R,
    ) -> Roster {
        let days = a.days();
        let mut child = if days < 2 {
            a.clone()
        } else {
            let cut = rng.random_range(1..days);
            Roster::splice(a, b, cut)
        };
        child.stamp_closed_days(problem.calendar());
        child
    }

    /// Mutates `roster` in place with probability `mutation_rate`.
    ///
    /// May leave the roster unchanged even when triggered: when every drawn
    /// day is closed, or the drawn shift has no demand.
    pub fn mutate<R: Rng>(&self, problem: &RosterProblem, roster: &mut Roster, rng: &mut R) {
        let rate = self.mutation_rate.clamp(0.0, 1.0);
        if rng.random_bool(rate) {
            self.redraw_cell(problem, roster, rng);
        }
        roster.stamp_closed_days(problem.calendar());
    }

    fn redraw_cell<R: Rng>(&self, problem: &RosterProblem, roster: &mut Roster, rng: &mut R) {
        let days = roster.days();
        let calendar = problem.calendar();
        if days == 0 || problem.shift_count() == 0 {
            return;
        }

        let mut day = rng.random_range(0..days);
        let mut tries = 0;
        while tries < MAX_DAY_DRAWS && calendar.is_closed(day) {
            day = rng.random_range(0..days);
            tries += 1;
        }
        if calendar.is_closed(day) {
            return;
        }

        let shift = rng.random_range(0..problem.shift_count());
        let need = problem.demand(shift) as usize;
        if need == 0 {
            return;
        }

        let busy = |e: EmployeeId| {
            (0..roster.shift_count()).any(|s| s != shift && roster.works(day, s, e))
        };
        let free: Vec<EmployeeId> = problem
            .employee_ids()
            .into_iter()
            .filter(|&e| !busy(e))
            .collect();

        let mut pool = free.clone();
        if problem.is_rotation() {
            let week = ClosureCalendar::week_index(day);
            let targeted: Vec<EmployeeId> = free
                .iter()
                .copied()
                .filter(|&e| problem.rotation().is_target(e, week, shift))
                .collect();
            if !targeted.is_empty() {
                pool = targeted;
            }
        }
        if pool.len() < need {
            pool = free;
        }

        let chosen = sample_unique(&pool, need, rng);
        roster.assign(day, shift, chosen);
    }
}
