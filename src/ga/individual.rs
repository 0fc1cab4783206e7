//! Evaluated roster.

use crate::error::RosterError;
use crate::models::Roster;

use super::evaluator::{evaluate, Evaluation};
use super::RosterProblem;

/// A roster paired with its evaluation.
///
/// Higher fitness = better roster.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    pub roster: Roster,
    pub evaluation: Evaluation,
}

impl Individual {
    /// Scores `roster` and wraps it.
    pub fn evaluate(problem: &RosterProblem, roster: Roster) -> Result<Self, RosterError> {
        let evaluation = evaluate(problem, &roster)?;
        Ok(Self { roster, evaluation })
    }

    #[inline]
    pub fn fitness(&self) -> f64 {
        self.evaluation.fitness
    }

    #[inline]
    pub fn penalty(&self) -> f64 {
        self.evaluation.penalty
    }
}
