//! GA-based roster optimization.
//!
//! The genome is the [`Roster`](crate::models::Roster) itself: a
//! `days × shifts` grid of employee sets. No separate encoding is needed
//! because day-cut crossover and single-cell mutation operate on it
//! directly.
//!
//! # Submodules
//!
//! - [`generator`]: random initial rosters (normal and rotation-biased)
//! - [`evaluator`]: constraint penalties, fitness and workload stats
//! - [`operators`]: day-cut crossover and cell-redraw mutation
//! - [`runner`]: the generational loop with elitism and tournaments
//!
//! # Reference
//! Burke et al. (2004), "The State of the Art of Nurse Rostering"

mod config;
pub mod evaluator;
pub mod generator;
mod individual;
pub mod operators;
mod problem;
mod rotation;
pub mod runner;
mod sampling;

pub use config::{GaConfig, MAX_POPULATION_SIZE};
pub use evaluator::{evaluate, Evaluation, EvaluationStats, PenaltyBreakdown};
pub use generator::random_roster;
pub use individual::Individual;
pub use operators::GeneticOperators;
pub use problem::RosterProblem;
pub use rotation::{target_shift, RotationPolicy};
pub use runner::{CancelToken, GaOutcome, GaRunner, GenerationRecord};
