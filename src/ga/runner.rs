//! Generational GA loop.
//!
//! Each generation scores the whole population, records the top
//! individual, keeps the best ever seen, and breeds the next population
//! from elites plus tournament-selected offspring.
//!
//! # Selection
//! A tournament draws `tournament_size` distinct members of the sorted
//! population and keeps the fittest. Two independent tournaments pick the
//! parents of every child; crossover is always applied, mutation with
//! `mutation_rate`.
//!
//! # Stopping
//! The loop stops after `generations`, or at a generation boundary once
//! the [`CancelToken`] fires or the time limit elapses. Stopping before the
//! first generation is scored is [`RosterError::Cancelled`]; later it
//! returns the best so far with `cancelled = true`.

use std::cmp::Ordering as CmpOrdering;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rand::seq::index;
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::RosterError;
use crate::models::Roster;

use super::generator::random_roster;
use super::individual::Individual;
use super::operators::GeneticOperators;
use super::{GaConfig, RosterProblem};

/// History slots reserved up front; longer runs grow the vector.
const HISTORY_PREALLOC: usize = 1024;

/// Shared cancellation flag, checked once per generation.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the run to stop at the next generation boundary.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Top of one generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRecord {
    #[serde(rename = "gen")]
    pub generation: usize,
    pub best_fitness: f64,
    pub best_penalty: f64,
}

/// Result of a GA run.
#[derive(Debug, Clone)]
pub struct GaOutcome {
    /// Best individual ever scored, closed days stamped.
    pub best: Individual,
    /// One record per completed generation.
    pub history: Vec<GenerationRecord>,
    /// Generations scored.
    pub generations_completed: usize,
    /// Whether the run stopped early.
    pub cancelled: bool,
}

/// Genetic algorithm runner for one roster problem.
pub struct GaRunner<'a> {
    problem: &'a RosterProblem,
    config: GaConfig,
    operators: GeneticOperators,
    cancel: CancelToken,
}

impl<'a> GaRunner<'a> {
    /// Creates a runner. The config is normalized first.
    pub fn new(problem: &'a RosterProblem, config: GaConfig) -> Self {
        let config = config.normalized();
        let operators = GeneticOperators::new(config.mutation_rate);
        Self {
            problem,
            config,
            operators,
            cancel: CancelToken::new(),
        }
    }

    /// Uses an externally owned cancellation token.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Returns a handle to cancel the run.
    pub fn cancel_handle(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Effective (normalized) configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Runs the GA to completion or cancellation.
    ///
    /// # Errors
    /// [`RosterError::Computation`] if scoring fails, and
    /// [`RosterError::Cancelled`] if stopped before the first generation.
    pub fn run<R: Rng>(&self, rng: &mut R) -> Result<GaOutcome, RosterError> {
        self.run_with_progress(rng, |_| {})
    }

    /// Like [`GaRunner::run`], calling `on_generation` after each scored
    /// generation. A cancel issued from the callback takes effect at the
    /// next generation boundary.
    #[instrument(
        level = "info",
        skip_all,
        fields(
            population = self.config.population_size,
            generations = self.config.generations,
            days = self.problem.days(),
        )
    )]
    pub fn run_with_progress<R, F>(
        &self,
        rng: &mut R,
        mut on_generation: F,
    ) -> Result<GaOutcome, RosterError>
    where
        R: Rng,
        F: FnMut(&GenerationRecord),
    {
        let start = Instant::now();
        let size = self.config.population_size;
        let mut population: Vec<Roster> = (0..size)
            .map(|_| random_roster(self.problem, rng))
            .collect();

        if self.config.generations == 0 {
            let scored = self.score(population)?;
            let best = scored.into_iter().next().ok_or_else(empty_population)?;
            return Ok(self.finish(best, Vec::new(), 0, false));
        }

        let mut history = Vec::with_capacity(self.config.generations.min(HISTORY_PREALLOC));
        let mut best: Option<Individual> = None;
        let mut cancelled = false;

        for generation in 0..self.config.generations {
            if self.should_stop(start) {
                if best.is_none() {
                    info!(generation, "run stopped before the first generation");
                    return Err(RosterError::Cancelled { generation });
                }
                cancelled = true;
                break;
            }

            let scored = self.score(population)?;
            let top = scored.first().ok_or_else(empty_population)?;
            let record = GenerationRecord {
                generation,
                best_fitness: top.fitness(),
                best_penalty: top.penalty(),
            };
            history.push(record);
            if best.as_ref().map_or(true, |b| top.fitness() > b.fitness()) {
                best = Some(top.clone());
            }
            debug!(generation, best_penalty = top.penalty(), "generation scored");
            on_generation(&record);

            population = self.breed(&scored, rng);
        }

        let best = best.ok_or_else(empty_population)?;
        let completed = history.len();
        Ok(self.finish(best, history, completed, cancelled))
    }

    fn should_stop(&self, start: Instant) -> bool {
        if self.cancel.is_cancelled() {
            return true;
        }
        self.config
            .time_limit()
            .is_some_and(|limit| start.elapsed() >= limit)
    }

    /// Scores every roster and sorts by fitness, best first. Ties keep
    /// population order.
    fn score(&self, population: Vec<Roster>) -> Result<Vec<Individual>, RosterError> {
        let problem = self.problem;
        let mut scored: Vec<Individual> = if self.config.parallel {
            population
                .into_par_iter()
                .map(|roster| Individual::evaluate(problem, roster))
                .collect::<Result<Vec<_>, RosterError>>()?
        } else {
            population
                .into_iter()
                .map(|roster| Individual::evaluate(problem, roster))
                .collect::<Result<Vec<_>, RosterError>>()?
        };
        scored.sort_by(|a, b| {
            b.fitness()
                .partial_cmp(&a.fitness())
                .unwrap_or(CmpOrdering::Equal)
        });
        Ok(scored)
    }

    fn breed<R: Rng>(&self, scored: &[Individual], rng: &mut R) -> Vec<Roster> {
        let size = self.config.population_size;
        let mut next: Vec<Roster> = Vec::with_capacity(size);
        next.extend(
            scored
                .iter()
                .take(self.config.elitism.min(scored.len()))
                .map(|ind| ind.roster.clone()),
        );

        while next.len() < size {
            let a = self.tournament_select(scored, rng);
            let b = self.tournament_select(scored, rng);
            let mut child = self.operators.crossover(self.problem, a, b, rng);
            self.operators.mutate(self.problem, &mut child, rng);
            next.push(child);
        }
        next
    }

    /// `scored` is sorted best first, so the smallest drawn index wins.
    fn tournament_select<'s, R: Rng>(&self, scored: &'s [Individual], rng: &mut R) -> &'s Roster {
        let k = self.config.tournament_size.min(scored.len());
        let winner = index::sample(rng, scored.len(), k).into_iter().min().unwrap_or(0);
        &scored[winner].roster
    }

    fn finish(
        &self,
        mut best: Individual,
        history: Vec<GenerationRecord>,
        generations_completed: usize,
        cancelled: bool,
    ) -> GaOutcome {
        best.roster.stamp_closed_days(self.problem.calendar());
        info!(
            generations_completed,
            cancelled,
            best_penalty = best.penalty(),
            best_fitness = best.fitness(),
            "run finished"
        );
        GaOutcome {
            best,
            history,
            generations_completed,
            cancelled,
        }
    }
}

fn empty_population() -> RosterError {
    RosterError::Computation("population is empty".into())
}
