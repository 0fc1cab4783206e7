//! Single optimization entry point.
//!
//! [`optimize`] validates the input, resolves it into a
//! [`RosterProblem`], runs the GA and maps the winning roster back to
//! employee names. Everything else in the crate (request adapter, CLI)
//! goes through here.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::RosterError;
use crate::ga::{
    CancelToken, GaConfig, GaOutcome, GaRunner, GenerationRecord, PenaltyBreakdown, RosterProblem,
};
use crate::models::{DemandProfile, Roster, RuleConfig};

use super::RosterKpi;

/// Default shift columns.
pub const DEFAULT_SHIFTS: [&str; 3] = ["Pagi", "Siang", "Malam"];
/// Default employee ids.
pub const DEFAULT_EMPLOYEES: [&str; 8] = ["A", "B", "C", "D", "E", "F", "G", "H"];
/// Default horizon in days.
pub const DEFAULT_DAYS: i64 = 7;

/// Input container for one optimization run.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizeInput {
    /// Horizon length. Must be positive.
    pub days: i64,
    /// Shift names in column order.
    pub shifts: Vec<String>,
    /// Employee ids in table order.
    pub employees: Vec<String>,
    pub demand: DemandProfile,
    pub rules: RuleConfig,
    pub ga: GaConfig,
}

impl Default for OptimizeInput {
    fn default() -> Self {
        Self {
            days: DEFAULT_DAYS,
            shifts: DEFAULT_SHIFTS.iter().map(|s| s.to_string()).collect(),
            employees: DEFAULT_EMPLOYEES.iter().map(|s| s.to_string()).collect(),
            demand: DemandProfile::new()
                .with("Pagi", 3)
                .with("Siang", 3)
                .with("Malam", 2),
            rules: RuleConfig::default(),
            ga: GaConfig::default(),
        }
    }
}

impl OptimizeInput {
    /// Creates an input with no demand and default rules and GA settings.
    pub fn new<S: Into<String>, E: Into<String>>(
        days: i64,
        shifts: impl IntoIterator<Item = S>,
        employees: impl IntoIterator<Item = E>,
    ) -> Self {
        Self {
            days,
            shifts: shifts.into_iter().map(Into::into).collect(),
            employees: employees.into_iter().map(Into::into).collect(),
            demand: DemandProfile::new(),
            rules: RuleConfig::default(),
            ga: GaConfig::default(),
        }
    }

    pub fn with_demand(mut self, demand: DemandProfile) -> Self {
        self.demand = demand;
        self
    }

    pub fn with_rules(mut self, rules: RuleConfig) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_ga(mut self, ga: GaConfig) -> Self {
        self.ga = ga;
        self
    }

    /// Validates and resolves the input into a GA problem.
    pub fn to_problem(&self) -> Result<RosterProblem, RosterError> {
        RosterProblem::new(
            self.days,
            self.shifts.clone(),
            self.employees.clone(),
            &self.demand,
            self.rules.clone(),
        )
    }
}

/// Workload counts of the best roster, keyed by employee id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestStats {
    pub total_shifts: BTreeMap<String, u32>,
    pub night_shifts: BTreeMap<String, u32>,
    pub variance: f64,
}

/// Outcome of [`optimize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResult {
    /// `best_grid[day][shift]` = employee ids.
    pub best_grid: Vec<Vec<Vec<String>>>,
    pub best_fitness: f64,
    pub best_penalty: f64,
    pub best_stats: BestStats,
    pub history: Vec<GenerationRecord>,
    pub generations_completed: usize,
    pub cancelled: bool,
    /// Best roster in index form.
    #[serde(skip)]
    pub roster: Option<Roster>,
    #[serde(skip)]
    pub breakdown: PenaltyBreakdown,
    #[serde(skip)]
    pub kpi: Option<RosterKpi>,
}

impl OptimizeResult {
    fn from_outcome(problem: &RosterProblem, outcome: GaOutcome) -> Self {
        let employees = problem.employees();
        let keyed = |counts: &[u32]| -> BTreeMap<String, u32> {
            employees.iter().cloned().zip(counts.iter().copied()).collect()
        };

        let best = outcome.best;
        let evaluation = best.evaluation;
        let kpi = RosterKpi::calculate(problem, &best.roster);
        Self {
            best_grid: best.roster.to_named(employees),
            best_fitness: evaluation.fitness,
            best_penalty: evaluation.penalty,
            best_stats: BestStats {
                total_shifts: keyed(&evaluation.stats.total_shifts),
                night_shifts: keyed(&evaluation.stats.night_shifts),
                variance: evaluation.stats.variance,
            },
            history: outcome.history,
            generations_completed: outcome.generations_completed,
            cancelled: outcome.cancelled,
            roster: Some(best.roster),
            breakdown: evaluation.breakdown,
            kpi: Some(kpi),
        }
    }
}

/// Runs one optimization with a fresh rng.
///
/// Seeds from `input.ga.seed` when set, otherwise from the OS.
///
/// # Errors
/// - [`RosterError::InvalidConfiguration`] for structurally invalid input
/// - [`RosterError::Computation`] if scoring fails
/// - [`RosterError::Cancelled`] if the time limit elapses before the first
///   generation completes
///
/// # Example
///
/// ```
/// use u_roster::ga::GaConfig;
/// use u_roster::models::DemandProfile;
/// use u_roster::scheduler::{optimize, OptimizeInput};
///
/// let input = OptimizeInput::new(7, ["Pagi", "Malam"], ["A", "B", "C"])
///     .with_demand(DemandProfile::new().with("Pagi", 1).with("Malam", 1))
///     .with_ga(GaConfig::default().with_population_size(10).with_generations(5).with_seed(1));
///
/// let result = optimize(&input).unwrap();
/// assert_eq!(result.best_grid.len(), 7);
/// assert_eq!(result.history.len(), 5);
/// ```
pub fn optimize(input: &OptimizeInput) -> Result<OptimizeResult, RosterError> {
    let mut rng = match input.ga.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    optimize_with(input, &mut rng, &CancelToken::new())
}

/// Runs one optimization with a caller-supplied rng and cancel token.
#[instrument(
    level = "info",
    skip_all,
    fields(days = input.days, shifts = input.shifts.len(), employees = input.employees.len())
)]
pub fn optimize_with<R: Rng>(
    input: &OptimizeInput,
    rng: &mut R,
    cancel: &CancelToken,
) -> Result<OptimizeResult, RosterError> {
    let problem = input.to_problem()?;
    info!(mode = ?problem.rules().mode, "optimization started");

    let outcome = GaRunner::new(&problem, input.ga.clone())
        .with_cancel_token(cancel.clone())
        .run(rng)?;
    Ok(OptimizeResult::from_outcome(&problem, outcome))
}
