//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Upper bound applied to `population_size` by [`GaConfig::normalized`].
pub const MAX_POPULATION_SIZE: usize = 10_000;

/// Configuration for the roster GA.
///
/// # Defaults
///
/// ```
/// use u_roster::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 120);
/// assert_eq!(config.generations, 500);
/// assert_eq!(config.elitism, 6);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_roster::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(60)
///     .with_generations(100)
///     .with_seed(7)
///     .with_parallel(false);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GaConfig {
    /// Number of individuals in every generation.
    pub population_size: usize,

    /// Number of generations to run.
    pub generations: usize,

    /// Top individuals copied unchanged into the next generation.
    pub elitism: usize,

    /// Probability that an offspring is mutated (0.0–1.0).
    pub mutation_rate: f64,

    /// Contenders drawn per tournament.
    pub tournament_size: usize,

    /// Random seed for reproducibility. `None` seeds from the OS.
    pub seed: Option<u64>,

    /// Whether to evaluate the population in parallel using rayon.
    pub parallel: bool,

    /// Wall-clock budget in milliseconds, checked between generations.
    pub time_limit_ms: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 120,
            generations: 500,
            elitism: 6,
            mutation_rate: 0.25,
            tournament_size: 4,
            seed: None,
            parallel: true,
            time_limit_ms: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the elite count.
    pub fn with_elitism(mut self, n: usize) -> Self {
        self.elitism = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, n: usize) -> Self {
        self.tournament_size = n;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets a wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit_ms = Some(limit.as_millis().min(u64::MAX as u128) as u64);
        self
    }

    /// Wall-clock budget, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }

    /// Returns a copy with every value forced into its usable range.
    ///
    /// Population size is clamped to `1..=MAX_POPULATION_SIZE` and the
    /// tournament size to `1..=population_size`. Elitism is capped at the
    /// population size; a non-finite mutation rate falls back to the default.
    pub fn normalized(&self) -> Self {
        let population_size = self.population_size.clamp(1, MAX_POPULATION_SIZE);
        let mutation_rate = if self.mutation_rate.is_finite() {
            self.mutation_rate.clamp(0.0, 1.0)
        } else {
            Self::default().mutation_rate
        };
        Self {
            population_size,
            elitism: self.elitism.min(population_size),
            mutation_rate,
            tournament_size: self.tournament_size.clamp(1, population_size),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 120);
        assert_eq!(config.generations, 500);
        assert_eq!(config.elitism, 6);
        assert!((config.mutation_rate - 0.25).abs() < 1e-10);
        assert_eq!(config.tournament_size, 4);
        assert!(config.seed.is_none());
        assert!(config.parallel);
        assert!(config.time_limit().is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_population_size(50)
            .with_generations(10)
            .with_elitism(2)
            .with_mutation_rate(1.5)
            .with_tournament_size(3)
            .with_seed(42)
            .with_parallel(false)
            .with_time_limit(Duration::from_millis(250));

        assert_eq!(config.population_size, 50);
        assert_eq!(config.generations, 10);
        assert_eq!(config.elitism, 2);
        assert!((config.mutation_rate - 1.0).abs() < 1e-10);
        assert_eq!(config.tournament_size, 3);
        assert_eq!(config.seed, Some(42));
        assert!(!config.parallel);
        assert_eq!(config.time_limit(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_normalized_clamps() {
        let config = GaConfig {
            population_size: 0,
            elitism: 10,
            tournament_size: 0,
            mutation_rate: f64::NAN,
            ..GaConfig::default()
        }
        .normalized();
        assert_eq!(config.population_size, 1);
        assert_eq!(config.elitism, 1);
        assert_eq!(config.tournament_size, 1);
        assert!((config.mutation_rate - 0.25).abs() < 1e-10);
    }

    #[test]
    fn test_normalized_caps_population() {
        let config = GaConfig::default()
            .with_population_size(usize::MAX)
            .with_elitism(usize::MAX)
            .with_tournament_size(usize::MAX)
            .normalized();
        assert_eq!(config.population_size, MAX_POPULATION_SIZE);
        assert_eq!(config.elitism, MAX_POPULATION_SIZE);
        assert_eq!(config.tournament_size, MAX_POPULATION_SIZE);
    }

    #[test]
    fn test_deserialize_partial_camel_case() {
        let json = r#"{"populationSize": 30, "tournamentSize": 2, "timeLimitMs": 1000}"#;
        let config: GaConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.population_size, 30);
        assert_eq!(config.tournament_size, 2);
        assert_eq!(config.generations, 500);
        assert_eq!(config.time_limit(), Some(Duration::from_secs(1)));
    }
}
