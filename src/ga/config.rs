//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use super::operators::Crossover;
use super::selection::Strategy;
use crate::error::{Result, TspError};

/// Configuration for the tour search.
///
/// # Defaults
///
/// ```
/// use u_tsp_evolve::ga::{GaConfig, Strategy};
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.max_generations, 100);
/// assert_eq!(config.strategy, Strategy::BinaryTournament);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_tsp_evolve::ga::{GaConfig, Strategy};
///
/// let config = GaConfig::default()
///     .with_population_size(80)
///     .with_strategy(Strategy::Truncation)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals kept after every generation.
    ///
    /// Strategies breed children in pairs, so an even size avoids
    /// discarding a child each generation.
    pub population_size: usize,

    /// Number of generations to run.
    pub max_generations: usize,

    /// Selection strategy for building each generation.
    pub strategy: Strategy,

    /// Crossover override. `None` uses [`Strategy::default_crossover`].
    pub crossover: Option<Crossover>,

    /// Whether to score individuals in parallel using rayon.
    ///
    /// Ignored without the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// Emit an `info` progress event every this many generations.
    ///
    /// Set to 0 to disable.
    pub progress_interval: usize,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 100,
            strategy: Strategy::default(),
            crossover: None,
            parallel: true,
            seed: None,
            progress_interval: 10,
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
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the selection strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Overrides the strategy's default crossover.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = Some(crossover);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the progress event interval (0 to disable).
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    /// The crossover actually used: the override, or the strategy's default.
    pub fn effective_crossover(&self) -> Crossover {
        self.crossover
            .unwrap_or_else(|| self.strategy.default_crossover())
    }

    /// Preset for quick runs: population 20, 50 generations.
    pub fn fast() -> Self {
        Self {
            population_size: 20,
            max_generations: 50,
            ..Self::default()
        }
    }

    /// Preset for long refinement runs: population 200, 1000 generations.
    pub fn thorough() -> Self {
        Self {
            population_size: 200,
            max_generations: 1000,
            progress_interval: 50,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`TspError::Config`] describing the first invalid parameter.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(TspError::Config(
                "population_size must be at least 2".into(),
            ));
        }
        if self.max_generations == 0 {
            return Err(TspError::Config(
                "max_generations must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
