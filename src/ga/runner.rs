//! GA evolutionary loop execution.
//!
//! [`GaRunner`] drives a run through its phases: seed random tours
//! (plus an optional caller tour), evaluate and sort, then breed, re-score
//! and re-sort once per generation until the budget is spent.

use super::config::GaConfig;
use super::types::{Individual, Population};
use crate::error::{Result, TspError};
use crate::geometry::Cities;
use crate::permutation::random_permutation;
use crate::random::create_rng;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Result of a GA run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaResult {
    /// The best individual of the final generation.
    ///
    /// Elitism makes this the best individual seen during the run.
    pub best: Individual,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: f64,

    /// Total number of generations executed.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best fitness of the initial population, then of each generation.
    pub fitness_history: Vec<f64>,
}

impl GaResult {
    /// The best tour, for seeding a follow-up run.
    pub fn best_tour(&self) -> &[usize] {
        self.best.tour()
    }
}

/// Optional inputs to a run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions<'a> {
    /// A tour injected into the initial pool (continuation runs).
    pub seed_tour: Option<&'a [usize]>,

    /// Checked between generations; setting it stops the run early.
    pub cancel: Option<Arc<AtomicBool>>,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_tsp_evolve::geometry::Cities;
/// use u_tsp_evolve::ga::{GaConfig, GaRunner};
///
/// let cities = Cities::from(vec![(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.5, 2.0)]);
/// let config = GaConfig::fast().with_seed(42);
/// let result = GaRunner::run(&cities, &config).unwrap();
/// assert_eq!(result.best_tour().len(), 5);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the search with a generator seeded from `config.seed`.
    pub fn run(cities: &Cities, config: &GaConfig) -> Result<GaResult> {
        let mut rng = create_rng(config.seed);
        Self::run_with_rng(cities, config, RunOptions::default(), &mut rng, |_, _| {})
    }

    /// Runs the search with `seed_tour` injected into the initial pool.
    ///
    /// The returned best tour is never worse than `seed_tour`, so repeated
    /// calls progressively refine a running best solution.
    pub fn run_seeded(cities: &Cities, config: &GaConfig, seed_tour: &[usize]) -> Result<GaResult> {
        let mut rng = create_rng(config.seed);
        let options = RunOptions {
            seed_tour: Some(seed_tour),
            cancel: None,
        };
        Self::run_with_rng(cities, config, options, &mut rng, |_, _| {})
    }

    /// Runs the search with an optional cancellation flag.
    ///
    /// If the flag is set, the run stops before the next generation and
    /// returns the best solution found so far.
    pub fn run_with_cancel(
        cities: &Cities,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult> {
        let mut rng = create_rng(config.seed);
        let options = RunOptions {
            seed_tour: None,
            cancel,
        };
        Self::run_with_rng(cities, config, options, &mut rng, |_, _| {})
    }

    /// Runs the search drawing all randomness from `rng`.
    ///
    /// `on_generation` is called after each generation with the generation
    /// index (from 0) and the best fitness.
    ///
    /// # Errors
    /// - [`TspError::Config`] for an invalid `config`
    /// - [`TspError::DegenerateInput`] if there are too few cities for the
    ///   configured crossover
    /// - [`TspError::InvalidTour`] if `options.seed_tour` is malformed
    /// - [`TspError::InvalidPermutation`] if an operator breaks a tour
    #[instrument(
        level = "debug",
        skip_all,
        fields(cities = cities.len(), population = config.population_size, strategy = ?config.strategy)
    )]
    pub fn run_with_rng<R, F>(
        cities: &Cities,
        config: &GaConfig,
        options: RunOptions<'_>,
        rng: &mut R,
        mut on_generation: F,
    ) -> Result<GaResult>
    where
        R: Rng,
        F: FnMut(usize, f64),
    {
        config.validate()?;
        let crossover = config.effective_crossover();
        let n = cities.len();
        if n < crossover.min_cities() {
            return Err(TspError::DegenerateInput {
                operator: "evolutionary search",
                len: n,
                min: crossover.min_cities(),
            });
        }

        info!(
            generations = config.max_generations,
            ?crossover,
            seeded = options.seed_tour.is_some(),
            "starting tour search"
        );

        // 1. Seed
        let mut tours = (0..config.population_size)
            .map(|_| random_permutation(n, rng))
            .collect::<Result<Vec<_>>>()?;
        if let Some(seed_tour) = options.seed_tour {
            tours.push(seed_tour.to_vec());
        }

        // 2. Evaluate
        let mut population =
            Population::evaluate(tours, cities, config.population_size, config.parallel)?;

        let mut fitness_history = Vec::with_capacity(config.max_generations + 1);
        fitness_history.push(population.best().fitness());

        let mut generations = 0;
        let mut cancelled = false;

        // 3. Evolve
        for gen in 0..config.max_generations {
            if let Some(ref flag) = options.cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            if config.progress_interval > 0 && gen % config.progress_interval == 0 {
                info!(generation = gen, best = population.best().fitness(), "simulating generation");
            }

            let next = config
                .strategy
                .breed(&population, config.population_size, crossover, rng)?;
            population = Population::evaluate(next, cities, config.population_size, config.parallel)?;
            generations = gen + 1;

            let best = population.best().fitness();
            debug!(generation = gen, best, "generation evaluated");
            fitness_history.push(best);
            on_generation(gen, best);
        }

        // 4. Terminate
        let best = population.best().clone();
        info!(
            generations,
            cancelled,
            best = best.fitness(),
            "tour search finished"
        );

        Ok(GaResult {
            best_fitness: best.fitness(),
            best,
            generations,
            cancelled,
            fitness_history,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
