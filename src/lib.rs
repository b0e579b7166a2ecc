//! Evolutionary search for short closed tours over 2-D points.
//!
//! Provides the pieces of a genetic algorithm for the Traveling Salesman
//! Problem:
//!
//! - **Geometry**: Euclidean distances and closed-tour length
//! - **Permutations**: validity checks, random tours, swap mutation
//! - **Crossover**: segment substitution and three-point exchange with
//!   repair, both guaranteed to return valid permutations
//! - **Selection**: truncation replacement and binary tournament
//! - **Runner**: the generational loop with elitism, optional seed tour,
//!   cancellation, and parallel fitness evaluation
//!
//! City files are read by [`loader`]; the `tsp-evolve` binary wires it all
//! together.
//!
//! # Example
//!
//! ```
//! use u_tsp_evolve::ga::{GaConfig, GaRunner, Strategy};
//! use u_tsp_evolve::geometry::Cities;
//!
//! let cities = Cities::from(vec![(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
//! let config = GaConfig::fast().with_strategy(Strategy::Truncation).with_seed(1);
//! let result = GaRunner::run_seeded(&cities, &config, &[1, 2, 3, 4]).unwrap();
//! assert!(result.best_fitness <= 4.0);
//! ```

pub mod error;
pub mod ga;
pub mod geometry;
pub mod loader;
pub mod permutation;
pub mod random;

pub use error::{Result, TspError};
