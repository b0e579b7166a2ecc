//! Genetic algorithm for closed tours.
//!
//! Candidate tours are permutations of the 1-based city ids, scored by
//! their closed Euclidean length (lower is better). Each generation a
//! [`Strategy`] breeds the next tours from the fitness-sorted
//! [`Population`] using a repairing [`Crossover`], and the runner
//! re-scores and re-sorts them.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Run parameters (population size, generations, strategy)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Best tour, fitness history, and run statistics
//!
//! # Submodules
//!
//! - [`operators`]: Segment substitution and three-point exchange crossover
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod operators;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use operators::Crossover;
pub use runner::{GaResult, GaRunner, RunOptions};
pub use selection::Strategy;
pub use types::{Individual, Population};
