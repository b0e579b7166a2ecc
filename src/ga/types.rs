//! Scored tours and fitness-sorted populations.
//!
//! An [`Individual`] pairs a tour with its length and is never modified
//! after scoring; changing a tour means scoring a new individual. A
//! [`Population`] is always sorted ascending by fitness, which is the
//! precondition every [`Strategy`](super::Strategy) relies on.

use crate::error::{Result, TspError};
use crate::geometry::{tour_length, Cities};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A scored tour. Lower fitness is better.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual {
    fitness: f64,
    tour: Vec<usize>,
}

impl Individual {
    /// Scores `tour` against `cities`.
    ///
    /// # Errors
    /// [`TspError::InvalidTour`] if `tour` is not a permutation of the city ids.
    pub fn evaluate(tour: Vec<usize>, cities: &Cities) -> Result<Self> {
        let fitness = tour_length(&tour, cities)?;
        Ok(Self { fitness, tour })
    }

    /// Total closed-tour length.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn tour(&self) -> &[usize] {
        &self.tour
    }

    pub fn into_tour(self) -> Vec<usize> {
        self.tour
    }
}

/// Individuals of one generation, sorted ascending by fitness.
#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Scores every tour, sorts ascending by fitness, and keeps the best
    /// `size`.
    ///
    /// With `parallel` set (and the `parallel` feature enabled) tours are
    /// scored on the rayon pool; sorting waits for all of them.
    ///
    /// # Errors
    /// - [`TspError::Config`] if fewer than `size` tours are given or `size == 0`
    /// - [`TspError::InvalidTour`] if any tour is malformed
    pub fn evaluate(
        tours: Vec<Vec<usize>>,
        cities: &Cities,
        size: usize,
        parallel: bool,
    ) -> Result<Self> {
        if size == 0 || tours.len() < size {
            return Err(TspError::Config(format!(
                "population of {size} needs at least that many tours, got {}",
                tours.len()
            )));
        }

        let mut individuals = score_all(tours, cities, parallel)?;
        // Stable: among equal lengths the earlier tour ranks first.
        individuals.sort_by(|a, b| a.fitness.total_cmp(&b.fitness));
        individuals.truncate(size);
        Ok(Self { individuals })
    }

    /// The lowest-fitness individual.
    pub fn best(&self) -> &Individual {
        &self.individuals[0]
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }
}

#[cfg(feature = "parallel")]
fn score_all(tours: Vec<Vec<usize>>, cities: &Cities, parallel: bool) -> Result<Vec<Individual>> {
    if parallel {
        tours
            .into_par_iter()
            .map(|tour| Individual::evaluate(tour, cities))
            .collect()
    } else {
        score_sequential(tours, cities)
    }
}

#[cfg(not(feature = "parallel"))]
fn score_all(tours: Vec<Vec<usize>>, cities: &Cities, _parallel: bool) -> Result<Vec<Individual>> {
    score_sequential(tours, cities)
}

fn score_sequential(tours: Vec<Vec<usize>>, cities: &Cities) -> Result<Vec<Individual>> {
    tours
        .into_iter()
        .map(|tour| Individual::evaluate(tour, cities))
        .collect()
}
