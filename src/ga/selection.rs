//! Selection and replacement strategies.
//!
//! A strategy reads a fitness-sorted [`Population`] and breeds the tours of
//! the next generation. The result is unsorted; the runner re-scores and
//! re-sorts it. Breeding appends children in pairs until the target size is
//! reached and then slices to that size, so with an odd number of open
//! slots the second child of the last pair is dropped.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::operators::Crossover;
use super::types::{Individual, Population};
use crate::error::Result;
use rand::Rng;

/// Selection strategy for building the next generation.
///
/// Both strategies assume **minimization** and carry the current best tour
/// forward unmutated, so the best fitness never gets worse.
///
/// # Examples
///
/// ```
/// use u_tsp_evolve::ga::{Crossover, Strategy};
///
/// assert_eq!(Strategy::Truncation.default_crossover(), Crossover::SegmentSubstitution);
/// assert_eq!(Strategy::BinaryTournament.parent_pool_size(30), 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Truncation replacement: the top half survives unchanged, the rest is
    /// filled with children of uniformly drawn top-half parents.
    Truncation,

    /// Binary tournament selection from the top two-thirds, with the
    /// single best tour carried forward.
    #[default]
    BinaryTournament,
}

impl Strategy {
    /// Crossover paired with this strategy unless the config overrides it.
    pub fn default_crossover(self) -> Crossover {
        match self {
            Strategy::Truncation => Crossover::SegmentSubstitution,
            Strategy::BinaryTournament => Crossover::ThreePointExchange,
        }
    }

    /// Number of top-ranked individuals eligible as parents.
    ///
    /// Never less than one.
    pub fn parent_pool_size(self, population_size: usize) -> usize {
        let pool = match self {
            Strategy::Truncation => population_size / 2,
            Strategy::BinaryTournament => population_size * 2 / 3,
        };
        pool.max(1)
    }

    /// Breeds exactly `population_size` tours from `population`.
    ///
    /// # Errors
    /// Propagates crossover errors (degenerate tour size or a broken child).
    pub fn breed<R: Rng>(
        self,
        population: &Population,
        population_size: usize,
        crossover: Crossover,
        rng: &mut R,
    ) -> Result<Vec<Vec<usize>>> {
        let pool_len = self
            .parent_pool_size(population_size)
            .min(population.len());
        let pool = &population.individuals()[..pool_len];

        let mut next: Vec<Vec<usize>> = match self {
            Strategy::Truncation => pool.iter().map(|ind| ind.tour().to_vec()).collect(),
            Strategy::BinaryTournament => vec![population.best().tour().to_vec()],
        };

        while next.len() < population_size {
            let (s, t) = match self {
                Strategy::Truncation => (uniform(pool, rng), uniform(pool, rng)),
                Strategy::BinaryTournament => (tournament(pool, 2, rng), tournament(pool, 2, rng)),
            };
            let (first, second) = crossover.apply(pool[s].tour(), pool[t].tour(), rng)?;
            next.push(first);
            next.push(second);
        }

        next.truncate(population_size);
        Ok(next)
    }
}

/// Uniform draw of a pool index.
fn uniform<R: Rng>(pool: &[Individual], rng: &mut R) -> usize {
    rng.random_range(0..pool.len())
}

/// Tournament selection: draw `k` indices uniformly, keep the fittest.
///
/// Ties keep the earlier draw.
fn tournament<R: Rng>(pool: &[Individual], k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    let n = pool.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if pool[idx].fitness() < pool[best_idx].fitness() {
            best_idx = idx;
        }
    }
    best_idx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Cities, City};
    use crate::permutation::{is_permutation, random_permutation};
    use crate::random::create_rng;

    fn circle(n: usize) -> Cities {
        Cities::new(
            (0..n)
                .map(|i| {
                    let angle = i as f64 * std::f64::consts::TAU / n as f64;
                    City::new(angle.cos() * 100.0, angle.sin() * 100.0)
                })
                .collect(),
        )
    }

    fn random_population(cities: &Cities, size: usize, seed: u64) -> Population {
        let mut rng = create_rng(Some(seed));
        let tours = (0..size)
            .map(|_| random_permutation(cities.len(), &mut rng).unwrap())
            .collect();
        Population::evaluate(tours, cities, size, false).unwrap()
    }

    /// Four tours over six collinear cities with lengths 10, 12, 14, 18.
    fn ranked_population() -> Population {
        let cities = Cities::new((0..6).map(|x| City::new(x as f64, 0.0)).collect());
        let tours = vec![
            vec![1, 6, 2, 5, 3, 4],
            vec![1, 3, 2, 4, 5, 6],
            vec![1, 2, 3, 4, 5, 6],
            vec![1, 4, 2, 3, 5, 6],
        ];
        Population::evaluate(tours, &cities, 4, false).unwrap()
    }

    #[test]
    fn test_pool_sizes() {
        assert_eq!(Strategy::Truncation.parent_pool_size(50), 25);
        assert_eq!(Strategy::BinaryTournament.parent_pool_size(50), 33);
        assert_eq!(Strategy::Truncation.parent_pool_size(1), 1);
        assert_eq!(Strategy::BinaryTournament.parent_pool_size(1), 1);
    }

    #[test]
    fn test_truncation_keeps_top_half() {
        let cities = circle(12);
        let pop = random_population(&cities, 10, 1);
        let mut rng = create_rng(Some(2));
        let next = Strategy::Truncation
            .breed(&pop, 10, Crossover::SegmentSubstitution, &mut rng)
            .unwrap();
        assert_eq!(next.len(), 10);
        for (kept, ind) in next.iter().zip(&pop.individuals()[..5]) {
            assert_eq!(kept.as_slice(), ind.tour());
        }
    }

    #[test]
    fn test_tournament_carries_best_first() {
        let cities = circle(12);
        let pop = random_population(&cities, 9, 3);
        let mut rng = create_rng(Some(4));
        let next = Strategy::BinaryTournament
            .breed(&pop, 9, Crossover::ThreePointExchange, &mut rng)
            .unwrap();
        assert_eq!(next.len(), 9);
        assert_eq!(next[0].as_slice(), pop.best().tour());
    }

    #[test]
    fn test_odd_sizes_truncate_overshoot() {
        let cities = circle(10);
        for size in [2usize, 3, 5, 7] {
            let pop = random_population(&cities, size, size as u64);
            let mut rng = create_rng(Some(9));
            for strategy in [Strategy::Truncation, Strategy::BinaryTournament] {
                let next = strategy
                    .breed(&pop, size, strategy.default_crossover(), &mut rng)
                    .unwrap();
                assert_eq!(next.len(), size, "{strategy:?} with size {size}");
                assert!(next.iter().all(|t| is_permutation(t, 10)));
            }
        }
    }

    #[test]
    fn test_tournament_favors_best() {
        let pop = ranked_population();
        assert_eq!(pop.best().fitness(), 10.0);
        let mut rng = create_rng(Some(42));

        let mut counts = [0u32; 4];
        let n = 10000;
        for _ in 0..n {
            counts[tournament(pop.individuals(), 2, &mut rng)] += 1;
        }
        // Sorted pool: index 0 wins any tournament it enters (P = 7/16).
        assert!(
            counts[0] > counts[3],
            "best should be picked more often: {counts:?}"
        );
        assert!(counts[0] > 3500, "got {counts:?}");
    }

    #[test]
    fn test_tournament_size_1_is_random() {
        let pop = ranked_population();
        let mut rng = create_rng(Some(42));

        let mut counts = [0u32; 4];
        for _ in 0..10000 {
            counts[tournament(pop.individuals(), 1, &mut rng)] += 1;
        }
        for &c in &counts {
            assert!(c > 1500, "expected uniform, got counts: {counts:?}");
        }
    }

    #[test]
    fn test_breed_propagates_degenerate_input() {
        let cities = circle(3);
        let pop = random_population(&cities, 4, 5);
        let mut rng = create_rng(Some(1));
        let err = Strategy::BinaryTournament
            .breed(&pop, 4, Crossover::ThreePointExchange, &mut rng)
            .unwrap_err();
        assert!(matches!(err, crate::TspError::DegenerateInput { .. }));
    }
}
