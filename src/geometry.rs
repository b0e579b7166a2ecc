//! Geometry and fitness.
//!
//! Cities are immutable 2-D points loaded once and shared read-only. City
//! ids are 1-based positions in a [`Cities`] table: id `k` lives at
//! index `k - 1`.

use crate::error::{Result, TspError};
use crate::permutation::permutation_defect;

/// A city location.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    pub x: f64,
    pub y: f64,
}

impl City {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: &City) -> f64 {
        pair_distance(self, other)
    }
}

/// Euclidean distance between two cities. Symmetric.
pub fn pair_distance(a: &City, b: &City) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Read-only table of city locations indexed by 1-based id.
///
/// # Examples
///
/// ```
/// use u_tsp_evolve::geometry::{Cities, City};
///
/// let cities = Cities::new(vec![City::new(0.0, 0.0), City::new(3.0, 4.0)]);
/// assert_eq!(cities.len(), 2);
/// assert!((cities.distance(1, 2) - 5.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cities {
    locations: Vec<City>,
}

impl Cities {
    pub fn new(locations: Vec<City>) -> Self {
        Self { locations }
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Returns the city with 1-based `id`, if present.
    pub fn get(&self, id: usize) -> Option<&City> {
        id.checked_sub(1).and_then(|idx| self.locations.get(idx))
    }

    /// Distance between the cities with ids `a` and `b`.
    ///
    /// # Panics
    ///
    /// Panics if either id is outside `1..=len`.
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        pair_distance(&self.locations[a - 1], &self.locations[b - 1])
    }

    pub fn iter(&self) -> impl Iterator<Item = &City> {
        self.locations.iter()
    }
}

impl From<Vec<(f64, f64)>> for Cities {
    fn from(points: Vec<(f64, f64)>) -> Self {
        Self::new(points.into_iter().map(|(x, y)| City::new(x, y)).collect())
    }
}

/// Total length of the closed tour: every consecutive leg plus the leg
/// from the last city back to the first.
///
/// Invariant under cyclic rotation and under reversal of `tour`.
///
/// # Errors
///
/// [`TspError::InvalidTour`] if `tour` is not a permutation of
/// `1..=cities.len()` (empty, wrong length, out-of-range or repeated id).
pub fn tour_length(tour: &[usize], cities: &Cities) -> Result<f64> {
    if let Some(reason) = permutation_defect(tour, cities.len()) {
        return Err(TspError::InvalidTour {
            len: tour.len(),
            reason,
        });
    }
    let n = tour.len();
    let closing = cities.distance(tour[n - 1], tour[0]);
    let legs: f64 = tour.windows(2).map(|w| cities.distance(w[0], w[1])).sum();
    Ok(closing + legs)
}
