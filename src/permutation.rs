//! Permutation utilities.
//!
//! Tours are permutations of the 1-based city ids `1..=n`. These helpers
//! check that invariant, draw uniformly random tours, and apply the swap
//! mutation used after every crossover.

use crate::error::{Result, TspError};
use rand::seq::SliceRandom;
use rand::Rng;

/// Returns `true` if `seq` holds each of `1..=n` exactly once.
///
/// Never mutates its input.
pub fn is_permutation(seq: &[usize], n: usize) -> bool {
    permutation_defect(seq, n).is_none()
}

/// Checks the permutation invariant, failing with
/// [`TspError::InvalidPermutation`] on the first defect found.
pub fn validate_permutation(seq: &[usize], n: usize) -> Result<()> {
    match permutation_defect(seq, n) {
        None => Ok(()),
        Some(reason) => Err(TspError::InvalidPermutation {
            len: seq.len(),
            reason,
        }),
    }
}

/// Describes why `seq` is not a permutation of `1..=n`, or `None` if it is.
pub(crate) fn permutation_defect(seq: &[usize], n: usize) -> Option<String> {
    if seq.len() != n {
        return Some(format!("expected {n} cities, found {}", seq.len()));
    }
    if n == 0 {
        return Some("tour is empty".into());
    }
    let mut seen = vec![false; n + 1];
    for (pos, &city) in seq.iter().enumerate() {
        if city == 0 || city > n {
            return Some(format!("city {city} at position {pos} is outside 1..={n}"));
        }
        if seen[city] {
            return Some(format!("city {city} repeated at position {pos}"));
        }
        seen[city] = true;
    }
    None
}

/// Returns a uniformly random permutation of `1..=n`.
///
/// # Errors
/// [`TspError::DegenerateInput`] when `n == 0`.
pub fn random_permutation<R: Rng>(n: usize, rng: &mut R) -> Result<Vec<usize>> {
    if n == 0 {
        return Err(TspError::DegenerateInput {
            operator: "random permutation",
            len: 0,
            min: 1,
        });
    }
    let mut tour: Vec<usize> = (1..=n).collect();
    tour.shuffle(rng);
    Ok(tour)
}

/// Swap mutation: exchange the cities at two uniformly drawn positions.
///
/// Positions are drawn with replacement, so the tour is left unchanged
/// when both draws coincide. A swap keeps a permutation a permutation.
///
/// # Complexity
/// O(1)
pub fn mutate_by_swap<R: Rng>(tour: &mut [usize], rng: &mut R) {
    let n = tour.len();
    if n == 0 {
        return;
    }
    let i = rng.random_range(0..n);
    let j = rng.random_range(0..n);
    tour.swap(i, j);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    #[test]
    fn test_identity_is_permutation() {
        assert!(is_permutation(&[1, 2, 3, 4], 4));
        assert!(is_permutation(&[4, 2, 1, 3], 4));
    }

    #[test]
    fn test_rejects_defects() {
        assert!(!is_permutation(&[], 0));
        assert!(!is_permutation(&[1, 2, 2], 3));
        assert!(!is_permutation(&[0, 1, 2], 3));
        assert!(!is_permutation(&[1, 2, 4], 3));
        assert!(!is_permutation(&[1, 2], 3));
    }

    #[test]
    fn test_validate_reports_duplicate() {
        let err = validate_permutation(&[3, 1, 3], 3).unwrap_err();
        match err {
            TspError::InvalidPermutation { len, reason } => {
                assert_eq!(len, 3);
                assert!(reason.contains("repeated"), "reason was {reason}");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_random_permutation_zero_is_degenerate() {
        let mut rng = create_rng(Some(1));
        assert!(matches!(
            random_permutation(0, &mut rng),
            Err(TspError::DegenerateInput { min: 1, .. })
        ));
    }

    #[test]
    fn test_random_permutation_single_city() {
        let mut rng = create_rng(Some(1));
        assert_eq!(random_permutation(1, &mut rng).unwrap(), vec![1]);
    }

    #[test]
    fn test_swap_eventually_changes_tour() {
        let mut rng = create_rng(Some(42));
        let original: Vec<usize> = (1..=10).collect();
        let changed = (0..100).any(|_| {
            let mut tour = original.clone();
            mutate_by_swap(&mut tour, &mut rng);
            tour != original
        });
        assert!(changed);
    }

    #[test]
    fn test_swap_empty_is_noop() {
        let mut rng = create_rng(Some(42));
        let mut tour: Vec<usize> = vec![];
        mutate_by_swap(&mut tour, &mut rng);
        assert!(tour.is_empty());
    }

    proptest! {
        #[test]
        fn prop_random_permutation_is_valid(n in 1usize..200, seed in any::<u64>()) {
            let mut rng = create_rng(Some(seed));
            let tour = random_permutation(n, &mut rng).unwrap();
            prop_assert!(is_permutation(&tour, n));
        }

        #[test]
        fn prop_swap_keeps_permutation(
            tour in (1usize..60).prop_flat_map(|n| Just((1..=n).collect::<Vec<_>>()).prop_shuffle()),
            seed in any::<u64>(),
        ) {
            let n = tour.len();
            let mut rng = create_rng(Some(seed));
            let mut mutated = tour.clone();
            mutate_by_swap(&mut mutated, &mut rng);
            prop_assert!(is_permutation(&mutated, n));
        }
    }
}
