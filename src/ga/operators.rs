//! Permutation crossover operators for tours.
//!
//! Both operators take two parent tours over `1..=n`, produce two children,
//! check each child against the permutation invariant, and then apply one
//! [`mutate_by_swap`] to every child before returning it.
//!
//! # Crossover Operators
//!
//! - [`segment_substitution_crossover`]: injects the value set of one
//!   contiguous segment into the first parent's slots. Cheap, but keeps
//!   little of the second parent's arrangement.
//! - [`three_point_exchange_crossover`] (TPXWR): swaps the middle blocks of
//!   two three-block partitions and repairs duplicates from the donor's
//!   outer blocks, preserving positional blocks of both parents.
//!
//! # References
//!
//! - Goldberg & Lingle (1985), "Alleles, Loci, and the Traveling Salesman Problem"
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use crate::error::{Result, TspError};
use crate::permutation::{mutate_by_swap, permutation_defect, validate_permutation};
use rand::Rng;
use tracing::{instrument, warn};

/// Children produced by one crossover call.
pub type Offspring = (Vec<usize>, Vec<usize>);

// ============================================================================
// Operator selection
// ============================================================================

/// Recombination operator used by a selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Crossover {
    /// [`segment_substitution_crossover`]
    SegmentSubstitution,
    /// [`three_point_exchange_crossover`]
    ThreePointExchange,
}

impl Crossover {
    /// Smallest tour length for which the operator's cut ranges are non-empty.
    pub fn min_cities(self) -> usize {
        match self {
            Crossover::SegmentSubstitution => SEGMENT_SUBSTITUTION_MIN,
            Crossover::ThreePointExchange => THREE_POINT_EXCHANGE_MIN,
        }
    }

    /// Recombines `s` and `t` into two mutated children.
    pub fn apply<R: Rng>(self, s: &[usize], t: &[usize], rng: &mut R) -> Result<Offspring> {
        match self {
            Crossover::SegmentSubstitution => segment_substitution_crossover(s, t, rng),
            Crossover::ThreePointExchange => three_point_exchange_crossover(s, t, rng),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Crossover::SegmentSubstitution => "segment substitution crossover",
            Crossover::ThreePointExchange => "three-point exchange crossover",
        }
    }
}

const SEGMENT_SUBSTITUTION_MIN: usize = 3;
const THREE_POINT_EXCHANGE_MIN: usize = 4;

// ============================================================================
// Segment substitution
// ============================================================================

/// Segment substitution crossover.
///
/// # Algorithm
///
/// 1. Draw a cut `c` in `[1, n-2]` and a length `r` in `[1, n-1-c]`
/// 2. First child: scan a copy of `s`; every slot holding a value of
///    `s[c..c+r]` is overwritten with the next value of that segment
/// 3. Second child: the same scan over a copy of `s`, driven by `t[c..c+r]`
///
/// Outside the segment's value set, both children equal `s`; the only
/// contribution of `t` is the order of its segment's values.
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Errors
/// - [`TspError::DegenerateInput`] when `n < 3`
/// - [`TspError::InvalidPermutation`] when a parent or a child is not a
///   permutation of `1..=n`
#[instrument(level = "trace", skip(s, t, rng), fields(cities = s.len()))]
pub fn segment_substitution_crossover<R: Rng>(
    s: &[usize],
    t: &[usize],
    rng: &mut R,
) -> Result<Offspring> {
    let n = check_parents(s, t, Crossover::SegmentSubstitution)?;

    let c = rng.random_range(1..n - 1);
    let r = rng.random_range(1..n - c);

    let first = substitute_segment(s, &s[c..c + r]);
    let second = substitute_segment(s, &t[c..c + r]);

    finish(first, second, n, "segment substitution", rng)
}

/// Rewrites the slots of `base` that hold a value of `segment`, in scan
/// order, with the values of `segment` in order.
fn substitute_segment(base: &[usize], segment: &[usize]) -> Vec<usize> {
    let mut in_segment = vec![false; base.len() + 1];
    for &city in segment {
        in_segment[city] = true;
    }

    let mut child = base.to_vec();
    let mut next = segment.iter();
    for slot in child.iter_mut() {
        if in_segment[*slot] {
            if let Some(&city) = next.next() {
                *slot = city;
            }
        }
    }
    child
}

// ============================================================================
// Three-point exchange with repair (TPXWR)
// ============================================================================

/// Three-point exchange crossover with repair (TPXWR).
///
/// # Algorithm
///
/// 1. Draw cuts `cp1` in `[1, n-3]` and `cp2` in `[cp1+1, n-2]`, splitting
///    `s` into `a | b | c` and `t` into `d | e | f`
/// 2. Repair `e` against `a` and `c`: each value of `e` already present in
///    `a` or `c` is replaced by the first value of `d`, then of `f`, that
///    is not yet used in `a`, `c`, or `e`
/// 3. Repair `b` against `d` and `f` symmetrically, drawing from `a` then `c`
/// 4. Children are `a + e + c` and `d + b + f`
///
/// Step 2 always finds a replacement for valid parents: every value
/// missing from `a + e + c` lies outside `e`, hence in `d` or `f`, and the
/// number of duplicates equals the number of missing values. The same
/// argument covers step 3. A child that still fails the permutation check
/// is therefore reported as an error rather than patched.
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Errors
/// - [`TspError::DegenerateInput`] when `n < 4`
/// - [`TspError::InvalidPermutation`] when a parent or a child is not a
///   permutation of `1..=n`
#[instrument(level = "trace", skip(s, t, rng), fields(cities = s.len()))]
pub fn three_point_exchange_crossover<R: Rng>(
    s: &[usize],
    t: &[usize],
    rng: &mut R,
) -> Result<Offspring> {
    let n = check_parents(s, t, Crossover::ThreePointExchange)?;

    let cp1 = rng.random_range(1..n - 2);
    let cp2 = rng.random_range(cp1 + 1..n - 1);

    let (a, b, c) = (&s[..cp1], &s[cp1..cp2], &s[cp2..]);
    let (d, e, f) = (&t[..cp1], &t[cp1..cp2], &t[cp2..]);

    let e = repair_block(e, (a, c), (d, f), n);
    let b = repair_block(b, (d, f), (a, c), n);

    let first = [a, e.as_slice(), c].concat();
    let second = [d, b.as_slice(), f].concat();

    finish(first, second, n, "three-point exchange", rng)
}

/// Replaces values of `middle` that also occur in the `kept` outer blocks
/// with the first unused value found in `donors.0`, then `donors.1`.
///
/// A value with no available replacement is left in place.
fn repair_block(
    middle: &[usize],
    kept: (&[usize], &[usize]),
    donors: (&[usize], &[usize]),
    n: usize,
) -> Vec<usize> {
    let mut in_kept = vec![false; n + 1];
    for &city in kept.0.iter().chain(kept.1) {
        in_kept[city] = true;
    }
    let mut used = in_kept.clone();
    for &city in middle {
        used[city] = true;
    }

    let mut repaired = middle.to_vec();
    for slot in repaired.iter_mut() {
        if !in_kept[*slot] {
            continue;
        }
        let replacement = donors
            .0
            .iter()
            .chain(donors.1)
            .copied()
            .find(|&city| !used[city]);
        if let Some(city) = replacement {
            used[city] = true;
            *slot = city;
        }
    }
    repaired
}

// ============================================================================
// Helpers
// ============================================================================

/// Checks parent shape and validity, returning the shared length `n`.
fn check_parents(s: &[usize], t: &[usize], op: Crossover) -> Result<usize> {
    let n = s.len();
    if t.len() != n {
        return Err(TspError::InvalidPermutation {
            len: t.len(),
            reason: format!("parents differ in length ({n} vs {})", t.len()),
        });
    }
    if n < op.min_cities() {
        return Err(TspError::DegenerateInput {
            operator: op.name(),
            len: n,
            min: op.min_cities(),
        });
    }
    validate_permutation(s, n)?;
    validate_permutation(t, n)?;
    Ok(n)
}

/// Validates both children, then applies one swap mutation to each.
fn finish<R: Rng>(
    mut first: Vec<usize>,
    mut second: Vec<usize>,
    n: usize,
    operator: &'static str,
    rng: &mut R,
) -> Result<Offspring> {
    for child in [&first, &second] {
        if let Some(reason) = permutation_defect(child, n) {
            warn!(operator, %reason, "crossover produced a broken child");
            return Err(TspError::InvalidPermutation {
                len: child.len(),
                reason,
            });
        }
    }
    mutate_by_swap(&mut first, rng);
    mutate_by_swap(&mut second, rng);
    Ok((first, second))
}

// ============================================================================
// Tests
// ============================================================================
