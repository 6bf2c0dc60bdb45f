//! Uniform sampling helpers shared by every generator component.
//!
//! All randomness flows through these functions and an injected `Rng`, so a
//! seeded generator replays to an identical roster.

use rand::Rng;

/// Uniform random index below `len`. Returns 0 for an empty range.
pub fn random_index(rng: &mut impl Rng, len: usize) -> usize {
    if len <= 1 {
        return 0;
    }
    rng.random_range(0..len)
}

/// Pick one element of a slice uniformly at random.
pub fn sample<'a, T>(rng: &mut impl Rng, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let index = random_index(rng, items.len());
    items.get(index)
}

/// Remove and return one uniformly chosen element. Swap-removal keeps this
/// O(1); callers never depend on the residual pool order, only on the draw
/// sequence.
pub fn sample_no_replace<T>(rng: &mut impl Rng, pool: &mut Vec<T>) -> Option<T> {
    if pool.is_empty() {
        return None;
    }
    let index = random_index(rng, pool.len());
    Some(pool.swap_remove(index))
}

/// Weighted coin flip: true with probability `numerator / denominator`.
pub fn random_chance(rng: &mut impl Rng, numerator: u32, denominator: u32) -> bool {
    if denominator == 0 {
        return false;
    }
    rng.random_range(0..denominator) < numerator
}
