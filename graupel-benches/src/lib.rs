//! Synthetic inputs shared by the graupel benchmarks.
//!
//! Everything is seeded so benchmark runs are reproducible: the same seed
//! always yields the same mask, and therefore the same component structure.

use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Generates a boolean site mask with the given fill fraction.
///
/// # Examples
/// ```
/// use graupel_benches::random_mask;
///
/// let mask = random_mask(64, 0.5, 42);
/// assert_eq!(mask.len(), 64);
/// assert_eq!(mask, random_mask(64, 0.5, 42));
/// ```
#[must_use]
pub fn random_mask(size: usize, fill: f64, seed: u64) -> Vec<bool> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..size).map(|_| rng.gen_bool(fill)).collect()
}

/// Generates a shuffled ordering of the active sites of `mask`.
///
/// Used to benchmark point-wise growth with a worst-case-ish insertion
/// order instead of the cache-friendly row-major scan.
#[must_use]
pub fn shuffled_active_sites(mask: &[bool], seed: u64) -> Vec<usize> {
    use rand::seq::SliceRandom;

    let mut active: Vec<usize> = mask
        .iter()
        .enumerate()
        .filter_map(|(index, &on)| on.then_some(index))
        .collect();
    let mut rng = SmallRng::seed_from_u64(seed);
    active.shuffle(&mut rng);
    active
}
