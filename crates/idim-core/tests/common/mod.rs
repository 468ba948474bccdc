//! Shared utilities for integration tests

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub use approx::assert_relative_eq;

/// Uniform random points in the unit hypercube, reproducible from `seed`
pub fn uniform_points(n: usize, dim: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| (0..dim).map(|_| rng.gen::<f64>()).collect())
        .collect()
}

/// Reference neighbor distances: every other row, sorted, first `k`
pub fn naive_sorted_distances(data: &[Vec<f64>], query: usize, k: usize) -> Vec<f64> {
    let mut d: Vec<f64> = data
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != query)
        .map(|(_, row)| idim_core::utils::euclidean(&data[query], row))
        .collect();
    d.sort_by(|a, b| a.partial_cmp(b).unwrap());
    d.truncate(k);
    d
}
