//! Shared synthetic manifolds for integration tests

#![allow(dead_code)]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal, StandardNormal};

pub use approx::assert_relative_eq;

/// Uniform samples on a random `dim`-dimensional linear subspace of
/// `ambient`-dimensional space
///
/// Coordinates in the subspace are uniform on the unit cube; the embedding
/// basis is Gaussian, so the subspace is in general position.
pub fn linear_manifold(n: usize, dim: usize, ambient: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let basis: Vec<Vec<f64>> = (0..dim)
        .map(|_| (0..ambient).map(|_| rng.sample(StandardNormal)).collect())
        .collect();

    (0..n)
        .map(|_| {
            let coords: Vec<f64> = (0..dim).map(|_| rng.gen::<f64>()).collect();
            (0..ambient)
                .map(|a| coords.iter().zip(&basis).map(|(c, b)| c * b[a]).sum())
                .collect()
        })
        .collect()
}

/// Uniform samples on the unit hypercube of dimension `dim`
pub fn uniform_cube(n: usize, dim: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| (0..dim).map(|_| rng.gen::<f64>()).collect())
        .collect()
}

/// Uniform samples in the unit `dim`-ball, placed in the first `dim`
/// coordinates of `ambient`-dimensional space
pub fn uniform_ball(n: usize, dim: usize, ambient: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let direction: Vec<f64> = (0..dim).map(|_| rng.sample(StandardNormal)).collect();
            let norm = direction.iter().map(|x| x * x).sum::<f64>().sqrt();
            let radius = rng.gen::<f64>().powf(1.0 / dim as f64);
            let mut point = vec![0.0; ambient];
            for (p, d) in point.iter_mut().zip(&direction) {
                *p = radius * d / norm;
            }
            point
        })
        .collect()
}

/// Add isotropic Gaussian noise with standard deviation `sigma`
pub fn with_noise(data: &[Vec<f64>], sigma: f64, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let noise = Normal::new(0.0, sigma).expect("valid noise scale");
    data.iter()
        .map(|row| row.iter().map(|x| x + noise.sample(&mut rng)).collect())
        .collect()
}

/// Multiply every coordinate by `factor`
pub fn scaled(data: &[Vec<f64>], factor: f64) -> Vec<Vec<f64>> {
    data.iter()
        .map(|row| row.iter().map(|x| x * factor).collect())
        .collect()
}
