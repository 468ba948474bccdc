//! Maximum-likelihood intrinsic dimension estimation
//!
//! This crate estimates the intrinsic dimension of a point cloud from the
//! distances between each point and its nearest neighbors, following
//! Levina & Bickel (2004), with the noise correction of Haro et al. (2008).
//!
//! # Algorithm Overview
//!
//! 1. Find the `k` nearest neighbors of every point (or take them precomputed)
//! 2. Estimate a local dimension from each point's sorted neighbor radii,
//!    either in closed form or by integrating out Gaussian noise
//! 3. Combine the pointwise estimates into one global value
//! 4. Optionally average each estimate over its neighborhood
//!
//! Without neighborhoods the estimator instead uses one global sample of the
//! smallest distinct radii observed.
//!
//! # Example
//!
//! ```rust
//! use idim_mle::{Combination, FitParams, MleEstimator, MleOptions, NoiseModel};
//!
//! let data: Vec<Vec<f64>> = (0..60)
//!     .map(|i| {
//!         let t = i as f64 * 0.1;
//!         vec![t.cos(), t.sin(), 0.5 * t]
//!     })
//!     .collect();
//!
//! let options = MleOptions::builder()
//!     .noise(Some(NoiseModel::GaussianHaro))
//!     .sigma(0.001)
//!     .build()
//!     .unwrap();
//! let params = FitParams::default()
//!     .with_n_neighbors(6)
//!     .with_comb(Combination::Median);
//!
//! let result = MleEstimator::new(options).fit(&data, None, &params).unwrap();
//! println!("{result}");
//! assert!(result.dimension() < 2.0);
//! ```

pub mod aggregate;
pub mod estimator;
pub mod integral;
pub mod noise;
pub mod options;
pub mod pointwise;
pub mod result;
pub mod smooth;

pub use aggregate::{global_distance_sample, harmonic_mean, mean, median, Combination};
pub use estimator::MleEstimator;
pub use integral::{IntegralEvaluator, NeighborIntegrals, Quadrature};
pub use noise::{gaussian_density, NoiseModel, ResolvedDensity, TransitionDensity};
pub use options::{
    FitParams, IntegralApproximation, MleOptions, MleOptionsBuilder, DEFAULT_K,
    DEFAULT_N_NEIGHBORS,
};
pub use pointwise::{closed_form_estimate, kfac, PointwiseEstimator};
pub use result::FitResult;
pub use smooth::smooth_pointwise;

// Re-export core types
pub use idim_core::{DimensionEstimator, Error, HasDimension, Neighbors, Result};
