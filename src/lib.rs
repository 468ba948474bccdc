//! Intrinsic dimension estimation
//!
//! Umbrella crate re-exporting the workspace members:
//!
//! - [`idim_core`]: errors, estimator traits, execution engines,
//!   exact nearest-neighbor search and input validation
//! - [`idim_mle`]: the maximum-likelihood estimator with optional
//!   Gaussian noise correction
//!
//! # Example
//!
//! ```rust
//! use intrinsic_dim::prelude::*;
//!
//! // A noise-free circle in three dimensions
//! let data: Vec<Vec<f64>> = (0..100)
//!     .map(|i| {
//!         let t = i as f64 * std::f64::consts::TAU / 100.0;
//!         vec![t.cos(), t.sin(), 0.0]
//!     })
//!     .collect();
//!
//! let estimator = MleEstimator::new(MleOptions::default());
//! let dimension = estimator
//!     .fit_predict(&data, None, &FitParams::default().with_n_neighbors(20))
//!     .unwrap();
//! assert!((dimension - 1.0).abs() < 0.3);
//! ```

pub use idim_core;
pub use idim_mle;

pub use idim_core::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use idim_core::prelude::*;
    pub use idim_mle::{
        Combination, FitParams, FitResult, IntegralApproximation, MleEstimator, MleOptions,
        NoiseModel,
    };
}
