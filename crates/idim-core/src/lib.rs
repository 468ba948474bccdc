//! Core traits and types for intrinsic dimension estimation
//!
//! This crate provides the pieces every estimator in the workspace shares:
//!
//! 1. **Errors** - a single [`Error`] enum and [`Result`] alias
//! 2. **Traits** - the estimator lifecycle ([`DimensionEstimator`]) and the
//!    per-distance-vector contract ([`DistanceDimensionEstimator`])
//! 3. **Execution engines** - sequential or Rayon-backed fan-out over rows
//! 4. **Collaborators** - exact k-nearest-neighbor search, row norms and
//!    matrix validation
//!
//! # Example
//!
//! ```rust
//! use idim_core::{knn, SequentialEngine};
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![1.0, 0.0],
//!     vec![0.0, 2.0],
//!     vec![3.0, 3.0],
//! ];
//! let neighbors = knn(&data, 2, &SequentialEngine).unwrap();
//! assert_eq!(neighbors.indices()[0], vec![1, 2]);
//! ```

pub mod error;
pub mod execution;
pub mod neighbors;
pub mod traits;
pub mod utils;
pub mod validation;

pub use error::{Error, Result};

pub use execution::{ExecutionEngine, ExecutionStrategy, JobsEngine, SequentialEngine};
#[cfg(feature = "parallel")]
pub use execution::ParallelEngine;

pub use neighbors::{knn, Neighbors};
pub use traits::{DimensionEstimator, DistanceDimensionEstimator, HasDimension};
pub use validation::check_matrix;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::{
        DimensionEstimator, DistanceDimensionEstimator, ExecutionEngine, HasDimension,
        JobsEngine, Neighbors, Result, SequentialEngine,
    };
}
