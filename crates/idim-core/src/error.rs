//! Error types for intrinsic dimension estimation
//!
//! Provides a unified error type for all idim crates.

use thiserror::Error;

/// Core error type for intrinsic dimension estimation
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} {what}, got {actual}")]
    InsufficientData {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A recognized option whose algorithm is not available
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// Threading or parallelization error
    #[error("Execution error: {0}")]
    Execution(String),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for an option value outside its allowed set
    pub fn unknown_option(name: &str, value: &str, allowed: &[&str]) -> Self {
        Self::InvalidParameter(format!(
            "Unknown {name} '{value}'; expected one of: {}",
            allowed.join(", ")
        ))
    }

    /// Create an error for too few samples
    pub fn too_few_samples(expected: usize, actual: usize) -> Self {
        Self::InsufficientData {
            what: "samples",
            expected,
            actual,
        }
    }

    /// Create an error for too few features
    pub fn too_few_features(expected: usize, actual: usize) -> Self {
        Self::InsufficientData {
            what: "features",
            expected,
            actual,
        }
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::InvalidInput(format!("{context} contains NaN or infinite values"))
    }
}
