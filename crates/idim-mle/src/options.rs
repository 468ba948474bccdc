//! Estimator configuration
//!
//! [`MleOptions`] is immutable once built. It is constructed through
//! [`MleOptionsBuilder`], which validates every range up front, and it
//! deserializes through the same builder so a configuration file can never
//! produce an unvalidated value.

use crate::aggregate::Combination;
use crate::noise::NoiseModel;
use idim_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default number of neighbors for the neighborhood search
pub const DEFAULT_N_NEIGHBORS: usize = 20;

/// Default number of neighbors per point in the global (non-neighborhood) mode
pub const DEFAULT_K: usize = 5;

/// How the integrals of the noise-corrected estimator are approximated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IntegralApproximation {
    /// Taylor expansion of `r^(m-1)` as in Haro et al. (2008)
    #[default]
    #[serde(rename = "Haro")]
    Haro,
    /// `r` factored out of the density, `r^(m-2)` expanded instead
    #[serde(rename = "guaranteed.convergence")]
    GuaranteedConvergence,
    /// Fixed-point iteration on `m`; recognized but not available
    #[serde(rename = "iteration")]
    Iteration,
}

impl IntegralApproximation {
    pub const NAMES: &'static [&'static str] = &["Haro", "guaranteed.convergence", "iteration"];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Haro => "Haro",
            Self::GuaranteedConvergence => "guaranteed.convergence",
            Self::Iteration => "iteration",
        }
    }

    /// Fail unless this approximation can be computed
    pub fn ensure_supported(&self) -> Result<()> {
        match self {
            Self::Iteration => Err(Error::NotImplemented(
                "integral_approximation='iteration' is not available; \
                 use 'Haro' or 'guaranteed.convergence'"
                    .to_string(),
            )),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for IntegralApproximation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IntegralApproximation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Haro" => Ok(Self::Haro),
            "guaranteed.convergence" => Ok(Self::GuaranteedConvergence),
            "iteration" => Ok(Self::Iteration),
            other => Err(Error::unknown_option(
                "integral_approximation",
                other,
                Self::NAMES,
            )),
        }
    }
}

/// Validated configuration of the maximum-likelihood estimator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MleOptionsBuilder")]
pub struct MleOptions {
    noise: Option<NoiseModel>,
    sigma: f64,
    noise_dim: Option<usize>,
    integral_approximation: IntegralApproximation,
    unbiased: bool,
    neighborhood_based: bool,
    k_global: usize,
}

impl Default for MleOptions {
    fn default() -> Self {
        Self {
            noise: None,
            sigma: 0.0,
            noise_dim: None,
            integral_approximation: IntegralApproximation::Haro,
            unbiased: false,
            neighborhood_based: true,
            k_global: DEFAULT_K,
        }
    }
}

impl MleOptions {
    pub fn builder() -> MleOptionsBuilder {
        MleOptionsBuilder::default()
    }

    /// Transition density, `None` for the closed-form estimator
    pub fn noise(&self) -> Option<NoiseModel> {
        self.noise
    }

    /// Standard deviation of the noise
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Dimensionality of the noise, if known
    pub fn noise_dim(&self) -> Option<usize> {
        self.noise_dim
    }

    pub fn integral_approximation(&self) -> IntegralApproximation {
        self.integral_approximation
    }

    /// Whether the `k - 2` degrees-of-freedom correction is applied
    pub fn unbiased(&self) -> bool {
        self.unbiased
    }

    pub fn neighborhood_based(&self) -> bool {
        self.neighborhood_based
    }

    /// Neighbors per point searched in the global mode (`K`)
    pub fn k_global(&self) -> usize {
        self.k_global
    }
}

/// Builder for [`MleOptions`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MleOptionsBuilder {
    noise: Option<NoiseModel>,
    sigma: f64,
    noise_dim: Option<usize>,
    integral_approximation: IntegralApproximation,
    unbiased: bool,
    neighborhood_based: bool,
    k_global: usize,
}

impl Default for MleOptionsBuilder {
    fn default() -> Self {
        let defaults = MleOptions::default();
        Self {
            noise: defaults.noise,
            sigma: defaults.sigma,
            noise_dim: defaults.noise_dim,
            integral_approximation: defaults.integral_approximation,
            unbiased: defaults.unbiased,
            neighborhood_based: defaults.neighborhood_based,
            k_global: defaults.k_global,
        }
    }
}

impl MleOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the transition density (`None` disables noise correction)
    pub fn noise(mut self, noise: Option<NoiseModel>) -> Self {
        self.noise = noise;
        self
    }

    /// Sets the noise standard deviation
    pub fn sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    /// Sets the noise dimensionality (at least the number of features)
    pub fn noise_dim(mut self, noise_dim: Option<usize>) -> Self {
        self.noise_dim = noise_dim;
        self
    }

    pub fn integral_approximation(mut self, approximation: IntegralApproximation) -> Self {
        self.integral_approximation = approximation;
        self
    }

    pub fn unbiased(mut self, unbiased: bool) -> Self {
        self.unbiased = unbiased;
        self
    }

    pub fn neighborhood_based(mut self, neighborhood_based: bool) -> Self {
        self.neighborhood_based = neighborhood_based;
        self
    }

    /// Sets `K`, the neighbors per point searched in the global mode
    pub fn k_global(mut self, k: usize) -> Self {
        self.k_global = k;
        self
    }

    /// Validate and build the options
    ///
    /// `iteration` is accepted here because it is a recognized name; it is
    /// rejected when an estimate is requested.
    pub fn build(self) -> Result<MleOptions> {
        if !self.sigma.is_finite() || self.sigma < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "sigma must be a finite non-negative number, got {}",
                self.sigma
            )));
        }
        if self.k_global == 0 {
            return Err(Error::InvalidParameter("K must be at least 1".to_string()));
        }
        if self.noise_dim == Some(0) {
            return Err(Error::InvalidParameter(
                "noise dimension must be at least 1".to_string(),
            ));
        }

        Ok(MleOptions {
            noise: self.noise,
            sigma: self.sigma,
            noise_dim: self.noise_dim,
            integral_approximation: self.integral_approximation,
            unbiased: self.unbiased,
            neighborhood_based: self.neighborhood_based,
            k_global: self.k_global,
        })
    }
}

impl TryFrom<MleOptionsBuilder> for MleOptions {
    type Error = Error;

    fn try_from(builder: MleOptionsBuilder) -> Result<Self> {
        builder.build()
    }
}

/// Per-call parameters of a fit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitParams {
    /// Neighbors per point; defaults to [`DEFAULT_N_NEIGHBORS`]
    pub n_neighbors: Option<usize>,
    /// How pointwise estimates are combined
    pub comb: Combination,
    /// Also compute neighborhood-averaged pointwise estimates
    pub smooth: bool,
    /// Worker threads: `1` sequential, `0` all cores
    pub n_jobs: usize,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            n_neighbors: None,
            comb: Combination::Mle,
            smooth: false,
            n_jobs: 1,
        }
    }
}

impl FitParams {
    pub fn with_n_neighbors(mut self, n_neighbors: usize) -> Self {
        self.n_neighbors = Some(n_neighbors);
        self
    }

    pub fn with_comb(mut self, comb: Combination) -> Self {
        self.comb = comb;
        self
    }

    pub fn with_smoothing(mut self, smooth: bool) -> Self {
        self.smooth = smooth;
        self
    }

    pub fn with_n_jobs(mut self, n_jobs: usize) -> Self {
        self.n_jobs = n_jobs;
        self
    }
}
