//! Transition densities for the noise-corrected estimator
//!
//! A transition density `f(r | s)` gives the probability density that a
//! neighbor observed at radius `s` truly lies at radius `r`, for a noise scale
//! `sigma`. The only named model is the Gaussian used by Haro et al. (2008).
//!
//! For [`IntegralApproximation::GuaranteedConvergence`] the density is
//! multiplied by `r` before integration. That rewrite is expressed by
//! [`ResolvedDensity`], which is derived from the options on every fit and
//! never stored back into them, so resolving twice can never apply the
//! factor twice.

use crate::options::IntegralApproximation;
use idim_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// A density over candidate true radii
pub trait TransitionDensity: Send + Sync {
    /// Density at true radius `r` for observed radius `s`
    ///
    /// `noise_dim` is the dimensionality of the noise; the Gaussian model
    /// ignores it.
    fn density(&self, r: f64, s: f64, sigma: f64, noise_dim: Option<usize>) -> f64;
}

/// Named noise models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoiseModel {
    /// Gaussian transition density centered at the observed radius
    #[serde(rename = "dnoiseGaussH")]
    GaussianHaro,
}

impl NoiseModel {
    pub const NAMES: &'static [&'static str] = &["dnoiseGaussH"];

    pub fn name(&self) -> &'static str {
        match self {
            Self::GaussianHaro => "dnoiseGaussH",
        }
    }

    /// Resolve the density actually integrated for `approximation`
    pub fn resolve(self, approximation: IntegralApproximation) -> ResolvedDensity {
        ResolvedDensity {
            model: self,
            radius_weighted: approximation != IntegralApproximation::Haro,
        }
    }
}

impl TransitionDensity for NoiseModel {
    fn density(&self, r: f64, s: f64, sigma: f64, _noise_dim: Option<usize>) -> f64 {
        match self {
            Self::GaussianHaro => gaussian_density(r, s, sigma),
        }
    }
}

impl fmt::Display for NoiseModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NoiseModel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "dnoiseGaussH" => Ok(Self::GaussianHaro),
            other => Err(Error::unknown_option("noise model", other, Self::NAMES)),
        }
    }
}

/// Normal density with mean `s` and standard deviation `sigma`, evaluated at `r`
#[inline]
pub fn gaussian_density(r: f64, s: f64, sigma: f64) -> f64 {
    let z = (s - r) / sigma;
    (-0.5 * z * z).exp() / (sigma * (2.0 * PI).sqrt())
}

/// The density fed to the integrator for one fit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDensity {
    model: NoiseModel,
    radius_weighted: bool,
}

impl ResolvedDensity {
    pub fn model(&self) -> NoiseModel {
        self.model
    }

    /// Whether the model density is multiplied by `r`
    pub fn is_radius_weighted(&self) -> bool {
        self.radius_weighted
    }
}

impl TransitionDensity for ResolvedDensity {
    #[inline]
    fn density(&self, r: f64, s: f64, sigma: f64, noise_dim: Option<usize>) -> f64 {
        let base = self.model.density(r, s, sigma, noise_dim);
        if self.radius_weighted {
            r * base
        } else {
            base
        }
    }
}
