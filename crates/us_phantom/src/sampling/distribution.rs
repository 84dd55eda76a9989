//! Statistical distributions for scatterer amplitude and phase.
//!
//! Every distribution draws an amplitude `a` and a raw phase sample `p` from the same law and
//! produces the complex scatterer `a * (cos(2πp) + i·sin(2πp))`.
//!
//! | distribution | law |
//! |---|---|
//! | `uniform` | `U(0, 1)` |
//! | `gaussian` | `N(1, 0.008)` |
//! | `rayleigh` | `Rayleigh(σ = 2)` |
use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use num_complex::Complex64;
use rand::RngCore;
use rand_distr::{Distribution as _, Normal, Rayleigh, StandardUniform};

use crate::error::{Error, Result};

pub const GAUSSIAN_MEAN: f64 = 1.0;
pub const GAUSSIAN_STD_DEV: f64 = 0.008;
pub const RAYLEIGH_SCALE: f64 = 2.0;

/// Distribution used to draw scatterer amplitudes and phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Distribution {
    Uniform,
    Gaussian,
    Rayleigh,
}

impl Distribution {
    /// Names accepted by [`Distribution::from_str`].
    pub const SUPPORTED: [&'static str; 3] = ["uniform", "gaussian", "rayleigh"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Distribution::Uniform => "uniform",
            Distribution::Gaussian => "gaussian",
            Distribution::Rayleigh => "rayleigh",
        }
    }

    /// Build the sampling law with this distribution's parameters.
    pub fn law(&self) -> Result<AmplitudeLaw> {
        let law = match self {
            Distribution::Uniform => AmplitudeLaw::Uniform(StandardUniform),
            Distribution::Gaussian => AmplitudeLaw::Gaussian(
                Normal::new(GAUSSIAN_MEAN, GAUSSIAN_STD_DEV)
                    .map_err(|err| Error::Other(format!("invalid {self} parameters: {err}")))?,
            ),
            Distribution::Rayleigh => AmplitudeLaw::Rayleigh(
                Rayleigh::new(RAYLEIGH_SCALE)
                    .map_err(|err| Error::Other(format!("invalid {self} parameters: {err}")))?,
            ),
        };
        Ok(law)
    }
}

/// A parameterized amplitude/phase law, built once per field by [`Distribution::law`].
#[derive(Clone, Copy, Debug)]
pub enum AmplitudeLaw {
    Uniform(StandardUniform),
    Gaussian(Normal<f64>),
    Rayleigh(Rayleigh<f64>),
}

impl AmplitudeLaw {
    /// Draw one sample from the law.
    pub fn sample(&self, rng: &mut dyn RngCore) -> f64 {
        match self {
            AmplitudeLaw::Uniform(law) => law.sample(rng),
            AmplitudeLaw::Gaussian(law) => law.sample(rng),
            AmplitudeLaw::Rayleigh(law) => law.sample(rng),
        }
    }

    /// Draw one complex scatterer: amplitude and phase sample, phase scaled by 2π.
    pub fn scatterer(&self, rng: &mut dyn RngCore) -> Complex64 {
        let amplitude = self.sample(rng);
        let phase = TAU * self.sample(rng);
        Complex64::from_polar(amplitude, phase)
    }
}

impl FromStr for Distribution {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uniform" => Ok(Distribution::Uniform),
            "gaussian" => Ok(Distribution::Gaussian),
            "rayleigh" => Ok(Distribution::Rayleigh),
            _ => Err(Error::UnsupportedDistribution {
                name: s.to_owned(),
                supported: Self::SUPPORTED.join(" "),
            }),
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
