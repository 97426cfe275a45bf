// noise/mod.rs
// Stochastic kernels that turn a clean curve into synthetic measurement scatter

pub mod pink;


use std::fmt;

use rand::Rng;
use rand_distr::{Distribution, Normal, Poisson, StandardNormal};
use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::{ensure_same_len, DielectricError, Result};

/// Selector names accepted by [`NoiseKernel::from_selector`].
pub const KERNEL_NAMES: [&str; 5] = ["awgn", "pink", "poisson", "speckle", "frequency"];

/// One perturbation kernel with its parameter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kernel", rename_all = "snake_case")]
pub enum NoiseKernel {
    /// Additive white Gaussian noise, `Normal(0, σ)` per point.
    Gaussian { std_dev: f64 },
    /// 1/f noise trace of unit variance, scaled by σ.
    Pink { std_dev: f64 },
    /// Shot noise: `Poisson(value·scale) / scale`.
    Poisson { scale: f64 },
    /// Multiplicative Gaussian: `value + value·Normal(0, σ)`.
    Speckle { std_dev: f64 },
    /// Additive Gaussian with `σ = scale·log10(freq + 1)`.
    FrequencyDependent { scale: f64 },
}

impl Default for NoiseKernel {
    fn default() -> Self {
        NoiseKernel::Gaussian {
            std_dev: config::DEFAULT_NOISE_STD_DEV,
        }
    }
}

impl NoiseKernel {
    /// Build a kernel from its selector name.
    ///
    /// `std_dev` feeds the Gaussian, pink and speckle kernels, `scale` the
    /// Poisson and frequency-dependent ones.
    pub fn from_selector(name: &str, std_dev: f64, scale: f64) -> Result<Self> {
        let kernel = match name.trim().to_ascii_lowercase().as_str() {
            "awgn" | "gaussian" => NoiseKernel::Gaussian { std_dev },
            "pink" => NoiseKernel::Pink { std_dev },
            "poisson" => NoiseKernel::Poisson { scale },
            "speckle" => NoiseKernel::Speckle { std_dev },
            "frequency" | "frequency_dependent" => NoiseKernel::FrequencyDependent { scale },
            _ => {
                return Err(DielectricError::UnsupportedKernel {
                    name: name.to_string(),
                    valid: KERNEL_NAMES.join(", "),
                })
            }
        };
        kernel.validate()?;
        Ok(kernel)
    }

    /// Default `scale` for a selector: the Poisson count scale or the
    /// frequency-dependent noise slope.
    pub fn default_scale(name: &str) -> f64 {
        match name.trim().to_ascii_lowercase().as_str() {
            "poisson" => config::DEFAULT_POISSON_SCALE,
            _ => config::DEFAULT_FREQUENCY_NOISE_SCALE,
        }
    }

    /// Kernel with the default parameter for its kind.
    pub fn with_defaults(name: &str) -> Result<Self> {
        Self::from_selector(name, config::DEFAULT_NOISE_STD_DEV, Self::default_scale(name))
    }

    pub fn name(&self) -> &'static str {
        match self {
            NoiseKernel::Gaussian { .. } => "awgn",
            NoiseKernel::Pink { .. } => "pink",
            NoiseKernel::Poisson { .. } => "poisson",
            NoiseKernel::Speckle { .. } => "speckle",
            NoiseKernel::FrequencyDependent { .. } => "frequency",
        }
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            NoiseKernel::Gaussian { std_dev }
            | NoiseKernel::Pink { std_dev }
            | NoiseKernel::Speckle { std_dev } => check_non_negative("noise std_dev", std_dev),
            NoiseKernel::FrequencyDependent { scale } => {
                check_non_negative("frequency noise scale", scale)
            }
            NoiseKernel::Poisson { scale } => {
                if !scale.is_finite() || scale <= 0.0 {
                    return Err(DielectricError::InvalidParameter(format!(
                        "poisson scale must be positive and finite, got {}",
                        scale
                    )));
                }
                Ok(())
            }
        }
    }

    /// Perturb `signal`, returning a new series of the same length.
    ///
    /// `frequencies` must be parallel to `signal`; only the
    /// frequency-dependent kernel reads its values.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        signal: &[f64],
        frequencies: &[f64],
        rng: &mut R,
    ) -> Result<Vec<f64>> {
        ensure_same_len("noise signal vs frequencies", signal.len(), frequencies.len())?;
        self.validate()?;

        match *self {
            NoiseKernel::Gaussian { std_dev } => add_gaussian_noise(signal, std_dev, rng),
            NoiseKernel::Pink { std_dev } => add_pink_noise(signal, std_dev, rng),
            NoiseKernel::Poisson { scale } => add_poisson_noise(signal, scale, rng),
            NoiseKernel::Speckle { std_dev } => add_speckle_noise(signal, std_dev, rng),
            NoiseKernel::FrequencyDependent { scale } => {
                add_frequency_dependent_noise(signal, frequencies, scale, rng)
            }
        }
    }
}

impl fmt::Display for NoiseKernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            NoiseKernel::Gaussian { std_dev }
            | NoiseKernel::Pink { std_dev }
            | NoiseKernel::Speckle { std_dev } => write!(f, "{} (σ={})", self.name(), std_dev),
            NoiseKernel::Poisson { scale } | NoiseKernel::FrequencyDependent { scale } => {
                write!(f, "{} (scale={})", self.name(), scale)
            }
        }
    }
}

/// Free-function form of [`NoiseKernel::apply`].
pub fn apply_noise<R: Rng + ?Sized>(
    kernel: &NoiseKernel,
    signal: &[f64],
    frequencies: &[f64],
    rng: &mut R,
) -> Result<Vec<f64>> {
    kernel.apply(signal, frequencies, rng)
}

fn check_non_negative(label: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(DielectricError::InvalidParameter(format!(
            "{} must be non-negative and finite, got {}",
            label, value
        )));
    }
    Ok(())
}

fn normal(std_dev: f64) -> Result<Normal<f64>> {
    Normal::new(0.0, std_dev)
        .map_err(|e| DielectricError::InvalidParameter(format!("normal(0, {}): {}", std_dev, e)))
}

pub fn add_gaussian_noise<R: Rng + ?Sized>(
    signal: &[f64],
    std_dev: f64,
    rng: &mut R,
) -> Result<Vec<f64>> {
    let dist = normal(std_dev)?;
    Ok(signal.iter().map(|&v| v + dist.sample(rng)).collect())
}

pub fn add_pink_noise<R: Rng + ?Sized>(
    signal: &[f64],
    std_dev: f64,
    rng: &mut R,
) -> Result<Vec<f64>> {
    check_non_negative("noise std_dev", std_dev)?;
    let trace = pink::pink_noise(signal.len(), rng);
    Ok(signal
        .iter()
        .zip(trace)
        .map(|(&v, n)| v + std_dev * n)
        .collect())
}

/// Negative and NaN inputs are clipped to zero before sampling, so the
/// output is never negative.
pub fn add_poisson_noise<R: Rng + ?Sized>(
    signal: &[f64],
    scale: f64,
    rng: &mut R,
) -> Result<Vec<f64>> {
    NoiseKernel::Poisson { scale }.validate()?;

    signal
        .iter()
        .map(|&v| {
            let clipped = if v.is_nan() || v < 0.0 { 0.0 } else { v };
            let rate = clipped * scale;
            if rate == 0.0 {
                return Ok(0.0);
            }
            let dist = Poisson::new(rate).map_err(|e| {
                DielectricError::InvalidParameter(format!("poisson rate {}: {}", rate, e))
            })?;
            let count: f64 = dist.sample(rng);
            Ok(count / scale)
        })
        .collect()
}

pub fn add_speckle_noise<R: Rng + ?Sized>(
    signal: &[f64],
    std_dev: f64,
    rng: &mut R,
) -> Result<Vec<f64>> {
    let dist = normal(std_dev)?;
    Ok(signal.iter().map(|&v| v + v * dist.sample(rng)).collect())
}

pub fn add_frequency_dependent_noise<R: Rng + ?Sized>(
    signal: &[f64],
    frequencies: &[f64],
    scale: f64,
    rng: &mut R,
) -> Result<Vec<f64>> {
    ensure_same_len("noise signal vs frequencies", signal.len(), frequencies.len())?;
    check_non_negative("frequency noise scale", scale)?;

    signal
        .iter()
        .zip(frequencies)
        .map(|(&v, &f)| {
            let std_dev = scale * (f + 1.0).log10();
            if !std_dev.is_finite() || std_dev < 0.0 {
                return Err(DielectricError::InvalidFrequency(f));
            }
            let z: f64 = StandardNormal.sample(rng);
            Ok(v + std_dev * z)
        })
        .collect()
}
