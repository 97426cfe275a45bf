//! Physical constants and unit conventions.
//!
//! Units used throughout the crate:
//! - Frequency: hertz (Hz)
//! - Radius: micrometre (µm)
//! - Shell thickness: nanometre-like input unit, scaled by [`THICKNESS_SCALE`] against radius
//! - Force: piconewton-like output unit (see [`FORCE_PERMITTIVITY_SCALE`])

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Vacuum permittivity in F/m, as used by the complex permittivity primitive.
pub const VACUUM_PERMITTIVITY: f64 = 8.854e-12;

/// Vacuum permittivity as it enters the DEP force expression.
/// Six orders of magnitude above [`VACUUM_PERMITTIVITY`]: radius is in µm and
/// the force is reported in pN.
pub const FORCE_PERMITTIVITY_SCALE: f64 = 8.854e-6;

/// Factor applied to shell thickness before it is combined with a radius.
pub const THICKNESS_SCALE: f64 = 0.001;

/// Unit a user-entered sweep start/stop frequency is expressed in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrequencyUnit {
    #[default]
    #[serde(rename = "Hz")]
    Hz,
    #[serde(rename = "kHz")]
    KHz,
    #[serde(rename = "MHz")]
    MHz,
}

impl FrequencyUnit {
    pub const ALL: [FrequencyUnit; 3] = [FrequencyUnit::Hz, FrequencyUnit::KHz, FrequencyUnit::MHz];

    /// Multiplier converting a value in this unit to Hz.
    pub fn multiplier(&self) -> f64 {
        match self {
            FrequencyUnit::Hz => 1.0,
            FrequencyUnit::KHz => 1.0e3,
            FrequencyUnit::MHz => 1.0e6,
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            FrequencyUnit::Hz => "Hz",
            FrequencyUnit::KHz => "kHz",
            FrequencyUnit::MHz => "MHz",
        }
    }

    pub fn to_hz(&self, value: f64) -> f64 {
        value * self.multiplier()
    }
}

impl fmt::Display for FrequencyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl FromStr for FrequencyUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hz" => Ok(FrequencyUnit::Hz),
            "khz" => Ok(FrequencyUnit::KHz),
            "mhz" => Ok(FrequencyUnit::MHz),
            _ => Err(format!("Unknown frequency unit: {} (expected Hz, kHz or MHz)", s)),
        }
    }
}

/// Format a frequency with two decimals in Hz, kHz or MHz.
///
/// A missing value (no crossover found) renders as `0.00 Hz`.
pub fn format_frequency(value: Option<f64>) -> String {
    match value {
        None => "0.00 Hz".to_string(),
        Some(v) if v < 1.0e3 => format!("{:.2} Hz", v),
        Some(v) if v < 1.0e6 => format!("{:.2} kHz", v / 1.0e3),
        Some(v) => format!("{:.2} MHz", v / 1.0e6),
    }
}
