//! Frequency sweeps: log-spaced ranges and user-entered lists.

use serde::{Deserialize, Serialize};

use crate::error::{DielectricError, Result};
use crate::units::FrequencyUnit;

/// Strictly increasing sequence of positive frequencies in Hz.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct FrequencySweep {
    frequencies: Vec<f64>,
}

impl FrequencySweep {
    /// Validate and wrap an explicit list of frequencies (Hz).
    pub fn from_values(frequencies: Vec<f64>) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(DielectricError::InvalidSweep("sweep has no frequencies".into()));
        }
        if let Some(&bad) = frequencies.iter().find(|f| !f.is_finite() || **f <= 0.0) {
            return Err(DielectricError::InvalidFrequency(bad));
        }
        if let Some(pair) = frequencies.windows(2).find(|pair| pair[1] <= pair[0]) {
            return Err(DielectricError::InvalidSweep(format!(
                "frequencies must be strictly increasing ({} followed by {})",
                pair[0], pair[1]
            )));
        }
        Ok(Self { frequencies })
    }

    /// `points` frequencies spaced evenly in log10 between `start` and `stop`
    /// (both given in `unit`, endpoints included).
    pub fn log_spaced(start: f64, stop: f64, points: usize, unit: FrequencyUnit) -> Result<Self> {
        let start_hz = unit.to_hz(start);
        let stop_hz = unit.to_hz(stop);

        for &f in &[start_hz, stop_hz] {
            if !f.is_finite() || f <= 0.0 {
                return Err(DielectricError::InvalidFrequency(f));
            }
        }
        if points == 0 {
            return Err(DielectricError::InvalidSweep("sweep needs at least one point".into()));
        }
        if points > 1 && stop_hz <= start_hz {
            return Err(DielectricError::InvalidSweep(format!(
                "stop frequency {} Hz must exceed start frequency {} Hz",
                stop_hz, start_hz
            )));
        }

        let (lo, hi) = (start_hz.log10(), stop_hz.log10());
        let frequencies = if points == 1 {
            vec![start_hz]
        } else {
            let step = (hi - lo) / (points - 1) as f64;
            (0..points)
                .map(|i| match i {
                    0 => start_hz,
                    i if i == points - 1 => stop_hz,
                    i => 10f64.powf(lo + i as f64 * step),
                })
                .collect()
        };

        Self::from_values(frequencies)
    }

    /// Parse a free-text list of frequencies in Hz.
    ///
    /// Entries may be separated by whitespace, `,`, `/`, `-` or `_`.
    pub fn parse_manual(text: &str) -> Result<Self> {
        let values = text
            .split(|c: char| c.is_whitespace() || matches!(c, ',' | '/' | '-' | '_'))
            .filter(|token| !token.is_empty())
            .map(|token| {
                token.parse::<f64>().map_err(|_| {
                    DielectricError::InvalidSweep(format!("'{}' is not a number", token))
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        Self::from_values(values)
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    pub fn start(&self) -> f64 {
        self.frequencies[0]
    }

    pub fn stop(&self) -> f64 {
        self.frequencies[self.frequencies.len() - 1]
    }
}

impl TryFrom<Vec<f64>> for FrequencySweep {
    type Error = DielectricError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::from_values(values)
    }
}

impl From<FrequencySweep> for Vec<f64> {
    fn from(sweep: FrequencySweep) -> Self {
        sweep.frequencies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn log_spacing_hits_both_endpoints() {
        let sweep = FrequencySweep::log_spaced(1.0, 1000.0, 4, FrequencyUnit::KHz).unwrap();
        let f = sweep.frequencies();
        assert_eq!(f.len(), 4);
        assert_eq!(f[0], 1.0e3);
        assert_eq!(f[3], 1.0e6);
        assert_relative_eq!(f[1], 1.0e4, max_relative = 1e-12);
        assert_relative_eq!(f[2], 1.0e5, max_relative = 1e-12);
        assert_eq!(sweep.start(), 1.0e3);
        assert_eq!(sweep.stop(), 1.0e6);
    }

    #[test]
    fn single_point_sweep() {
        let sweep = FrequencySweep::log_spaced(5.0, 5.0, 1, FrequencyUnit::MHz).unwrap();
        assert_eq!(sweep.frequencies(), &[5.0e6]);
    }

    #[test]
    fn invalid_ranges_are_rejected() {
        assert!(matches!(
            FrequencySweep::log_spaced(0.0, 10.0, 5, FrequencyUnit::Hz),
            Err(DielectricError::InvalidFrequency(_))
        ));
        assert!(matches!(
            FrequencySweep::log_spaced(10.0, 1.0, 5, FrequencyUnit::Hz),
            Err(DielectricError::InvalidSweep(_))
        ));
        assert!(FrequencySweep::log_spaced(1.0, 10.0, 0, FrequencyUnit::Hz).is_err());
    }

    #[test]
    fn explicit_values_must_increase() {
        assert!(FrequencySweep::from_values(vec![1.0, 10.0, 100.0]).is_ok());
        assert!(matches!(
            FrequencySweep::from_values(vec![1.0, 10.0, 10.0]),
            Err(DielectricError::InvalidSweep(_))
        ));
        assert!(matches!(
            FrequencySweep::from_values(vec![-1.0, 10.0]),
            Err(DielectricError::InvalidFrequency(_))
        ));
        assert!(FrequencySweep::from_values(Vec::new()).is_err());
    }

    #[test]
    fn manual_entry_accepts_mixed_separators() {
        let sweep = FrequencySweep::parse_manual("1000, 2000/5000-1e4_2e4\n1e5").unwrap();
        assert_eq!(
            sweep.frequencies(),
            &[1000.0, 2000.0, 5000.0, 1.0e4, 2.0e4, 1.0e5]
        );
        assert!(matches!(
            FrequencySweep::parse_manual("1000, abc"),
            Err(DielectricError::InvalidSweep(_))
        ));
    }

    #[test]
    fn deserializing_validates() {
        let ok: FrequencySweep = serde_json::from_str("[1.0, 2.0, 3.0]").unwrap();
        assert_eq!(ok.len(), 3);
        assert!(serde_json::from_str::<FrequencySweep>("[3.0, 2.0]").is_err());
    }
}
