//! Crossover detection: frequencies where Re[CM] changes sign.
//!
//! The detector works at sample resolution: it reports the frequency of the
//! sample just before the sign flip, so its accuracy is bounded by the sweep
//! density. [`interpolate_crossovers`] refines the same brackets on a
//! log-frequency axis when a finer estimate is wanted.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_same_len, Result};

/// First negative→positive and first positive→negative crossover.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CrossoverPair {
    /// Low-frequency crossover (Re[CM] goes from negative to positive).
    pub first: Option<f64>,
    /// High-frequency crossover (Re[CM] goes from positive to negative).
    pub second: Option<f64>,
}

impl CrossoverPair {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.first.is_some() as usize + self.second.is_some() as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Transition {
    Rising,
    Falling,
}

fn transition(a: f64, b: f64) -> Option<Transition> {
    if a < 0.0 && b >= 0.0 {
        Some(Transition::Rising)
    } else if a > 0.0 && b <= 0.0 {
        Some(Transition::Falling)
    } else {
        None
    }
}

/// Lower indices of the first rising and first falling transition.
fn first_transitions(real_cm: &[f64]) -> (Option<usize>, Option<usize>) {
    let mut rising = None;
    let mut falling = None;

    for (i, pair) in real_cm.windows(2).enumerate() {
        match transition(pair[0], pair[1]) {
            Some(Transition::Rising) if rising.is_none() => rising = Some(i),
            Some(Transition::Falling) if falling.is_none() => falling = Some(i),
            _ => {}
        }
        if rising.is_some() && falling.is_some() {
            break;
        }
    }

    (rising, falling)
}

/// Scan `real_cm` in ascending frequency order and report the sample
/// frequency preceding the first rising and the first falling sign change.
pub fn find_crossovers(frequencies: &[f64], real_cm: &[f64]) -> Result<CrossoverPair> {
    ensure_same_len("crossover frequencies vs Re[CM]", frequencies.len(), real_cm.len())?;

    let (rising, falling) = first_transitions(real_cm);
    Ok(CrossoverPair {
        first: rising.map(|i| frequencies[i]),
        second: falling.map(|i| frequencies[i]),
    })
}

/// Same brackets as [`find_crossovers`], with the zero located by linear
/// interpolation of Re[CM] against log10(frequency).
pub fn interpolate_crossovers(frequencies: &[f64], real_cm: &[f64]) -> Result<CrossoverPair> {
    ensure_same_len("crossover frequencies vs Re[CM]", frequencies.len(), real_cm.len())?;

    let refine = |i: usize| {
        let (f0, f1) = (frequencies[i], frequencies[i + 1]);
        let (y0, y1) = (real_cm[i], real_cm[i + 1]);
        if y1 == y0 || f0 <= 0.0 || f1 <= 0.0 {
            return f0;
        }
        let t = y0 / (y0 - y1);
        let (l0, l1) = (f0.log10(), f1.log10());
        10f64.powf(l0 + t * (l1 - l0))
    };

    let (rising, falling) = first_transitions(real_cm);
    Ok(CrossoverPair {
        first: rising.map(refine),
        second: falling.map(refine),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DielectricError;
    use approx::assert_relative_eq;

    #[test]
    fn reports_lower_index_frequency() {
        let freqs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let re = [-0.5, -0.2, 0.1, 0.3, -0.1];
        let pair = find_crossovers(&freqs, &re).unwrap();
        assert_eq!(pair.first, Some(2.0));
        assert_eq!(pair.second, Some(4.0));
        assert_eq!(pair.count(), 2);
    }

    #[test]
    fn only_first_transition_of_each_kind_is_kept() {
        let freqs = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0];
        let re = [0.2, -0.1, 0.4, -0.3, 0.5, -0.2];
        let pair = find_crossovers(&freqs, &re).unwrap();
        assert_eq!(pair.first, Some(20.0));
        assert_eq!(pair.second, Some(10.0));
    }

    #[test]
    fn no_sign_change_yields_none() {
        let freqs = [1.0, 2.0, 3.0];
        assert_eq!(
            find_crossovers(&freqs, &[0.1, 0.2, 0.3]).unwrap(),
            CrossoverPair::none()
        );
        assert_eq!(
            find_crossovers(&freqs, &[-0.1, -0.2, -0.3]).unwrap(),
            CrossoverPair::none()
        );
        assert_eq!(find_crossovers(&[], &[]).unwrap(), CrossoverPair::none());
        assert_eq!(find_crossovers(&[1.0], &[-1.0]).unwrap(), CrossoverPair::none());
    }

    #[test]
    fn nan_samples_never_cross() {
        let freqs = [1.0, 2.0, 3.0];
        let pair = find_crossovers(&freqs, &[-0.1, f64::NAN, 0.3]).unwrap();
        assert_eq!(pair, CrossoverPair::none());
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let err = find_crossovers(&[1.0, 2.0], &[0.1]).unwrap_err();
        assert!(matches!(err, DielectricError::ShapeMismatch { left: 2, right: 1, .. }));
        assert!(interpolate_crossovers(&[1.0], &[0.1, 0.2]).is_err());
    }

    #[test]
    fn interpolation_lands_between_brackets() {
        let freqs = [1.0e3, 1.0e4, 1.0e5];
        let re = [-0.5, 0.5, 0.7];
        let pair = interpolate_crossovers(&freqs, &re).unwrap();
        assert_relative_eq!(pair.first.unwrap(), 10f64.powf(3.5), max_relative = 1e-12);
        assert_eq!(pair.second, None);
    }
}
