//! Complex permittivity primitive shared by every particle model.

use num_complex::Complex64;
use std::f64::consts::PI;

use crate::error::{DielectricError, Result};
use crate::units::VACUUM_PERMITTIVITY;

/// `ε = ε_r·ε₀ − j·σ / (2π·f)`
///
/// # Arguments
/// * `frequency` - Excitation frequency in Hz, strictly positive.
/// * `relative_permittivity` - Dimensionless relative permittivity.
/// * `conductivity` - Conductivity in S/m.
pub fn complex_permittivity(
    frequency: f64,
    relative_permittivity: f64,
    conductivity: f64,
) -> Result<Complex64> {
    check_frequency(frequency)?;
    Ok(Complex64::new(
        relative_permittivity * VACUUM_PERMITTIVITY,
        -(conductivity / (2.0 * PI * frequency)),
    ))
}

/// Element-wise [`complex_permittivity`].
///
/// Every input is either a single value (broadcast) or has the common length
/// `N`; any other combination is a shape mismatch.
pub fn complex_permittivity_array(
    frequencies: &[f64],
    relative_permittivities: &[f64],
    conductivities: &[f64],
) -> Result<Vec<Complex64>> {
    let n = broadcast_len(&[
        frequencies.len(),
        relative_permittivities.len(),
        conductivities.len(),
    ])?;

    let pick = |values: &[f64], i: usize| if values.len() == 1 { values[0] } else { values[i] };

    (0..n)
        .map(|i| {
            complex_permittivity(
                pick(frequencies, i),
                pick(relative_permittivities, i),
                pick(conductivities, i),
            )
        })
        .collect()
}

pub(crate) fn check_frequency(frequency: f64) -> Result<()> {
    if !frequency.is_finite() || frequency <= 0.0 {
        return Err(DielectricError::InvalidFrequency(frequency));
    }
    Ok(())
}

fn broadcast_len(lengths: &[usize]) -> Result<usize> {
    let n = lengths.iter().copied().max().unwrap_or(0);
    if lengths.iter().any(|&len| len == 0) {
        return Ok(0);
    }
    for &len in lengths {
        if len != 1 && len != n {
            return Err(DielectricError::ShapeMismatch {
                context: "permittivity inputs do not broadcast",
                left: len,
                right: n,
            });
        }
    }
    Ok(n)
}
