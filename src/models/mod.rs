// models/mod.rs
// Particle models: each one reduces its structure to an equivalent complex
// permittivity and an outer radius, then shares the CM-factor/force formulas.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

use crate::error::{DielectricError, Result};
use crate::permittivity::complex_permittivity;
use crate::units::FORCE_PERMITTIVITY_SCALE;

pub mod homogeneous;
pub mod single_shell;
pub mod two_shell;


pub use homogeneous::HomogeneousParticle;
pub use single_shell::SingleShellParticle;
pub use two_shell::TwoShellParticle;

/// Spatial gradient of the squared field magnitude; a linear scale on force.
pub type FieldGradient = f64;

/// Suspending medium (buffer) properties.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MediumParameters {
    /// Relative permittivity of the buffer.
    pub buffer_perm: f64,
    /// Buffer conductivity in S/m.
    pub buffer_cond: f64,
}

impl MediumParameters {
    pub fn new(buffer_perm: f64, buffer_cond: f64) -> Result<Self> {
        let medium = Self {
            buffer_perm,
            buffer_cond,
        };
        medium.validate()?;
        Ok(medium)
    }

    pub fn validate(&self) -> Result<()> {
        check_material("buffer", self.buffer_perm, self.buffer_cond)
    }

    pub fn permittivity(&self, frequency: f64) -> Result<Complex64> {
        self.validate()?;
        complex_permittivity(frequency, self.buffer_perm, self.buffer_cond)
    }
}

/// Real/imaginary CM factor and DEP force at one frequency.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CmResponse {
    pub re: f64,
    pub im: f64,
    pub force: f64,
}

/// Which particle model a curve or file refers to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    #[default]
    Homogeneous,
    SingleShell,
    TwoShell,
}

impl ModelKind {
    pub const ALL: [ModelKind; 3] = [
        ModelKind::Homogeneous,
        ModelKind::SingleShell,
        ModelKind::TwoShell,
    ];

    /// Index used by curve files (0 homogeneous, 1 single-shell, 2 two-shell).
    pub fn index(&self) -> usize {
        match self {
            ModelKind::Homogeneous => 0,
            ModelKind::SingleShell => 1,
            ModelKind::TwoShell => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn display(&self) -> &'static str {
        match self {
            ModelKind::Homogeneous => "homogeneous",
            ModelKind::SingleShell => "single_shell",
            ModelKind::TwoShell => "two_shell",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// A spherical particle that can be reduced to an equivalent homogeneous sphere.
pub trait DielectricModel {
    /// Check the parameter invariants (positive permittivities and sizes).
    fn validate(&self) -> Result<()>;

    /// Complex permittivity of the equivalent homogeneous sphere.
    fn equivalent_permittivity(&self, frequency: f64) -> Result<Complex64>;

    /// Radius (µm) entering the r³ term of the DEP force.
    fn outer_radius(&self) -> f64;

    fn cm_factor_complex(&self, medium: &MediumParameters, frequency: f64) -> Result<Complex64> {
        let particle = self.equivalent_permittivity(frequency)?;
        Ok(clausius_mossotti(particle, medium.permittivity(frequency)?))
    }

    fn cm_factor_real(&self, medium: &MediumParameters, frequency: f64) -> Result<f64> {
        Ok(self.cm_factor_complex(medium, frequency)?.re)
    }

    fn cm_factor_imag(&self, medium: &MediumParameters, frequency: f64) -> Result<f64> {
        Ok(self.cm_factor_complex(medium, frequency)?.im)
    }

    fn dep_force(
        &self,
        medium: &MediumParameters,
        field_gradient: FieldGradient,
        frequency: f64,
    ) -> Result<f64> {
        Ok(self.evaluate_all(medium, field_gradient, frequency)?.force)
    }

    fn evaluate_all(
        &self,
        medium: &MediumParameters,
        field_gradient: FieldGradient,
        frequency: f64,
    ) -> Result<CmResponse> {
        let particle = self.equivalent_permittivity(frequency)?;
        response_from_equivalent(particle, medium, self.outer_radius(), field_gradient, frequency)
    }
}

/// `(εp − εm) / (εp + 2εm)`
pub fn clausius_mossotti(particle: Complex64, medium: Complex64) -> Complex64 {
    (particle - medium) / (particle + 2.0 * medium)
}

/// `2π · (ε_buffer · 8.854e-6) · r³ · Re[CM] · ∇|E|²`
pub fn dep_force_from_cm(
    buffer_perm: f64,
    radius: f64,
    cm_real: f64,
    field_gradient: FieldGradient,
) -> f64 {
    2.0 * PI * (buffer_perm * FORCE_PERMITTIVITY_SCALE) * radius.powi(3) * cm_real * field_gradient
}

/// CM factor and force for any particle once its equivalent permittivity is known.
pub fn response_from_equivalent(
    particle: Complex64,
    medium: &MediumParameters,
    outer_radius: f64,
    field_gradient: FieldGradient,
    frequency: f64,
) -> Result<CmResponse> {
    let cm = clausius_mossotti(particle, medium.permittivity(frequency)?);
    Ok(CmResponse {
        re: cm.re,
        im: cm.im,
        force: dep_force_from_cm(medium.buffer_perm, outer_radius, cm.re, field_gradient),
    })
}

pub(crate) fn check_material(label: &str, perm: f64, cond: f64) -> Result<()> {
    if !perm.is_finite() || perm <= 0.0 {
        return Err(DielectricError::InvalidParameter(format!(
            "{} permittivity must be positive, got {}",
            label, perm
        )));
    }
    if !cond.is_finite() || cond < 0.0 {
        return Err(DielectricError::InvalidParameter(format!(
            "{} conductivity must be non-negative, got {}",
            label, cond
        )));
    }
    Ok(())
}

pub(crate) fn check_length(label: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(DielectricError::InvalidGeometry(format!(
            "{} must be positive, got {}",
            label, value
        )));
    }
    Ok(())
}
