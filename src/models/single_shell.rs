// models/single_shell.rs
// Core (cytoplasm) enclosed by one shell (membrane)

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use super::{check_length, check_material, DielectricModel};
use crate::error::{DielectricError, Result};
use crate::permittivity::complex_permittivity;
use crate::units::THICKNESS_SCALE;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SingleShellParticle {
    pub core_perm: f64,
    pub core_cond: f64,
    pub shell_perm: f64,
    pub shell_cond: f64,
    /// Shell thickness, scaled by 0.001 against the radius.
    pub shell_thickness: f64,
    /// Particle radius in µm (outer edge of the shell).
    pub radius: f64,
}

impl SingleShellParticle {
    pub fn new(
        core_perm: f64,
        core_cond: f64,
        shell_perm: f64,
        shell_cond: f64,
        shell_thickness: f64,
        radius: f64,
    ) -> Result<Self> {
        let particle = Self {
            core_perm,
            core_cond,
            shell_perm,
            shell_cond,
            shell_thickness,
            radius,
        };
        particle.validate()?;
        Ok(particle)
    }
}

impl DielectricModel for SingleShellParticle {
    fn validate(&self) -> Result<()> {
        check_material("core", self.core_perm, self.core_cond)?;
        check_material("shell", self.shell_perm, self.shell_cond)?;
        check_length("radius", self.radius)?;
        check_length("shell thickness", self.shell_thickness)?;
        check_shell_fits(self.radius, self.shell_thickness)
    }

    fn equivalent_permittivity(&self, frequency: f64) -> Result<Complex64> {
        self.validate()?;
        equivalent_permittivity(
            frequency,
            self.radius,
            self.shell_thickness,
            self.shell_perm,
            self.shell_cond,
            self.core_perm,
            self.core_cond,
        )
    }

    fn outer_radius(&self) -> f64 {
        self.radius
    }
}

/// Equivalent permittivity of a core of `core_perm`/`core_cond` wrapped in a
/// shell of `shell_perm`/`shell_cond` and `shell_thickness`, outer radius `radius`.
pub fn equivalent_permittivity(
    frequency: f64,
    radius: f64,
    shell_thickness: f64,
    shell_perm: f64,
    shell_cond: f64,
    core_perm: f64,
    core_cond: f64,
) -> Result<Complex64> {
    let shell = complex_permittivity(frequency, shell_perm, shell_cond)?;
    let core = complex_permittivity(frequency, core_perm, core_cond)?;
    reduce_shell(radius, shell_thickness, shell, core)
}

/// Maxwell mixture shell reduction.
///
/// With `r = radius / (radius − 0.001·thickness)`, `Δ = εcore − εshell` and
/// `Σ = εcore + 2εshell`, returns `εshell · (r³ + 2Δ/Σ) / (r³ − Δ/Σ)`.
pub fn reduce_shell(
    radius: f64,
    shell_thickness: f64,
    shell: Complex64,
    core: Complex64,
) -> Result<Complex64> {
    check_length("radius", radius)?;
    if !shell_thickness.is_finite() || shell_thickness < 0.0 {
        return Err(DielectricError::InvalidGeometry(format!(
            "shell thickness must be non-negative, got {}",
            shell_thickness
        )));
    }
    check_shell_fits(radius, shell_thickness)?;

    let ratio_cubed = (radius / (radius - THICKNESS_SCALE * shell_thickness)).powi(3);
    let contrast = (core - shell) / (core + 2.0 * shell);

    Ok(shell * ((ratio_cubed + 2.0 * contrast) / (ratio_cubed - contrast)))
}

pub(crate) fn check_shell_fits(radius: f64, shell_thickness: f64) -> Result<()> {
    if radius <= THICKNESS_SCALE * shell_thickness {
        return Err(DielectricError::InvalidGeometry(format!(
            "shell of thickness {} does not fit inside radius {}",
            shell_thickness, radius
        )));
    }
    Ok(())
}
