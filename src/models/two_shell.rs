// models/two_shell.rs
// Core wrapped in two concentric shells, reduced from the inside out

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use super::single_shell::{check_shell_fits, reduce_shell};
use super::{check_length, check_material, DielectricModel};
use crate::error::Result;
use crate::permittivity::complex_permittivity;
use crate::units::THICKNESS_SCALE;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TwoShellParticle {
    pub core_perm: f64,
    pub core_cond: f64,
    /// Core radius in µm; the first reduction uses it as the particle radius.
    pub core_radius: f64,
    pub inner_shell_perm: f64,
    pub inner_shell_cond: f64,
    pub inner_shell_thickness: f64,
    pub outer_shell_perm: f64,
    pub outer_shell_cond: f64,
    pub outer_shell_thickness: f64,
}

impl TwoShellParticle {
    /// Build a particle, rejecting non-physical materials and shells that do
    /// not fit around the radius they wrap.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        core_perm: f64,
        core_cond: f64,
        core_radius: f64,
        inner_shell_perm: f64,
        inner_shell_cond: f64,
        inner_shell_thickness: f64,
        outer_shell_perm: f64,
        outer_shell_cond: f64,
        outer_shell_thickness: f64,
    ) -> Result<Self> {
        let particle = Self {
            core_perm,
            core_cond,
            core_radius,
            inner_shell_perm,
            inner_shell_cond,
            inner_shell_thickness,
            outer_shell_perm,
            outer_shell_cond,
            outer_shell_thickness,
        };
        particle.validate()?;
        Ok(particle)
    }

    /// Radius used for the outer-shell reduction: `core_radius + 0.001·inner_thickness`.
    pub fn inner_shell_outer_radius(&self) -> f64 {
        self.core_radius + THICKNESS_SCALE * self.inner_shell_thickness
    }
}

impl DielectricModel for TwoShellParticle {
    fn validate(&self) -> Result<()> {
        check_material("core", self.core_perm, self.core_cond)?;
        check_material("inner shell", self.inner_shell_perm, self.inner_shell_cond)?;
        check_material("outer shell", self.outer_shell_perm, self.outer_shell_cond)?;
        check_length("core radius", self.core_radius)?;
        check_length("inner shell thickness", self.inner_shell_thickness)?;
        check_length("outer shell thickness", self.outer_shell_thickness)?;
        check_shell_fits(self.core_radius, self.inner_shell_thickness)?;
        check_shell_fits(self.inner_shell_outer_radius(), self.outer_shell_thickness)
    }

    fn equivalent_permittivity(&self, frequency: f64) -> Result<Complex64> {
        self.validate()?;
        equivalent_permittivity(frequency, self)
    }

    /// `core_radius + 0.001·(inner_thickness + outer_thickness)`
    fn outer_radius(&self) -> f64 {
        self.core_radius
            + THICKNESS_SCALE * (self.inner_shell_thickness + self.outer_shell_thickness)
    }
}

/// Nested shell reduction: (core, inner shell) first, then (result, outer shell).
pub fn equivalent_permittivity(frequency: f64, particle: &TwoShellParticle) -> Result<Complex64> {
    let core = complex_permittivity(frequency, particle.core_perm, particle.core_cond)?;
    let inner = complex_permittivity(
        frequency,
        particle.inner_shell_perm,
        particle.inner_shell_cond,
    )?;
    let outer = complex_permittivity(
        frequency,
        particle.outer_shell_perm,
        particle.outer_shell_cond,
    )?;

    let core_with_inner = reduce_shell(
        particle.core_radius,
        particle.inner_shell_thickness,
        inner,
        core,
    )?;

    reduce_shell(
        particle.inner_shell_outer_radius(),
        particle.outer_shell_thickness,
        outer,
        core_with_inner,
    )
}
