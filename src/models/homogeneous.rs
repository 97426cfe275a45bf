// models/homogeneous.rs
// Unshelled dielectric sphere

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use super::{check_length, check_material, DielectricModel};
use crate::error::Result;
use crate::permittivity::complex_permittivity;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HomogeneousParticle {
    /// Relative permittivity of the particle.
    pub perm: f64,
    /// Particle conductivity in S/m.
    pub cond: f64,
    /// Particle radius in µm.
    pub radius: f64,
}

impl HomogeneousParticle {
    pub fn new(perm: f64, cond: f64, radius: f64) -> Result<Self> {
        let particle = Self { perm, cond, radius };
        particle.validate()?;
        Ok(particle)
    }
}

impl DielectricModel for HomogeneousParticle {
    fn validate(&self) -> Result<()> {
        check_material("particle", self.perm, self.cond)?;
        check_length("particle radius", self.radius)
    }

    fn equivalent_permittivity(&self, frequency: f64) -> Result<Complex64> {
        self.validate()?;
        complex_permittivity(frequency, self.perm, self.cond)
    }

    fn outer_radius(&self) -> f64 {
        self.radius
    }
}
