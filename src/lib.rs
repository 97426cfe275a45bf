pub mod config;
pub mod crossover;
pub mod curve;
pub mod error;
pub mod io;
pub mod models;
pub mod noise;
pub mod permittivity;
pub mod scatter;
pub mod study;
pub mod sweep;
pub mod units;

pub use crossover::{find_crossovers, interpolate_crossovers, CrossoverPair};
pub use curve::{generate_curve, generate_model_curve, CurveParameters, CurveSet, ModelCurve};
pub use error::{DielectricError, Result};
pub use models::{
    DielectricModel, HomogeneousParticle, MediumParameters, ModelKind, SingleShellParticle,
    TwoShellParticle,
};
pub use noise::{apply_noise, NoiseKernel};
pub use permittivity::{complex_permittivity, complex_permittivity_array};
pub use scatter::{synthesize_scatter, ErrorBars, ScatterSeries};
pub use sweep::FrequencySweep;
