/// Batch sweep studies driven by a TOML file
///
/// This module provides functionality to:
/// - Describe curve cases (parameter sets and models) and synthetic scatter cases
/// - Evaluate them headlessly over a shared frequency sweep
/// - Export curves, curve documents, scatter sets and a crossover summary

pub mod config;
pub mod export;
pub mod runner;


pub use config::{CurveCase, ScatterCase, SweepSpec, SweepStudyConfig};
pub use export::{export_study_summary, CurveCaseResult};
pub use runner::SweepRunner;
