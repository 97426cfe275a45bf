/// Sweep study configuration structures
use serde::{Deserialize, Serialize};

use crate::config;
use crate::curve::CurveParameters;
use crate::error::Result;
use crate::models::ModelKind;
use crate::noise::NoiseKernel;
use crate::scatter::ErrorBars;
use crate::sweep::FrequencySweep;
use crate::units::FrequencyUnit;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepStudyConfig {
    /// Name of the study, also used for the output folder
    pub study_name: String,

    /// Refine crossovers by log-frequency interpolation in the summary
    #[serde(default)]
    pub interpolate_crossovers: bool,

    /// Frequencies shared by every curve case
    pub sweep: SweepSpec,

    /// Parameter sets to evaluate
    pub curves: Vec<CurveCase>,

    /// Synthetic scatter generated from the curve cases
    #[serde(default)]
    pub scatter: Vec<ScatterCase>,
}

/// Frequency sweep: a log-spaced range, explicit values, or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SweepSpec {
    Range {
        start: f64,
        stop: f64,
        points: usize,
        #[serde(default)]
        unit: FrequencyUnit,
    },
    List {
        values: Vec<f64>,
    },
    Manual {
        manual: String,
    },
}

impl Default for SweepSpec {
    fn default() -> Self {
        SweepSpec::Range {
            start: config::DEFAULT_SWEEP_START,
            stop: config::DEFAULT_SWEEP_STOP,
            points: config::DEFAULT_SWEEP_POINTS,
            unit: FrequencyUnit::KHz,
        }
    }
}

impl SweepSpec {
    pub fn build(&self) -> Result<FrequencySweep> {
        match self {
            SweepSpec::Range {
                start,
                stop,
                points,
                unit,
            } => FrequencySweep::log_spaced(*start, *stop, *points, *unit),
            SweepSpec::List { values } => FrequencySweep::from_values(values.clone()),
            SweepSpec::Manual { manual } => FrequencySweep::parse_manual(manual),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveCase {
    /// Unique curve name
    pub name: String,

    /// Model reported for this curve and used by its scatter cases
    pub model: ModelKind,

    #[serde(default)]
    pub parameters: CurveParameters,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterCase {
    /// Unique scatter name
    pub name: String,

    /// Name of the curve case to perturb
    pub curve: String,

    /// Kernel selector: awgn, pink, poisson, speckle or frequency
    pub kernel: String,

    #[serde(default = "default_std_dev")]
    pub std_dev: f64,

    /// Poisson scale or frequency-noise slope; kernel default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,

    /// Seed for reproducible scatter; fresh entropy when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Uniform error-bar range; zero error bars when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_bars: Option<ErrorBars>,

    /// Own sweep; the study sweep when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sweep: Option<SweepSpec>,
}

fn default_std_dev() -> f64 {
    config::DEFAULT_NOISE_STD_DEV
}

impl ScatterCase {
    pub fn kernel(&self) -> Result<NoiseKernel> {
        let scale = self
            .scale
            .unwrap_or_else(|| NoiseKernel::default_scale(&self.kernel));
        NoiseKernel::from_selector(&self.kernel, self.std_dev, scale)
    }
}

impl SweepStudyConfig {
    /// Default study: a bead, a cell and a layered cell over 1 kHz to 1 GHz,
    /// with one scatter set per noise kernel on the cell curve.
    pub fn generate_default_study(study_name: String) -> Self {
        let bead = CurveParameters {
            core_perm: 2.55,
            core_cond: 0.0002,
            core_radius: 3.0,
            ..CurveParameters::default()
        };
        let cell = CurveParameters {
            core_perm: 60.0,
            core_cond: 0.5,
            core_radius: 5.0,
            first_shell_perm: 10.0,
            first_shell_cond: 0.000001,
            first_shell_thick: 6.0,
            ..CurveParameters::default()
        };
        let layered = CurveParameters {
            second_shell_perm: 60.0,
            second_shell_cond: 0.01,
            second_shell_thick: 20.0,
            ..cell.clone()
        };

        let curves = vec![
            CurveCase {
                name: "bead".to_string(),
                model: ModelKind::Homogeneous,
                parameters: bead,
            },
            CurveCase {
                name: "cell".to_string(),
                model: ModelKind::SingleShell,
                parameters: cell,
            },
            CurveCase {
                name: "walled_cell".to_string(),
                model: ModelKind::TwoShell,
                parameters: layered,
            },
        ];

        let scatter = ["awgn", "pink", "poisson", "speckle", "frequency"]
            .iter()
            .enumerate()
            .map(|(i, kernel)| ScatterCase {
                name: format!("cell_{}", kernel),
                curve: "cell".to_string(),
                kernel: kernel.to_string(),
                std_dev: config::DEFAULT_NOISE_STD_DEV,
                scale: Some(NoiseKernel::default_scale(kernel)),
                seed: Some(i as u64 + 1),
                error_bars: Some(ErrorBars {
                    min: 0.01,
                    max: 0.05,
                }),
                sweep: Some(SweepSpec::Range {
                    start: 1.0,
                    stop: 1000.0,
                    points: 25,
                    unit: FrequencyUnit::MHz,
                }),
            })
            .collect();

        SweepStudyConfig {
            study_name,
            interpolate_crossovers: false,
            sweep: SweepSpec::Range {
                start: 1.0,
                stop: 1.0e6,
                points: config::DEFAULT_SWEEP_POINTS,
                unit: FrequencyUnit::KHz,
            },
            curves,
            scatter,
        }
    }

    pub fn find_curve(&self, name: &str) -> Option<&CurveCase> {
        self.curves.iter().find(|c| c.name == name)
    }

    pub fn find_scatter(&self, name: &str) -> Option<&ScatterCase> {
        self.scatter.iter().find(|s| s.name == name)
    }

    /// Check the sweep, each curve's parameters for its selected model and
    /// every scatter reference. Curve and scatter names must be unique.
    pub fn validate(&self) -> std::result::Result<(), String> {
        self.sweep.build().map_err(|e| format!("study sweep: {}", e))?;

        for (i, case) in self.curves.iter().enumerate() {
            if self.curves[..i].iter().any(|c| c.name == case.name) {
                return Err(format!("duplicate curve name '{}'", case.name));
            }
            case.parameters
                .validate_for(case.model)
                .map_err(|e| format!("curve '{}': {}", case.name, e))?;
        }

        for (i, case) in self.scatter.iter().enumerate() {
            if self.scatter[..i].iter().any(|c| c.name == case.name) {
                return Err(format!("duplicate scatter name '{}'", case.name));
            }
            if self.find_curve(&case.curve).is_none() {
                return Err(format!(
                    "scatter '{}' refers to unknown curve '{}'",
                    case.name, case.curve
                ));
            }
            case.kernel()
                .map_err(|e| format!("scatter '{}': {}", case.name, e))?;
            if let Some(bars) = &case.error_bars {
                bars.validate()
                    .map_err(|e| format!("scatter '{}': {}", case.name, e))?;
            }
            if let Some(sweep) = &case.sweep {
                sweep
                    .build()
                    .map_err(|e| format!("scatter '{}' sweep: {}", case.name, e))?;
            }
        }

        Ok(())
    }

    /// Load study configuration from TOML file
    pub fn from_file(path: &str) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: SweepStudyConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save study configuration to TOML file
    pub fn to_file(&self, path: &str) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
