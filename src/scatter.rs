// scatter.rs
// Measured or synthetic Re[CM] scatter with error bars

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rand::distr::Uniform;
use rand::Rng;
use rand_distr::Distribution;
use serde::{Deserialize, Serialize};

use crate::curve::{generate_model_curve, CurveParameters};
use crate::error::{ensure_same_len, DielectricError, Result};
use crate::io::create_parent_dir;
use crate::models::ModelKind;
use crate::noise::NoiseKernel;
use crate::sweep::FrequencySweep;

pub const SCATTER_CSV_HEADER: &str =
    "Frequency (Hz),Experimental CM factor,Experimental CM Factor errors";

/// Parallel frequency / Re[CM] / error-magnitude sequences.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScatterSeries {
    pub frequencies: Vec<f64>,
    pub recm_values: Vec<f64>,
    pub recm_errors: Vec<f64>,
}

impl ScatterSeries {
    pub fn new(frequencies: Vec<f64>, recm_values: Vec<f64>, recm_errors: Vec<f64>) -> Result<Self> {
        let series = Self {
            frequencies,
            recm_values,
            recm_errors,
        };
        series.validate()?;
        Ok(series)
    }

    pub fn validate(&self) -> Result<()> {
        ensure_same_len(
            "scatter frequencies vs values",
            self.frequencies.len(),
            self.recm_values.len(),
        )?;
        ensure_same_len(
            "scatter frequencies vs errors",
            self.frequencies.len(),
            self.recm_errors.len(),
        )
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Write the three columns under the scatter spreadsheet header.
    pub fn save_csv<P: AsRef<Path>>(&self, path: P) -> std::result::Result<(), Box<dyn std::error::Error>> {
        self.validate()?;
        create_parent_dir(path.as_ref())?;

        let mut file = BufWriter::new(File::create(path)?);
        writeln!(file, "{}", SCATTER_CSV_HEADER)?;
        for i in 0..self.len() {
            writeln!(
                file,
                "{},{},{}",
                self.frequencies[i], self.recm_values[i], self.recm_errors[i]
            )?;
        }
        file.flush()?;
        Ok(())
    }

    pub fn load_csv<P: AsRef<Path>>(path: P) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        let text = std::fs::read_to_string(path)?;
        Self::parse_csv(&text)
    }

    /// Parse scatter rows following a header line.
    ///
    /// Reading stops at the first row whose frequency cell is blank. The
    /// result must be non-empty and every row must hold three numbers.
    pub fn parse_csv(text: &str) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        let mut series = Self::default();

        for (line_no, line) in text.lines().enumerate().skip(1) {
            let cells: Vec<&str> = line.split(',').map(str::trim).collect();
            if cells.first().map_or(true, |c| c.is_empty()) {
                break;
            }
            if cells.len() != 3 {
                return Err(format!(
                    "row {}: expected 3 columns, found {}",
                    line_no + 1,
                    cells.len()
                )
                .into());
            }

            let mut values = [0.0; 3];
            for (slot, cell) in values.iter_mut().zip(&cells) {
                *slot = cell
                    .parse::<f64>()
                    .map_err(|_| format!("row {}: '{}' is not a number", line_no + 1, cell))?;
            }
            series.frequencies.push(values[0]);
            series.recm_values.push(values[1]);
            series.recm_errors.push(values[2]);
        }

        if series.is_empty() {
            return Err("scatter file contains no data rows".into());
        }
        Ok(series)
    }
}

/// Bounds for synthetic error-bar magnitudes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorBars {
    pub min: f64,
    pub max: f64,
}

impl ErrorBars {
    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min < 0.0 || self.max < self.min {
            return Err(DielectricError::InvalidParameter(format!(
                "error bar range must satisfy 0 <= min <= max, got [{}, {}]",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Per-point error magnitudes drawn uniformly from `bars`, or all zeros
/// when no range is given.
pub fn generate_errors<R: Rng + ?Sized>(
    len: usize,
    bars: Option<ErrorBars>,
    rng: &mut R,
) -> Result<Vec<f64>> {
    let Some(bars) = bars else {
        return Ok(vec![0.0; len]);
    };
    bars.validate()?;

    let dist = Uniform::new_inclusive(bars.min, bars.max)
        .map_err(|e| DielectricError::InvalidParameter(format!("error bars: {}", e)))?;
    Ok((0..len).map(|_| dist.sample(rng)).collect())
}

/// Evaluate `kind` over `sweep`, perturb its Re[CM] with `kernel` and
/// attach error bars.
pub fn synthesize_scatter<R: Rng + ?Sized>(
    parameters: &CurveParameters,
    kind: ModelKind,
    sweep: &FrequencySweep,
    kernel: &NoiseKernel,
    bars: Option<ErrorBars>,
    rng: &mut R,
) -> Result<ScatterSeries> {
    kernel.validate()?;
    let errors = generate_errors(sweep.len(), bars, rng)?;
    let curve = generate_model_curve(parameters, kind, sweep)?;
    let noisy = kernel.apply(&curve.re_cm, &curve.frequencies, rng)?;

    ScatterSeries::new(curve.frequencies, noisy, errors)
}
