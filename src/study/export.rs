/// Export study results to CSV format for spreadsheet analysis
use std::fs::File;
use std::io::Write;

use crate::crossover::CrossoverPair;
use crate::curve::ModelCrossovers;
use crate::models::ModelKind;

/// Outcome of one curve case.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveCaseResult {
    pub name: String,
    pub model: ModelKind,
    pub points: usize,
    pub crossovers: ModelCrossovers,
}

impl CurveCaseResult {
    /// Crossovers of the model the case was configured for.
    pub fn selected(&self) -> CrossoverPair {
        self.crossovers.get(self.model)
    }
}

fn cell(value: Option<f64>) -> String {
    value
        .map(|f| f.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Export one row of crossovers per curve case
pub fn export_study_summary(
    results: &[CurveCaseResult],
    output_dir: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(output_dir)?;
    let filename = format!("{}/Study_Summary.csv", output_dir);
    let mut file = File::create(&filename)?;

    write!(file, "Curve,Model,Points")?;
    for kind in ModelKind::ALL {
        write!(file, ",{0}_1st_Hz,{0}_2nd_Hz", kind.display())?;
    }
    writeln!(file)?;

    for result in results {
        write!(file, "{},{},{}", result.name, result.model, result.points)?;
        for kind in ModelKind::ALL {
            let pair = result.crossovers.get(kind);
            write!(file, ",{},{}", cell(pair.first), cell(pair.second))?;
        }
        writeln!(file)?;
    }

    println!("✓ Exported study summary to {}", filename);
    Ok(())
}
