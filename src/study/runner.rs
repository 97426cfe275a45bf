/// Study runner for evaluating curve and scatter cases headlessly
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::config::{CurveCase, ScatterCase, SweepStudyConfig};
use super::export::{export_study_summary, CurveCaseResult};
use crate::crossover::{interpolate_crossovers, CrossoverPair};
use crate::curve::{generate_curve, ModelCrossovers};
use crate::io::{export_curve_set_csv, CurveDocument};
use crate::models::ModelKind;
use crate::scatter::{synthesize_scatter, ScatterSeries};
use crate::units::format_frequency;

pub struct SweepRunner {
    config: SweepStudyConfig,
    output_dir: String,
}

impl SweepRunner {
    pub fn new(config: SweepStudyConfig, output_dir: String) -> Self {
        Self { config, output_dir }
    }

    pub fn config(&self) -> &SweepStudyConfig {
        &self.config
    }

    /// Run a specific curve case by name
    pub fn run_case(&self, name: &str) -> Result<CurveCaseResult, Box<dyn std::error::Error>> {
        let case = self
            .config
            .find_curve(name)
            .ok_or_else(|| format!("Curve '{}' not found", name))?;

        println!("\n╔══════════════════════════════════════════╗");
        println!("║  Running Curve: {}  ", name);
        println!("╚══════════════════════════════════════════╝\n");

        self.execute_curve(case)
    }

    /// Run every curve case, write the summary, then every scatter case
    pub fn run_all(&self) -> Result<Vec<CurveCaseResult>, Box<dyn std::error::Error>> {
        let mut results = Vec::new();

        for case in &self.config.curves {
            println!("\n╔══════════════════════════════════════════╗");
            println!("║  Running Curve: {}  ", case.name);
            println!("╚══════════════════════════════════════════╝\n");

            results.push(self.execute_curve(case)?);
        }

        export_study_summary(&results, &self.output_dir)?;
        self.run_all_scatter()?;

        println!(
            "\n✅ Study '{}' completed successfully!",
            self.config.study_name
        );
        println!("📊 Results saved to: {}", self.output_dir);

        Ok(results)
    }

    /// Generate every scatter case
    pub fn run_all_scatter(&self) -> Result<Vec<ScatterSeries>, Box<dyn std::error::Error>> {
        let mut series = Vec::with_capacity(self.config.scatter.len());
        for case in &self.config.scatter {
            series.push(self.execute_scatter(case)?);
        }
        Ok(series)
    }

    /// Generate a specific scatter case by name
    pub fn run_scatter(&self, name: &str) -> Result<ScatterSeries, Box<dyn std::error::Error>> {
        let case = self
            .config
            .find_scatter(name)
            .ok_or_else(|| format!("Scatter '{}' not found", name))?;
        self.execute_scatter(case)
    }

    fn execute_curve(&self, case: &CurveCase) -> Result<CurveCaseResult, Box<dyn std::error::Error>> {
        let sweep = self.config.sweep.build()?;
        println!("⚙️  Model: {}", case.model);
        println!(
            "⚙️  Sweep: {} points, {} to {}",
            sweep.len(),
            format_frequency(Some(sweep.start())),
            format_frequency(Some(sweep.stop()))
        );

        let start = std::time::Instant::now();
        let curves = generate_curve(&case.parameters, &sweep)?;
        curves.get(case.model)?;
        println!(
            "✓ Evaluated {} frequencies in {:.3}s",
            curves.len(),
            start.elapsed().as_secs_f32()
        );
        for kind in ModelKind::ALL {
            if let Err(e) = curves.get(kind) {
                println!("⚙️  Skipped {} model: {}", kind, e);
            }
        }

        let crossovers = if self.config.interpolate_crossovers {
            let pair = |kind: ModelKind| match curves.get(kind) {
                Ok(curve) => interpolate_crossovers(&curve.frequencies, &curve.re_cm),
                Err(_) => Ok(CrossoverPair::none()),
            };
            ModelCrossovers {
                homogeneous: pair(ModelKind::Homogeneous)?,
                single_shell: pair(ModelKind::SingleShell)?,
                two_shell: pair(ModelKind::TwoShell)?,
            }
        } else {
            curves.crossovers()?
        };

        let selected = crossovers.get(case.model);
        println!("✓ 1st crossover: {}", format_frequency(selected.first));
        println!("✓ 2nd crossover: {}", format_frequency(selected.second));

        let csv_path = format!("{}/{}.csv", self.output_dir, case.name);
        export_curve_set_csv(&curves, &csv_path)?;
        println!("✓ Exported curves to {}", csv_path);

        let json_path = format!("{}/{}.json", self.output_dir, case.name);
        CurveDocument::new(&case.name, case.model, case.parameters.clone(), &crossovers)
            .save_json(&json_path)?;
        println!("✓ Saved curve document to {}", json_path);

        Ok(CurveCaseResult {
            name: case.name.clone(),
            model: case.model,
            points: curves.len(),
            crossovers,
        })
    }

    fn execute_scatter(&self, case: &ScatterCase) -> Result<ScatterSeries, Box<dyn std::error::Error>> {
        let curve = self
            .config
            .find_curve(&case.curve)
            .ok_or_else(|| format!("Scatter '{}' refers to unknown curve '{}'", case.name, case.curve))?;
        let sweep = match &case.sweep {
            Some(spec) => spec.build()?,
            None => self.config.sweep.build()?,
        };
        let kernel = case.kernel()?;

        println!("⚙️  Scatter '{}' from '{}' ({})", case.name, case.curve, kernel);

        let mut rng = match case.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let series = synthesize_scatter(
            &curve.parameters,
            curve.model,
            &sweep,
            &kernel,
            case.error_bars,
            &mut rng,
        )?;

        let path = format!("{}/scatter/{}.csv", self.output_dir, case.name);
        series.save_csv(&path)?;
        println!("✓ Exported {} scatter points to {}", series.len(), path);

        Ok(series)
    }

    /// List all curve and scatter cases
    pub fn list_cases(&self) {
        println!("\n╔══════════════════════════════════════════╗");
        println!("║  Sweep Study: {}  ", self.config.study_name);
        println!("╚══════════════════════════════════════════╝\n");

        println!("Total curves: {}\n", self.config.curves.len());
        for (idx, case) in self.config.curves.iter().enumerate() {
            let p = &case.parameters;
            println!("  [{}] {}", idx + 1, case.name);
            println!("      Model: {}", case.model);
            println!(
                "      Buffer: perm {} / cond {} S/m",
                p.buffer_perm, p.buffer_cond
            );
            println!(
                "      Core: perm {} / cond {} S/m / radius {} µm",
                p.core_perm, p.core_cond, p.core_radius
            );
            if case.model != ModelKind::Homogeneous {
                println!(
                    "      1st shell: perm {} / cond {} S/m / {} nm",
                    p.first_shell_perm, p.first_shell_cond, p.first_shell_thick
                );
            }
            if case.model == ModelKind::TwoShell {
                println!(
                    "      2nd shell: perm {} / cond {} S/m / {} nm",
                    p.second_shell_perm, p.second_shell_cond, p.second_shell_thick
                );
            }
            println!();
        }

        if !self.config.scatter.is_empty() {
            println!("Total scatter sets: {}\n", self.config.scatter.len());
            for case in &self.config.scatter {
                println!("  - {} (curve '{}', kernel {})", case.name, case.curve, case.kernel);
            }
            println!();
        }
    }
}
