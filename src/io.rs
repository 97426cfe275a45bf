use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::crossover::CrossoverPair;
use crate::curve::{CurveParameters, CurveSet, ModelCrossovers};
use crate::error::Result;
use crate::models::ModelKind;

/// One crossover slot per model. Curve files store a missing crossover as 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CrossoverTable {
    pub homogenous: f64,
    pub single_shell: f64,
    pub two_shell: f64,
}

impl CrossoverTable {
    fn from_slots(homogeneous: Option<f64>, single_shell: Option<f64>, two_shell: Option<f64>) -> Self {
        Self {
            homogenous: homogeneous.unwrap_or(0.0),
            single_shell: single_shell.unwrap_or(0.0),
            two_shell: two_shell.unwrap_or(0.0),
        }
    }

    pub fn get(&self, kind: ModelKind) -> Option<f64> {
        let value = match kind {
            ModelKind::Homogeneous => self.homogenous,
            ModelKind::SingleShell => self.single_shell,
            ModelKind::TwoShell => self.two_shell,
        };
        (value > 0.0).then_some(value)
    }
}

/// Parameter block of a curve file: the model inputs plus cached crossovers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentParameters {
    #[serde(flatten)]
    pub curve: CurveParameters,
    #[serde(rename = "1st_cross_over", default)]
    pub first_cross_over: CrossoverTable,
    #[serde(rename = "2nd_cross_over", default)]
    pub second_cross_over: CrossoverTable,
}

/// A saved curve: display name, selected model and its parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveDocument {
    pub name: String,
    #[serde(serialize_with = "model_to_index", deserialize_with = "model_from_index")]
    pub model: ModelKind,
    pub parameters: DocumentParameters,
}

fn model_to_index<S: Serializer>(model: &ModelKind, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u64(model.index() as u64)
}

fn model_from_index<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<ModelKind, D::Error> {
    let index = u64::deserialize(deserializer)?;
    ModelKind::from_index(index as usize).ok_or_else(|| {
        serde::de::Error::custom(format!("model index {} out of range (0, 1 or 2)", index))
    })
}

impl CurveDocument {
    pub fn new(name: &str, model: ModelKind, curve: CurveParameters, crossovers: &ModelCrossovers) -> Self {
        Self {
            name: name.to_string(),
            model,
            parameters: DocumentParameters {
                curve,
                first_cross_over: CrossoverTable::from_slots(
                    crossovers.homogeneous.first,
                    crossovers.single_shell.first,
                    crossovers.two_shell.first,
                ),
                second_cross_over: CrossoverTable::from_slots(
                    crossovers.homogeneous.second,
                    crossovers.single_shell.second,
                    crossovers.two_shell.second,
                ),
            },
        }
    }

    /// Build a document whose crossover tables come from `curves`.
    pub fn from_curve_set(
        name: &str,
        model: ModelKind,
        parameters: &CurveParameters,
        curves: &CurveSet,
    ) -> Result<Self> {
        Ok(Self::new(name, model, parameters.clone(), &curves.crossovers()?))
    }

    pub fn crossovers(&self) -> ModelCrossovers {
        let pair = |kind| CrossoverPair {
            first: self.parameters.first_cross_over.get(kind),
            second: self.parameters.second_cross_over.get(kind),
        };
        ModelCrossovers {
            homogeneous: pair(ModelKind::Homogeneous),
            single_shell: pair(ModelKind::SingleShell),
            two_shell: pair(ModelKind::TwoShell),
        }
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> std::result::Result<(), Box<dyn std::error::Error>> {
        create_parent_dir(path.as_ref())?;
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    pub fn load_json<P: AsRef<Path>>(path: P) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        let reader = BufReader::new(File::open(path)?);
        let document: CurveDocument = serde_json::from_reader(reader)?;
        document.parameters.curve.validate_for(document.model)?;
        Ok(document)
    }
}

pub(crate) fn create_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Write all three models side by side: frequency plus Re[CM], Im[CM] and
/// DEP force per model. A model missing from the set leaves its cells empty.
pub fn export_curve_set_csv<P: AsRef<Path>>(
    curves: &CurveSet,
    path: P,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    for curve in ModelKind::ALL.iter().filter_map(|&kind| curves.get(kind).ok()) {
        curve.validate()?;
    }
    create_parent_dir(path.as_ref())?;
    let mut file = BufWriter::new(File::create(path)?);

    write!(file, "Frequency_Hz")?;
    for kind in ModelKind::ALL {
        write!(file, ",{0}_ReCM,{0}_ImCM,{0}_DEP_Force", kind.display())?;
    }
    writeln!(file)?;

    for (i, f) in curves.frequencies().iter().enumerate() {
        write!(file, "{}", f)?;
        for kind in ModelKind::ALL {
            match curves.get(kind) {
                Ok(curve) => write!(file, ",{},{},{}", curve.re_cm[i], curve.im_cm[i], curve.dep_force[i])?,
                Err(_) => write!(file, ",,,")?,
            }
        }
        writeln!(file)?;
    }

    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::generate_curve;
    use crate::sweep::FrequencySweep;
    use crate::units::FrequencyUnit;
    use approx::assert_relative_eq;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("dep_response_io_{}_{}", std::process::id(), name))
    }

    #[test]
    fn document_uses_curve_file_layout() {
        let document = CurveDocument::new(
            "red cell",
            ModelKind::SingleShell,
            CurveParameters::default(),
            &ModelCrossovers {
                single_shell: CrossoverPair {
                    first: Some(2.5e4),
                    second: None,
                },
                ..Default::default()
            },
        );
        let value = serde_json::to_value(&document).unwrap();

        assert_eq!(value["model"], 1);
        assert_eq!(value["parameters"]["core_radius"], 10.0);
        assert_eq!(value["parameters"]["1st_shell_thick"], 6.0);
        assert_eq!(value["parameters"]["electric_field"], 1.0);
        assert_eq!(value["parameters"]["1st_cross_over"]["single_shell"], 2.5e4);
        assert_eq!(value["parameters"]["2nd_cross_over"]["homogenous"], 0.0);
    }

    #[test]
    fn zero_slots_read_back_as_missing() {
        let json = r#"{
            "name": "bead",
            "model": 0,
            "parameters": {
                "buffer_perm": 78, "buffer_cond": 0.01,
                "core_perm": 2.5, "core_cond": 0.001, "core_radius": 3,
                "1st_cross_over": {"homogenous": 0.0, "single_shell": 12000.0, "two_shell": 0.0},
                "2nd_cross_over": {"homogenous": 0.0, "single_shell": 0.0, "two_shell": 0.0}
            }
        }"#;
        let document: CurveDocument = serde_json::from_str(json).unwrap();
        assert_eq!(document.model, ModelKind::Homogeneous);
        assert_eq!(document.parameters.curve.core_perm, 2.5);
        // Fields missing from the file fall back to the placeholder shells
        assert_eq!(document.parameters.curve.second_shell_perm, 10.0);

        let crossovers = document.crossovers();
        assert_eq!(crossovers.homogeneous, CrossoverPair::none());
        assert_eq!(crossovers.single_shell.first, Some(12000.0));
    }

    #[test]
    fn out_of_range_model_index_is_rejected() {
        let json = r#"{"name": "x", "model": 7, "parameters": {}}"#;
        assert!(serde_json::from_str::<CurveDocument>(json).is_err());
    }

    #[test]
    fn json_file_round_trip() {
        let params = CurveParameters::default();
        let sweep = FrequencySweep::log_spaced(1.0, 1.0e6, 61, FrequencyUnit::KHz).unwrap();
        let curves = generate_curve(&params, &sweep).unwrap();
        let document = CurveDocument::from_curve_set("default", ModelKind::TwoShell, &params, &curves).unwrap();

        let path = temp_path("curve.json");
        document.save_json(&path).unwrap();
        let loaded = CurveDocument::load_json(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.name, "default");
        assert_eq!(loaded.model, ModelKind::TwoShell);
        assert_eq!(loaded.parameters.curve, params);

        let expected = curves.crossovers().unwrap();
        let found = loaded.crossovers();
        for kind in ModelKind::ALL {
            let (a, b) = (found.get(kind), expected.get(kind));
            assert_eq!(a.count(), b.count(), "{}", kind);
            for (x, y) in [(a.first, b.first), (a.second, b.second)] {
                if let (Some(x), Some(y)) = (x, y) {
                    assert_relative_eq!(x, y, max_relative = 1e-12);
                }
            }
        }
    }

    #[test]
    fn curve_set_csv_has_ten_columns() {
        let params = CurveParameters::default();
        let sweep = FrequencySweep::log_spaced(1.0, 100.0, 5, FrequencyUnit::KHz).unwrap();
        let curves = generate_curve(&params, &sweep).unwrap();

        let path = temp_path("curves.csv");
        export_curve_set_csv(&curves, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("Frequency_Hz,homogeneous_ReCM"));
        for line in &lines {
            assert_eq!(line.split(',').count(), 10);
        }
        let first: Vec<f64> = lines[1].split(',').map(|c| c.parse().unwrap()).collect();
        assert_eq!(first[0], 1.0e3);
        assert_eq!(first[4], curves.single_shell.as_ref().unwrap().re_cm[0]);
    }

    fn tiny_bead() -> CurveParameters {
        CurveParameters {
            core_perm: 2.55,
            core_cond: 2.0e-4,
            core_radius: 0.005,
            ..CurveParameters::default()
        }
    }

    #[test]
    fn tiny_bead_document_loads_despite_placeholder_shells() {
        let params = tiny_bead();
        let sweep = FrequencySweep::log_spaced(1.0, 1.0e6, 31, FrequencyUnit::KHz).unwrap();
        let curves = generate_curve(&params, &sweep).unwrap();
        let document = CurveDocument::from_curve_set("bead", ModelKind::Homogeneous, &params, &curves).unwrap();
        assert_eq!(document.crossovers().single_shell, CrossoverPair::none());

        let path = temp_path("bead.json");
        document.save_json(&path).unwrap();
        let loaded = CurveDocument::load_json(&path);
        std::fs::remove_file(&path).ok();
        let loaded = loaded.unwrap();
        assert_eq!(loaded.model, ModelKind::Homogeneous);
        assert_relative_eq!(loaded.parameters.curve.core_radius, 0.005, max_relative = 1e-12);
    }

    #[test]
    fn shell_model_document_still_checks_its_shells() {
        let params = tiny_bead();
        let document = CurveDocument::new("bead", ModelKind::SingleShell, params, &ModelCrossovers::default());

        let path = temp_path("bead_single_shell.json");
        document.save_json(&path).unwrap();
        let loaded = CurveDocument::load_json(&path);
        std::fs::remove_file(&path).ok();
        assert!(loaded.is_err());
    }

    #[test]
    fn missing_models_leave_empty_csv_cells() {
        let sweep = FrequencySweep::log_spaced(1.0, 100.0, 3, FrequencyUnit::KHz).unwrap();
        let curves = generate_curve(&tiny_bead(), &sweep).unwrap();

        let path = temp_path("bead.csv");
        export_curve_set_csv(&curves, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        for line in &lines[1..] {
            let cells: Vec<&str> = line.split(',').collect();
            assert_eq!(cells.len(), 10);
            assert!(cells[1..4].iter().all(|c| c.parse::<f64>().is_ok()));
            assert!(cells[4..].iter().all(|c| c.is_empty()));
        }
        assert_eq!(lines[1].split(',').nth(1).unwrap().parse::<f64>().unwrap(), curves.homogeneous.re_cm[0]);
    }
}
