// curve.rs
// Drives the three particle models over a frequency sweep

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::crossover::{find_crossovers, CrossoverPair};
use crate::error::{ensure_same_len, Result};
use crate::models::{
    CmResponse, DielectricModel, FieldGradient, HomogeneousParticle, MediumParameters, ModelKind,
    SingleShellParticle, TwoShellParticle,
};
use crate::sweep::FrequencySweep;

/// Shared parameter set from which all three particle models are built.
///
/// Field names match the keys of saved curve files.
/// Shell fields that do not apply to a model are placeholders and are only
/// checked when that model is evaluated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveParameters {
    pub buffer_perm: f64,
    pub buffer_cond: f64,
    pub core_perm: f64,
    pub core_cond: f64,
    /// µm
    pub core_radius: f64,
    #[serde(rename = "1st_shell_perm")]
    pub first_shell_perm: f64,
    #[serde(rename = "1st_shell_cond")]
    pub first_shell_cond: f64,
    #[serde(rename = "1st_shell_thick")]
    pub first_shell_thick: f64,
    #[serde(rename = "2nd_shell_perm")]
    pub second_shell_perm: f64,
    #[serde(rename = "2nd_shell_cond")]
    pub second_shell_cond: f64,
    #[serde(rename = "2nd_shell_thick")]
    pub second_shell_thick: f64,
    #[serde(rename = "electric_field")]
    pub field_gradient: FieldGradient,
}

impl Default for CurveParameters {
    fn default() -> Self {
        Self {
            buffer_perm: config::DEFAULT_BUFFER_PERM,
            buffer_cond: config::DEFAULT_BUFFER_COND,
            core_perm: config::DEFAULT_CORE_PERM,
            core_cond: config::DEFAULT_CORE_COND,
            core_radius: config::DEFAULT_CORE_RADIUS,
            first_shell_perm: config::DEFAULT_FIRST_SHELL_PERM,
            first_shell_cond: config::DEFAULT_FIRST_SHELL_COND,
            first_shell_thick: config::DEFAULT_FIRST_SHELL_THICK,
            second_shell_perm: config::DEFAULT_SECOND_SHELL_PERM,
            second_shell_cond: config::DEFAULT_SECOND_SHELL_COND,
            second_shell_thick: config::DEFAULT_SECOND_SHELL_THICK,
            field_gradient: config::DEFAULT_FIELD_GRADIENT,
        }
    }
}

impl CurveParameters {
    pub fn medium(&self) -> MediumParameters {
        MediumParameters {
            buffer_perm: self.buffer_perm,
            buffer_cond: self.buffer_cond,
        }
    }

    pub fn homogeneous(&self) -> HomogeneousParticle {
        HomogeneousParticle {
            perm: self.core_perm,
            cond: self.core_cond,
            radius: self.core_radius,
        }
    }

    /// The 1st shell is the membrane; `core_radius` is the particle radius.
    pub fn single_shell(&self) -> SingleShellParticle {
        SingleShellParticle {
            core_perm: self.core_perm,
            core_cond: self.core_cond,
            shell_perm: self.first_shell_perm,
            shell_cond: self.first_shell_cond,
            shell_thickness: self.first_shell_thick,
            radius: self.core_radius,
        }
    }

    pub fn two_shell(&self) -> TwoShellParticle {
        TwoShellParticle {
            core_perm: self.core_perm,
            core_cond: self.core_cond,
            core_radius: self.core_radius,
            inner_shell_perm: self.first_shell_perm,
            inner_shell_cond: self.first_shell_cond,
            inner_shell_thickness: self.first_shell_thick,
            outer_shell_perm: self.second_shell_perm,
            outer_shell_cond: self.second_shell_cond,
            outer_shell_thickness: self.second_shell_thick,
        }
    }

    pub fn model(&self, kind: ModelKind) -> Box<dyn DielectricModel + Send + Sync> {
        match kind {
            ModelKind::Homogeneous => Box::new(self.homogeneous()),
            ModelKind::SingleShell => Box::new(self.single_shell()),
            ModelKind::TwoShell => Box::new(self.two_shell()),
        }
    }

    /// Check the medium and the fields `kind` reads; placeholders belonging
    /// to other models are ignored.
    pub fn validate_for(&self, kind: ModelKind) -> Result<()> {
        self.medium().validate()?;
        self.model(kind).validate()
    }

    /// Check the medium and every model, placeholder shells included.
    pub fn validate(&self) -> Result<()> {
        for kind in ModelKind::ALL {
            self.validate_for(kind)?;
        }
        Ok(())
    }
}

/// One model's response over a sweep; all four sequences share one length.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelCurve {
    pub model: ModelKind,
    pub frequencies: Vec<f64>,
    pub re_cm: Vec<f64>,
    pub im_cm: Vec<f64>,
    pub dep_force: Vec<f64>,
}

impl ModelCurve {
    fn from_responses<'a, I>(model: ModelKind, frequencies: &[f64], responses: I) -> Self
    where
        I: Iterator<Item = &'a CmResponse>,
    {
        let mut curve = ModelCurve {
            model,
            frequencies: frequencies.to_vec(),
            re_cm: Vec::with_capacity(frequencies.len()),
            im_cm: Vec::with_capacity(frequencies.len()),
            dep_force: Vec::with_capacity(frequencies.len()),
        };
        for response in responses {
            curve.re_cm.push(response.re);
            curve.im_cm.push(response.im);
            curve.dep_force.push(response.force);
        }
        curve
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        let n = self.frequencies.len();
        ensure_same_len("curve Re[CM]", n, self.re_cm.len())?;
        ensure_same_len("curve Im[CM]", n, self.im_cm.len())?;
        ensure_same_len("curve DEP force", n, self.dep_force.len())
    }

    pub fn crossovers(&self) -> Result<CrossoverPair> {
        find_crossovers(&self.frequencies, &self.re_cm)
    }
}

/// Crossovers of every model for one parameter set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelCrossovers {
    pub homogeneous: CrossoverPair,
    pub single_shell: CrossoverPair,
    pub two_shell: CrossoverPair,
}

impl ModelCrossovers {
    pub fn get(&self, kind: ModelKind) -> CrossoverPair {
        match kind {
            ModelKind::Homogeneous => self.homogeneous,
            ModelKind::SingleShell => self.single_shell,
            ModelKind::TwoShell => self.two_shell,
        }
    }
}

/// Responses of all three models on a common sweep.
///
/// The homogeneous curve always exists. A shell model whose fields are
/// invalid keeps its error instead of failing the whole set.
#[derive(Clone, Debug, PartialEq)]
pub struct CurveSet {
    pub homogeneous: ModelCurve,
    pub single_shell: Result<ModelCurve>,
    pub two_shell: Result<ModelCurve>,
}

impl CurveSet {
    pub fn get(&self, kind: ModelKind) -> Result<&ModelCurve> {
        match kind {
            ModelKind::Homogeneous => Ok(&self.homogeneous),
            ModelKind::SingleShell => self.single_shell.as_ref().map_err(Clone::clone),
            ModelKind::TwoShell => self.two_shell.as_ref().map_err(Clone::clone),
        }
    }

    pub fn is_available(&self, kind: ModelKind) -> bool {
        self.get(kind).is_ok()
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.homogeneous.frequencies
    }

    pub fn len(&self) -> usize {
        self.homogeneous.len()
    }

    pub fn is_empty(&self) -> bool {
        self.homogeneous.is_empty()
    }

    /// Crossovers per model; a model without a curve reports none.
    pub fn crossovers(&self) -> Result<ModelCrossovers> {
        let pair = |kind: ModelKind| match self.get(kind) {
            Ok(curve) => curve.crossovers(),
            Err(_) => Ok(CrossoverPair::none()),
        };
        Ok(ModelCrossovers {
            homogeneous: pair(ModelKind::Homogeneous)?,
            single_shell: pair(ModelKind::SingleShell)?,
            two_shell: pair(ModelKind::TwoShell)?,
        })
    }
}

fn sweep_model<M>(
    kind: ModelKind,
    model: &M,
    medium: &MediumParameters,
    gradient: FieldGradient,
    sweep: &FrequencySweep,
) -> Result<ModelCurve>
where
    M: DielectricModel + Sync + ?Sized,
{
    model.validate()?;
    let responses = sweep
        .frequencies()
        .par_iter()
        .map(|&f| model.evaluate_all(medium, gradient, f))
        .collect::<Result<Vec<CmResponse>>>()?;

    Ok(ModelCurve::from_responses(
        kind,
        sweep.frequencies(),
        responses.iter(),
    ))
}

/// Evaluate all three models at every sweep frequency.
///
/// An invalid medium or homogeneous particle fails the call. Shell fields
/// are placeholders for the simpler models, so a shell model that cannot
/// be evaluated only records its error in the returned set.
pub fn generate_curve(parameters: &CurveParameters, sweep: &FrequencySweep) -> Result<CurveSet> {
    parameters.validate_for(ModelKind::Homogeneous)?;

    let medium = parameters.medium();
    let gradient = parameters.field_gradient;

    let homogeneous = sweep_model(
        ModelKind::Homogeneous,
        &parameters.homogeneous(),
        &medium,
        gradient,
        sweep,
    )?;
    let single_shell = sweep_model(
        ModelKind::SingleShell,
        &parameters.single_shell(),
        &medium,
        gradient,
        sweep,
    );
    let two_shell = sweep_model(
        ModelKind::TwoShell,
        &parameters.two_shell(),
        &medium,
        gradient,
        sweep,
    );

    Ok(CurveSet {
        homogeneous,
        single_shell,
        two_shell,
    })
}

/// Evaluate a single model over the sweep.
pub fn generate_model_curve(
    parameters: &CurveParameters,
    kind: ModelKind,
    sweep: &FrequencySweep,
) -> Result<ModelCurve> {
    let medium = parameters.medium();
    medium.validate()?;
    let model = parameters.model(kind);

    sweep_model(
        kind,
        &*model,
        &medium,
        parameters.field_gradient,
        sweep,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DielectricError;
    use crate::units::FrequencyUnit;
    use approx::assert_relative_eq;

    fn red_cell() -> CurveParameters {
        CurveParameters {
            buffer_perm: 78.0,
            buffer_cond: 0.01,
            core_perm: 60.0,
            core_cond: 0.5,
            core_radius: 5.0,
            first_shell_perm: 10.0,
            first_shell_cond: 1.0e-6,
            first_shell_thick: 6.0,
            ..CurveParameters::default()
        }
    }

    fn decade_sweep() -> FrequencySweep {
        FrequencySweep::log_spaced(1.0e3, 1.0e9, 61, FrequencyUnit::Hz).unwrap()
    }

    #[test]
    fn all_series_share_the_sweep_length() {
        let sweep = decade_sweep();
        let curves = generate_curve(&red_cell(), &sweep).unwrap();
        for kind in ModelKind::ALL {
            let curve = curves.get(kind).unwrap();
            assert_eq!(curve.model, kind);
            assert_eq!(curve.len(), 61);
            curve.validate().unwrap();
            assert_eq!(curve.frequencies, sweep.frequencies());
        }
    }

    #[test]
    fn curve_points_match_direct_evaluation() {
        let params = red_cell();
        let sweep = decade_sweep();
        let curves = generate_curve(&params, &sweep).unwrap();
        let medium = params.medium();

        let two_shell = curves.two_shell.as_ref().unwrap();
        for (i, &f) in sweep.frequencies().iter().enumerate() {
            let ts = params.two_shell().evaluate_all(&medium, 1.0, f).unwrap();
            assert_eq!(two_shell.re_cm[i], ts.re);
            assert_eq!(two_shell.im_cm[i], ts.im);
            assert_eq!(two_shell.dep_force[i], ts.force);
        }

        let single = generate_model_curve(&params, ModelKind::SingleShell, &sweep).unwrap();
        assert_eq!(curves.single_shell, Ok(single));
    }

    #[test]
    fn single_shell_cell_has_two_crossovers() {
        let curves = generate_curve(&red_cell(), &decade_sweep()).unwrap();
        let crossovers = curves.crossovers().unwrap();

        let pair = crossovers.single_shell;
        assert_relative_eq!(pair.first.unwrap(), 10f64.powf(4.4), max_relative = 1e-9);
        assert_relative_eq!(pair.second.unwrap(), 10f64.powf(8.1), max_relative = 1e-9);

        // A bare conductive sphere is always above the buffer at low
        // frequency, so it only has the high-frequency crossover.
        assert_eq!(crossovers.homogeneous.first, None);
        assert!(crossovers.homogeneous.second.is_some());
        assert_eq!(crossovers.get(ModelKind::SingleShell), pair);
    }

    #[test]
    fn invalid_shell_placeholder_only_drops_that_model() {
        let params = CurveParameters {
            second_shell_thick: 0.0,
            ..red_cell()
        };
        let curves = generate_curve(&params, &decade_sweep()).unwrap();
        assert!(matches!(
            curves.two_shell,
            Err(DielectricError::InvalidGeometry(_))
        ));
        assert!(!curves.is_available(ModelKind::TwoShell));
        assert!(curves.is_available(ModelKind::SingleShell));
        assert_eq!(curves.crossovers().unwrap().two_shell, CrossoverPair::none());
        assert!(generate_model_curve(&params, ModelKind::SingleShell, &decade_sweep()).is_ok());
        assert!(generate_model_curve(&params, ModelKind::TwoShell, &decade_sweep()).is_err());
    }

    #[test]
    fn tiny_bead_ignores_default_shell_placeholders() {
        // 6 nm shells do not fit inside a 5 nm bead, but the bead never reads them
        let params = CurveParameters {
            core_perm: 2.55,
            core_cond: 2.0e-4,
            core_radius: 0.005,
            ..CurveParameters::default()
        };
        assert!(params.validate_for(ModelKind::Homogeneous).is_ok());
        assert!(params.validate().is_err());

        let sweep = decade_sweep();
        let curves = generate_curve(&params, &sweep).unwrap();
        assert_eq!(curves.homogeneous.len(), 61);
        assert!(matches!(
            curves.single_shell,
            Err(DielectricError::InvalidGeometry(_))
        ));
        assert!(matches!(
            curves.get(ModelKind::TwoShell),
            Err(DielectricError::InvalidGeometry(_))
        ));

        let medium = params.medium();
        let at_100khz = params.homogeneous().evaluate_all(&medium, 1.0, 1.0e5).unwrap();
        assert_relative_eq!(at_100khz.re, -0.4851, epsilon = 1e-3);
        let direct = generate_model_curve(&params, ModelKind::Homogeneous, &sweep).unwrap();
        assert_eq!(curves.homogeneous, direct);
        assert!(curves.crossovers().is_ok());
    }

    #[test]
    fn invalid_medium_or_bead_fails_the_whole_set() {
        let bad_bead = CurveParameters {
            core_radius: 0.0,
            ..red_cell()
        };
        assert!(generate_curve(&bad_bead, &decade_sweep()).is_err());
        let bad_medium = CurveParameters {
            buffer_perm: -1.0,
            ..red_cell()
        };
        assert!(matches!(
            generate_curve(&bad_medium, &decade_sweep()),
            Err(DielectricError::InvalidParameter(_))
        ));
    }

    #[test]
    fn parameters_use_curve_file_field_names() {
        let json = r#"{
            "buffer_perm": 80.0,
            "buffer_cond": 0.002,
            "core_perm": 55.0,
            "core_cond": 0.4,
            "core_radius": 4.0,
            "1st_shell_perm": 9.0,
            "1st_shell_cond": 1e-7,
            "1st_shell_thick": 7.0,
            "electric_field": 2.0
        }"#;
        let params: CurveParameters = serde_json::from_str(json).unwrap();
        assert_eq!(params.first_shell_thick, 7.0);
        assert_eq!(params.field_gradient, 2.0);
        assert_eq!(params.second_shell_perm, config::DEFAULT_SECOND_SHELL_PERM);

        let back = serde_json::to_value(&params).unwrap();
        assert_eq!(back["2nd_shell_thick"], 6.0);
    }
}
