// End-to-end checks through the public API

use approx::assert_relative_eq;
use dep_response::io::CurveDocument;
use dep_response::units::FrequencyUnit;
use dep_response::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn red_cell() -> CurveParameters {
    CurveParameters {
        core_perm: 60.0,
        core_cond: 0.5,
        core_radius: 5.0,
        first_shell_perm: 10.0,
        first_shell_cond: 1.0e-6,
        first_shell_thick: 6.0,
        ..CurveParameters::default()
    }
}

fn sweep() -> FrequencySweep {
    FrequencySweep::log_spaced(1.0, 1.0e6, 61, FrequencyUnit::KHz).unwrap()
}

#[test]
fn reference_parameters_reproduce_known_values() {
    let params = CurveParameters::default();
    let medium = params.medium();

    let ho = params.homogeneous().evaluate_all(&medium, 1.0, 1.0e5).unwrap();
    assert_relative_eq!(ho.re, 0.7499192082971686, max_relative = 1e-12);
    assert_relative_eq!(ho.force, 3.2540818036766175, max_relative = 1e-12);

    let ss = params.single_shell().cm_factor_complex(&medium, 1.0e5).unwrap();
    assert_relative_eq!(ss.re, 0.7431354769066225, max_relative = 1e-10);

    let ts = params.two_shell().cm_factor_complex(&medium, 1.0e5).unwrap();
    assert_relative_eq!(ts.re, 0.6513865065298386, max_relative = 1e-10);
    assert_relative_eq!(ts.im, 0.23270622227974974, max_relative = 1e-9);
}

#[test]
fn matched_particle_is_flat_zero() {
    let params = CurveParameters {
        core_perm: 78.0,
        core_cond: 0.01,
        ..CurveParameters::default()
    };
    let curves = generate_curve(&params, &sweep()).unwrap();
    assert!(curves.homogeneous.re_cm.iter().all(|v| *v == 0.0));
    assert!(curves.homogeneous.dep_force.iter().all(|v| *v == 0.0));
    assert_eq!(curves.homogeneous.crossovers().unwrap(), CrossoverPair::none());
}

#[test]
fn curve_to_document_to_scatter_pipeline() {
    let params = red_cell();
    let sweep = sweep();
    let curves = generate_curve(&params, &sweep).unwrap();
    let crossovers = curves.crossovers().unwrap();

    // Membrane-enclosed cell: crossovers near 25 kHz and 126 MHz
    let ss = crossovers.single_shell;
    assert_relative_eq!(ss.first.unwrap(), 10f64.powf(4.4), max_relative = 1e-9);
    assert_relative_eq!(ss.second.unwrap(), 10f64.powf(8.1), max_relative = 1e-9);

    let document =
        CurveDocument::from_curve_set("default", ModelKind::SingleShell, &params, &curves).unwrap();
    assert_eq!(document.crossovers(), crossovers);

    let mut rng = StdRng::seed_from_u64(2024);
    let scatter = synthesize_scatter(
        &params,
        ModelKind::SingleShell,
        &sweep,
        &NoiseKernel::Gaussian { std_dev: 0.05 },
        Some(ErrorBars { min: 0.01, max: 0.02 }),
        &mut rng,
    )
    .unwrap();
    assert_eq!(scatter.len(), sweep.len());

    // Noise stays within a few σ of the clean curve
    for (noisy, clean) in scatter.recm_values.iter().zip(&curves.single_shell.as_ref().unwrap().re_cm) {
        assert!((noisy - clean).abs() < 0.3);
    }

    let path = std::env::temp_dir().join(format!("dep_response_pipeline_{}.csv", std::process::id()));
    scatter.save_csv(&path).unwrap();
    let loaded = ScatterSeries::load_csv(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(loaded, scatter);
}

#[test]
fn concurrent_callers_see_identical_results() {
    let params = CurveParameters::default();
    let sweep = sweep();
    let expected = generate_curve(&params, &sweep).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let params = params.clone();
            let sweep = sweep.clone();
            std::thread::spawn(move || generate_curve(&params, &sweep).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn errors_surface_before_any_output() {
    let params = CurveParameters {
        core_radius: 0.0,
        ..CurveParameters::default()
    };
    assert!(matches!(
        generate_curve(&params, &sweep()),
        Err(DielectricError::InvalidGeometry(_))
    ));

    assert!(matches!(
        find_crossovers(&[1.0, 2.0, 3.0], &[0.1, -0.1]),
        Err(DielectricError::ShapeMismatch { .. })
    ));

    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(
        NoiseKernel::from_selector("white", 0.05, 1.0),
        Err(DielectricError::UnsupportedKernel { .. })
    ));
    assert!(apply_noise(&NoiseKernel::default(), &[0.1, 0.2], &[1.0], &mut rng).is_err());
}
