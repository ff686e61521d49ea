//! End-to-end tests for the generic model factories and the equivalence
//! verifier, combining multiple modules the way QC comparisons do.

use stdpop::catalog::generic::{isolation_with_migration, piecewise_constant_size};
use stdpop::{
    models_equal, verify_models_equal, DemographicEvent, Mismatch, ModelError, Tolerance,
    VerifyError,
};

fn im_model() -> stdpop::Model {
    isolation_with_migration(7300.0, 12300.0, 12300.0, 4000.0, 1e-4, 1e-4).unwrap()
}

#[test]
fn test_im_population_structure() {
    let model = im_model();
    // Two sampled populations plus one ancestral.
    assert_eq!(model.num_populations(), 3);
    assert_eq!(model.num_sampling_populations(), 2);
}

#[test]
fn test_im_get_samples() {
    let model = im_model();
    let samples = model.get_samples(&[2, 2, 0]).unwrap();
    assert_eq!(samples.len(), 4);
    let populations: Vec<usize> = samples.iter().map(|s| s.population).collect();
    assert_eq!(populations, vec![0, 0, 1, 1]);
    for sample in &samples {
        let expected = model.populations()[sample.population].sampling_time().unwrap();
        assert_eq!(sample.time, expected);
    }
}

#[test]
fn test_im_sampling_from_ancestral_population_fails() {
    let model = im_model();
    let err = model.get_samples(&[0, 0, 1]).unwrap_err();
    assert_eq!(err, ModelError::NonSamplingPopulation(2));
}

#[test]
fn test_piecewise_constant_two_epochs() {
    let model = piecewise_constant_size(5000.0, &[(100.0, 2000.0), (500.0, 10000.0)]).unwrap();
    let events = model.demographic_events();
    assert_eq!(events.len(), 2);
    match events[0] {
        DemographicEvent::PopulationParametersChange {
            time, growth_rate, ..
        } => {
            assert_eq!(time, 100.0);
            assert_eq!(growth_rate, Some(0.0));
        }
        ref other => panic!("unexpected event: {other:?}"),
    }
    match events[1] {
        DemographicEvent::PopulationParametersChange { time, .. } => assert_eq!(time, 500.0),
        ref other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn test_model_equals_reflexive() {
    let model = im_model();
    verify_models_equal(&model, &model, Tolerance::default()).unwrap();
    assert!(models_equal(&model, &model, Tolerance::default()).unwrap());
}

#[test]
fn test_independently_built_models_compare_equal() {
    // A QC reconstruction from the same published parameters must verify.
    let model = im_model();
    let qc = isolation_with_migration(7300.0, 12300.0, 12300.0, 4000.0, 1e-4, 1e-4).unwrap();
    verify_models_equal(&model, &qc, Tolerance::default()).unwrap();
}

#[test]
fn test_perturbation_within_tolerance_still_equal() {
    let model = im_model();
    let qc =
        isolation_with_migration(7300.0, 12300.0 + 1e-6, 12300.0, 4000.0, 1e-4, 1e-4).unwrap();
    assert!(models_equal(&model, &qc, Tolerance::default()).unwrap());
}

#[test]
fn test_initial_size_beyond_tolerance_reports_initial_sizes() {
    let model = im_model();
    let qc = isolation_with_migration(7300.0, 12350.0, 12300.0, 4000.0, 1e-4, 1e-4).unwrap();
    let err = verify_models_equal(&model, &qc, Tolerance::default()).unwrap_err();
    assert_eq!(err, VerifyError::Unequal(Mismatch::InitialSizes));
    assert!(!models_equal(&model, &qc, Tolerance::default()).unwrap());
}

#[test]
fn test_migration_rate_difference_reports_migration_matrix() {
    let model = im_model();
    let qc = isolation_with_migration(7300.0, 12300.0, 12300.0, 4000.0, 2e-4, 1e-4).unwrap();
    let err = verify_models_equal(&model, &qc, Tolerance::default()).unwrap_err();
    assert_eq!(err, VerifyError::Unequal(Mismatch::MigrationMatrix));
}

#[test]
fn test_event_time_difference_reports_event_field() {
    let model = im_model();
    let qc = isolation_with_migration(7300.0, 12300.0, 12300.0, 4100.0, 1e-4, 1e-4).unwrap();
    let err = verify_models_equal(&model, &qc, Tolerance::default()).unwrap_err();
    assert!(matches!(
        err,
        VerifyError::Unequal(Mismatch::EventField { key: "time", .. })
    ));
}

#[test]
fn test_matrix_shape_mismatch_reported_before_population_checks() {
    // Different population counts give differently shaped matrices; the
    // shape check fires before any population-level comparison.
    let im = im_model();
    let constant = piecewise_constant_size(5000.0, &[]).unwrap();
    let err = verify_models_equal(&im, &constant, Tolerance::default()).unwrap_err();
    assert_eq!(err, VerifyError::Unequal(Mismatch::MigrationMatrixShape));
}

#[test]
fn test_event_count_mismatch() {
    let one = piecewise_constant_size(5000.0, &[(100.0, 2000.0)]).unwrap();
    let two = piecewise_constant_size(5000.0, &[(100.0, 2000.0), (500.0, 100.0)]).unwrap();
    let err = verify_models_equal(&one, &two, Tolerance::default()).unwrap_err();
    assert_eq!(err, VerifyError::Unequal(Mismatch::EventCount));
}

#[test]
fn test_wider_tolerance_accepts_larger_differences() {
    let model = im_model();
    let qc = isolation_with_migration(7300.0, 12350.0, 12300.0, 4000.0, 1e-4, 1e-4).unwrap();
    assert!(!models_equal(&model, &qc, Tolerance::default()).unwrap());
    assert!(models_equal(&model, &qc, Tolerance::new(1e-2, 1e-5)).unwrap());
}

#[test]
fn test_engine_inputs_expose_model_fields() {
    let model = im_model();
    let inputs = model.engine_inputs();
    assert_eq!(inputs.population_configurations.len(), 3);
    assert_eq!(inputs.migration_matrix.shape(), (3, 3));
    assert_eq!(inputs.demographic_events.len(), 2);
}

#[test]
fn test_debug_report_is_non_empty() {
    let model = im_model();
    let mut out = Vec::new();
    model.debug(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(!text.is_empty());
    assert!(text.contains("Isolation with migration"));
}
