use approx::assert_relative_eq;
use tpa_analysis::{analyze_rows, compute_tpa, compute_tpa_with, response};
use tpa_core::{
    ErrorKind, FrequencyBand, InversionQuality, PathBandMatrix, TpaConfig, TpaError, TpaRequest,
    TpaResult, TransferPath,
};
use tpa_synth::{MatrixSource, ProvidedMatrices, SyntheticSource};

fn zeros() -> PathBandMatrix {
    PathBandMatrix::zeros(8, 7)
}

#[test]
fn all_zero_matrices_produce_sentinel_outputs() {
    let source = ProvidedMatrices::new(zeros(), zeros());
    let result =
        compute_tpa_with(&TpaRequest::default(), &source, &TpaConfig::default()).unwrap();

    let y = response(&zeros(), &zeros()).unwrap();
    assert!(y.iter().all(|v| *v == 0.0));

    assert!(result.contribution_data.iter().all(|e| e.value == 0.0));
    assert_eq!(result.kpis.sound_pressure_level, f64::NEG_INFINITY);
    assert_eq!(result.kpis.transfer_efficiency, 0.0);
    assert_eq!(result.kpis.max_vibration_amplitude, 0.0);
    assert!(result.svd_analysis.condition_number.is_infinite());
    assert_eq!(result.svd_analysis.inversion_quality, InversionQuality::Poor);
    assert_eq!(result.svd_analysis.truncation_level, 7);
}

#[test]
fn identity_like_transfer_matrix_is_well_conditioned() {
    let h = PathBandMatrix::from_fn(8, 7, |r, c| if r == c { 1.0 } else { 0.01 });
    let f = PathBandMatrix::from_fn(8, 7, |_, _| 1.0);
    let source = ProvidedMatrices::new(h, f);
    let result =
        compute_tpa_with(&TpaRequest::default(), &source, &TpaConfig::default()).unwrap();

    let svd = &result.svd_analysis;
    assert!(svd.condition_number.is_finite());
    assert!(svd.condition_number >= 1.0);
    assert_eq!(svd.inversion_quality, InversionQuality::Good);
    assert!(svd.truncation_level <= 7);
    assert_eq!(svd.singular_values.len(), 7);
}

#[test]
fn default_request_populates_every_field() {
    let request = TpaRequest::new("All Frequencies", "Driver's Ear");
    let result = compute_tpa(&request, &TpaConfig::default()).unwrap();

    assert_eq!(result.frequency_band, "All Frequencies");
    assert_eq!(result.target, "Driver's Ear");
    assert_eq!(result.contribution_data.len(), TransferPath::ALL.len());
    assert!(result
        .contribution_data
        .windows(2)
        .all(|w| w[0].value >= w[1].value));
    let total: f64 = result.contribution_data.iter().map(|e| e.value).sum();
    assert_relative_eq!(total, 100.0, epsilon = 1e-9);

    assert_eq!(result.svd_analysis.singular_values.len(), 7);
    assert!(result.svd_analysis.condition_number.is_finite());
    assert_eq!(result.transfer_functions.len(), 8);
    assert_eq!(result.prediction_accuracy.error_distribution.len(), 7);
    assert!(result.kpis.sound_pressure_level.is_finite());
    assert!((0.0..=100.0).contains(&result.kpis.transfer_efficiency));
    assert!(FrequencyBand::ALL
        .iter()
        .any(|b| b.hz() == result.kpis.dominant_frequency));

    let json = serde_json::to_value(&result).unwrap();
    for key in [
        "frequencyBand",
        "target",
        "kpis",
        "contributionData",
        "svdAnalysis",
        "transferFunctions",
        "predictionAccuracy",
    ] {
        assert!(!json[key].is_null(), "missing {key}");
    }
    assert!(json["svdAnalysis"]["singularValuesUsed"].is_u64());
    assert!(json["transferFunctions"]["Air Intake"]["8kHz"].is_f64());
}

#[test]
fn repeated_calls_are_identical() {
    let request = TpaRequest::default();
    let config = TpaConfig::default();
    let first = compute_tpa(&request, &config).unwrap();
    let second = compute_tpa(&request, &config).unwrap();
    assert_eq!(first, second);

    let json = serde_json::to_string(&first).unwrap();
    let back: TpaResult = serde_json::from_str(&json).unwrap();
    assert_eq!(first, back);
}

#[test]
fn dataset_ids_do_not_change_the_result() {
    let config = TpaConfig::default();
    let plain = compute_tpa(&TpaRequest::default(), &config).unwrap();
    let mut request = TpaRequest::default();
    request.frf_dataset_id = Some(7);
    request.operational_measurement_id = Some(9);
    let with_ids = compute_tpa(&request, &config).unwrap();
    assert_eq!(plain, with_ids);
}

#[test]
fn synthetic_source_matches_compute_tpa() {
    let config = TpaConfig::default();
    let source = SyntheticSource::from_config(&config);
    let via_source = compute_tpa_with(&TpaRequest::default(), &source, &config).unwrap();
    let direct = compute_tpa(&TpaRequest::default(), &config).unwrap();
    assert_eq!(via_source, direct);
}

struct MismatchedSource;

impl MatrixSource for MismatchedSource {
    fn load(
        &self,
        _paths: &[TransferPath],
        _bands: &[FrequencyBand],
    ) -> Result<(PathBandMatrix, PathBandMatrix), TpaError> {
        Ok((PathBandMatrix::zeros(8, 7), PathBandMatrix::zeros(8, 6)))
    }
}

#[test]
fn mismatched_h_and_f_is_a_computation_error() {
    let err = compute_tpa_with(&TpaRequest::default(), &MismatchedSource, &TpaConfig::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Computation);
}

#[test]
fn empty_standalone_matrix_is_an_input_error() {
    let err = analyze_rows(Vec::new(), &TpaConfig::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let config = TpaConfig {
        energy_threshold: 2.0,
        ..TpaConfig::default()
    };
    let err = compute_tpa(&TpaRequest::default(), &config).unwrap_err();
    assert!(matches!(err, TpaError::InvalidConfig(_)));
}

#[test]
fn negative_zero_rows_keep_catalog_order_among_ties() {
    let h = PathBandMatrix::from_fn(8, 7, |r, _| match r {
        0 => -0.0,
        7 => 1.0,
        _ => 0.0,
    });
    let f = PathBandMatrix::from_fn(8, 7, |_, _| 1.0);
    let result = compute_tpa_with(
        &TpaRequest::default(),
        &ProvidedMatrices::new(h, f),
        &TpaConfig::default(),
    )
    .unwrap();

    let names: Vec<&str> = result
        .contribution_data
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names[0], "Other");
    assert_eq!(names[1], "Engine Mount 1");
    assert_eq!(&names[2..], &[
        "Engine Mount 2",
        "Exhaust Hanger",
        "Subframe",
        "Transmission Mount",
        "Suspension",
        "Air Intake",
    ]);
    assert!(result
        .contribution_data
        .iter()
        .all(|e| e.value.is_sign_positive()));
    let json = serde_json::to_string(&result.contribution_data).unwrap();
    assert!(!json.contains("-0.0"));
}
