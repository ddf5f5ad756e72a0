use crate::shapes::{shape_for, Bump, MatrixRole, RowShape};
use crate::source::{synthesize, MatrixSource, ProvidedMatrices, SyntheticSource};
use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tpa_core::{FrequencyBand, PathBandMatrix, PathCategory, SynthesisSeeds, TpaError, TransferPath};

fn catalog() -> ([TransferPath; 8], [FrequencyBand; 7]) {
    (TransferPath::ALL, FrequencyBand::ALL)
}

#[test]
fn synthesis_is_bit_identical_for_fixed_seeds() {
    let (paths, bands) = catalog();
    let seeds = SynthesisSeeds::default();
    let (h1, f1) = synthesize(&paths, &bands, seeds, 0.05).unwrap();
    let (h2, f2) = synthesize(&paths, &bands, seeds, 0.05).unwrap();
    assert_eq!(h1.as_slice(), h2.as_slice());
    assert_eq!(f1.as_slice(), f2.as_slice());
    assert_eq!(h1.shape(), (8, 7));
    assert_eq!(f1.shape(), (8, 7));
}

#[test]
fn distinct_seeds_give_independent_matrices() {
    let (paths, bands) = catalog();
    let base = SynthesisSeeds::default();
    let (h1, _) = synthesize(&paths, &bands, base, 0.05).unwrap();
    let moved = SynthesisSeeds {
        transfer: 1234,
        ..base
    };
    let (h2, _) = synthesize(&paths, &bands, moved, 0.05).unwrap();
    assert_ne!(h1.as_slice(), h2.as_slice());
}

#[test]
fn entries_are_non_negative_even_with_heavy_noise() {
    let (paths, bands) = catalog();
    let (h, f) = synthesize(&paths, &bands, SynthesisSeeds::default(), 2.0).unwrap();
    assert!(h.ensure_non_negative().is_ok());
    assert!(f.ensure_non_negative().is_ok());
    assert!(h.ensure_finite().is_ok());
}

#[test]
fn noiseless_engine_rows_follow_their_bumps() {
    let (paths, bands) = catalog();
    let (h, f) = synthesize(&paths, &bands, SynthesisSeeds::default(), 0.0).unwrap();
    let engine = TransferPath::EngineMount1.index();
    let peak = h
        .row(engine)
        .iter()
        .enumerate()
        .fold((0, f64::MIN), |acc, (i, v)| if *v > acc.1 { (i, *v) } else { acc });
    assert_eq!(peak.0, 1);
    assert_relative_eq!(peak.1, 0.8, epsilon = 1e-12);

    assert_relative_eq!(f.get(engine, 2), 0.9 + 0.3 * (-8.0f64).exp(), epsilon = 1e-12);
    assert_relative_eq!(f.get(engine, 4), 0.9 * (-2.0f64).exp() + 0.3, epsilon = 1e-12);

    let suspension = TransferPath::Suspension.index();
    assert_relative_eq!(h.get(suspension, 0), 0.25, epsilon = 1e-12);
    let intake = TransferPath::AirIntake.index();
    assert_relative_eq!(f.get(intake, 5), 0.5, epsilon = 1e-12);
}

#[test]
fn broadband_rows_stay_under_their_ceiling() {
    let (paths, bands) = catalog();
    let (h, f) = synthesize(&paths, &bands, SynthesisSeeds::default(), 0.0).unwrap();
    for path in paths.iter().filter(|p| p.category() == PathCategory::Broadband) {
        assert!(h.row(path.index()).iter().all(|v| (0.0..0.4).contains(v)));
        assert!(f.row(path.index()).iter().all(|v| (0.0..0.3).contains(v)));
    }
}

#[test]
fn shape_table_matches_categories() {
    assert_eq!(
        shape_for(PathCategory::Exhaust, MatrixRole::Transfer),
        RowShape::Gaussian(Bump::new(0.6, 3.0, 2.0))
    );
    assert_eq!(
        shape_for(PathCategory::Exhaust, MatrixRole::Force),
        RowShape::Uniform { ceiling: 0.3 }
    );
    assert_eq!(
        shape_for(PathCategory::Transmission, MatrixRole::Transfer),
        RowShape::Uniform { ceiling: 0.4 }
    );
    assert_eq!(
        shape_for(PathCategory::Transmission, MatrixRole::Force),
        RowShape::Gaussian(Bump::new(0.7, 4.0, 2.0))
    );
    assert!(matches!(
        shape_for(PathCategory::Engine, MatrixRole::Force),
        RowShape::EngineOrders { .. }
    ));
}

#[test]
fn deterministic_shapes_ignore_the_rng() {
    let mut a = [0.0; 7];
    let mut b = [0.0; 7];
    let shape = RowShape::HalfSine { amplitude: 0.5 };
    shape.fill(&mut a, &mut StdRng::seed_from_u64(1));
    shape.fill(&mut b, &mut StdRng::seed_from_u64(2));
    assert_eq!(a, b);
}

#[test]
fn empty_catalog_is_rejected() {
    let bands = FrequencyBand::ALL;
    let err = synthesize(&[], &bands, SynthesisSeeds::default(), 0.05).unwrap_err();
    assert_eq!(err, TpaError::EmptyMatrix);
}

#[test]
fn negative_sigma_is_a_config_error() {
    let (paths, bands) = catalog();
    let err = SyntheticSource::new(SynthesisSeeds::default(), -1.0)
        .load(&paths, &bands)
        .unwrap_err();
    assert!(matches!(err, TpaError::InvalidConfig(_)));
}

#[test]
fn provided_matrices_are_validated_against_the_catalog() {
    let (paths, bands) = catalog();
    let ones = PathBandMatrix::from_fn(8, 7, |_, _| 1.0);
    let source = ProvidedMatrices::new(ones.clone(), ones.clone());
    let (h, f) = source.load(&paths, &bands).unwrap();
    assert_eq!(h, ones);
    assert_eq!(f, ones);

    let short = ProvidedMatrices::new(PathBandMatrix::zeros(7, 7), ones.clone());
    assert!(matches!(
        short.load(&paths, &bands),
        Err(TpaError::ShapeMismatch { .. })
    ));

    let mut negative = ones.clone();
    negative.set(3, 3, -1.0);
    let source = ProvidedMatrices::new(ones, negative);
    assert!(matches!(
        source.load(&paths, &bands),
        Err(TpaError::NegativeEntry { row: 3, col: 3, .. })
    ));
}

#[test]
fn provided_negative_zero_is_stored_as_positive_zero() {
    let (paths, bands) = catalog();
    let h = PathBandMatrix::from_fn(8, 7, |r, _| if r == 0 { -0.0 } else { 1.0 });
    let ones = PathBandMatrix::from_fn(8, 7, |_, _| 1.0);
    let (h, _) = ProvidedMatrices::new(h, ones).load(&paths, &bands).unwrap();
    assert!(h.row(0).iter().all(|v| *v == 0.0 && v.is_sign_positive()));
}
