use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use tpa_core::{AccuracyResult, BandGroup, ErrorPoint, FrequencyBand, TpaConfig, TpaError};

/// Synthetic "measured" response: `|y + N(0, sigma)|` per band.
pub fn measured_reference(y: &[f64], seed: u64, sigma: f64) -> Result<Vec<f64>, TpaError> {
    let noise = Normal::new(0.0, sigma)
        .map_err(|e| TpaError::InvalidConfig(format!("measurement noise: {e}")))?;
    let mut rng = StdRng::seed_from_u64(seed);
    Ok(y.iter().map(|v| (v + noise.sample(&mut rng)).abs()).collect())
}

/// Percentage error per band, with the denominator floored at `floor`.
pub fn band_errors(y: &[f64], measured: &[f64], floor: f64) -> Vec<f64> {
    y.iter()
        .zip(measured)
        .map(|(computed, reference)| (computed - reference).abs() / reference.max(floor) * 100.0)
        .collect()
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        f64::NAN
    } else {
        sum / n as f64
    }
}

/// Compares `y` with a seeded perturbation of itself. Accuracies are
/// `100 - mean(error)` and go negative once errors exceed 100%. A band group
/// with no bands in `bands` reports NaN.
pub fn accuracy(
    y: &[f64],
    bands: &[FrequencyBand],
    config: &TpaConfig,
) -> Result<AccuracyResult, TpaError> {
    if y.is_empty() {
        return Err(TpaError::EmptyMatrix);
    }
    if y.len() != bands.len() {
        return Err(TpaError::ShapeMismatch {
            left: (1, y.len()),
            right: (1, bands.len()),
        });
    }
    let measured = measured_reference(
        y,
        config.seeds.measurement,
        config.measurement_noise_sigma,
    )?;
    let errors = band_errors(y, &measured, config.error_floor);

    let group_accuracy = |group: BandGroup| {
        100.0
            - mean(
                bands
                    .iter()
                    .zip(&errors)
                    .filter(|(band, _)| band.group() == group)
                    .map(|(_, e)| *e),
            )
    };

    Ok(AccuracyResult {
        overall: 100.0 - mean(errors.iter().copied()),
        low_frequency: group_accuracy(BandGroup::Low),
        mid_frequency: group_accuracy(BandGroup::Mid),
        high_frequency: group_accuracy(BandGroup::High),
        error_distribution: bands
            .iter()
            .zip(&errors)
            .map(|(band, error)| ErrorPoint {
                frequency: band.label().to_string(),
                error: *error,
            })
            .collect(),
    })
}
