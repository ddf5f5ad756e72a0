use tpa_core::{FrequencyBand, KpiSet, PathBandMatrix, TpaConfig, TpaError};
use tracing::warn;

pub fn kpis(
    h: &PathBandMatrix,
    f: &PathBandMatrix,
    y: &[f64],
    bands: &[FrequencyBand],
    config: &TpaConfig,
) -> Result<KpiSet, TpaError> {
    h.ensure_same_shape(f)?;
    if y.is_empty() {
        return Err(TpaError::EmptyMatrix);
    }
    if y.len() != f.cols() || y.len() != bands.len() {
        return Err(TpaError::ShapeMismatch {
            left: (1, y.len()),
            right: (1, bands.len()),
        });
    }

    let output_energy: f64 = y.iter().map(|v| v * v).sum();
    // log10(0) is -inf; reported as-is.
    let sound_pressure_level = config.spl_offset_db + 10.0 * output_energy.log10();
    if output_energy == 0.0 {
        warn!("[KPI] zero response energy, sound pressure level is -inf");
    }

    let (dominant, peak) = y
        .iter()
        .enumerate()
        .fold((0, y[0]), |best, (i, v)| if *v > best.1 { (i, *v) } else { best });

    let input_energy = f.sum_of_squares();
    let transfer_efficiency = if input_energy > 0.0 {
        (100.0 * output_energy / input_energy).min(100.0)
    } else {
        0.0
    };

    Ok(KpiSet {
        sound_pressure_level,
        max_vibration_amplitude: config.vibration_gain * peak,
        dominant_frequency: bands[dominant].hz(),
        transfer_efficiency,
    })
}
