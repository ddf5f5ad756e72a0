use crate::accuracy::accuracy;
use crate::kpi::kpis;
use crate::response::{contributions, response};
use crate::svd::analyze;
use tpa_core::{
    FrequencyBand, TpaConfig, TpaError, TpaRequest, TpaResult, TransferFunctionTable,
    TransferPath,
};
use tpa_synth::{MatrixSource, SyntheticSource};
use tracing::{debug, info};

/// Runs the full analysis on the seeded synthetic matrices named by `config`.
pub fn compute_tpa(request: &TpaRequest, config: &TpaConfig) -> Result<TpaResult, TpaError> {
    compute_tpa_with(request, &SyntheticSource::from_config(config), config)
}

/// Runs the full analysis on H and F from `source`.
///
/// Nothing is cached; each call recomputes from scratch.
pub fn compute_tpa_with<S: MatrixSource + ?Sized>(
    request: &TpaRequest,
    source: &S,
    config: &TpaConfig,
) -> Result<TpaResult, TpaError> {
    config.validate()?;
    let paths = TransferPath::ALL;
    let bands = FrequencyBand::ALL;

    if request.frf_dataset_id.is_some() || request.operational_measurement_id.is_some() {
        debug!(
            "[TPA] dataset ids frf={:?} operational={:?} are not used by the computation",
            request.frf_dataset_id, request.operational_measurement_id
        );
    }

    let (h, f) = source.load(&paths, &bands)?;
    h.ensure_same_shape(&f)?;

    let y = response(&h, &f)?;
    let contribution_data = contributions(&h, &f, &paths)?;
    let svd_analysis = analyze(&h, config)?;
    let prediction_accuracy = accuracy(&y, &bands, config)?;
    let kpis = kpis(&h, &f, &y, &bands, config)?;
    let transfer_functions = TransferFunctionTable::from_matrix(&h, &paths, &bands)?;

    info!(
        "[TPA] band={} target={} spl={:.2} dB condition={:.3} accuracy={:.2}%",
        request.frequency_band,
        request.target,
        kpis.sound_pressure_level,
        svd_analysis.condition_number,
        prediction_accuracy.overall
    );

    Ok(TpaResult {
        frequency_band: request.frequency_band.clone(),
        target: request.target.clone(),
        kpis,
        contribution_data,
        svd_analysis,
        transfer_functions,
        prediction_accuracy,
    })
}
