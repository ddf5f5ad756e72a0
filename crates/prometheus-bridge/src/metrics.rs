use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};
use tpa_core::TpaResult;

const RESULT_LABELS: &[&str] = &["target", "frequency_band"];

pub struct TpaMetrics {
    pub sound_pressure_level_db: GaugeVec,
    pub transfer_efficiency_percent: GaugeVec,
    pub condition_number: GaugeVec,
    pub prediction_accuracy_percent: GaugeVec,
    pub path_contribution_percent: GaugeVec,
}

fn gauge_vec(
    registry: &Registry,
    name: &str,
    help: &str,
    labels: &[&str],
) -> prometheus::Result<GaugeVec> {
    let gauge = GaugeVec::new(Opts::new(name, help), labels)?;
    registry.register(Box::new(gauge.clone()))?;
    Ok(gauge)
}

impl TpaMetrics {
    /// Registers every gauge on `registry`. Registering twice on the same
    /// registry fails with `AlreadyReg`.
    pub fn new(registry: &Registry) -> prometheus::Result<Self> {
        let sound_pressure_level_db = gauge_vec(
            registry,
            "tpa_sound_pressure_level_db",
            "Sound pressure level of the computed response",
            RESULT_LABELS,
        )?;

        let transfer_efficiency_percent = gauge_vec(
            registry,
            "tpa_transfer_efficiency_percent",
            "Output to input energy ratio, clamped to 100",
            RESULT_LABELS,
        )?;

        let condition_number = gauge_vec(
            registry,
            "tpa_condition_number",
            "Condition number of the transfer-function matrix",
            RESULT_LABELS,
        )?;

        let prediction_accuracy_percent = gauge_vec(
            registry,
            "tpa_prediction_accuracy_percent",
            "Overall prediction accuracy against the reference response",
            RESULT_LABELS,
        )?;

        let path_contribution_percent = gauge_vec(
            registry,
            "tpa_path_contribution_percent",
            "Share of response energy per transmission path",
            &["target", "frequency_band", "path"],
        )?;

        Ok(Self {
            sound_pressure_level_db,
            transfer_efficiency_percent,
            condition_number,
            prediction_accuracy_percent,
            path_contribution_percent,
        })
    }

    pub fn observe(&self, result: &TpaResult) {
        let labels = [result.target.as_str(), result.frequency_band.as_str()];
        self.sound_pressure_level_db
            .with_label_values(&labels)
            .set(result.kpis.sound_pressure_level);
        self.transfer_efficiency_percent
            .with_label_values(&labels)
            .set(result.kpis.transfer_efficiency);
        self.condition_number
            .with_label_values(&labels)
            .set(result.svd_analysis.condition_number);
        self.prediction_accuracy_percent
            .with_label_values(&labels)
            .set(result.prediction_accuracy.overall);
        for entry in &result.contribution_data {
            self.path_contribution_percent
                .with_label_values(&[labels[0], labels[1], entry.name.as_str()])
                .set(entry.value);
        }
    }
}

/// Text exposition of everything registered on `registry`.
pub fn render_text(registry: &Registry) -> prometheus::Result<String> {
    let mut buf = Vec::new();
    TextEncoder::new().encode(&registry.gather(), &mut buf)?;
    String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
}
