use crate::TpaMetrics;
use tpa_core::TpaResult;
use tracing::warn;

/// Records `result` and reports whether its transfer-function matrix is too
/// ill-conditioned to invert (condition number at or above `threshold`).
pub fn reject_if_ill_conditioned(metrics: &TpaMetrics, result: &TpaResult, threshold: f64) -> bool {
    metrics.observe(result);
    let rejected = !(result.svd_analysis.condition_number < threshold);
    if rejected {
        warn!(
            "[METRICS] rejecting result for target {}: condition number {} >= {}",
            result.target, result.svd_analysis.condition_number, threshold
        );
    }
    rejected
}
