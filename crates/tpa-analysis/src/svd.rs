use nalgebra::DMatrix;
use tpa_core::{InversionQuality, PathBandMatrix, SvdResult, TpaConfig, TpaError};
use tracing::{debug, warn};

/// Singular values of `m`, descending.
pub fn singular_values(m: &PathBandMatrix) -> Result<Vec<f64>, TpaError> {
    if m.is_empty() {
        return Err(TpaError::EmptyMatrix);
    }
    m.ensure_finite()?;
    let dm = DMatrix::from_row_slice(m.rows(), m.cols(), m.as_slice());
    let svd = dm
        .try_svd(false, false, f64::EPSILON, 0)
        .ok_or(TpaError::SvdNonConvergence)?;
    let mut s: Vec<f64> = svd.singular_values.iter().copied().collect();
    s.sort_by(|a, b| b.total_cmp(a));
    Ok(s)
}

/// `s[0] / s[last]`, or infinity when the smallest value is exactly zero.
pub fn condition_number(s: &[f64]) -> f64 {
    match (s.first(), s.last()) {
        (Some(&largest), Some(&smallest)) if smallest > 0.0 => largest / smallest,
        _ => f64::INFINITY,
    }
}

pub fn classify(condition_number: f64, threshold: f64) -> InversionQuality {
    if condition_number < threshold {
        InversionQuality::Good
    } else {
        InversionQuality::Poor
    }
}

/// Smallest 1-based k whose leading k squared singular values hold at least
/// `energy_threshold` of the total. All-zero input keeps every value.
pub fn truncation_level(s: &[f64], energy_threshold: f64) -> usize {
    let total: f64 = s.iter().map(|v| v * v).sum();
    if total <= 0.0 {
        return s.len();
    }
    let mut cumulative = 0.0;
    for (i, v) in s.iter().enumerate() {
        cumulative += v * v;
        if cumulative / total >= energy_threshold {
            return i + 1;
        }
    }
    s.len()
}

pub fn analyze(m: &PathBandMatrix, config: &TpaConfig) -> Result<SvdResult, TpaError> {
    let singular_values = singular_values(m)?;
    let condition_number = condition_number(&singular_values);
    let inversion_quality = classify(condition_number, config.condition_threshold);
    let truncation_level = truncation_level(&singular_values, config.energy_threshold);

    debug!(
        "[SVD] {}x{} singular values {:?}",
        m.rows(),
        m.cols(),
        singular_values
    );
    if inversion_quality == InversionQuality::Poor {
        warn!(
            "[SVD] ill-conditioned matrix: condition number {} >= {}",
            condition_number, config.condition_threshold
        );
    }

    Ok(SvdResult {
        singular_values,
        truncation_level,
        singular_values_used: truncation_level,
        condition_number,
        inversion_quality,
    })
}

/// Standalone entry point for caller-supplied rows. Shape problems are
/// rejected as input errors before any decomposition runs.
pub fn analyze_rows(rows: Vec<Vec<f64>>, config: &TpaConfig) -> Result<SvdResult, TpaError> {
    let m = PathBandMatrix::from_rows(rows)?;
    analyze(&m, config)
}
