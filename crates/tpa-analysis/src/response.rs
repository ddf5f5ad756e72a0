use std::cmp::Ordering;
use tpa_core::{ContributionEntry, PathBandMatrix, TpaError, TransferPath};

/// `Y[f] = sum_p H[p,f] * F[p,f]`.
///
/// This is an elementwise product summed over paths, not a matrix product:
/// Y has one entry per frequency band.
pub fn response(h: &PathBandMatrix, f: &PathBandMatrix) -> Result<Vec<f64>, TpaError> {
    h.ensure_same_shape(f)?;
    let y = (0..h.cols())
        .map(|c| (0..h.rows()).map(|r| h.get(r, c) * f.get(r, c)).sum())
        .collect();
    Ok(y)
}

/// Per-path energy `sum_f H[p,f] * F[p,f]`, in row order.
pub fn path_energies(h: &PathBandMatrix, f: &PathBandMatrix) -> Result<Vec<f64>, TpaError> {
    h.ensure_same_shape(f)?;
    let energies = (0..h.rows())
        .map(|r| h.row(r).iter().zip(f.row(r)).map(|(a, b)| a * b).sum())
        .collect();
    Ok(energies)
}

/// Share of total response energy per path, sorted descending.
///
/// Ties keep catalog order. A zero total yields 0% for every path.
pub fn contributions(
    h: &PathBandMatrix,
    f: &PathBandMatrix,
    paths: &[TransferPath],
) -> Result<Vec<ContributionEntry>, TpaError> {
    h.ensure_shape(paths.len(), h.cols())?;
    let energies = path_energies(h, f)?;
    let total: f64 = energies.iter().sum();

    let mut entries: Vec<ContributionEntry> = paths
        .iter()
        .zip(&energies)
        .map(|(path, energy)| ContributionEntry {
            name: path.label().to_string(),
            // `+ 0.0` folds a -0.0 share into +0.0
            value: if total > 0.0 { energy / total * 100.0 + 0.0 } else { 0.0 },
            color: path.color().to_string(),
        })
        .collect();
    entries.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
    Ok(entries)
}
