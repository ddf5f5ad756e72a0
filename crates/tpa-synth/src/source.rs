use crate::shapes::{shape_for, MatrixRole};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use tpa_core::{FrequencyBand, PathBandMatrix, SynthesisSeeds, TpaConfig, TpaError, TransferPath};
use tracing::debug;

/// Supplies the transfer-function matrix H and the operational-force matrix F,
/// both shaped `paths.len() x bands.len()`.
pub trait MatrixSource {
    fn load(
        &self,
        paths: &[TransferPath],
        bands: &[FrequencyBand],
    ) -> Result<(PathBandMatrix, PathBandMatrix), TpaError>;
}

/// Deterministic stand-in for measured data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyntheticSource {
    pub seeds: SynthesisSeeds,
    pub noise_sigma: f64,
}

impl SyntheticSource {
    pub fn new(seeds: SynthesisSeeds, noise_sigma: f64) -> Self {
        Self { seeds, noise_sigma }
    }

    pub fn from_config(config: &TpaConfig) -> Self {
        Self::new(config.seeds, config.synthesis_noise_sigma)
    }

    pub fn transfer_matrix(
        &self,
        paths: &[TransferPath],
        bands: &[FrequencyBand],
    ) -> Result<PathBandMatrix, TpaError> {
        synthesize_matrix(MatrixRole::Transfer, self.seeds.transfer, self.noise_sigma, paths, bands)
    }

    pub fn force_matrix(
        &self,
        paths: &[TransferPath],
        bands: &[FrequencyBand],
    ) -> Result<PathBandMatrix, TpaError> {
        synthesize_matrix(MatrixRole::Force, self.seeds.force, self.noise_sigma, paths, bands)
    }
}

impl Default for SyntheticSource {
    fn default() -> Self {
        Self::from_config(&TpaConfig::default())
    }
}

impl MatrixSource for SyntheticSource {
    fn load(
        &self,
        paths: &[TransferPath],
        bands: &[FrequencyBand],
    ) -> Result<(PathBandMatrix, PathBandMatrix), TpaError> {
        Ok((self.transfer_matrix(paths, bands)?, self.force_matrix(paths, bands)?))
    }
}

/// `synthesize(paths, bands) -> (H, F)` with explicit seeds.
pub fn synthesize(
    paths: &[TransferPath],
    bands: &[FrequencyBand],
    seeds: SynthesisSeeds,
    noise_sigma: f64,
) -> Result<(PathBandMatrix, PathBandMatrix), TpaError> {
    SyntheticSource::new(seeds, noise_sigma).load(paths, bands)
}

fn synthesize_matrix(
    role: MatrixRole,
    seed: u64,
    noise_sigma: f64,
    paths: &[TransferPath],
    bands: &[FrequencyBand],
) -> Result<PathBandMatrix, TpaError> {
    if paths.is_empty() || bands.is_empty() {
        return Err(TpaError::EmptyMatrix);
    }
    let noise = Normal::new(0.0, noise_sigma)
        .map_err(|e| TpaError::InvalidConfig(format!("synthesis noise: {e}")))?;
    let mut rng = StdRng::seed_from_u64(seed);

    let mut m = PathBandMatrix::zeros(paths.len(), bands.len());
    for (i, path) in paths.iter().enumerate() {
        shape_for(path.category(), role).fill(m.row_mut(i), &mut rng);
    }
    for v in m.values_mut() {
        *v += noise.sample(&mut rng);
    }
    m.abs_in_place();

    debug!(
        "[SYNTH] {:?} matrix {}x{} seed={} energy={:.6}",
        role,
        m.rows(),
        m.cols(),
        seed,
        m.sum_of_squares()
    );
    Ok(m)
}

/// Externally supplied H and F, e.g. measured FRFs and operational forces.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvidedMatrices {
    pub transfer: PathBandMatrix,
    pub force: PathBandMatrix,
}

impl ProvidedMatrices {
    pub fn new(transfer: PathBandMatrix, force: PathBandMatrix) -> Self {
        Self { transfer, force }
    }
}

impl MatrixSource for ProvidedMatrices {
    fn load(
        &self,
        paths: &[TransferPath],
        bands: &[FrequencyBand],
    ) -> Result<(PathBandMatrix, PathBandMatrix), TpaError> {
        for m in [&self.transfer, &self.force] {
            m.ensure_shape(paths.len(), bands.len())?;
            m.ensure_finite()?;
            m.ensure_non_negative()?;
        }
        let (mut h, mut f) = (self.transfer.clone(), self.force.clone());
        // -0.0 passes the sign check; store it as +0.0
        h.abs_in_place();
        f.abs_in_place();
        Ok((h, f))
    }
}
