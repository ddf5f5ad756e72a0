use crate::error::TpaError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Seeds for the three synthetic generators. H and F use distinct seeds so
/// they are independent but reproducible run-to-run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SynthesisSeeds {
    #[serde(default = "SynthesisSeeds::default_transfer")]
    pub transfer: u64,
    #[serde(default = "SynthesisSeeds::default_force")]
    pub force: u64,
    #[serde(default = "SynthesisSeeds::default_measurement")]
    pub measurement: u64,
}

impl SynthesisSeeds {
    fn default_transfer() -> u64 {
        42
    }
    fn default_force() -> u64 {
        43
    }
    fn default_measurement() -> u64 {
        44
    }
}

impl Default for SynthesisSeeds {
    fn default() -> Self {
        Self {
            transfer: Self::default_transfer(),
            force: Self::default_force(),
            measurement: Self::default_measurement(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TpaConfig {
    #[serde(default)]
    pub seeds: SynthesisSeeds,
    #[serde(default = "TpaConfig::default_synthesis_noise_sigma")]
    pub synthesis_noise_sigma: f64,
    #[serde(default = "TpaConfig::default_measurement_noise_sigma")]
    pub measurement_noise_sigma: f64,
    /// Condition numbers at or above this are reported as a poor inversion.
    #[serde(default = "TpaConfig::default_condition_threshold")]
    pub condition_threshold: f64,
    /// Fraction of squared singular-value energy the truncation level must retain.
    #[serde(default = "TpaConfig::default_energy_threshold")]
    pub energy_threshold: f64,
    #[serde(default = "TpaConfig::default_error_floor")]
    pub error_floor: f64,
    #[serde(default = "TpaConfig::default_spl_offset_db")]
    pub spl_offset_db: f64,
    #[serde(default = "TpaConfig::default_vibration_gain")]
    pub vibration_gain: f64,
}

impl TpaConfig {
    fn default_synthesis_noise_sigma() -> f64 {
        0.05
    }
    fn default_measurement_noise_sigma() -> f64 {
        0.1
    }
    fn default_condition_threshold() -> f64 {
        1000.0
    }
    fn default_energy_threshold() -> f64 {
        0.95
    }
    fn default_error_floor() -> f64 {
        1e-10
    }
    fn default_spl_offset_db() -> f64 {
        70.0
    }
    fn default_vibration_gain() -> f64 {
        2.5
    }

    pub fn with_seeds(mut self, seeds: SynthesisSeeds) -> Self {
        self.seeds = seeds;
        self
    }

    pub fn validate(&self) -> Result<(), TpaError> {
        let sigma_ok = |s: f64| s.is_finite() && s >= 0.0;
        if !sigma_ok(self.synthesis_noise_sigma) || !sigma_ok(self.measurement_noise_sigma) {
            return Err(TpaError::InvalidConfig(
                "noise sigma must be a finite, non-negative number".into(),
            ));
        }
        if !(self.condition_threshold > 0.0) {
            return Err(TpaError::InvalidConfig(
                "condition_threshold must be positive".into(),
            ));
        }
        if !(self.energy_threshold > 0.0 && self.energy_threshold <= 1.0) {
            return Err(TpaError::InvalidConfig(
                "energy_threshold must lie in (0, 1]".into(),
            ));
        }
        if !(self.error_floor > 0.0) {
            return Err(TpaError::InvalidConfig("error_floor must be positive".into()));
        }
        if !self.spl_offset_db.is_finite() || !self.vibration_gain.is_finite() {
            return Err(TpaError::InvalidConfig(
                "KPI scale factors must be finite".into(),
            ));
        }
        Ok(())
    }

    pub fn from_toml_str(text: &str) -> Result<Self, TpaError> {
        let config: TpaConfig =
            toml::from_str(text).map_err(|e| TpaError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TpaError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| TpaError::ConfigRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config = Self::from_toml_str(&text)?;
        debug!("[CONFIG] loaded {} ({:?})", path.display(), config.seeds);
        Ok(config)
    }
}

impl Default for TpaConfig {
    fn default() -> Self {
        Self {
            seeds: SynthesisSeeds::default(),
            synthesis_noise_sigma: Self::default_synthesis_noise_sigma(),
            measurement_noise_sigma: Self::default_measurement_noise_sigma(),
            condition_threshold: Self::default_condition_threshold(),
            energy_threshold: Self::default_energy_threshold(),
            error_floor: Self::default_error_floor(),
            spl_offset_db: Self::default_spl_offset_db(),
            vibration_gain: Self::default_vibration_gain(),
        }
    }
}
