use crate::catalog::{FrequencyBand, TransferPath};
use crate::error::TpaError;
use crate::matrix::PathBandMatrix;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

pub const DEFAULT_FREQUENCY_BAND: &str = "All Frequencies";
pub const DEFAULT_TARGET: &str = "Driver's Ear";

/// Parameters of one analysis call. Labels are echoed, not interpreted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TpaRequest {
    #[serde(default = "TpaRequest::default_frequency_band")]
    pub frequency_band: String,
    #[serde(default = "TpaRequest::default_target")]
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frf_dataset_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operational_measurement_id: Option<i64>,
}

impl TpaRequest {
    fn default_frequency_band() -> String {
        DEFAULT_FREQUENCY_BAND.into()
    }
    fn default_target() -> String {
        DEFAULT_TARGET.into()
    }

    pub fn new(frequency_band: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            frequency_band: frequency_band.into(),
            target: target.into(),
            frf_dataset_id: None,
            operational_measurement_id: None,
        }
    }
}

impl Default for TpaRequest {
    fn default() -> Self {
        Self::new(DEFAULT_FREQUENCY_BAND, DEFAULT_TARGET)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContributionEntry {
    pub name: String,
    /// Share of total response energy, 0..=100.
    pub value: f64,
    pub color: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum InversionQuality {
    Good,
    Poor,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SvdResult {
    pub singular_values: Vec<f64>,
    pub truncation_level: usize,
    pub singular_values_used: usize,
    /// `f64::INFINITY` when the smallest singular value is exactly zero; JSON carries it as `null`.
    #[serde(deserialize_with = "sentinel::infinity")]
    pub condition_number: f64,
    pub inversion_quality: InversionQuality,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorPoint {
    pub frequency: String,
    pub error: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccuracyResult {
    pub overall: f64,
    /// NaN when no band of the catalog falls in the group; JSON carries it as `null`.
    #[serde(deserialize_with = "sentinel::nan")]
    pub low_frequency: f64,
    #[serde(deserialize_with = "sentinel::nan")]
    pub mid_frequency: f64,
    #[serde(deserialize_with = "sentinel::nan")]
    pub high_frequency: f64,
    pub error_distribution: Vec<ErrorPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KpiSet {
    /// `f64::NEG_INFINITY` for an all-zero response; JSON carries it as `null`.
    #[serde(deserialize_with = "sentinel::neg_infinity")]
    pub sound_pressure_level: f64,
    pub max_vibration_amplitude: f64,
    pub dominant_frequency: f64,
    pub transfer_efficiency: f64,
}

/// H as a nested path -> band -> value mapping, kept in catalog order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransferFunctionTable {
    rows: Vec<(String, BandRow)>,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct BandRow(Vec<(String, f64)>);

impl TransferFunctionTable {
    pub fn from_matrix(
        h: &PathBandMatrix,
        paths: &[TransferPath],
        bands: &[FrequencyBand],
    ) -> Result<Self, TpaError> {
        h.ensure_shape(paths.len(), bands.len())?;
        let rows = paths
            .iter()
            .enumerate()
            .map(|(i, path)| {
                let row = bands
                    .iter()
                    .enumerate()
                    .map(|(j, band)| (band.label().to_string(), h.get(i, j)))
                    .collect();
                (path.label().to_string(), BandRow(row))
            })
            .collect();
        Ok(Self { rows })
    }

    pub fn get(&self, path: &str, band: &str) -> Option<f64> {
        self.rows
            .iter()
            .find(|(p, _)| p == path)
            .and_then(|(_, row)| row.0.iter().find(|(b, _)| b == band))
            .map(|(_, v)| *v)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|(p, _)| p.as_str())
    }

    pub fn bands(&self, path: &str) -> Option<Vec<&str>> {
        self.rows
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, row)| row.0.iter().map(|(b, _)| b.as_str()).collect())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Serialize for BandRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (band, value) in &self.0 {
            map.serialize_entry(band, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for BandRow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer
            .deserialize_map(OrderedMap(PhantomData))
            .map(BandRow)
    }
}

impl Serialize for TransferFunctionTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rows.len()))?;
        for (path, row) in &self.rows {
            map.serialize_entry(path, row)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TransferFunctionTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer
            .deserialize_map(OrderedMap(PhantomData))
            .map(|rows| TransferFunctionTable { rows })
    }
}

/// Collects a map into a vector so key order survives a round trip.
struct OrderedMap<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMap<V> {
    type Value = Vec<(String, V)>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string-keyed map")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut out = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            out.push((key, value));
        }
        Ok(out)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TpaResult {
    pub frequency_band: String,
    pub target: String,
    pub kpis: KpiSet,
    pub contribution_data: Vec<ContributionEntry>,
    pub svd_analysis: SvdResult,
    pub transfer_functions: TransferFunctionTable,
    pub prediction_accuracy: AccuracyResult,
}

mod sentinel {
    use serde::{Deserialize, Deserializer};

    pub fn infinity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }

    pub fn neg_infinity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NEG_INFINITY))
    }

    pub fn nan<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}
