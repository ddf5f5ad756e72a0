use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape family used when synthesizing a path's row of H or F.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PathCategory {
    Engine,
    Exhaust,
    Suspension,
    Transmission,
    AirIntake,
    Broadband,
}

/// Structural or acoustic transmission path. Declaration order is matrix row order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TransferPath {
    #[serde(rename = "Engine Mount 1")]
    EngineMount1,
    #[serde(rename = "Engine Mount 2")]
    EngineMount2,
    #[serde(rename = "Exhaust Hanger")]
    ExhaustHanger,
    #[serde(rename = "Subframe")]
    Subframe,
    #[serde(rename = "Transmission Mount")]
    TransmissionMount,
    #[serde(rename = "Suspension")]
    Suspension,
    #[serde(rename = "Air Intake")]
    AirIntake,
    #[serde(rename = "Other")]
    Other,
}

struct PathEntry {
    label: &'static str,
    category: PathCategory,
    color: &'static str,
}

static PATH_TABLE: [PathEntry; 8] = [
    PathEntry {
        label: "Engine Mount 1",
        category: PathCategory::Engine,
        color: "#FF5733",
    },
    PathEntry {
        label: "Engine Mount 2",
        category: PathCategory::Engine,
        color: "#FF8C33",
    },
    PathEntry {
        label: "Exhaust Hanger",
        category: PathCategory::Exhaust,
        color: "#33FF57",
    },
    PathEntry {
        label: "Subframe",
        category: PathCategory::Broadband,
        color: "#33FFC4",
    },
    PathEntry {
        label: "Transmission Mount",
        category: PathCategory::Transmission,
        color: "#3357FF",
    },
    PathEntry {
        label: "Suspension",
        category: PathCategory::Suspension,
        color: "#C433FF",
    },
    PathEntry {
        label: "Air Intake",
        category: PathCategory::AirIntake,
        color: "#FF33A8",
    },
    PathEntry {
        label: "Other",
        category: PathCategory::Broadband,
        color: "#808080",
    },
];

impl TransferPath {
    pub const ALL: [TransferPath; 8] = [
        TransferPath::EngineMount1,
        TransferPath::EngineMount2,
        TransferPath::ExhaustHanger,
        TransferPath::Subframe,
        TransferPath::TransmissionMount,
        TransferPath::Suspension,
        TransferPath::AirIntake,
        TransferPath::Other,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    fn entry(self) -> &'static PathEntry {
        &PATH_TABLE[self.index()]
    }

    pub fn label(self) -> &'static str {
        self.entry().label
    }

    pub fn category(self) -> PathCategory {
        self.entry().category
    }

    /// Fixed display color, `#RRGGBB`.
    pub fn color(self) -> &'static str {
        self.entry().color
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.label() == label)
    }
}

impl fmt::Display for TransferPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Coarse grouping of the band catalog used for accuracy reporting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BandGroup {
    Low,
    Mid,
    High,
}

/// Octave-band center frequency. Declaration order is matrix column order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FrequencyBand {
    #[serde(rename = "125Hz")]
    Hz125,
    #[serde(rename = "250Hz")]
    Hz250,
    #[serde(rename = "500Hz")]
    Hz500,
    #[serde(rename = "1kHz")]
    Hz1000,
    #[serde(rename = "2kHz")]
    Hz2000,
    #[serde(rename = "4kHz")]
    Hz4000,
    #[serde(rename = "8kHz")]
    Hz8000,
}

const BAND_TABLE: [(&str, f64, BandGroup); 7] = [
    ("125Hz", 125.0, BandGroup::Low),
    ("250Hz", 250.0, BandGroup::Low),
    ("500Hz", 500.0, BandGroup::Mid),
    ("1kHz", 1000.0, BandGroup::Mid),
    ("2kHz", 2000.0, BandGroup::Mid),
    ("4kHz", 4000.0, BandGroup::High),
    ("8kHz", 8000.0, BandGroup::High),
];

impl FrequencyBand {
    pub const ALL: [FrequencyBand; 7] = [
        FrequencyBand::Hz125,
        FrequencyBand::Hz250,
        FrequencyBand::Hz500,
        FrequencyBand::Hz1000,
        FrequencyBand::Hz2000,
        FrequencyBand::Hz4000,
        FrequencyBand::Hz8000,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        BAND_TABLE[self.index()].0
    }

    pub fn hz(self) -> f64 {
        BAND_TABLE[self.index()].1
    }

    pub fn group(self) -> BandGroup {
        BAND_TABLE[self.index()].2
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.label() == label)
    }
}

impl fmt::Display for FrequencyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
