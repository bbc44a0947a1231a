// ABOUTME: Training zone models: Friel zones, scientific intensity buckets, and derived zone sets
// ABOUTME: Zone sets hold pace or power bands plus optional heart-rate bands, or an unavailable marker
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::zones::{OPEN_FAST_BAND_EXTENSION, OPEN_SLOW_BAND_EXTENSION};
use crate::errors::AppError;

/// Friel intensity zone used when authoring workout steps
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Zone {
    /// Recovery
    Z1,
    /// Aerobic endurance
    Z2,
    /// Tempo
    Z3,
    /// Sub-threshold / threshold
    Z4,
    /// Super-threshold
    Z5a,
    /// Aerobic capacity
    Z5b,
    /// Anaerobic capacity
    Z5c,
}

impl Zone {
    /// All zones from easiest to hardest
    pub const ALL: [Self; 7] = [
        Self::Z1,
        Self::Z2,
        Self::Z3,
        Self::Z4,
        Self::Z5a,
        Self::Z5b,
        Self::Z5c,
    ];

    /// Position in [`Zone::ALL`]
    #[must_use]
    pub const fn ordinal(&self) -> usize {
        match self {
            Self::Z1 => 0,
            Self::Z2 => 1,
            Self::Z3 => 2,
            Self::Z4 => 3,
            Self::Z5a => 4,
            Self::Z5b => 5,
            Self::Z5c => 6,
        }
    }

    /// Scientific bucket this zone counts towards in distribution analysis
    #[must_use]
    pub const fn bucket(&self) -> IntensityBucket {
        match self {
            Self::Z1 | Self::Z2 => IntensityBucket::Low,
            Self::Z3 | Self::Z4 => IntensityBucket::Threshold,
            Self::Z5a | Self::Z5b | Self::Z5c => IntensityBucket::High,
        }
    }

    /// Index of the five-zone band (0..=4) this zone belongs to
    #[must_use]
    pub const fn band_index(&self) -> usize {
        match self {
            Self::Z1 => 0,
            Self::Z2 => 1,
            Self::Z3 => 2,
            Self::Z4 => 3,
            Self::Z5a | Self::Z5b | Self::Z5c => 4,
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Z1 => "Z1",
            Self::Z2 => "Z2",
            Self::Z3 => "Z3",
            Self::Z4 => "Z4",
            Self::Z5a => "Z5a",
            Self::Z5b => "Z5b",
            Self::Z5c => "Z5c",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Zone {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let code = normalized.strip_prefix('z').unwrap_or(&normalized);
        match code {
            "1" => Ok(Self::Z1),
            "2" => Ok(Self::Z2),
            "3" => Ok(Self::Z3),
            "4" => Ok(Self::Z4),
            "5" | "5a" => Ok(Self::Z5a),
            "5b" => Ok(Self::Z5b),
            "5c" => Ok(Self::Z5c),
            _ => Err(AppError::invalid_format(format!("Unknown intensity zone: {s}"))),
        }
    }
}

/// Coarse "scientific" intensity bucket
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IntensityBucket {
    /// Below the first ventilatory threshold (Z1-Z2)
    Low,
    /// Between thresholds (Z3-Z4)
    Threshold,
    /// Above the second threshold (Z5a-c)
    High,
}

/// What the zone set was derived from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ZoneBasis {
    /// Threshold pace (sec/km)
    Pace,
    /// Functional threshold power (watts)
    Power,
    /// No threshold input; every band renders as `--`
    Unavailable,
}

/// Intensity range of one zone
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ZoneRange {
    /// Pace range in seconds per km; `None` means open-ended
    Pace {
        /// Slowest pace in the band (larger number)
        slowest_sec_per_km: Option<f64>,
        /// Fastest pace in the band (smaller number)
        fastest_sec_per_km: Option<f64>,
    },
    /// Power range as % of FTP and absolute watts
    Power {
        /// Lower bound (% FTP)
        min_percent_ftp: f64,
        /// Upper bound (% FTP)
        max_percent_ftp: f64,
        /// Lower bound (watts)
        min_watts: f64,
        /// Upper bound (watts)
        max_watts: f64,
    },
    /// No data
    Unavailable,
}

/// One of the five zone bands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ZoneBand {
    /// Zone number (1..=5)
    pub zone: u8,
    /// Intensity range
    pub range: ZoneRange,
}

impl ZoneBand {
    /// Display label for the band, `--` when unavailable
    #[must_use]
    pub fn label(&self) -> String {
        match self.range {
            ZoneRange::Pace {
                slowest_sec_per_km,
                fastest_sec_per_km,
            } => match (slowest_sec_per_km, fastest_sec_per_km) {
                (Some(slow), Some(fast)) => {
                    format!("{}-{} /km", format_pace(fast), format_pace(slow))
                }
                (None, Some(fast)) => format!("> {} /km", format_pace(fast)),
                (Some(slow), None) => format!("< {} /km", format_pace(slow)),
                (None, None) => "--".to_owned(),
            },
            ZoneRange::Power {
                min_percent_ftp,
                max_percent_ftp,
                min_watts,
                max_watts,
            } => format!(
                "{min_percent_ftp:.0}-{max_percent_ftp:.0}% FTP ({min_watts:.0}-{max_watts:.0} W)"
            ),
            ZoneRange::Unavailable => "--".to_owned(),
        }
    }
}

/// Heart-rate band derived from heart-rate reserve
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeartRateBand {
    /// Zone number (1..=5)
    pub zone: u8,
    /// Lower bound (bpm)
    pub min_bpm: u32,
    /// Upper bound (bpm)
    pub max_bpm: u32,
}

/// Five training zones derived from a threshold input
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ZoneSet {
    /// Input the bands were derived from
    pub basis: ZoneBasis,
    /// Threshold pace (sec/km) or power (watts)
    pub threshold: Option<f64>,
    /// Z1..Z5, ordered from lowest to highest intensity
    pub bands: Vec<ZoneBand>,
    /// Optional heart-rate bands (Z1..Z5)
    pub heart_rate: Option<Vec<HeartRateBand>>,
}

impl ZoneSet {
    /// Zone set with every band marked unavailable
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            basis: ZoneBasis::Unavailable,
            threshold: None,
            bands: (1..=5)
                .map(|zone| ZoneBand {
                    zone,
                    range: ZoneRange::Unavailable,
                })
                .collect(),
            heart_rate: None,
        }
    }

    /// Whether the set holds real bands
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.basis != ZoneBasis::Unavailable
    }

    /// Band for a Friel zone (Z5a-c share the fifth band)
    #[must_use]
    pub fn band(&self, zone: Zone) -> Option<&ZoneBand> {
        self.bands.get(zone.band_index())
    }

    /// Display labels for all five bands
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.bands.iter().map(ZoneBand::label).collect()
    }

    /// One representative pace (sec/km) for a zone
    ///
    /// Bounded bands use their midpoint; the open Z1 band extends 5 % beyond
    /// its fast edge and the open Z5 band 3 % beyond its slow edge. Z5b and Z5c
    /// are 2 % and 4 % faster than Z5a.
    #[must_use]
    pub fn representative_pace(&self, zone: Zone) -> Option<f64> {
        let ZoneRange::Pace {
            slowest_sec_per_km,
            fastest_sec_per_km,
        } = self.band(zone)?.range
        else {
            return None;
        };

        let base = match (slowest_sec_per_km, fastest_sec_per_km) {
            (Some(slow), Some(fast)) => (slow + fast) / 2.0,
            (None, Some(fast)) => fast * OPEN_SLOW_BAND_EXTENSION,
            (Some(slow), None) => slow * OPEN_FAST_BAND_EXTENSION,
            (None, None) => return None,
        };

        let adjustment = match zone {
            Zone::Z5b => 0.98,
            Zone::Z5c => 0.96,
            _ => 1.0,
        };
        Some(base * adjustment)
    }
}

/// Format seconds-per-km as `m:ss`
#[must_use]
pub fn format_pace(sec_per_km: f64) -> String {
    let total = sec_per_km.round() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
