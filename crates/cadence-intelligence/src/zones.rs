// ABOUTME: Zone calculator converting threshold pace or power into five training zones
// ABOUTME: Supports an external pace-zone table, heart-rate-reserve bands, and an unavailable fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Zone Calculator
//!
//! Running zones come from threshold pace (seconds per km), cycling zones from
//! functional threshold power. Missing or unusable input never fails: the result
//! is an "unavailable" zone set whose bands all render as `--`.

use cadence_core::constants::zones::{
    HRR_LOWER_PERCENT, PACE_Z1_SLOWER_THAN, PACE_Z2_FAST, PACE_Z3_FAST, PACE_Z4_FAST,
    PACE_Z5_FASTER_THAN, POWER_UPPER_PERCENT,
};
use cadence_core::models::{HeartRateBand, Zone, ZoneBand, ZoneBasis, ZoneRange, ZoneSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Threshold inputs supplied by settings or a fitness API
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ThresholdData {
    /// Lactate-threshold pace (sec/km)
    #[serde(default, alias = "thresholdPaceSecPerKm")]
    pub threshold_pace_sec_per_km: Option<f64>,
    /// Functional threshold power (watts)
    #[serde(default, alias = "thresholdPowerWatts")]
    pub threshold_power_watts: Option<f64>,
    /// Resting heart rate (bpm)
    #[serde(default, alias = "restingHR", alias = "restingHr")]
    pub resting_hr: Option<u32>,
    /// Maximum heart rate (bpm)
    #[serde(default, alias = "maxHR", alias = "maxHr")]
    pub max_hr: Option<u32>,
    /// External pace-zone table: ascending boundaries as % of threshold speed
    #[serde(default, alias = "paceZoneTable")]
    pub pace_zone_table: Option<Vec<f64>>,
}

impl ThresholdData {
    /// Pace-only input
    #[must_use]
    pub fn pace(threshold_pace_sec_per_km: f64) -> Self {
        Self {
            threshold_pace_sec_per_km: Some(threshold_pace_sec_per_km),
            ..Self::default()
        }
    }

    /// Power-only input
    #[must_use]
    pub fn power(threshold_power_watts: f64) -> Self {
        Self {
            threshold_power_watts: Some(threshold_power_watts),
            ..Self::default()
        }
    }

    /// Attach heart-rate bounds
    #[must_use]
    pub const fn with_heart_rate(mut self, resting_hr: u32, max_hr: u32) -> Self {
        self.resting_hr = Some(resting_hr);
        self.max_hr = Some(max_hr);
        self
    }
}

/// Pace multipliers of threshold for the five bands (slow edge of Z2 .. fast edge of Z4, start of Z5)
#[derive(Debug, Clone, Copy, PartialEq)]
struct PaceMultipliers {
    z1_slower_than: f64,
    z2_fast: f64,
    z3_fast: f64,
    z4_fast: f64,
    z5_faster_than: f64,
}

impl Default for PaceMultipliers {
    fn default() -> Self {
        Self {
            z1_slower_than: PACE_Z1_SLOWER_THAN,
            z2_fast: PACE_Z2_FAST,
            z3_fast: PACE_Z3_FAST,
            z4_fast: PACE_Z4_FAST,
            z5_faster_than: PACE_Z5_FASTER_THAN,
        }
    }
}

impl PaceMultipliers {
    /// Convert a speed-percentage table into pace multipliers
    ///
    /// Four boundaries make Z4 and Z5 contiguous; a fifth sets where Z5 starts.
    /// Any other length is rejected.
    fn from_speed_table(table: &[f64]) -> Option<Self> {
        if !(4..=5).contains(&table.len()) {
            return None;
        }
        if table.iter().any(|pct| !pct.is_finite() || *pct <= 0.0) {
            return None;
        }
        if table.windows(2).any(|pair| pair[0] >= pair[1]) {
            return None;
        }
        let multiplier = |pct: f64| 100.0 / pct;
        Some(Self {
            z1_slower_than: multiplier(table[0]),
            z2_fast: multiplier(table[1]),
            z3_fast: multiplier(table[2]),
            z4_fast: multiplier(table[3]),
            z5_faster_than: table.get(4).map_or_else(|| multiplier(table[3]), |pct| multiplier(*pct)),
        })
    }
}

/// Computes zone sets from threshold inputs
#[derive(Debug, Clone, Default)]
pub struct ZoneCalculator;

impl ZoneCalculator {
    /// Create a new zone calculator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Compute zones from whatever threshold data is available
    ///
    /// Pace takes precedence over power. Invalid values (non-positive or not
    /// finite) are treated as missing.
    #[must_use]
    pub fn compute(&self, input: &ThresholdData) -> ZoneSet {
        let heart_rate = match (input.resting_hr, input.max_hr) {
            (Some(resting), Some(max)) => Self::heart_rate_zones(resting, max),
            _ => None,
        };

        let pace = input.threshold_pace_sec_per_km.filter(|v| v.is_finite() && *v > 0.0);
        let power = input.threshold_power_watts.filter(|v| v.is_finite() && *v > 0.0);

        let mut zones = if let Some(threshold) = pace {
            let multipliers = match input.pace_zone_table.as_deref() {
                Some(table) => PaceMultipliers::from_speed_table(table).unwrap_or_else(|| {
                    warn!(
                        boundaries = table.len(),
                        "Unusable pace zone table, falling back to threshold multipliers"
                    );
                    PaceMultipliers::default()
                }),
                None => PaceMultipliers::default(),
            };
            Self::pace_zones_with(threshold, multipliers)
        } else if let Some(ftp) = power {
            Self::power_zones(ftp)
        } else {
            debug!("No usable threshold input, zones unavailable");
            ZoneSet::unavailable()
        };

        zones.heart_rate = heart_rate;
        zones
    }

    /// Running zones from threshold pace using the standard multipliers
    #[must_use]
    pub fn pace_zones(threshold_pace_sec_per_km: f64) -> ZoneSet {
        Self::pace_zones_with(threshold_pace_sec_per_km, PaceMultipliers::default())
    }

    fn pace_zones_with(threshold: f64, m: PaceMultipliers) -> ZoneSet {
        let pace = |slowest: Option<f64>, fastest: Option<f64>| ZoneRange::Pace {
            slowest_sec_per_km: slowest.map(|x| x * threshold),
            fastest_sec_per_km: fastest.map(|x| x * threshold),
        };
        let ranges = [
            pace(None, Some(m.z1_slower_than)),
            pace(Some(m.z1_slower_than), Some(m.z2_fast)),
            pace(Some(m.z2_fast), Some(m.z3_fast)),
            pace(Some(m.z3_fast), Some(m.z4_fast)),
            pace(Some(m.z5_faster_than), None),
        ];
        ZoneSet {
            basis: ZoneBasis::Pace,
            threshold: Some(threshold),
            bands: bands_from(ranges),
            heart_rate: None,
        }
    }

    /// Cycling zones as %FTP bands
    #[must_use]
    pub fn power_zones(ftp_watts: f64) -> ZoneSet {
        let mut lower = 0.0;
        let ranges = POWER_UPPER_PERCENT.map(|upper| {
            let range = ZoneRange::Power {
                min_percent_ftp: lower,
                max_percent_ftp: upper,
                min_watts: (ftp_watts * lower / 100.0).round(),
                max_watts: (ftp_watts * upper / 100.0).round(),
            };
            lower = upper;
            range
        });
        ZoneSet {
            basis: ZoneBasis::Power,
            threshold: Some(ftp_watts),
            bands: bands_from(ranges),
            heart_rate: None,
        }
    }

    /// Heart-rate-reserve (Karvonen) bands; `None` when the bounds are implausible
    #[must_use]
    pub fn heart_rate_zones(resting_hr: u32, max_hr: u32) -> Option<Vec<HeartRateBand>> {
        if resting_hr == 0 || max_hr <= resting_hr {
            warn!(resting_hr, max_hr, "Implausible heart-rate bounds, skipping HR zones");
            return None;
        }
        let reserve = f64::from(max_hr - resting_hr);
        let bpm = |pct: f64| (f64::from(resting_hr) + reserve * pct / 100.0).round() as u32;

        Some(
            HRR_LOWER_PERCENT
                .iter()
                .enumerate()
                .map(|(i, lower)| {
                    let upper = HRR_LOWER_PERCENT.get(i + 1).copied().unwrap_or(100.0);
                    HeartRateBand {
                        zone: (i + 1) as u8,
                        min_bpm: bpm(*lower),
                        max_bpm: bpm(upper),
                    }
                })
                .collect(),
        )
    }
}

fn bands_from(ranges: [ZoneRange; 5]) -> Vec<ZoneBand> {
    ranges
        .into_iter()
        .enumerate()
        .map(|(i, range)| ZoneBand {
            zone: (i + 1) as u8,
            range,
        })
        .collect()
}

/// Compute zones with the default calculator
#[must_use]
pub fn compute_zones(input: &ThresholdData) -> ZoneSet {
    ZoneCalculator::new().compute(input)
}

/// One representative pace (sec/km) per Friel zone
///
/// Built from a pace zone set; any zone the set cannot answer for (power or
/// unavailable zones) is filled from a fallback threshold pace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZonePaces {
    paces: [f64; 7],
}

impl ZonePaces {
    /// Paces derived from a threshold pace with the standard multipliers
    #[must_use]
    pub fn from_threshold(threshold_pace_sec_per_km: f64) -> Self {
        let zones = ZoneCalculator::pace_zones(threshold_pace_sec_per_km);
        Self::from_zone_set(&zones, threshold_pace_sec_per_km)
    }

    /// Paces from a zone set, falling back to `fallback_threshold` where needed
    #[must_use]
    pub fn from_zone_set(zones: &ZoneSet, fallback_threshold: f64) -> Self {
        let fallback = if zones.basis == ZoneBasis::Pace {
            None
        } else {
            warn!(
                basis = ?zones.basis,
                fallback_threshold,
                "No pace zones available, using fallback threshold pace"
            );
            Some(ZoneCalculator::pace_zones(fallback_threshold))
        };

        let paces = Zone::ALL.map(|zone| {
            zones
                .representative_pace(zone)
                .or_else(|| fallback.as_ref().and_then(|f| f.representative_pace(zone)))
                .unwrap_or(fallback_threshold)
        });
        Self { paces }
    }

    /// Replace the aerobic (Z2) pace, keeping Z1 at least as slow
    #[must_use]
    pub fn with_easy_pace(mut self, easy_pace_sec_per_km: f64) -> Self {
        if easy_pace_sec_per_km.is_finite() && easy_pace_sec_per_km > 0.0 {
            self.paces[Zone::Z2.ordinal()] = easy_pace_sec_per_km;
            let z1 = Zone::Z1.ordinal();
            self.paces[z1] = self.paces[z1].max(easy_pace_sec_per_km);
        }
        self
    }

    /// Pace for a zone (sec/km)
    #[must_use]
    pub const fn pace(&self, zone: Zone) -> f64 {
        self.paces[zone.ordinal()]
    }

    /// Seconds needed to cover `km` in `zone`
    #[must_use]
    pub fn seconds_for_km(&self, zone: Zone, km: f64) -> f64 {
        km * self.pace(zone)
    }

    /// Kilometres covered in `seconds` at `zone`
    #[must_use]
    pub fn km_for_seconds(&self, zone: Zone, seconds: f64) -> f64 {
        seconds / self.pace(zone)
    }
}
