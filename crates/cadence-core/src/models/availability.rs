// ABOUTME: Per-day training availability supplied by the athlete, single value or morning/evening split
// ABOUTME: Accepts the external JSON shapes: an array of seven days or a map keyed by day index 0-6
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use chrono::Weekday;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{AppError, AppResult};

/// Available hours on one day
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum DayAvailability {
    /// Single block of hours
    Hours(f64),
    /// Morning and evening slots
    Split {
        /// Present in external payloads; the variant itself marks the split
        #[serde(default)]
        split: bool,
        /// Morning hours
        #[serde(alias = "amHours")]
        am_hours: f64,
        /// Evening hours
        #[serde(alias = "pmHours")]
        pm_hours: f64,
    },
}

impl Default for DayAvailability {
    fn default() -> Self {
        Self::Hours(0.0)
    }
}

impl DayAvailability {
    /// Split availability
    #[must_use]
    pub const fn split(am_hours: f64, pm_hours: f64) -> Self {
        Self::Split {
            split: true,
            am_hours,
            pm_hours,
        }
    }

    /// Total hours (the split parts always sum to the total)
    #[must_use]
    pub fn total_hours(&self) -> f64 {
        match *self {
            Self::Hours(hours) => hours.max(0.0),
            Self::Split {
                am_hours, pm_hours, ..
            } => am_hours.max(0.0) + pm_hours.max(0.0),
        }
    }

    /// Total seconds
    #[must_use]
    pub fn total_seconds(&self) -> u32 {
        (self.total_hours() * 3600.0).round() as u32
    }

    /// Evening hours of a split day, zero otherwise
    #[must_use]
    pub fn evening_hours(&self) -> f64 {
        match *self {
            Self::Hours(_) => 0.0,
            Self::Split { pm_hours, .. } => pm_hours.max(0.0),
        }
    }

    /// Whether the day has a separate evening slot
    #[must_use]
    pub fn has_evening_slot(&self) -> bool {
        self.evening_hours() > 0.0
    }

    /// Whether any training fits on this day
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.total_hours() > 0.0
    }
}

/// Seven days of availability, index 0 = Monday
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Default)]
pub struct WeekAvailability(pub [DayAvailability; 7]);

impl WeekAvailability {
    /// Same hours every day
    #[must_use]
    pub const fn uniform(hours: f64) -> Self {
        Self([DayAvailability::Hours(hours); 7])
    }

    /// From seven plain hour values
    #[must_use]
    pub fn from_hours(hours: [f64; 7]) -> Self {
        Self(hours.map(DayAvailability::Hours))
    }

    /// Availability for day index 0-6
    #[must_use]
    pub fn day(&self, index: usize) -> DayAvailability {
        self.0.get(index).copied().unwrap_or_default()
    }

    /// Total weekly hours
    #[must_use]
    pub fn total_hours(&self) -> f64 {
        self.0.iter().map(DayAvailability::total_hours).sum()
    }

    /// Whether every day is zero
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.0.iter().any(DayAvailability::is_available)
    }

    /// Build from an index-keyed map, rejecting indices outside 0-6
    ///
    /// # Errors
    ///
    /// Returns an error if a key is not a day index in 0-6
    pub fn from_map(map: &BTreeMap<String, DayAvailability>) -> AppResult<Self> {
        let mut days = [DayAvailability::default(); 7];
        for (key, value) in map {
            let index: usize = key
                .trim()
                .parse()
                .map_err(|_| AppError::invalid_format(format!("Invalid day index: {key}")))?;
            let slot = days.get_mut(index).ok_or_else(|| {
                AppError::value_out_of_range(format!("Day index {index} is outside 0-6"))
            })?;
            *slot = *value;
        }
        Ok(Self(days))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawWeekAvailability {
    List(Vec<DayAvailability>),
    Map(BTreeMap<String, DayAvailability>),
}

impl<'de> Deserialize<'de> for WeekAvailability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawWeekAvailability::deserialize(deserializer)? {
            RawWeekAvailability::List(list) => {
                if list.len() > 7 {
                    return Err(serde::de::Error::custom(format!(
                        "expected at most 7 days, got {}",
                        list.len()
                    )));
                }
                let mut days = [DayAvailability::default(); 7];
                for (slot, value) in days.iter_mut().zip(list) {
                    *slot = value;
                }
                Ok(Self(days))
            }
            RawWeekAvailability::Map(map) => {
                Self::from_map(&map).map_err(|e| serde::de::Error::custom(e.message))
            }
        }
    }
}

/// Weekday for a Monday-based day index
#[must_use]
pub fn weekday_for_index(index: usize) -> Weekday {
    match index % 7 {
        0 => Weekday::Mon,
        1 => Weekday::Tue,
        2 => Weekday::Wed,
        3 => Weekday::Thu,
        4 => Weekday::Fri,
        5 => Weekday::Sat,
        _ => Weekday::Sun,
    }
}
