// ABOUTME: Macrocycle planning configuration: recovery cadence, cutback, re-entry and Peak floor policies
// ABOUTME: Defaults come from the progression and long-run constants; policies are tunable, not hard laws
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::str::FromStr;

use cadence_core::constants::{long_run, progression};
use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Capacity used for the first loading week after a recovery week
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RestartPolicy {
    /// `previous_capacity × (1 − rate)`: conservative re-entry below the pre-recovery peak
    #[default]
    ConservativeReentry,
    /// `previous_capacity`: resume exactly at the pre-recovery peak
    ResumePeak,
    /// `previous_capacity × (1 + rate)`: continue the pre-recovery trajectory
    Continue,
}

impl RestartPolicy {
    /// Capacity for the re-entry week with a percentage progression rate
    #[must_use]
    pub fn restart_capacity(&self, previous_capacity: f64, rate: f64) -> f64 {
        self.restart_from_step(previous_capacity, previous_capacity * rate)
    }

    /// Capacity for the re-entry week with an absolute weekly step (e.g. ramp rate in TSS)
    #[must_use]
    pub fn restart_from_step(&self, previous_capacity: f64, step: f64) -> f64 {
        match self {
            Self::ConservativeReentry => (previous_capacity - step).max(0.0),
            Self::ResumePeak => previous_capacity,
            Self::Continue => previous_capacity + step,
        }
    }
}

impl fmt::Display for RestartPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConservativeReentry => write!(f, "conservative_reentry"),
            Self::ResumePeak => write!(f, "resume_peak"),
            Self::Continue => write!(f, "continue"),
        }
    }
}

impl FromStr for RestartPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "conservative_reentry" | "conservative" => Ok(Self::ConservativeReentry),
            "resume_peak" | "resume" => Ok(Self::ResumePeak),
            "continue" => Ok(Self::Continue),
            other => Err(ConfigError::Parse(format!("Unknown restart policy: {other}"))),
        }
    }
}

/// When the Peak-phase long-session floor (28 km marathon / 16 km half) applies
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PeakFloorPolicy {
    /// Only when recent volume qualifies, there is no recent injury, and it is not a first marathon
    #[default]
    HistoryGated,
    /// Never raise the long session to the floor
    Never,
}

impl FromStr for PeakFloorPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "history_gated" | "gated" => Ok(Self::HistoryGated),
            "never" | "off" => Ok(Self::Never),
            other => Err(ConfigError::Parse(format!("Unknown peak floor policy: {other}"))),
        }
    }
}

/// Macrocycle planner configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MacrocycleConfig {
    /// Every Nth loading week is a recovery week (0 disables cadence recovery)
    pub recovery_cadence: u32,
    /// Volume and long-session multiplier in recovery weeks
    pub recovery_cutback: f64,
    /// Re-entry capacity after a recovery week
    pub restart_policy: RestartPolicy,
    /// Peak long-session floor policy
    pub peak_floor_policy: PeakFloorPolicy,
    /// Recent average weekly km required for the Peak floor
    pub peak_floor_min_recent_volume_km: f64,
    /// Long-session growth may not exceed this share of the weekly volume increase
    pub long_session_increase_share: f64,
    /// Race week volume as a share of capacity
    pub race_week_volume_factor: f64,
    /// Taper factor for the week before the race
    pub taper_factor_min: f64,
    /// Taper factor ceiling
    pub taper_factor_max: f64,
    /// Taper factor step per week further from the race
    pub taper_factor_step: f64,
    /// Weeks in the Peak block
    pub peak_weeks: u32,
    /// Weeks in the Build block
    pub build_weeks: u32,
    /// Build share of the non-taper weeks in a compressed plan
    pub short_plan_build_share: f64,
    /// Long-session share above which the week is long-run dominant
    pub long_run_dominant_share: f64,
}

impl Default for MacrocycleConfig {
    fn default() -> Self {
        Self {
            recovery_cadence: progression::DEFAULT_RECOVERY_CADENCE,
            recovery_cutback: progression::RECOVERY_CUTBACK_FACTOR,
            restart_policy: RestartPolicy::default(),
            peak_floor_policy: PeakFloorPolicy::default(),
            peak_floor_min_recent_volume_km: long_run::PEAK_FLOOR_MIN_RECENT_VOLUME_KM,
            long_session_increase_share: progression::LONG_SESSION_INCREASE_SHARE,
            race_week_volume_factor: progression::RACE_WEEK_VOLUME_FACTOR,
            taper_factor_min: progression::TAPER_FACTOR_MIN,
            taper_factor_max: progression::TAPER_FACTOR_MAX,
            taper_factor_step: progression::TAPER_FACTOR_STEP,
            peak_weeks: progression::PEAK_WEEKS,
            build_weeks: progression::BUILD_WEEKS,
            short_plan_build_share: progression::SHORT_PLAN_BUILD_SHARE,
            long_run_dominant_share: progression::LONG_RUN_DOMINANT_SHARE,
        }
    }
}

impl MacrocycleConfig {
    /// Taper factor for a week `weeks_to_race` weeks before the race week (1 = last taper week)
    #[must_use]
    pub fn taper_factor(&self, weeks_to_race: u32) -> f64 {
        let steps = f64::from(weeks_to_race.saturating_sub(1));
        self.taper_factor_step
            .mul_add(steps, self.taper_factor_min)
            .min(self.taper_factor_max)
    }

    /// Validate the macrocycle slice
    ///
    /// # Errors
    ///
    /// Returns an error if a factor is outside (0, 1] or the taper bounds are inverted
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.recovery_cutback <= 0.0 || self.recovery_cutback > 1.0 {
            return Err(ConfigError::ValueOutOfRange(
                "recovery_cutback must be in (0, 1]",
            ));
        }
        if self.taper_factor_min <= 0.0 || self.taper_factor_max > 1.0 {
            return Err(ConfigError::ValueOutOfRange(
                "taper factors must be in (0, 1]",
            ));
        }
        if self.taper_factor_min > self.taper_factor_max {
            return Err(ConfigError::InvalidRange(
                "taper_factor_min must be <= taper_factor_max",
            ));
        }
        if self.taper_factor_step <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "taper_factor_step must be positive",
            ));
        }
        if self.long_session_increase_share <= 0.0 || self.long_session_increase_share > 1.0 {
            return Err(ConfigError::ValueOutOfRange(
                "long_session_increase_share must be in (0, 1]",
            ));
        }
        if self.race_week_volume_factor <= 0.0 || self.race_week_volume_factor > 1.0 {
            return Err(ConfigError::ValueOutOfRange(
                "race_week_volume_factor must be in (0, 1]",
            ));
        }
        if self.peak_weeks == 0 || self.build_weeks == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "peak_weeks and build_weeks must be at least 1",
            ));
        }
        if self.short_plan_build_share <= 0.0 || self.short_plan_build_share >= 1.0 {
            return Err(ConfigError::InvalidWeights(
                "short_plan_build_share must leave room for Peak weeks",
            ));
        }
        if self.peak_floor_min_recent_volume_km < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "peak_floor_min_recent_volume_km must not be negative",
            ));
        }
        if self.long_run_dominant_share <= 0.0 || self.long_run_dominant_share > 1.0 {
            return Err(ConfigError::ValueOutOfRange(
                "long_run_dominant_share must be in (0, 1]",
            ));
        }
        Ok(())
    }
}
