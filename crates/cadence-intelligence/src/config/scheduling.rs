// ABOUTME: Weekly scheduling, distribution validation, and duration estimation configuration
// ABOUTME: Session sizing thresholds, distribution volume bands, deficit tolerance, pace fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use cadence_core::constants::{distribution, scheduling, zones};
use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Microcycle scheduler configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Strength session length (seconds)
    pub strength_session_seconds: u32,
    /// Share of weekly volume given to each key session
    pub key_session_volume_share: f64,
    /// Shortest main set worth scheduling for a key session (seconds)
    pub min_quality_main_seconds: u32,
    /// Shortest run placed on a day (km)
    pub min_run_km: f64,
    /// Runs at or below this distance become recovery runs (km)
    pub recovery_run_max_km: f64,
    /// Shortest ride placed on a day (TSS)
    pub min_ride_tss: f64,
    /// Rides at or below this load become recovery rides (TSS)
    pub recovery_ride_max_tss: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            strength_session_seconds: scheduling::STRENGTH_SESSION_SECONDS,
            key_session_volume_share: scheduling::KEY_SESSION_VOLUME_SHARE,
            min_quality_main_seconds: scheduling::MIN_QUALITY_MAIN_SECONDS,
            min_run_km: scheduling::MIN_RUN_KM,
            recovery_run_max_km: scheduling::RECOVERY_RUN_MAX_KM,
            min_ride_tss: scheduling::MIN_RIDE_TSS,
            recovery_ride_max_tss: scheduling::RECOVERY_RIDE_MAX_TSS,
        }
    }
}

impl SchedulerConfig {
    /// Validate the scheduler slice
    ///
    /// # Errors
    ///
    /// Returns an error if session thresholds are inverted or shares are out of range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.key_session_volume_share <= 0.0 || self.key_session_volume_share > 0.5 {
            return Err(ConfigError::ValueOutOfRange(
                "key_session_volume_share must be in (0, 0.5]",
            ));
        }
        if self.min_run_km > self.recovery_run_max_km {
            return Err(ConfigError::InvalidRange(
                "min_run_km must be <= recovery_run_max_km",
            ));
        }
        if self.min_ride_tss > self.recovery_ride_max_tss {
            return Err(ConfigError::InvalidRange(
                "min_ride_tss must be <= recovery_ride_max_tss",
            ));
        }
        if self.strength_session_seconds == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "strength_session_seconds must be positive",
            ));
        }
        Ok(())
    }
}

/// Intensity distribution validator configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DistributionConfig {
    /// Percentage points below target that trigger an upgrade
    pub deficit_tolerance_pct: f64,
    /// Running: below this weekly km the pyramidal model applies
    pub running_low_volume_km: f64,
    /// Running: below this weekly km the hybrid model applies
    pub running_mid_volume_km: f64,
    /// Cycling: below this weekly hours the pyramidal model applies
    pub cycling_low_volume_hours: f64,
    /// Cycling: below this weekly hours the hybrid model applies
    pub cycling_mid_volume_hours: f64,
    /// Shortest main set for an upgraded session (seconds)
    pub min_main_set_seconds: u32,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            deficit_tolerance_pct: distribution::DEFICIT_TOLERANCE_PCT,
            running_low_volume_km: distribution::RUNNING_LOW_VOLUME_KM,
            running_mid_volume_km: distribution::RUNNING_MID_VOLUME_KM,
            cycling_low_volume_hours: distribution::CYCLING_LOW_VOLUME_HOURS,
            cycling_mid_volume_hours: distribution::CYCLING_MID_VOLUME_HOURS,
            min_main_set_seconds: scheduling::MIN_QUALITY_MAIN_SECONDS,
        }
    }
}

impl DistributionConfig {
    /// Validate the distribution slice
    ///
    /// # Errors
    ///
    /// Returns an error if the volume bands are inverted or the tolerance is not a percentage
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=100.0).contains(&self.deficit_tolerance_pct) {
            return Err(ConfigError::ValueOutOfRange(
                "deficit_tolerance_pct must be between 0 and 100",
            ));
        }
        if self.running_low_volume_km >= self.running_mid_volume_km {
            return Err(ConfigError::InvalidRange(
                "running_low_volume_km must be < running_mid_volume_km",
            ));
        }
        if self.cycling_low_volume_hours >= self.cycling_mid_volume_hours {
            return Err(ConfigError::InvalidRange(
                "cycling_low_volume_hours must be < cycling_mid_volume_hours",
            ));
        }
        Ok(())
    }
}

/// Duration estimator configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Threshold pace assumed when no zone data is available (sec/km)
    pub fallback_threshold_pace_sec_per_km: f64,
    /// Cap estimated minutes at the day's available time
    pub cap_to_availability: bool,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            fallback_threshold_pace_sec_per_km: zones::FALLBACK_THRESHOLD_PACE_SEC_PER_KM,
            cap_to_availability: true,
        }
    }
}

impl EstimatorConfig {
    /// Validate the estimator slice
    ///
    /// # Errors
    ///
    /// Returns an error if the fallback pace is not a plausible running pace
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(120.0..=900.0).contains(&self.fallback_threshold_pace_sec_per_km) {
            return Err(ConfigError::ValueOutOfRange(
                "fallback_threshold_pace_sec_per_km must be between 120 and 900",
            ));
        }
        Ok(())
    }
}
