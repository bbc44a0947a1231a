// ABOUTME: Engine configuration for the planning pipeline, split into per-stage slices
// ABOUTME: Defaults from constants, CADENCE_* environment overrides, and unified validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Engine Configuration Module
//!
//! Configuration is organized into per-stage slices so each pipeline stage only
//! receives what it needs:
//! - `planning` - Macrocycle recovery cadence, cutback, re-entry and Peak floor policies
//! - `scheduling` - Microcycle sizing, distribution validation, duration estimation
//!
//! There is no global instance: the caller owns an `EngineConfig` and passes
//! slices into each stage.

/// Configuration error types
pub mod error;
/// Macrocycle planner configuration
pub mod planning;
/// Scheduler, validator and estimator configuration
pub mod scheduling;

pub use error::ConfigError;
pub use planning::{MacrocycleConfig, PeakFloorPolicy, RestartPolicy};
pub use scheduling::{DistributionConfig, EstimatorConfig, SchedulerConfig};

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Main engine configuration container
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Macrocycle planner settings
    pub macrocycle: MacrocycleConfig,
    /// Microcycle scheduler settings
    pub scheduler: SchedulerConfig,
    /// Intensity distribution validator settings
    pub distribution: DistributionConfig,
    /// Duration estimator settings
    pub estimator: EstimatorConfig,
}

impl EngineConfig {
    /// Load configuration from defaults plus environment overrides, then validate
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::from_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults with `CADENCE_*` environment overrides applied (not validated)
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().apply_env_overrides()
    }

    /// Validate every slice
    ///
    /// # Errors
    ///
    /// Returns the first validation failure found
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.macrocycle.validate()?;
        self.scheduler.validate()?;
        self.distribution.validate()?;
        self.estimator.validate()
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Macrocycle overrides
        Self::apply_env_var(
            "CADENCE_RECOVERY_CADENCE",
            &mut self.macrocycle.recovery_cadence,
        )?;
        Self::apply_env_var(
            "CADENCE_RECOVERY_CUTBACK",
            &mut self.macrocycle.recovery_cutback,
        )?;
        Self::apply_env_var(
            "CADENCE_RESTART_POLICY",
            &mut self.macrocycle.restart_policy,
        )?;
        Self::apply_env_var(
            "CADENCE_PEAK_FLOOR_POLICY",
            &mut self.macrocycle.peak_floor_policy,
        )?;
        Self::apply_env_var(
            "CADENCE_PEAK_FLOOR_MIN_RECENT_VOLUME",
            &mut self.macrocycle.peak_floor_min_recent_volume_km,
        )?;

        // Scheduler overrides
        Self::apply_env_var(
            "CADENCE_STRENGTH_SESSION_SECONDS",
            &mut self.scheduler.strength_session_seconds,
        )?;
        Self::apply_env_var(
            "CADENCE_KEY_SESSION_VOLUME_SHARE",
            &mut self.scheduler.key_session_volume_share,
        )?;

        // Distribution overrides
        Self::apply_env_var(
            "CADENCE_DEFICIT_TOLERANCE_PCT",
            &mut self.distribution.deficit_tolerance_pct,
        )?;

        // Estimator overrides
        Self::apply_env_var(
            "CADENCE_FALLBACK_THRESHOLD_PACE",
            &mut self.estimator.fallback_threshold_pace_sec_per_km,
        )?;

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_deserializes_partial_json() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"macrocycle": {"recovery_cadence": 3, "restart_policy": "resume_peak"}}"#)
                .unwrap();
        assert_eq!(config.macrocycle.recovery_cadence, 3);
        assert_eq!(config.macrocycle.restart_policy, RestartPolicy::ResumePeak);
        assert!((config.macrocycle.recovery_cutback - 0.60).abs() < f64::EPSILON);
        assert_eq!(config.scheduler, SchedulerConfig::default());
    }
}
