// ABOUTME: Plan session threading one athlete's context through planner, scheduler, validator and estimator
// ABOUTME: Explicit context object owning profile, availability, templates and config; no process-wide state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Plan Session
//!
//! A [`PlanSession`] holds everything one plan needs. Each stage receives only
//! its slice: the macrocycle planner gets inputs, settings and history, the
//! scheduler gets one week plus availability, the validator gets the week's
//! schedule and volume profile, the estimator gets paces.
//!
//! Weeks are independent: [`PlanSession::regenerate_week`] recomputes one week
//! without touching its neighbours.

use cadence_core::errors::{AppError, AppResult};
use cadence_core::models::{
    DistributionModel, DistributionTarget, IntensityDistribution, MacrocyclePlan, PlanWarning,
    RaceType, ScheduleWarning, Sport, WeekAvailability, WeekDescriptor, WeekSchedule, ZoneSet,
};
use cadence_intelligence::config::EngineConfig;
use cadence_intelligence::distribution::{
    DistributionProfile, DistributionUpgrade, DistributionValidator,
};
use cadence_intelligence::duration::DurationEstimator;
use cadence_intelligence::history::{estimate_starting_volume, ActivityRecord, StartingVolume};
use cadence_intelligence::macrocycle::{
    planner_for, AthleteHistory, MacrocycleInputs, PlanSettings,
};
use cadence_intelligence::microcycle::{MicrocycleScheduler, ScheduleOptions, WeekInput};
use cadence_intelligence::templates::TemplateLibrary;
use cadence_intelligence::zones::{ThresholdData, ZoneCalculator, ZonePaces};
use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::logging::PlanLogger;

/// Starting weekly km when neither the athlete nor their history supplies one
pub const DEFAULT_RUNNING_START_KM: f64 = 30.0;

/// Athlete facts the pipeline plans from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AthleteProfile {
    /// Sport
    pub sport: Sport,
    /// Goal event
    #[serde(alias = "raceType")]
    pub race_type: RaceType,
    /// Threshold inputs for zones
    #[serde(default)]
    pub thresholds: ThresholdData,
    /// Easy pace override (sec/km)
    #[serde(default, alias = "easyPace")]
    pub easy_pace_sec_per_km: Option<f64>,
    /// Starting weekly volume (km or TSS); running falls back to history
    #[serde(default, alias = "startVolume")]
    pub start_volume: Option<f64>,
    /// Cycling: chronic training load seeding the starting TSS
    #[serde(default)]
    pub ctl: Option<f64>,
    /// Starting long session (km or hours)
    #[serde(alias = "startLongSession")]
    pub start_long_session: f64,
    /// Progression override (fraction for running, CTL/week for cycling)
    #[serde(default, alias = "progressionRate")]
    pub progression_rate: Option<f64>,
    /// Long-session growth per loading week
    #[serde(default, alias = "longSessionProgression")]
    pub long_session_progression: Option<f64>,
    /// Taper length override (weeks)
    #[serde(default, alias = "taperDuration")]
    pub taper_weeks: Option<u32>,
    /// History facts for the Peak long-run floor
    #[serde(default)]
    pub history: AthleteHistory,
    /// Already-fetched recent activities
    #[serde(default, alias = "recentActivities")]
    pub recent_activities: Vec<ActivityRecord>,
}

/// Everything needed to produce a plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanRequest {
    /// Athlete
    pub athlete: AthleteProfile,
    /// Dates and recovery overrides
    #[serde(flatten)]
    pub settings: PlanSettings,
    /// Weekly availability, index 0 = Monday
    pub availability: WeekAvailability,
    /// Preferred long-session day
    #[serde(default, alias = "preferredLongSessionDay")]
    pub preferred_long_session_day: Option<Weekday>,
    /// Strength sessions per week
    #[serde(default, alias = "gymSessionsTarget")]
    pub gym_sessions_target: u32,
    /// Workout structures; the standard library when absent
    #[serde(default)]
    pub templates: Option<TemplateLibrary>,
}

/// One week after every stage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlannedWeek {
    /// Macrocycle row
    pub descriptor: WeekDescriptor,
    /// Corrected day-by-day schedule
    pub schedule: WeekSchedule,
    /// Distribution model for the week's volume
    pub model: DistributionModel,
    /// Target percentages
    pub target: DistributionTarget,
    /// Realized distribution before correction
    pub distribution_before: IntensityDistribution,
    /// Realized distribution after correction
    pub distribution_after: IntensityDistribution,
    /// Days upgraded by the validator
    pub upgrades: Vec<DistributionUpgrade>,
    /// Scheduler diagnostics
    pub warnings: Vec<ScheduleWarning>,
}

/// Full pipeline output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrainingPlan {
    /// Sport
    pub sport: Sport,
    /// Goal event
    pub race_type: RaceType,
    /// Training zones
    pub zones: ZoneSet,
    /// Starting volume estimate, when history or a default was used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_volume: Option<StartingVolume>,
    /// Weeks in order; empty when inputs were invalid
    pub weeks: Vec<PlannedWeek>,
    /// Macrocycle diagnostics
    pub warnings: Vec<PlanWarning>,
}

/// Explicit context for one athlete's plan
#[derive(Debug, Clone)]
pub struct PlanSession {
    profile: AthleteProfile,
    settings: PlanSettings,
    availability: WeekAvailability,
    options: ScheduleOptions,
    library: TemplateLibrary,
    config: EngineConfig,
}

impl PlanSession {
    /// Session for a request with the given configuration
    #[must_use]
    pub fn new(request: PlanRequest, config: EngineConfig) -> Self {
        let options = ScheduleOptions {
            preferred_long_session_day: request.preferred_long_session_day,
            gym_sessions_target: request.gym_sessions_target,
        };
        Self {
            profile: request.athlete,
            settings: request.settings,
            availability: request.availability,
            options,
            library: request.templates.unwrap_or_else(TemplateLibrary::standard),
            config,
        }
    }

    /// Session with defaults plus `CADENCE_*` environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the environment configuration is invalid
    pub fn from_env(request: PlanRequest) -> AppResult<Self> {
        let config = EngineConfig::load()?;
        Ok(Self::new(request, config))
    }

    /// Engine configuration in use
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Zones for the athlete's thresholds
    #[must_use]
    pub fn zones(&self) -> ZoneSet {
        ZoneCalculator::new().compute(&self.profile.thresholds)
    }

    /// Paces shared by the scheduler, validator and estimator
    #[must_use]
    pub fn paces(&self, zones: &ZoneSet) -> ZonePaces {
        let paces = DurationEstimator::new(self.config.estimator.clone()).paces_for(zones);
        match self.profile.easy_pace_sec_per_km {
            Some(easy) => paces.with_easy_pace(easy),
            None => paces,
        }
    }

    fn starting_volume(&self) -> Option<StartingVolume> {
        if self.profile.sport != Sport::Running {
            return None;
        }
        if self.profile.recent_activities.is_empty() && self.profile.start_volume.is_some() {
            return None;
        }
        Some(estimate_starting_volume(
            &self.profile.recent_activities,
            self.settings.plan_start_date,
            self.profile.start_volume.unwrap_or(DEFAULT_RUNNING_START_KM),
        ))
    }

    fn macrocycle_with(&self, starting: Option<&StartingVolume>) -> MacrocyclePlan {
        let profile = &self.profile;
        let start_volume = match profile.sport {
            Sport::Running => profile
                .start_volume
                .or_else(|| starting.map(|s| s.weekly_km))
                .unwrap_or(DEFAULT_RUNNING_START_KM),
            Sport::Cycling => {
                let Some(volume) = profile.start_volume.or_else(|| {
                    profile
                        .ctl
                        .map(|ctl| ctl * cadence_core::constants::cycling::DAYS_PER_WEEK)
                }) else {
                    return MacrocyclePlan::unavailable(
                        profile.sport,
                        profile.race_type,
                        "cycling plans need a starting weekly TSS or a CTL",
                    );
                };
                volume
            }
        };

        let inputs = MacrocycleInputs {
            start_volume,
            start_long_session: profile.start_long_session,
            progression_rate: profile.progression_rate,
            long_session_progression: profile.long_session_progression,
            taper_weeks: profile.taper_weeks,
            race_type: profile.race_type,
        };
        let history = starting.map_or_else(
            || profile.history.clone(),
            |s| s.apply_to(profile.history.clone()),
        );

        planner_for(profile.sport, self.config.macrocycle.clone()).generate_plan(
            &inputs,
            &self.settings,
            &history,
        )
    }

    /// Week descriptors only
    #[must_use]
    pub fn macrocycle(&self) -> MacrocyclePlan {
        self.macrocycle_with(self.starting_volume().as_ref())
    }

    /// Run every stage for every week
    #[must_use]
    pub fn generate(&self) -> TrainingPlan {
        let zones = self.zones();
        let paces = self.paces(&zones);
        let starting_volume = self.starting_volume();
        let macrocycle = self.macrocycle_with(starting_volume.as_ref());

        let weeks: Vec<PlannedWeek> = macrocycle
            .weeks
            .iter()
            .map(|week| self.plan_week(week, &paces))
            .collect();

        PlanLogger::log_plan_generated(
            &macrocycle.sport.to_string(),
            weeks.len(),
            macrocycle.warnings.len(),
            weeks.iter().map(|w| w.upgrades.len()).sum(),
        );

        TrainingPlan {
            sport: macrocycle.sport,
            race_type: macrocycle.race_type,
            zones,
            starting_volume,
            weeks,
            warnings: macrocycle.warnings,
        }
    }

    /// Recompute a single week
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the plan has no week with that number
    pub fn regenerate_week(&self, week_number: u32) -> AppResult<PlannedWeek> {
        let macrocycle = self.macrocycle();
        let week = macrocycle.week(week_number).ok_or_else(|| {
            AppError::invalid_input(format!("week {week_number} is not part of the plan"))
                .with_week(week_number)
        })?;
        let zones = self.zones();
        Ok(self.plan_week(week, &self.paces(&zones)))
    }

    /// Scheduler, then validator, then estimator for one week
    fn plan_week(&self, week: &WeekDescriptor, paces: &ZonePaces) -> PlannedWeek {
        let scheduler =
            MicrocycleScheduler::new(self.config.scheduler.clone(), self.library.clone());
        let input = WeekInput::from_descriptor(week, self.options.gym_sessions_target);
        let schedule =
            scheduler.build_week_schedule(&input, &self.availability, &self.options, paces);

        let validator =
            DistributionValidator::new(self.config.distribution.clone(), self.library.clone());
        let (mut schedule, report) =
            validator.validate_and_fix(&schedule, &DistributionProfile::for_week(week), paces);

        if schedule.sport == Sport::Running {
            let estimator = DurationEstimator::new(self.config.estimator.clone());
            for slot in &mut schedule.slots {
                let available = slot.available_seconds();
                if let Some(workout) = slot.primary.as_mut() {
                    workout.estimated_minutes =
                        Some(estimator.estimate_workout(workout, paces, available));
                }
            }
        }

        let sessions = schedule.slots.iter().filter(|s| !s.is_rest()).count();
        PlanLogger::log_week_scheduled(
            week.week_number,
            &week.phase.to_string(),
            sessions,
            schedule.warnings.len(),
        );

        PlannedWeek {
            descriptor: week.clone(),
            warnings: schedule.warnings.clone(),
            schedule,
            model: report.model,
            target: report.target,
            distribution_before: report.before,
            distribution_after: report.after,
            upgrades: report.upgrades,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn request() -> PlanRequest {
        PlanRequest {
            athlete: AthleteProfile {
                sport: Sport::Running,
                race_type: RaceType::HalfMarathon,
                thresholds: ThresholdData::pace(270.0),
                easy_pace_sec_per_km: None,
                start_volume: Some(35.0),
                ctl: None,
                start_long_session: 12.0,
                progression_rate: None,
                long_session_progression: None,
                taper_weeks: None,
                history: AthleteHistory::default(),
                recent_activities: Vec::new(),
            },
            settings: PlanSettings::new(
                NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
                NaiveDate::from_ymd_opt(2025, 3, 30).unwrap(),
            ),
            availability: WeekAvailability::from_hours([1.0, 1.0, 1.0, 1.0, 0.0, 1.5, 2.5]),
            preferred_long_session_day: None,
            gym_sessions_target: 0,
            templates: None,
        }
    }

    #[test]
    fn test_explicit_start_volume_skips_history() {
        let session = PlanSession::new(request(), EngineConfig::default());
        assert!(session.starting_volume().is_none());
        let plan = session.macrocycle();
        assert!((plan.weeks[0].target_volume - 35.0).abs() < 1e-9);
    }

    #[test]
    fn test_cycling_without_load_is_unavailable() {
        let mut request = request();
        request.athlete.sport = Sport::Cycling;
        request.athlete.race_type = RaceType::GranFondo;
        request.athlete.start_volume = None;
        let plan = PlanSession::new(request, EngineConfig::default()).generate();
        assert!(plan.weeks.is_empty());
        assert!(matches!(
            plan.warnings.as_slice(),
            [PlanWarning::InvalidInput { .. }]
        ));
    }

    #[test]
    fn test_unknown_week_is_an_error() {
        let session = PlanSession::new(request(), EngineConfig::default());
        let error = session.regenerate_week(99).unwrap_err();
        assert_eq!(error.code, cadence_core::errors::ErrorCode::InvalidInput);
    }
}
