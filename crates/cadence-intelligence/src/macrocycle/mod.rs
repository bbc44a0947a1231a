// ABOUTME: Macrocycle planning: week-by-week volume, long session, phase and recovery flags to a goal date
// ABOUTME: One planner trait with Running (km) and Cycling (TSS / hours) implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Macrocycle Planner
//!
//! Generates the ordered list of week descriptors for a plan. Phases are laid
//! out backward from the race week, then a forward walk accumulates capacity
//! and long-session size, applying recovery cutbacks, taper factors, and
//! safety rails after every week.
//!
//! Invalid inputs never fail: the plan comes back empty with an
//! `InvalidInput` warning so the caller can still render.
//!
//! # Example
//!
//! ```rust
//! use cadence_core::models::{RaceType, Sport};
//! use cadence_intelligence::config::MacrocycleConfig;
//! use cadence_intelligence::macrocycle::{
//!     planner_for, AthleteHistory, MacrocycleInputs, PlanSettings,
//! };
//! use chrono::NaiveDate;
//!
//! let planner = planner_for(Sport::Running, MacrocycleConfig::default());
//! let inputs = MacrocycleInputs::running(40.0, 14.0, RaceType::HalfMarathon);
//! let settings = PlanSettings::new(
//!     NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
//!     NaiveDate::from_ymd_opt(2025, 4, 13).unwrap(),
//! );
//! let plan = planner.generate_plan(&inputs, &settings, &AthleteHistory::default());
//! assert!(plan.weeks.last().unwrap().is_race_week);
//! ```

mod cycling;
/// Phase layout and recovery-week planning
pub mod phases;
mod progression;
mod running;

pub use cycling::CyclingPlanner;
pub use phases::{count_weeks, monday_of, PhaseLayout};
pub use running::{long_run_constraints, LongRunConstraints, RunningPlanner};

use cadence_core::models::{MacrocyclePlan, RaceType, Sport};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::MacrocycleConfig;

/// Athlete-specific starting point and progression settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MacrocycleInputs {
    /// Starting weekly volume (km for running, TSS for cycling)
    #[serde(alias = "startVolume")]
    pub start_volume: f64,
    /// Starting long session (km for running, hours for cycling)
    #[serde(alias = "startLongSession")]
    pub start_long_session: f64,
    /// Weekly growth: fraction for running, CTL points per week for cycling
    #[serde(default, alias = "progressionRate")]
    pub progression_rate: Option<f64>,
    /// Long-session growth per loading week (km or hours)
    #[serde(default, alias = "longSessionProgression")]
    pub long_session_progression: Option<f64>,
    /// Taper length override (weeks)
    #[serde(default, alias = "taperDuration")]
    pub taper_weeks: Option<u32>,
    /// Goal event
    #[serde(alias = "raceType")]
    pub race_type: RaceType,
}

impl MacrocycleInputs {
    /// Running inputs with default progression
    #[must_use]
    pub const fn running(start_km: f64, start_long_km: f64, race_type: RaceType) -> Self {
        Self {
            start_volume: start_km,
            start_long_session: start_long_km,
            progression_rate: None,
            long_session_progression: None,
            taper_weeks: None,
            race_type,
        }
    }

    /// Cycling inputs seeded from chronic training load (weekly TSS = CTL × 7)
    #[must_use]
    pub fn cycling_from_ctl(ctl: f64, start_long_hours: f64, race_type: RaceType) -> Self {
        Self {
            start_volume: ctl * cadence_core::constants::cycling::DAYS_PER_WEEK,
            start_long_session: start_long_hours,
            progression_rate: None,
            long_session_progression: None,
            taper_weeks: None,
            race_type,
        }
    }

    /// Override the progression rate
    #[must_use]
    pub const fn with_progression_rate(mut self, rate: f64) -> Self {
        self.progression_rate = Some(rate);
        self
    }

    /// Override the long-session progression
    #[must_use]
    pub const fn with_long_session_progression(mut self, step: f64) -> Self {
        self.long_session_progression = Some(step);
        self
    }

    /// Override the taper length
    #[must_use]
    pub const fn with_taper_weeks(mut self, weeks: u32) -> Self {
        self.taper_weeks = Some(weeks);
        self
    }
}

/// Calendar and recovery settings for one plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanSettings {
    /// First day of the plan (normalized to its Monday)
    #[serde(alias = "planStartDate")]
    pub plan_start_date: NaiveDate,
    /// Goal event date
    #[serde(alias = "goalDate")]
    pub goal_date: NaiveDate,
    /// Recovery cadence override (every Nth week; 0 disables)
    #[serde(default, alias = "recoveryWeekCadence")]
    pub recovery_cadence: Option<u32>,
    /// Weeks that must be recovery weeks
    #[serde(default, alias = "forcedRecoveryWeeks")]
    pub forced_recovery_weeks: Vec<u32>,
    /// Weeks that must not be recovery weeks
    #[serde(default, alias = "forcedBuildWeeks")]
    pub forced_build_weeks: Vec<u32>,
}

impl PlanSettings {
    /// Settings with default recovery behaviour
    #[must_use]
    pub const fn new(plan_start_date: NaiveDate, goal_date: NaiveDate) -> Self {
        Self {
            plan_start_date,
            goal_date,
            recovery_cadence: None,
            forced_recovery_weeks: Vec::new(),
            forced_build_weeks: Vec::new(),
        }
    }

    /// Override the recovery cadence
    #[must_use]
    pub fn with_recovery_cadence(mut self, cadence: u32) -> Self {
        self.recovery_cadence = Some(cadence);
        self
    }

    /// Force recovery weeks
    #[must_use]
    pub fn with_forced_recovery_weeks(mut self, weeks: Vec<u32>) -> Self {
        self.forced_recovery_weeks = weeks;
        self
    }

    /// Force loading weeks
    #[must_use]
    pub fn with_forced_build_weeks(mut self, weeks: Vec<u32>) -> Self {
        self.forced_build_weeks = weeks;
        self
    }
}

/// Recent-history facts gating the Peak long-session floor
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AthleteHistory {
    /// Average weekly running volume over recent weeks (km)
    #[serde(default, alias = "avgRecentVolume")]
    pub avg_recent_volume_km: Option<f64>,
    /// Injury in the recent past
    #[serde(default, alias = "recentInjury")]
    pub recent_injury: bool,
    /// The goal race is the athlete's first marathon
    #[serde(default, alias = "firstMarathon")]
    pub first_marathon: bool,
}

/// Generates week descriptors for one sport
pub trait MacrocyclePlanner {
    /// Sport this planner produces volumes for
    fn sport(&self) -> Sport;

    /// Generate the full plan
    ///
    /// Identical inputs always produce identical output.
    fn generate_plan(
        &self,
        inputs: &MacrocycleInputs,
        settings: &PlanSettings,
        history: &AthleteHistory,
    ) -> MacrocyclePlan;
}

/// Planner for a sport
#[must_use]
pub fn planner_for(sport: Sport, config: MacrocycleConfig) -> Box<dyn MacrocyclePlanner> {
    match sport {
        Sport::Running => Box::new(RunningPlanner::new(config)),
        Sport::Cycling => Box::new(CyclingPlanner::new(config)),
    }
}
