// ABOUTME: Macrocycle models: training phases, week descriptors, planner warnings, and the plan container
// ABOUTME: Week descriptors are created once per plan generation and replaced wholesale on regeneration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::sport::{RaceType, Sport};

/// Macrocycle phase, ordered from the start of the plan to the goal event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// General aerobic development
    Base,
    /// Race-specific development
    Build,
    /// Highest load and longest sessions
    Peak,
    /// Volume reduction ahead of the event
    Taper,
    /// Goal event week
    Race,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => write!(f, "base"),
            Self::Build => write!(f, "build"),
            Self::Peak => write!(f, "peak"),
            Self::Taper => write!(f, "taper"),
            Self::Race => write!(f, "race"),
        }
    }
}

/// One row of the macrocycle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeekDescriptor {
    /// Sport the volumes are expressed for
    pub sport: Sport,
    /// 1-based week index, contiguous
    pub week_number: u32,
    /// Monday of the week
    pub start_date: NaiveDate,
    /// Training phase
    pub phase: Phase,
    /// Block number; increments after every recovery week and on phase changes
    pub block: u32,
    /// Target weekly volume (km for running, TSS for cycling)
    pub target_volume: f64,
    /// Target long session (km for running, hours for cycling)
    pub long_session: f64,
    /// Cutback week
    pub is_recovery_week: bool,
    /// Goal event week (always the last week)
    pub is_race_week: bool,
    /// Long session exceeds half the weekly volume; the scheduler keeps a single key session
    pub long_run_dominant: bool,
}

impl WeekDescriptor {
    /// Sunday of the week
    #[must_use]
    pub fn end_date(&self) -> NaiveDate {
        self.start_date + Duration::days(6)
    }

    /// Whether a date falls inside this week
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date()
    }

    /// Long session as a share of the weekly volume, in the same unit
    ///
    /// Cycling long sessions are in hours and are converted to TSS with the
    /// endurance load rate before dividing.
    #[must_use]
    pub fn long_session_share(&self, tss_per_hour: f64) -> f64 {
        if self.target_volume <= 0.0 {
            return 0.0;
        }
        let long = match self.sport {
            Sport::Running => self.long_session,
            Sport::Cycling => self.long_session * tss_per_hour,
        };
        long / self.target_volume
    }
}

/// Non-fatal planner diagnostics
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlanWarning {
    /// Inputs could not produce a plan; the week list is empty
    InvalidInput {
        /// What was wrong
        reason: String,
    },
    /// Weekly volume hit the race-type ceiling
    VolumeClamped {
        /// Week the clamp occurred in
        week_number: u32,
        /// Volume before clamping
        requested: f64,
        /// Ceiling applied
        ceiling: f64,
    },
    /// Long session hit a ratio or absolute cap
    LongSessionClamped {
        /// Week the clamp occurred in
        week_number: u32,
        /// Long session before clamping
        requested: f64,
        /// Limit applied
        limit: f64,
    },
    /// Peak long-session floor was not applied
    PeakFloorSkipped {
        /// Peak week
        week_number: u32,
        /// Why the history gate failed
        reason: String,
    },
    /// Peak long-session floor raised the long session
    PeakFloorApplied {
        /// Peak week
        week_number: u32,
        /// Floor value
        floor: f64,
    },
    /// Plan too short for the full phase layout; Base removed
    ShortPlanCompressed {
        /// Total weeks in the plan
        total_weeks: u32,
        /// Build weeks after compression
        build_weeks: u32,
        /// Peak weeks after compression
        peak_weeks: u32,
    },
    /// Taper shorter than requested because the plan is short
    TaperShortened {
        /// Requested taper weeks
        requested: u32,
        /// Taper weeks applied
        applied: u32,
    },
    /// Forced recovery week could not be honored
    ForcedRecoveryIgnored {
        /// Requested week
        week_number: u32,
        /// Why it was ignored
        reason: String,
    },
}

impl fmt::Display for PlanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput { reason } => write!(f, "plan unavailable: {reason}"),
            Self::VolumeClamped {
                week_number,
                requested,
                ceiling,
            } => write!(
                f,
                "week {week_number}: volume {requested:.1} clamped to ceiling {ceiling:.1}"
            ),
            Self::LongSessionClamped {
                week_number,
                requested,
                limit,
            } => write!(
                f,
                "week {week_number}: long session {requested:.1} clamped to {limit:.1}"
            ),
            Self::PeakFloorSkipped {
                week_number,
                reason,
            } => write!(f, "week {week_number}: peak long-session floor skipped ({reason})"),
            Self::PeakFloorApplied { week_number, floor } => {
                write!(f, "week {week_number}: peak long-session floor {floor:.1} applied")
            }
            Self::ShortPlanCompressed {
                total_weeks,
                build_weeks,
                peak_weeks,
            } => write!(
                f,
                "{total_weeks}-week plan compressed: no base, {build_weeks} build, {peak_weeks} peak"
            ),
            Self::TaperShortened { requested, applied } => {
                write!(f, "taper shortened from {requested} to {applied} weeks")
            }
            Self::ForcedRecoveryIgnored {
                week_number,
                reason,
            } => write!(f, "forced recovery week {week_number} ignored: {reason}"),
        }
    }
}

/// Output of macrocycle generation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MacrocyclePlan {
    /// Sport
    pub sport: Sport,
    /// Goal event
    pub race_type: RaceType,
    /// Weeks in order; empty when inputs were invalid
    pub weeks: Vec<WeekDescriptor>,
    /// Diagnostics collected during generation
    pub warnings: Vec<PlanWarning>,
}

impl MacrocyclePlan {
    /// Empty plan carrying a single invalid-input warning
    #[must_use]
    pub fn unavailable(sport: Sport, race_type: RaceType, reason: impl Into<String>) -> Self {
        Self {
            sport,
            race_type,
            weeks: Vec::new(),
            warnings: vec![PlanWarning::InvalidInput {
                reason: reason.into(),
            }],
        }
    }

    /// Whether the plan holds any weeks
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    /// Week by 1-based number
    #[must_use]
    pub fn week(&self, week_number: u32) -> Option<&WeekDescriptor> {
        self.weeks.iter().find(|w| w.week_number == week_number)
    }

    /// Final (race) week
    #[must_use]
    pub fn race_week(&self) -> Option<&WeekDescriptor> {
        self.weeks.last().filter(|w| w.is_race_week)
    }
}
