// ABOUTME: Weekly schedule models: one slot per day, scheduler warnings, and the week container
// ABOUTME: Rest slots carry no workout; primary workout time never exceeds the day's available hours
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::availability::DayAvailability;
use super::plan::Phase;
use super::sport::Sport;
use super::workout::{Workout, WorkoutType};

/// One calendar day within a week
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleSlot {
    /// Day index, 0 = Monday
    pub day_index: usize,
    /// Day of week
    pub weekday: Weekday,
    /// Calendar date when the week start is known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Availability the slot was scheduled against
    pub availability: DayAvailability,
    /// Main session; `None` for rest days
    pub primary: Option<Workout>,
    /// Strength session
    pub secondary: Option<Workout>,
}

impl ScheduleSlot {
    /// Day type: the primary workout's type, or Rest
    #[must_use]
    pub fn workout_type(&self) -> WorkoutType {
        self.primary
            .as_ref()
            .map_or(WorkoutType::Rest, |workout| workout.kind)
    }

    /// Whether the day has no primary workout
    #[must_use]
    pub const fn is_rest(&self) -> bool {
        self.primary.is_none()
    }

    /// Available hours
    #[must_use]
    pub fn available_hours(&self) -> f64 {
        self.availability.total_hours()
    }

    /// Available seconds
    #[must_use]
    pub fn available_seconds(&self) -> u32 {
        self.availability.total_seconds()
    }

    /// Planned primary workout seconds
    #[must_use]
    pub fn primary_seconds(&self) -> u32 {
        self.primary.as_ref().map_or(0, |w| w.duration_seconds)
    }

    /// Whether the day carries a strength session
    #[must_use]
    pub const fn has_strength(&self) -> bool {
        self.secondary.is_some()
    }
}

/// Non-fatal scheduler diagnostics
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScheduleWarning {
    /// Every day has zero availability; the week is all rest
    NoAvailability,
    /// Long session placed away from the preferred day
    LongSessionMoved {
        /// Requested day
        preferred: Weekday,
        /// Day used
        placed: Weekday,
    },
    /// Long session did not fit the day and was shortened
    LongSessionReduced {
        /// Seconds needed for the target
        requested_seconds: u32,
        /// Seconds available
        available_seconds: u32,
    },
    /// Key session could not be placed on any open day
    KeySessionDropped {
        /// Session type
        kind: WorkoutType,
    },
    /// Session placed next to the long session or another key session because no other day had room
    RecoveryBufferRelaxed {
        /// Session type
        kind: WorkoutType,
        /// Day used
        placed: Weekday,
    },
    /// Fewer strength sessions than requested were placed
    StrengthSessionsReduced {
        /// Requested sessions
        requested: u32,
        /// Sessions placed
        placed: u32,
    },
    /// Availability cannot hold the full weekly volume
    VolumeShortfall {
        /// Target weekly volume
        target: f64,
        /// Volume actually scheduled
        scheduled: f64,
    },
}

impl fmt::Display for ScheduleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAvailability => write!(f, "no availability this week, all days set to rest"),
            Self::LongSessionMoved { preferred, placed } => write!(
                f,
                "long session moved from {preferred} to {placed} (insufficient availability)"
            ),
            Self::LongSessionReduced {
                requested_seconds,
                available_seconds,
            } => write!(
                f,
                "long run exceeds available hours, reduced to fit ({} of {} min)",
                available_seconds / 60,
                requested_seconds / 60
            ),
            Self::KeySessionDropped { kind } => write!(
                f,
                "{kind} session dropped: no open day has room for it"
            ),
            Self::RecoveryBufferRelaxed { kind, placed } => write!(
                f,
                "{kind} session placed on {placed} next to a hard day (no other day has room)"
            ),
            Self::StrengthSessionsReduced { requested, placed } => {
                write!(f, "placed {placed} of {requested} strength sessions")
            }
            Self::VolumeShortfall { target, scheduled } => write!(
                f,
                "availability holds {scheduled:.1} of the {target:.1} weekly target"
            ),
        }
    }
}

/// Concrete day-by-day schedule for one week
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeekSchedule {
    /// Sport
    pub sport: Sport,
    /// Training phase of the week
    pub phase: Phase,
    /// Seven slots, Monday first
    pub slots: Vec<ScheduleSlot>,
    /// Day index of the long session
    pub long_session_day: Option<usize>,
    /// Scheduler diagnostics
    pub warnings: Vec<ScheduleWarning>,
}

impl WeekSchedule {
    /// Slot by day index
    #[must_use]
    pub fn slot(&self, day_index: usize) -> Option<&ScheduleSlot> {
        self.slots.get(day_index)
    }

    /// Total planned primary workout seconds
    #[must_use]
    pub fn total_primary_seconds(&self) -> u32 {
        self.slots
            .iter()
            .fold(0_u32, |total, slot| total.saturating_add(slot.primary_seconds()))
    }

    /// Sum of running distance targets (km)
    #[must_use]
    pub fn scheduled_distance_km(&self) -> f64 {
        self.slots
            .iter()
            .filter_map(|s| s.primary.as_ref().and_then(|w| w.target_distance_km))
            .sum()
    }

    /// Sum of cycling load targets (TSS)
    #[must_use]
    pub fn scheduled_load(&self) -> f64 {
        self.slots
            .iter()
            .filter_map(|s| s.primary.as_ref().and_then(|w| w.target_load))
            .sum()
    }

    /// Number of primary workouts of a type
    #[must_use]
    pub fn count(&self, kind: WorkoutType) -> usize {
        self.slots
            .iter()
            .filter(|s| s.workout_type() == kind)
            .count()
    }

    /// Number of strength sessions
    #[must_use]
    pub fn strength_sessions(&self) -> usize {
        self.slots.iter().filter(|s| s.has_strength()).count()
    }
}
