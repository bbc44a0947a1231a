// ABOUTME: Domain models for the training planner: sports, phases, weeks, availability, zones, workouts
// ABOUTME: Re-exports the plan, schedule, and distribution types consumed by the engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Plain data shared by every engine stage. Models carry no I/O and no hidden
//! state: a week descriptor, a schedule, or a zone set is fully determined by the
//! inputs that produced it.
//!
//! ## Core Models
//!
//! - `WeekDescriptor`: one row of the macrocycle
//! - `ScheduleSlot` / `WeekSchedule`: one week's day-by-day schedule
//! - `Step` / `Workout`: canonical workout structure
//! - `ZoneSet`: five training zones derived from a threshold
//! - `IntensityDistribution`: realized time in the Low / Threshold / High buckets

mod availability;
mod distribution;
mod plan;
mod schedule;
mod sport;
mod workout;
mod zones;

// Sport and goal
pub use sport::{RaceType, Sport};

// Macrocycle
pub use plan::{MacrocyclePlan, Phase, PlanWarning, WeekDescriptor};

// Availability
pub use availability::{weekday_for_index, DayAvailability, WeekAvailability};

// Zones
pub use zones::{
    format_pace, HeartRateBand, IntensityBucket, Zone, ZoneBand, ZoneBasis, ZoneRange, ZoneSet,
};

// Workouts and schedules
pub use schedule::{ScheduleSlot, ScheduleWarning, WeekSchedule};
pub use workout::{total_step_seconds, RepeatBlock, Step, StepKind, StepLeaf, Workout, WorkoutType};

// Distribution
pub use distribution::{DistributionModel, DistributionTarget, IntensityDistribution};
