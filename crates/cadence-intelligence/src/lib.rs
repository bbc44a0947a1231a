// ABOUTME: Planning engine for the Cadence training planner
// ABOUTME: Zones, macrocycle progression, weekly scheduling, intensity distribution, and duration estimation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Cadence Intelligence
//!
//! The planning engine. Every stage is a pure, synchronous computation over
//! plain data from `cadence-core`: nothing here performs I/O or keeps state
//! between calls.
//!
//! ## Pipeline
//!
//! 1. **zones**: threshold pace or power to five training zones
//! 2. **macrocycle**: goal date and starting load to week descriptors
//! 3. **microcycle**: one week descriptor and availability to seven slots
//! 4. **distribution**: checks Low / Threshold / High time and upgrades an easy day
//! 5. **duration**: sizes runs to their distance targets
//!
//! ## Boundary adapters
//!
//! - **history**: starting volume from recent activities
//! - **templates**: registry of workout structures by type
//! - **normalize**: loosely-shaped external steps to canonical steps
//! - **hydration**: compact text micro-syntax to canonical steps

/// Engine configuration slices with environment overrides
pub mod config;

/// Threshold-based zone calculation and representative paces
pub mod zones;

/// Conversions between steps and sport volume units
pub mod load;

/// Workout structure registry
pub mod templates;

/// Week-by-week progression to a goal date
pub mod macrocycle;

/// Day-by-day scheduling of one week
pub mod microcycle;

/// Intensity distribution validation and correction
pub mod distribution;

/// Run duration estimation
pub mod duration;

/// Starting volume from recent activity history
pub mod history;

/// External step normalization
pub mod normalize;

/// Workout micro-syntax parser
pub mod hydration;

pub use distribution::{DistributionProfile, DistributionReport, DistributionValidator};
pub use duration::{DurationEstimate, DurationEstimator};
pub use macrocycle::{planner_for, CyclingPlanner, MacrocyclePlanner, RunningPlanner};
pub use microcycle::{MicrocycleScheduler, ScheduleOptions, WeekInput};
pub use zones::{compute_zones, ThresholdData, ZoneCalculator, ZonePaces};
