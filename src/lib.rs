// ABOUTME: Main library entry point for the Cadence endurance training planner
// ABOUTME: Wires the planning engine into a session pipeline and provides logging setup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Cadence Planner
//!
//! Periodized training plans for runners and cyclists, from a goal date down
//! to individual workout steps.
//!
//! ## Features
//!
//! - **Macrocycle**: Base, Build, Peak and Taper weeks with recovery cutbacks
//! - **Microcycle**: long session, key sessions and strength placed around availability
//! - **Intensity distribution**: pyramidal, hybrid or polarized targets with automatic correction
//! - **Duration estimation**: run durations sized to distance targets
//!
//! ## Architecture
//!
//! - `cadence-core`: errors, constants, and plain data models
//! - `cadence-intelligence`: the engine stages
//! - this crate: the [`pipeline::PlanSession`] context and logging
//!
//! ## Example Usage
//!
//! ```rust
//! use cadence_planner::pipeline::{PlanRequest, PlanSession};
//! use cadence_intelligence::config::EngineConfig;
//!
//! let request: PlanRequest = serde_json::from_str(r#"{
//!     "athlete": {
//!         "sport": "running",
//!         "race_type": "half_marathon",
//!         "thresholds": { "threshold_pace_sec_per_km": 270 },
//!         "start_volume": 35,
//!         "start_long_session": 12
//!     },
//!     "plan_start_date": "2025-01-06",
//!     "goal_date": "2025-03-30",
//!     "availability": [1, 1, 1, 1, 0, 1.5, 2.5]
//! }"#).unwrap();
//!
//! let plan = PlanSession::new(request, EngineConfig::default()).generate();
//! assert!(plan.weeks.last().unwrap().descriptor.is_race_week);
//! ```

/// Structured logging configuration
pub mod logging;

/// Plan session pipeline
pub mod pipeline;

pub use cadence_core::errors::{AppError, AppResult, ErrorCode};
pub use pipeline::{AthleteProfile, PlanRequest, PlanSession, PlannedWeek, TrainingPlan};
