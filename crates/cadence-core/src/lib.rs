// ABOUTME: Core types and constants for the Cadence endurance training planner
// ABOUTME: Foundation crate with error handling, domain models, and physiological constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Cadence Core
//!
//! Foundation crate providing shared types and constants for the Cadence
//! planning engine. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Progression factors, safety rails, zone multipliers, distribution targets
//! - **models**: Week descriptors, availability, zones, workouts, schedules

/// Unified error handling system with standard error codes
pub mod errors;

/// Physiological constants and safety rails organized by engine stage
pub mod constants;

/// Core data models (`WeekDescriptor`, `ScheduleSlot`, `Step`, `ZoneSet`, etc.)
pub mod models;
