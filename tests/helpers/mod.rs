// ABOUTME: Shared fixtures for planner integration tests
// ABOUTME: Builds plan requests for a half-marathon runner and a gran fondo cyclist
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(dead_code)]

use cadence_planner::pipeline::PlanRequest;
use chrono::NaiveDate;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Twelve-week half-marathon build with a free Friday
pub const HALF_MARATHON_REQUEST: &str = r#"{
    "athlete": {
        "sport": "running",
        "race_type": "half_marathon",
        "thresholds": { "threshold_pace_sec_per_km": 270, "resting_hr": 50, "max_hr": 190 },
        "start_volume": 35,
        "start_long_session": 12
    },
    "plan_start_date": "2025-01-06",
    "goal_date": "2025-03-30",
    "availability": [1, 1.25, 1, { "am_hours": 0.5, "pm_hours": 1 }, 0, 1.5, 2.5],
    "gym_sessions_target": 2
}"#;

/// Fifteen-week gran fondo build seeded from CTL
pub const GRAN_FONDO_REQUEST: &str = r#"{
    "athlete": {
        "sport": "cycling",
        "race_type": "gran_fondo",
        "thresholds": { "threshold_power_watts": 250 },
        "ctl": 55,
        "start_long_session": 2.5
    },
    "plan_start_date": "2025-03-03",
    "goal_date": "2025-06-15",
    "availability": {
        "0": 0,
        "1": 1.5,
        "2": 1,
        "3": 1.5,
        "4": 0,
        "5": 4,
        "6": 6
    }
}"#;

pub fn half_marathon_request() -> PlanRequest {
    serde_json::from_str(HALF_MARATHON_REQUEST).unwrap()
}

pub fn gran_fondo_request() -> PlanRequest {
    serde_json::from_str(GRAN_FONDO_REQUEST).unwrap()
}
