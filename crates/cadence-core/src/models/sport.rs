// ABOUTME: Sport and race-type enumerations for plan generation
// ABOUTME: Race types carry volume ceilings, taper lengths, race distances, and long-session caps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{long_run, weekly_ceilings};
use crate::errors::AppError;

/// Endurance sports supported by the planner
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Sport {
    /// Running; volume in km, long session in km
    #[serde(alias = "run")]
    Running,
    /// Cycling; volume in TSS, long session in hours
    #[serde(alias = "ride", alias = "bike")]
    Cycling,
}

impl Sport {
    /// Unit of the weekly target volume
    #[must_use]
    pub const fn volume_unit(&self) -> &'static str {
        match self {
            Self::Running => "km",
            Self::Cycling => "tss",
        }
    }

    /// Unit of the long session size
    #[must_use]
    pub const fn long_session_unit(&self) -> &'static str {
        match self {
            Self::Running => "km",
            Self::Cycling => "hours",
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Cycling => write!(f, "cycling"),
        }
    }
}

impl FromStr for Sport {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "running" | "run" => Ok(Self::Running),
            "cycling" | "ride" | "bike" => Ok(Self::Cycling),
            other => Err(AppError::invalid_input(format!("Unknown sport: {other}"))),
        }
    }
}

/// Goal event the plan builds towards
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RaceType {
    /// 42.2 km
    Marathon,
    /// 21.1 km
    #[serde(alias = "half")]
    HalfMarathon,
    /// 10 km
    #[serde(alias = "10k")]
    TenK,
    /// 5 km
    #[serde(alias = "5k")]
    FiveK,
    /// Long mass-participation ride
    GranFondo,
    /// Mass-start road race
    RoadRace,
    /// Individual time trial
    TimeTrial,
    /// No specific event; general fitness build
    General,
}

impl RaceType {
    /// Whether this goal makes sense for the sport
    #[must_use]
    pub const fn supports(&self, sport: Sport) -> bool {
        match self {
            Self::Marathon | Self::HalfMarathon | Self::TenK | Self::FiveK => {
                matches!(sport, Sport::Running)
            }
            Self::GranFondo | Self::RoadRace | Self::TimeTrial => {
                matches!(sport, Sport::Cycling)
            }
            Self::General => true,
        }
    }

    /// Absolute weekly volume ceiling (km for running, TSS for cycling)
    #[must_use]
    pub const fn max_weekly_volume(&self, sport: Sport) -> f64 {
        match self {
            Self::Marathon => weekly_ceilings::MARATHON_KM,
            Self::HalfMarathon => weekly_ceilings::HALF_MARATHON_KM,
            Self::TenK => weekly_ceilings::TEN_K_KM,
            Self::FiveK => weekly_ceilings::FIVE_K_KM,
            Self::GranFondo => weekly_ceilings::GRAN_FONDO_TSS,
            Self::RoadRace => weekly_ceilings::ROAD_RACE_TSS,
            Self::TimeTrial => weekly_ceilings::TIME_TRIAL_TSS,
            Self::General => match sport {
                Sport::Running => weekly_ceilings::GENERAL_RUNNING_KM,
                Sport::Cycling => weekly_ceilings::GENERAL_CYCLING_TSS,
            },
        }
    }

    /// Default taper length in weeks
    #[must_use]
    pub const fn default_taper_weeks(&self) -> u32 {
        match self {
            Self::Marathon => 3,
            Self::GranFondo => 2,
            Self::HalfMarathon
            | Self::TenK
            | Self::FiveK
            | Self::RoadRace
            | Self::TimeTrial
            | Self::General => 1,
        }
    }

    /// Race distance for running events (km)
    #[must_use]
    pub const fn race_distance_km(&self) -> Option<f64> {
        match self {
            Self::Marathon => Some(42.2),
            Self::HalfMarathon => Some(21.1),
            Self::TenK => Some(10.0),
            Self::FiveK => Some(5.0),
            _ => None,
        }
    }

    /// Expected event duration for cycling events (hours)
    #[must_use]
    pub const fn event_duration_hours(&self) -> Option<f64> {
        match self {
            Self::GranFondo => Some(5.0),
            Self::RoadRace => Some(3.0),
            Self::TimeTrial => Some(1.0),
            _ => None,
        }
    }

    /// Absolute cap for a single long session (km for running, hours for cycling)
    #[must_use]
    pub const fn long_session_cap(&self, sport: Sport) -> f64 {
        match sport {
            Sport::Running => long_run::ABSOLUTE_MAX_LONG_RUN_KM,
            Sport::Cycling => match self {
                Self::TimeTrial => 4.0,
                Self::GranFondo => 6.0,
                _ => 5.0,
            },
        }
    }

    /// Peak-phase long run exception: (ratio ceiling, floor km)
    #[must_use]
    pub const fn peak_long_run_exception(&self) -> Option<(f64, f64)> {
        match self {
            Self::Marathon => Some((long_run::PEAK_RATIO_MARATHON, long_run::PEAK_FLOOR_MARATHON_KM)),
            Self::HalfMarathon => Some((long_run::PEAK_RATIO_HALF, long_run::PEAK_FLOOR_HALF_KM)),
            _ => None,
        }
    }
}

impl fmt::Display for RaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Marathon => "marathon",
            Self::HalfMarathon => "half_marathon",
            Self::TenK => "10k",
            Self::FiveK => "5k",
            Self::GranFondo => "gran_fondo",
            Self::RoadRace => "road_race",
            Self::TimeTrial => "time_trial",
            Self::General => "general",
        };
        write!(f, "{name}")
    }
}

impl FromStr for RaceType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "marathon" => Ok(Self::Marathon),
            "half" | "half_marathon" => Ok(Self::HalfMarathon),
            "10k" | "ten_k" => Ok(Self::TenK),
            "5k" | "five_k" => Ok(Self::FiveK),
            "gran_fondo" | "granfondo" => Ok(Self::GranFondo),
            "road_race" => Ok(Self::RoadRace),
            "time_trial" | "tt" => Ok(Self::TimeTrial),
            "general" => Ok(Self::General),
            other => Err(AppError::invalid_input(format!("Unknown race type: {other}"))),
        }
    }
}
