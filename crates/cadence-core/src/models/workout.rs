// ABOUTME: Canonical workout and step models shared by scheduling, validation, and estimation
// ABOUTME: Steps are a tagged variant: leaf {kind, duration, zone} or repeat block {repetitions, steps}
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::zones::Zone;
use crate::errors::AppError;

/// Structural role of a leaf step
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Warm-up
    Warmup,
    /// Cool-down
    Cooldown,
    /// Work interval or steady effort
    Work,
    /// Recovery between intervals
    Recover,
}

impl StepKind {
    /// Short code used by the text encoding
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Warmup => "WU",
            Self::Cooldown => "CD",
            Self::Work => "W",
            Self::Recover => "R",
        }
    }
}

impl FromStr for StepKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wu" | "warmup" | "warm_up" | "warm-up" => Ok(Self::Warmup),
            "cd" | "cooldown" | "cool_down" | "cool-down" => Ok(Self::Cooldown),
            "w" | "work" | "active" | "interval" | "main" => Ok(Self::Work),
            "r" | "rest" | "recover" | "recovery" => Ok(Self::Recover),
            _ => Err(AppError::invalid_format(format!("Unknown step code: {s}"))),
        }
    }
}

/// Atomic step with its duration in seconds
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepLeaf {
    /// Structural role
    pub kind: StepKind,
    /// Duration in seconds (always set once hydrated)
    pub duration_seconds: u32,
    /// Distance when the step was authored by distance (km)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    /// Target intensity
    pub zone: Zone,
}

/// Repeated group of steps
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RepeatBlock {
    /// Number of repetitions (at least one)
    pub repetitions: u32,
    /// Steps inside each repetition
    pub steps: Vec<Step>,
}

/// Workout step: a leaf or a repeat block
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    /// Single effort
    Leaf(StepLeaf),
    /// Repeated group
    Repeat(RepeatBlock),
}

impl Step {
    /// Time-defined leaf step
    #[must_use]
    pub const fn leaf(kind: StepKind, duration_seconds: u32, zone: Zone) -> Self {
        Self::Leaf(StepLeaf {
            kind,
            duration_seconds,
            distance_km: None,
            zone,
        })
    }

    /// Repeat block
    #[must_use]
    pub fn repeat(repetitions: u32, steps: Vec<Self>) -> Self {
        Self::Repeat(RepeatBlock {
            repetitions: repetitions.max(1),
            steps,
        })
    }

    /// Total duration including repetitions
    #[must_use]
    pub fn total_seconds(&self) -> u32 {
        match self {
            Self::Leaf(leaf) => leaf.duration_seconds,
            Self::Repeat(block) => block
                .repetitions
                .saturating_mul(total_step_seconds(&block.steps)),
        }
    }

    /// Visit every leaf with the number of times it is performed
    pub fn for_each_leaf<F>(&self, f: &mut F)
    where
        F: FnMut(&StepLeaf, u32),
    {
        self.visit(1, f);
    }

    fn visit<F>(&self, multiplier: u32, f: &mut F)
    where
        F: FnMut(&StepLeaf, u32),
    {
        match self {
            Self::Leaf(leaf) => f(leaf, multiplier),
            Self::Repeat(block) => {
                let inner = multiplier.saturating_mul(block.repetitions);
                for step in &block.steps {
                    step.visit(inner, f);
                }
            }
        }
    }

    /// Nesting depth of repeat blocks (0 for a leaf)
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf(_) => 0,
            Self::Repeat(block) => 1 + block.steps.iter().map(Self::depth).max().unwrap_or(0),
        }
    }
}

/// Total duration of a step list, saturating at `u32::MAX`
#[must_use]
pub fn total_step_seconds(steps: &[Step]) -> u32 {
    steps
        .iter()
        .fold(0_u32, |total, step| total.saturating_add(step.total_seconds()))
}

/// Workout category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    /// Weekly long session
    LongRun,
    /// Aerobic easy session
    Easy,
    /// Sustained threshold-bucket session
    Tempo,
    /// High-intensity repeats
    Intervals,
    /// Very easy short session
    Recovery,
    /// Gym / weight training
    Strength,
    /// No training
    Rest,
}

impl WorkoutType {
    /// Sessions that need a recovery buffer on the following day
    #[must_use]
    pub const fn is_heavy(&self) -> bool {
        matches!(self, Self::LongRun | Self::Tempo | Self::Intervals)
    }

    /// Quality sessions counted as key sessions
    #[must_use]
    pub const fn is_key(&self) -> bool {
        matches!(self, Self::Tempo | Self::Intervals)
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LongRun => "long_run",
            Self::Easy => "easy",
            Self::Tempo => "tempo",
            Self::Intervals => "intervals",
            Self::Recovery => "recovery",
            Self::Strength => "strength",
            Self::Rest => "rest",
        };
        write!(f, "{name}")
    }
}

/// Sized workout attached to a schedule slot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    /// Category
    pub kind: WorkoutType,
    /// Display name
    pub name: String,
    /// Target distance for running sessions (km)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_distance_km: Option<f64>,
    /// Target training load for cycling sessions (TSS)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_load: Option<f64>,
    /// Planned duration in seconds
    pub duration_seconds: u32,
    /// Structure
    pub steps: Vec<Step>,
    /// Total time filled in by the duration estimator (minutes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_minutes: Option<f64>,
}

impl Workout {
    /// Workout with steps; duration is derived from the steps
    #[must_use]
    pub fn new(kind: WorkoutType, name: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            kind,
            name: name.into(),
            target_distance_km: None,
            target_load: None,
            duration_seconds: total_step_seconds(&steps),
            steps,
            estimated_minutes: None,
        }
    }

    /// Set the running distance target
    #[must_use]
    pub fn with_distance(mut self, km: f64) -> Self {
        self.target_distance_km = Some(km);
        self
    }

    /// Set the cycling load target
    #[must_use]
    pub fn with_load(mut self, tss: f64) -> Self {
        self.target_load = Some(tss);
        self
    }

    /// Duration of the step structure
    #[must_use]
    pub fn step_seconds(&self) -> u32 {
        total_step_seconds(&self.steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intervals() -> Vec<Step> {
        vec![
            Step::leaf(StepKind::Warmup, 600, Zone::Z1),
            Step::repeat(
                4,
                vec![
                    Step::leaf(StepKind::Work, 180, Zone::Z5a),
                    Step::leaf(StepKind::Recover, 120, Zone::Z1),
                ],
            ),
            Step::leaf(StepKind::Cooldown, 300, Zone::Z1),
        ]
    }

    #[test]
    fn test_repeat_total_seconds() {
        assert_eq!(total_step_seconds(&intervals()), 600 + 4 * 300 + 300);
    }

    #[test]
    fn test_total_seconds_saturates() {
        let steps = vec![
            Step::leaf(StepKind::Work, u32::MAX, Zone::Z1),
            Step::leaf(StepKind::Work, 1, Zone::Z1),
        ];
        assert_eq!(total_step_seconds(&steps), u32::MAX);

        let nested = Step::repeat(
            3,
            vec![
                Step::leaf(StepKind::Work, u32::MAX - 10, Zone::Z4),
                Step::leaf(StepKind::Recover, 20, Zone::Z1),
            ],
        );
        assert_eq!(nested.total_seconds(), u32::MAX);
    }

    #[test]
    fn test_for_each_leaf_applies_repetitions() {
        let mut high = 0;
        for step in intervals() {
            step.for_each_leaf(&mut |leaf: &StepLeaf, times: u32| {
                if leaf.zone == Zone::Z5a {
                    high += leaf.duration_seconds * times;
                }
            });
        }
        assert_eq!(high, 720);
    }

    #[test]
    fn test_step_serializes_tagged() {
        let json = serde_json::to_value(Step::leaf(StepKind::Work, 60, Zone::Z3)).unwrap();
        assert_eq!(json["type"], "leaf");
        assert_eq!(json["kind"], "work");
        assert_eq!(json["zone"], "Z3");
    }

    #[test]
    fn test_heavy_and_key_types() {
        assert!(WorkoutType::LongRun.is_heavy());
        assert!(!WorkoutType::LongRun.is_key());
        assert!(WorkoutType::Intervals.is_key());
        assert!(!WorkoutType::Easy.is_heavy());
    }

    #[test]
    fn test_depth() {
        let steps = intervals();
        assert_eq!(steps[0].depth(), 0);
        assert_eq!(steps[1].depth(), 1);
    }

    #[test]
    fn test_step_kind_codes_parse() {
        assert_eq!("WU".parse::<StepKind>().unwrap(), StepKind::Warmup);
        assert_eq!("cooldown".parse::<StepKind>().unwrap(), StepKind::Cooldown);
        assert_eq!("W".parse::<StepKind>().unwrap(), StepKind::Work);
        assert_eq!("rest".parse::<StepKind>().unwrap(), StepKind::Recover);
        assert!("XX".parse::<StepKind>().is_err());
    }
}
