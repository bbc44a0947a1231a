// ABOUTME: Workout template registry keyed by workout type: warm-up, main set, cool-down primitives
// ABOUTME: Structures convert to canonical steps and can be fitted to a day's time budget
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout Templates
//!
//! The library only carries duration and intensity primitives. Names and
//! coaching text belong to whoever supplies the registry; the engine selects a
//! structure by workout type and sizes it.

use std::collections::BTreeMap;

use cadence_core::constants::scheduling::{
    QUALITY_COOLDOWN_SECONDS, QUALITY_WARMUP_SECONDS, STRENGTH_SESSION_SECONDS,
};
use cadence_core::errors::AppResult;
use cadence_core::models::{Step, StepKind, StepLeaf, WorkoutType, Zone};
use serde::{Deserialize, Serialize};

use crate::zones::ZonePaces;

/// How long a step lasts
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum StepLength {
    /// Fixed duration
    Seconds(u32),
    /// Fixed distance
    Km(f64),
}

/// One templated effort
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct StepSpec {
    /// Duration or distance
    pub length: StepLength,
    /// Target intensity
    pub zone: Zone,
}

impl StepSpec {
    /// Time-defined effort
    #[must_use]
    pub const fn seconds(seconds: u32, zone: Zone) -> Self {
        Self {
            length: StepLength::Seconds(seconds),
            zone,
        }
    }

    /// Distance-defined effort
    #[must_use]
    pub const fn km(km: f64, zone: Zone) -> Self {
        Self {
            length: StepLength::Km(km),
            zone,
        }
    }

    /// Duration at the zone's pace
    #[must_use]
    pub fn duration_seconds(&self, paces: &ZonePaces) -> u32 {
        match self.length {
            StepLength::Seconds(seconds) => seconds,
            StepLength::Km(km) => paces.seconds_for_km(self.zone, km).round().max(0.0) as u32,
        }
    }

    /// Canonical leaf step
    #[must_use]
    pub fn to_step(&self, kind: StepKind, paces: &ZonePaces) -> Step {
        Step::Leaf(StepLeaf {
            kind,
            duration_seconds: self.duration_seconds(paces),
            distance_km: match self.length {
                StepLength::Seconds(_) => None,
                StepLength::Km(km) => Some(km),
            },
            zone: self.zone,
        })
    }
}

const fn one() -> u32 {
    1
}

/// Main set: `repetitions × (work + rest)`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MainSet {
    /// Repetitions of work and rest
    #[serde(default = "one", alias = "reps")]
    pub repetitions: u32,
    /// Work effort
    pub work: StepSpec,
    /// Recovery between efforts
    #[serde(default)]
    pub rest: Option<StepSpec>,
}

impl MainSet {
    /// Single continuous effort
    #[must_use]
    pub const fn steady(work: StepSpec) -> Self {
        Self {
            repetitions: 1,
            work,
            rest: None,
        }
    }

    /// Repeated intervals
    #[must_use]
    pub const fn intervals(repetitions: u32, work: StepSpec, rest: StepSpec) -> Self {
        Self {
            repetitions,
            work,
            rest: Some(rest),
        }
    }

    /// Whether the set repeats
    #[must_use]
    pub const fn is_repeated(&self) -> bool {
        self.repetitions > 1 || self.rest.is_some()
    }
}

/// Warm-up, main set, cool-down
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WorkoutStructure {
    /// Optional warm-up
    #[serde(default)]
    pub warmup: Option<StepSpec>,
    /// Main set
    pub main: MainSet,
    /// Optional cool-down
    #[serde(default)]
    pub cooldown: Option<StepSpec>,
}

impl WorkoutStructure {
    /// Structure without warm-up or cool-down
    #[must_use]
    pub const fn main_only(main: MainSet) -> Self {
        Self {
            warmup: None,
            main,
            cooldown: None,
        }
    }

    /// Seconds spent in warm-up and cool-down
    #[must_use]
    pub fn fixed_seconds(&self, paces: &ZonePaces) -> u32 {
        self.warmup.map_or(0, |s| s.duration_seconds(paces))
            + self.cooldown.map_or(0, |s| s.duration_seconds(paces))
    }

    /// Canonical step list
    #[must_use]
    pub fn to_steps(&self, paces: &ZonePaces) -> Vec<Step> {
        let mut steps = Vec::with_capacity(3);
        if let Some(warmup) = self.warmup {
            steps.push(warmup.to_step(StepKind::Warmup, paces));
        }
        steps.push(Self::main_steps(&self.main, paces));
        if let Some(cooldown) = self.cooldown {
            steps.push(cooldown.to_step(StepKind::Cooldown, paces));
        }
        steps
    }

    fn main_steps(main: &MainSet, paces: &ZonePaces) -> Step {
        let work = main.work.to_step(StepKind::Work, paces);
        if !main.is_repeated() {
            return work;
        }
        let mut block = vec![work];
        if let Some(rest) = main.rest {
            block.push(rest.to_step(StepKind::Recover, paces));
        }
        Step::repeat(main.repetitions, block)
    }

    /// Size the structure to a time budget
    ///
    /// Warm-up and cool-down stay fixed. A steady main set stretches or shrinks
    /// to the remaining time; a repeated set keeps its interval lengths and
    /// changes the repetition count (never more than twice the template's).
    /// Returns `None` when less than `min_main_seconds` remains for the main set.
    #[must_use]
    pub fn fit_to_seconds(
        &self,
        budget_seconds: u32,
        min_main_seconds: u32,
        paces: &ZonePaces,
    ) -> Option<Vec<Step>> {
        let main_budget = budget_seconds.checked_sub(self.fixed_seconds(paces))?;
        if main_budget < min_main_seconds.max(1) {
            return None;
        }

        let main = if self.main.is_repeated() {
            let work = self.main.work.duration_seconds(paces);
            let rest = self.main.rest.map_or(0, |r| r.duration_seconds(paces));
            let cycle = work + rest;
            if cycle == 0 {
                return None;
            }
            let repetitions = (main_budget / cycle).min(self.main.repetitions.saturating_mul(2));
            if repetitions == 0 {
                MainSet::steady(StepSpec::seconds(main_budget.min(work), self.main.work.zone))
            } else {
                MainSet {
                    repetitions,
                    work: StepSpec::seconds(work, self.main.work.zone),
                    rest: self
                        .main
                        .rest
                        .map(|r| StepSpec::seconds(rest, r.zone)),
                }
            }
        } else {
            MainSet::steady(StepSpec::seconds(main_budget, self.main.work.zone))
        };

        Some(
            Self {
                warmup: self.warmup,
                main,
                cooldown: self.cooldown,
            }
            .to_steps(paces),
        )
    }
}

/// Registry of workout structures keyed by workout type
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct TemplateLibrary {
    templates: BTreeMap<WorkoutType, WorkoutStructure>,
}

impl TemplateLibrary {
    /// Empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Duration and intensity primitives for every schedulable workout type
    #[must_use]
    pub fn standard() -> Self {
        let warmup = Some(StepSpec::seconds(QUALITY_WARMUP_SECONDS, Zone::Z1));
        let cooldown = Some(StepSpec::seconds(QUALITY_COOLDOWN_SECONDS, Zone::Z1));

        Self::new()
            .with(
                WorkoutType::Tempo,
                WorkoutStructure {
                    warmup,
                    main: MainSet::steady(StepSpec::seconds(1200, Zone::Z3)),
                    cooldown,
                },
            )
            .with(
                WorkoutType::Intervals,
                WorkoutStructure {
                    warmup,
                    main: MainSet::intervals(
                        5,
                        StepSpec::seconds(180, Zone::Z5a),
                        StepSpec::seconds(120, Zone::Z1),
                    ),
                    cooldown,
                },
            )
            .with(
                WorkoutType::Easy,
                WorkoutStructure::main_only(MainSet::steady(StepSpec::seconds(2400, Zone::Z2))),
            )
            .with(
                WorkoutType::Recovery,
                WorkoutStructure::main_only(MainSet::steady(StepSpec::seconds(1800, Zone::Z1))),
            )
            .with(
                WorkoutType::LongRun,
                WorkoutStructure::main_only(MainSet::steady(StepSpec::seconds(5400, Zone::Z2))),
            )
            .with(
                WorkoutType::Strength,
                WorkoutStructure::main_only(MainSet::steady(StepSpec::seconds(
                    STRENGTH_SESSION_SECONDS,
                    Zone::Z1,
                ))),
            )
    }

    /// Parse a registry supplied as JSON (`{"tempo": {...}, ...}`)
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a registry
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add or replace a structure
    #[must_use]
    pub fn with(mut self, kind: WorkoutType, structure: WorkoutStructure) -> Self {
        self.insert(kind, structure);
        self
    }

    /// Add or replace a structure
    pub fn insert(&mut self, kind: WorkoutType, structure: WorkoutStructure) {
        self.templates.insert(kind, structure);
    }

    /// Structure registered for a type
    #[must_use]
    pub fn get(&self, kind: WorkoutType) -> Option<&WorkoutStructure> {
        self.templates.get(&kind)
    }

    /// Registered structure, or the standard one when the registry lacks it
    #[must_use]
    pub fn resolve(&self, kind: WorkoutType) -> Option<WorkoutStructure> {
        self.get(kind)
            .copied()
            .or_else(|| Self::standard().get(kind).copied())
    }

    /// Number of registered types
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether no types are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::models::total_step_seconds;

    fn paces() -> ZonePaces {
        ZonePaces::from_threshold(300.0)
    }

    #[test]
    fn test_tempo_fits_budget() {
        let tempo = TemplateLibrary::standard().resolve(WorkoutType::Tempo).unwrap();
        let steps = tempo.fit_to_seconds(1800, 300, &paces()).unwrap();
        assert_eq!(total_step_seconds(&steps), 1800);
        assert_eq!(steps.len(), 3);
        match &steps[1] {
            Step::Leaf(leaf) => {
                assert_eq!(leaf.duration_seconds, 900);
                assert_eq!(leaf.zone, Zone::Z3);
            }
            Step::Repeat(_) => panic!("tempo main set is steady"),
        }
    }

    #[test]
    fn test_budget_too_small() {
        let tempo = TemplateLibrary::standard().resolve(WorkoutType::Tempo).unwrap();
        assert!(tempo.fit_to_seconds(1000, 300, &paces()).is_none());
        assert!(tempo.fit_to_seconds(600, 300, &paces()).is_none());
    }

    #[test]
    fn test_intervals_change_repetitions() {
        let intervals = TemplateLibrary::standard()
            .resolve(WorkoutType::Intervals)
            .unwrap();
        let steps = intervals.fit_to_seconds(2400, 300, &paces()).unwrap();
        // 1500 s left for 300 s cycles
        match &steps[1] {
            Step::Repeat(block) => assert_eq!(block.repetitions, 5),
            Step::Leaf(_) => panic!("intervals repeat"),
        }
        let long = intervals.fit_to_seconds(10_000, 300, &paces()).unwrap();
        match &long[1] {
            Step::Repeat(block) => assert_eq!(block.repetitions, 10),
            Step::Leaf(_) => panic!("intervals repeat"),
        }
    }

    #[test]
    fn test_distance_specs_keep_distance() {
        let structure = WorkoutStructure::main_only(MainSet::intervals(
            6,
            StepSpec::km(1.0, Zone::Z4),
            StepSpec::seconds(90, Zone::Z1),
        ));
        let steps = structure.to_steps(&paces());
        let Step::Repeat(block) = &steps[0] else {
            panic!("expected repeat");
        };
        let Step::Leaf(work) = &block.steps[0] else {
            panic!("expected leaf");
        };
        assert_eq!(work.distance_km, Some(1.0));
        assert!(work.duration_seconds > 0);
    }

    #[test]
    fn test_registry_from_json() {
        let json = r#"{
            "tempo": {
                "warmup": {"length": {"seconds": 900}, "zone": "Z1"},
                "main": {"reps": 2, "work": {"length": {"km": 3.0}, "zone": "Z4"},
                         "rest": {"length": {"seconds": 120}, "zone": "Z1"}}
            }
        }"#;
        let library = TemplateLibrary::from_json(json).unwrap();
        assert_eq!(library.len(), 1);
        let tempo = library.get(WorkoutType::Tempo).unwrap();
        assert_eq!(tempo.main.repetitions, 2);
        assert!(tempo.cooldown.is_none());
        // Missing types come from the standard library
        assert!(library.resolve(WorkoutType::Intervals).is_some());
    }
}
