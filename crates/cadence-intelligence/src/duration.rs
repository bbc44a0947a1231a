// ABOUTME: Duration estimator sizing a structured run to a target distance
// ABOUTME: Counts the distance the fixed structure covers and fills any gap at aerobic pace
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Duration Estimator
//!
//! Warm-up and cool-down are credited at easy (Z1) pace. Main-set efforts use
//! their authored distance when they have one, otherwise their zone's pace.
//! A positive gap between the target and the covered distance is filled at
//! Z2 pace; a zero or negative gap adds nothing.

use cadence_core::models::{Step, StepKind, StepLeaf, Workout, Zone, ZoneSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EstimatorConfig;
use crate::templates::{StepLength, StepSpec, WorkoutStructure};
use crate::zones::ZonePaces;

/// Estimated total time for a run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct DurationEstimate {
    /// Total minutes including filler
    pub minutes: f64,
    /// Distance the fixed structure covers (km)
    pub covered_km: f64,
    /// Distance left to fill (km, never negative)
    pub gap_km: f64,
    /// Minutes added at Z2 to close the gap
    pub fill_minutes: f64,
}

/// Running tally of seconds and km
#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    seconds: f64,
    km: f64,
}

impl Tally {
    fn add(&mut self, seconds: f64, km: f64, times: u32) {
        self.seconds += seconds * f64::from(times);
        self.km += km * f64::from(times);
    }

    fn finish(self, target_km: f64, paces: &ZonePaces) -> DurationEstimate {
        let gap_km = if target_km.is_finite() {
            (target_km - self.km).max(0.0)
        } else {
            0.0
        };
        let fill_seconds = paces.seconds_for_km(Zone::Z2, gap_km);
        DurationEstimate {
            minutes: (self.seconds + fill_seconds) / 60.0,
            covered_km: self.km,
            gap_km,
            fill_minutes: fill_seconds / 60.0,
        }
    }
}

/// Seconds and km of one templated effort; `credit_zone` prices time-defined efforts
fn spec_tally(spec: &StepSpec, credit_zone: Zone, paces: &ZonePaces) -> (f64, f64) {
    match spec.length {
        StepLength::Seconds(seconds) => {
            let seconds = f64::from(seconds);
            (seconds, paces.km_for_seconds(credit_zone, seconds))
        }
        StepLength::Km(km) => (paces.seconds_for_km(spec.zone, km), km),
    }
}

/// Sizes runs to their distance targets
#[derive(Debug, Clone, Default)]
pub struct DurationEstimator {
    config: EstimatorConfig,
}

impl DurationEstimator {
    /// Create an estimator
    #[must_use]
    pub const fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    /// Representative paces for a zone set, falling back to the configured threshold
    #[must_use]
    pub fn paces_for(&self, zones: &ZoneSet) -> ZonePaces {
        ZonePaces::from_zone_set(zones, self.config.fallback_threshold_pace_sec_per_km)
    }

    /// Total time to cover `target_km` with a templated structure
    #[must_use]
    pub fn estimate_total_duration(
        &self,
        target_km: f64,
        structure: &WorkoutStructure,
        zones: &ZoneSet,
    ) -> DurationEstimate {
        Self::estimate_structure(target_km, structure, &self.paces_for(zones))
    }

    /// [`Self::estimate_total_duration`] with precomputed paces
    #[must_use]
    pub fn estimate_structure(
        target_km: f64,
        structure: &WorkoutStructure,
        paces: &ZonePaces,
    ) -> DurationEstimate {
        let mut tally = Tally::default();
        for spec in structure.warmup.iter().chain(structure.cooldown.iter()) {
            let (seconds, km) = spec_tally(spec, Zone::Z1, paces);
            tally.add(seconds, km, 1);
        }

        let main = &structure.main;
        let repetitions = main.repetitions.max(1);
        let (seconds, km) = spec_tally(&main.work, main.work.zone, paces);
        tally.add(seconds, km, repetitions);
        if let Some(rest) = &main.rest {
            let (seconds, km) = spec_tally(rest, rest.zone, paces);
            tally.add(seconds, km, repetitions);
        }

        tally.finish(target_km, paces)
    }

    /// Total time to cover `target_km` with a canonical step list
    #[must_use]
    pub fn estimate_steps(target_km: f64, steps: &[Step], paces: &ZonePaces) -> DurationEstimate {
        let mut tally = Tally::default();
        for step in steps {
            step.for_each_leaf(&mut |leaf: &StepLeaf, times: u32| {
                let seconds = f64::from(leaf.duration_seconds);
                let km = leaf.distance_km.unwrap_or_else(|| {
                    let credit = match leaf.kind {
                        StepKind::Warmup | StepKind::Cooldown => Zone::Z1,
                        StepKind::Work | StepKind::Recover => leaf.zone,
                    };
                    paces.km_for_seconds(credit, seconds)
                });
                tally.add(seconds, km, times);
            });
        }
        tally.finish(target_km, paces)
    }

    /// Estimated minutes for a scheduled workout
    ///
    /// Workouts without a distance target take their step time. With
    /// `cap_to_availability` the result never exceeds `available_seconds`.
    #[must_use]
    pub fn estimate_workout(
        &self,
        workout: &Workout,
        paces: &ZonePaces,
        available_seconds: u32,
    ) -> f64 {
        let minutes = workout.target_distance_km.map_or_else(
            || f64::from(workout.step_seconds()) / 60.0,
            |km| Self::estimate_steps(km, &workout.steps, paces).minutes,
        );
        let cap = f64::from(available_seconds) / 60.0;
        if self.config.cap_to_availability && minutes > cap {
            debug!(
                workout = %workout.name,
                minutes,
                cap,
                "Estimated duration capped at availability"
            );
            return cap;
        }
        minutes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::MainSet;
    use crate::zones::ZoneCalculator;

    fn paces() -> ZonePaces {
        ZonePaces::from_threshold(300.0)
    }

    fn intervals() -> WorkoutStructure {
        WorkoutStructure {
            warmup: Some(StepSpec::seconds(600, Zone::Z1)),
            main: MainSet::intervals(
                4,
                StepSpec::seconds(180, Zone::Z5a),
                StepSpec::seconds(120, Zone::Z1),
            ),
            cooldown: Some(StepSpec::seconds(600, Zone::Z1)),
        }
    }

    #[test]
    fn test_fixed_structure_exceeds_short_target() {
        let estimate = DurationEstimator::estimate_structure(1.0, &intervals(), &paces());
        assert!(estimate.covered_km > 1.0);
        assert!(estimate.gap_km.abs() < f64::EPSILON);
        assert!(estimate.fill_minutes.abs() < f64::EPSILON);
        // 10 + 4 × 5 + 10 minutes
        assert!((estimate.minutes - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_gap_filled_at_aerobic_pace() {
        let p = paces();
        let estimate = DurationEstimator::estimate_structure(12.0, &intervals(), &p);
        assert!(estimate.gap_km > 0.0);
        let expected_fill = estimate.gap_km * p.pace(Zone::Z2) / 60.0;
        assert!((estimate.fill_minutes - expected_fill).abs() < 1e-9);
        assert!((estimate.minutes - 40.0 - expected_fill).abs() < 1e-9);
    }

    #[test]
    fn test_distance_defined_work() {
        let p = paces();
        let structure = WorkoutStructure::main_only(MainSet::intervals(
            5,
            StepSpec::km(1.0, Zone::Z4),
            StepSpec::seconds(90, Zone::Z1),
        ));
        let estimate = DurationEstimator::estimate_structure(0.0, &structure, &p);
        let rest_km = 5.0 * 90.0 / p.pace(Zone::Z1);
        assert!((estimate.covered_km - (5.0 + rest_km)).abs() < 1e-9);
    }

    #[test]
    fn test_unavailable_zones_use_fallback() {
        let estimator = DurationEstimator::default();
        let from_unavailable =
            estimator.estimate_total_duration(10.0, &intervals(), &ZoneSet::unavailable());
        let from_threshold = estimator.estimate_total_duration(
            10.0,
            &intervals(),
            &ZoneCalculator::pace_zones(300.0),
        );
        assert!((from_unavailable.minutes - from_threshold.minutes).abs() < 1e-9);
    }

    #[test]
    fn test_workout_capped_to_availability() {
        let p = paces();
        let workout = Workout::new(
            cadence_core::models::WorkoutType::Easy,
            "Easy run",
            vec![Step::leaf(StepKind::Work, 1800, Zone::Z2)],
        )
        .with_distance(15.0);
        let minutes = DurationEstimator::default().estimate_workout(&workout, &p, 3600);
        assert!((minutes - 60.0).abs() < 1e-9);

        let uncapped = DurationEstimator::new(EstimatorConfig {
            cap_to_availability: false,
            ..EstimatorConfig::default()
        })
        .estimate_workout(&workout, &p, 3600);
        assert!(uncapped > 60.0);
    }
}
