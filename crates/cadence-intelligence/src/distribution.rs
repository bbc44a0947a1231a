// ABOUTME: Intensity distribution validator comparing realized zone time against a volume-based model
// ABOUTME: Upgrades an eligible easy day to tempo or intervals when a bucket falls short of its target
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Intensity Distribution Validator
//!
//! The week's model comes from its volume: pyramidal for low volume, hybrid
//! for mid volume, polarized for high volume. Realized time is bucketed by
//! Friel zone (Z1/Z2 low, Z3/Z4 threshold, Z5a-c high); strength work is left
//! out of the denominator.
//!
//! Correction is a soft optimization. An easy day qualifies for an upgrade
//! when neither neighbour is a heavy day, so a tempo and an intervals upgrade
//! from the same call never land next to each other. When no easy day
//! qualifies the week is returned unchanged.

use std::cmp::Reverse;

use cadence_core::constants::cycling::TSS_PER_HOUR_Z2;
use cadence_core::models::{
    DistributionModel, DistributionTarget, IntensityBucket, IntensityDistribution, ScheduleSlot,
    Sport, StepLeaf, WeekDescriptor, WeekSchedule, Workout, WorkoutType,
};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DistributionConfig;
use crate::load::steps_volume;
use crate::templates::TemplateLibrary;
use crate::zones::ZonePaces;

/// Upgrade tie-break: mid-week first
const UPGRADE_DAY_ORDER: [usize; 7] = [2, 3, 1, 4, 0, 5, 6];

/// Volume facts the model is chosen from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DistributionProfile {
    /// Weekly km for running, weekly hours for cycling
    pub volume: f64,
    /// Sport
    pub sport: Sport,
}

impl DistributionProfile {
    /// Running profile from weekly km
    #[must_use]
    pub const fn running(weekly_km: f64) -> Self {
        Self {
            volume: weekly_km,
            sport: Sport::Running,
        }
    }

    /// Cycling profile from weekly hours
    #[must_use]
    pub const fn cycling(weekly_hours: f64) -> Self {
        Self {
            volume: weekly_hours,
            sport: Sport::Cycling,
        }
    }

    /// Profile for a macrocycle week (cycling TSS converted at endurance intensity)
    #[must_use]
    pub fn for_week(week: &WeekDescriptor) -> Self {
        match week.sport {
            Sport::Running => Self::running(week.target_volume),
            Sport::Cycling => Self::cycling(week.target_volume / TSS_PER_HOUR_Z2),
        }
    }
}

/// One easy day converted to a quality session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DistributionUpgrade {
    /// Day index, 0 = Monday
    pub day_index: usize,
    /// Day of week
    pub weekday: Weekday,
    /// Workout type before
    pub from: WorkoutType,
    /// Workout type after
    pub to: WorkoutType,
}

/// What the validator saw and changed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DistributionReport {
    /// Model chosen from the week's volume
    pub model: DistributionModel,
    /// Target percentages
    pub target: DistributionTarget,
    /// Realized distribution of the input schedule
    pub before: IntensityDistribution,
    /// Realized distribution after corrections
    pub after: IntensityDistribution,
    /// Days that were upgraded
    pub upgrades: Vec<DistributionUpgrade>,
}

/// Realized time per bucket over every non-strength primary workout
#[must_use]
pub fn compute_distribution(schedule: &WeekSchedule) -> IntensityDistribution {
    let mut distribution = IntensityDistribution::default();
    for workout in schedule.slots.iter().filter_map(|s| s.primary.as_ref()) {
        if workout.kind == WorkoutType::Strength {
            continue;
        }
        for step in &workout.steps {
            step.for_each_leaf(&mut |leaf: &StepLeaf, times: u32| {
                distribution.add_seconds(
                    leaf.zone.bucket(),
                    f64::from(leaf.duration_seconds) * f64::from(times),
                );
            });
        }
    }
    distribution
}

/// Checks and corrects a week's intensity distribution
#[derive(Debug, Clone, Default)]
pub struct DistributionValidator {
    config: DistributionConfig,
    library: TemplateLibrary,
}

impl DistributionValidator {
    /// Create a validator
    #[must_use]
    pub const fn new(config: DistributionConfig, library: TemplateLibrary) -> Self {
        Self { config, library }
    }

    /// Distribution model for a profile
    #[must_use]
    pub fn classify(&self, profile: &DistributionProfile) -> DistributionModel {
        let (low, mid) = match profile.sport {
            Sport::Running => (
                self.config.running_low_volume_km,
                self.config.running_mid_volume_km,
            ),
            Sport::Cycling => (
                self.config.cycling_low_volume_hours,
                self.config.cycling_mid_volume_hours,
            ),
        };
        if profile.volume < low {
            DistributionModel::Pyramidal
        } else if profile.volume < mid {
            DistributionModel::Hybrid
        } else {
            DistributionModel::Polarized
        }
    }

    /// Validate the week and return a corrected copy with a report
    ///
    /// The threshold bucket is checked first; the high bucket is checked
    /// against the distribution that results, so both upgrades can happen in
    /// one call. The input schedule is never modified.
    #[must_use]
    pub fn validate_and_fix(
        &self,
        schedule: &WeekSchedule,
        profile: &DistributionProfile,
        paces: &ZonePaces,
    ) -> (WeekSchedule, DistributionReport) {
        let model = self.classify(profile);
        let target = model.target();
        let before = compute_distribution(schedule);

        let mut fixed = schedule.clone();
        let mut upgrades = Vec::new();

        for (bucket, kind) in [
            (IntensityBucket::Threshold, WorkoutType::Tempo),
            (IntensityBucket::High, WorkoutType::Intervals),
        ] {
            let current = compute_distribution(&fixed);
            let deficit = target.pct(bucket) - current.pct(bucket);
            if deficit <= self.config.deficit_tolerance_pct {
                continue;
            }
            match self.upgrade(&mut fixed, kind, paces) {
                Some(upgrade) => upgrades.push(upgrade),
                None => debug!(
                    %model,
                    ?bucket,
                    deficit,
                    "No eligible easy day, distribution left unchanged"
                ),
            }
        }

        let after = compute_distribution(&fixed);
        (
            fixed,
            DistributionReport {
                model,
                target,
                before,
                after,
                upgrades,
            },
        )
    }

    /// Seconds an upgraded session may use on a slot
    fn budget(slot: &ScheduleSlot) -> u32 {
        let strength = slot.secondary.as_ref().map_or(0, |w| w.duration_seconds);
        slot.available_seconds().saturating_sub(strength)
    }

    fn is_candidate(schedule: &WeekSchedule, day: usize, minimum: u32) -> bool {
        let slots = &schedule.slots;
        let Some(slot) = slots.get(day) else {
            return false;
        };
        let heavy = |d: Option<usize>| {
            d.and_then(|d| slots.get(d))
                .is_some_and(|s| s.workout_type().is_heavy())
        };
        slot.workout_type() == WorkoutType::Easy
            && schedule.long_session_day != Some(day)
            && schedule.long_session_day != Some(day + 1)
            && !heavy(day.checked_sub(1))
            && !heavy(Some(day + 1))
            && Self::budget(slot) >= minimum
    }

    fn upgrade(
        &self,
        schedule: &mut WeekSchedule,
        kind: WorkoutType,
        paces: &ZonePaces,
    ) -> Option<DistributionUpgrade> {
        let structure = self.library.resolve(kind)?;
        let minimum = structure.fixed_seconds(paces) + self.config.min_main_set_seconds;

        let day = (0..schedule.slots.len())
            .filter(|d| Self::is_candidate(schedule, *d, minimum))
            .min_by_key(|d| {
                let order = UPGRADE_DAY_ORDER
                    .iter()
                    .position(|o| o == d)
                    .unwrap_or(UPGRADE_DAY_ORDER.len());
                (Reverse(Self::budget(&schedule.slots[*d])), order)
            })?;

        let slot = schedule.slots.get_mut(day)?;
        let steps =
            structure.fit_to_seconds(Self::budget(slot), self.config.min_main_set_seconds, paces)?;
        let volume = steps_volume(schedule.sport, &steps, paces);
        let name = match kind {
            WorkoutType::Intervals => "Intervals",
            _ => "Tempo",
        };
        let workout = Workout::new(kind, name, steps);
        let workout = match schedule.sport {
            Sport::Running => workout.with_distance((volume * 10.0).round() / 10.0),
            Sport::Cycling => workout.with_load((volume * 10.0).round() / 10.0),
        };

        let from = slot.workout_type();
        slot.primary = Some(workout);
        Some(DistributionUpgrade {
            day_index: day,
            weekday: slot.weekday,
            from,
            to: kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::models::{DayAvailability, Phase, Step, StepKind, Zone};

    fn easy(minutes: u32) -> Workout {
        Workout::new(
            WorkoutType::Easy,
            "Easy run",
            vec![Step::leaf(StepKind::Work, minutes * 60, Zone::Z1)],
        )
    }

    fn week(days: &[(usize, f64, Option<Workout>)]) -> WeekSchedule {
        let slots = (0..7)
            .map(|day| {
                let (hours, primary) = days
                    .iter()
                    .find(|(d, _, _)| *d == day)
                    .map_or((0.0, None), |(_, h, w)| (*h, w.clone()));
                ScheduleSlot {
                    day_index: day,
                    weekday: cadence_core::models::weekday_for_index(day),
                    date: None,
                    availability: DayAvailability::Hours(hours),
                    primary,
                    secondary: None,
                }
            })
            .collect();
        WeekSchedule {
            sport: Sport::Running,
            phase: Phase::Base,
            slots,
            long_session_day: None,
            warnings: Vec::new(),
        }
    }

    fn paces() -> ZonePaces {
        ZonePaces::from_threshold(300.0)
    }

    #[test]
    fn test_classification_bands() {
        let validator = DistributionValidator::default();
        assert_eq!(
            validator.classify(&DistributionProfile::running(40.0)),
            DistributionModel::Pyramidal
        );
        assert_eq!(
            validator.classify(&DistributionProfile::running(50.0)),
            DistributionModel::Hybrid
        );
        assert_eq!(
            validator.classify(&DistributionProfile::running(80.0)),
            DistributionModel::Polarized
        );
        assert_eq!(
            validator.classify(&DistributionProfile::cycling(10.0)),
            DistributionModel::Hybrid
        );
    }

    #[test]
    fn test_three_easy_runs_get_a_tempo() {
        let schedule = week(&[
            (1, 0.5, Some(easy(30))),
            (3, 0.5, Some(easy(30))),
            (5, 0.5, Some(easy(30))),
        ]);
        let (fixed, report) = DistributionValidator::default().validate_and_fix(
            &schedule,
            &DistributionProfile::running(15.0),
            &paces(),
        );
        assert_eq!(report.model, DistributionModel::Pyramidal);
        assert!(report.before.threshold_pct().abs() < 1e-9);
        assert!(report.after.threshold_pct() > 0.0);
        assert_eq!(report.upgrades.len(), 1);
        assert_eq!(report.upgrades[0].weekday, Weekday::Thu);
        assert_eq!(fixed.slots[3].workout_type(), WorkoutType::Tempo);
        assert!(fixed.slots[3].primary_seconds() <= 1800);
        // Input untouched
        assert_eq!(schedule.slots[3].workout_type(), WorkoutType::Easy);
    }

    #[test]
    fn test_no_candidate_is_a_no_op() {
        let mut schedule = week(&[(1, 0.5, Some(easy(30))), (2, 0.25, Some(easy(15)))]);
        // Tuesday follows a long run on Monday; Wednesday is too short for a tempo
        schedule.slots[0].availability = DayAvailability::Hours(2.0);
        schedule.slots[0].primary = Some(Workout::new(
            WorkoutType::LongRun,
            "Long run",
            vec![Step::leaf(StepKind::Work, 5400, Zone::Z2)],
        ));
        schedule.long_session_day = Some(0);
        let (fixed, report) = DistributionValidator::default().validate_and_fix(
            &schedule,
            &DistributionProfile::running(20.0),
            &paces(),
        );
        assert!(report.upgrades.is_empty());
        assert_eq!(fixed, schedule);
    }

    #[test]
    fn test_polarized_week_gets_intervals() {
        let schedule = week(&[
            (0, 1.0, Some(easy(60))),
            (2, 1.0, Some(easy(60))),
            (4, 1.0, Some(easy(60))),
        ]);
        let (_, report) = DistributionValidator::default().validate_and_fix(
            &schedule,
            &DistributionProfile::running(100.0),
            &paces(),
        );
        // Polarized wants 15 % high; threshold target of 5 % is within tolerance
        assert_eq!(report.model, DistributionModel::Polarized);
        assert_eq!(report.upgrades.len(), 1);
        assert_eq!(report.upgrades[0].to, WorkoutType::Intervals);
        assert!(report.after.high_pct() > 0.0);
    }

    #[test]
    fn test_tempo_and_intervals_in_one_pass_stay_apart() {
        let days: Vec<(usize, f64, Option<Workout>)> =
            (0..7).map(|d| (d, 1.0, Some(easy(60)))).collect();
        let schedule = week(&days);
        let config = DistributionConfig {
            deficit_tolerance_pct: 5.0,
            ..DistributionConfig::default()
        };
        let validator = DistributionValidator::new(config, TemplateLibrary::standard());
        let (fixed, report) =
            validator.validate_and_fix(&schedule, &DistributionProfile::running(30.0), &paces());

        // Pyramidal: 40 % threshold and 10 % high both short of target
        assert_eq!(report.model, DistributionModel::Pyramidal);
        assert_eq!(report.upgrades.len(), 2);
        let tempo = &report.upgrades[0];
        let intervals = &report.upgrades[1];
        assert_eq!(tempo.to, WorkoutType::Tempo);
        assert_eq!(intervals.to, WorkoutType::Intervals);
        assert_eq!(tempo.day_index, 2);
        assert!(intervals.day_index.abs_diff(tempo.day_index) > 1);
        assert_eq!(fixed.slots[tempo.day_index].workout_type(), WorkoutType::Tempo);
        assert_eq!(
            fixed.slots[intervals.day_index].workout_type(),
            WorkoutType::Intervals
        );
        assert!(report.after.threshold_pct() > 0.0);
        assert!(report.after.high_pct() > 0.0);
    }

    #[test]
    fn test_strength_excluded_from_distribution() {
        let mut schedule = week(&[(1, 1.0, Some(easy(30)))]);
        schedule.slots[2].primary = Some(Workout::new(
            WorkoutType::Strength,
            "Strength",
            vec![Step::leaf(StepKind::Work, 2700, Zone::Z1)],
        ));
        let distribution = compute_distribution(&schedule);
        assert!((distribution.total_minutes() - 30.0).abs() < 1e-9);
    }
}
