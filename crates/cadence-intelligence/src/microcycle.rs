// ABOUTME: Microcycle scheduler placing one week's volume across available days
// ABOUTME: Long session, key sessions with a 24-hour buffer, strength sessions, and proportional easy volume
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Microcycle Scheduler
//!
//! Turns one week descriptor into seven schedule slots. Placement order:
//!
//! 1. Long session on the preferred day, or the day with the most hours
//! 2. Key (quality) sessions, mid-week first, kept off the days next to the
//!    long session and to each other
//! 3. Strength sessions, evening slots first, kept off the days next to the long
//!    session
//! 4. Remaining volume spread over the other days in proportion to their hours
//!
//! The 24-hour buffers hold whenever some day allows them. When none does, a key
//! or strength session goes on the best open day next to a hard day and the week
//! carries [`ScheduleWarning::RecoveryBufferRelaxed`]; it is dropped only when no
//! open day has room at all.
//!
//! Unsatisfiable constraints never fail the week: they come back as
//! [`ScheduleWarning`]s next to a schedule that respects every day's hours.
//! Running sessions are sized with the caller's [`ZonePaces`], so the scheduler
//! agrees with the distribution validator and duration estimator on every pace.

use std::array;
use std::cmp::Reverse;

use cadence_core::models::{
    weekday_for_index, Phase, ScheduleSlot, ScheduleWarning, Sport, Step, StepKind,
    WeekAvailability, WeekDescriptor, WeekSchedule, Workout, WorkoutType, Zone,
};
use chrono::{Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SchedulerConfig;
use crate::load::{seconds_for_volume, steps_volume, volume_for_seconds};
use crate::templates::TemplateLibrary;
use crate::zones::ZonePaces;

/// Long-session tie-break: closest to the weekend first
const LONG_DAY_ORDER: [usize; 7] = [6, 5, 4, 0, 3, 1, 2];

/// Intensity tie-break: mid-week first
const QUALITY_DAY_ORDER: [usize; 7] = [2, 3, 1, 4, 0, 5, 6];

fn rank(order: &[usize; 7], day: usize) -> usize {
    order.iter().position(|d| *d == day).unwrap_or(order.len())
}

const fn adjacent(a: usize, b: usize) -> bool {
    a.abs_diff(b) == 1
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// One week's load to place
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeekInput {
    /// Sport
    pub sport: Sport,
    /// Training phase
    pub phase: Phase,
    /// Weekly volume (km or TSS)
    #[serde(alias = "targetVolume")]
    pub target_volume: f64,
    /// Long session (km or hours)
    #[serde(alias = "longSessionDistance")]
    pub long_session: f64,
    /// Recovery week
    #[serde(default, alias = "isRecoveryWeek")]
    pub is_recovery_week: bool,
    /// Race week; the long session is the race
    #[serde(default, alias = "isRaceWeek")]
    pub is_race_week: bool,
    /// Long-session dominant week: at most one key session
    #[serde(default, alias = "longRunDominantWeek")]
    pub long_run_dominant: bool,
    /// Strength sessions wanted
    #[serde(default, alias = "gymSessionsTarget")]
    pub gym_sessions_target: u32,
    /// Monday of the week, when known
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

impl WeekInput {
    /// Input for a macrocycle week
    #[must_use]
    pub const fn from_descriptor(week: &WeekDescriptor, gym_sessions_target: u32) -> Self {
        Self {
            sport: week.sport,
            phase: week.phase,
            target_volume: week.target_volume,
            long_session: week.long_session,
            is_recovery_week: week.is_recovery_week,
            is_race_week: week.is_race_week,
            long_run_dominant: week.long_run_dominant,
            gym_sessions_target,
            start_date: Some(week.start_date),
        }
    }

    /// Key sessions wanted this week, in placement order
    #[must_use]
    pub fn key_sessions(&self) -> Vec<WorkoutType> {
        if self.is_recovery_week || self.is_race_week {
            return Vec::new();
        }
        let mut kinds = match self.phase {
            Phase::Base => vec![WorkoutType::Tempo],
            Phase::Build => vec![WorkoutType::Tempo, WorkoutType::Intervals],
            Phase::Peak => vec![WorkoutType::Intervals, WorkoutType::Tempo],
            Phase::Taper => vec![WorkoutType::Intervals],
            Phase::Race => Vec::new(),
        };
        if self.long_run_dominant {
            kinds.truncate(1);
        }
        kinds
    }

    /// Strength sessions allowed this week
    #[must_use]
    pub fn strength_sessions(&self) -> u32 {
        if self.is_race_week {
            0
        } else if self.is_recovery_week {
            self.gym_sessions_target.min(1)
        } else {
            self.gym_sessions_target
        }
    }
}

/// Athlete-level scheduling options
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ScheduleOptions {
    /// Preferred long-session day
    #[serde(default, alias = "preferredLongSessionDay")]
    pub preferred_long_session_day: Option<Weekday>,
    /// Strength sessions per week
    #[serde(default, alias = "gymSessionsTarget")]
    pub gym_sessions_target: u32,
}

/// Places one week of training on the calendar
#[derive(Debug, Clone, Default)]
pub struct MicrocycleScheduler {
    config: SchedulerConfig,
    library: TemplateLibrary,
}

/// Mutable day-by-day state while a week is being built
struct WeekDraft<'a> {
    sport: Sport,
    paces: &'a ZonePaces,
    seconds: [u32; 7],
    evening: [f64; 7],
    reserved: [u32; 7],
    primary: [Option<Workout>; 7],
    secondary: [Option<Workout>; 7],
}

impl WeekDraft<'_> {
    fn is_open(&self, day: usize) -> bool {
        self.seconds[day] > 0 && self.primary[day].is_none()
    }

    fn is_heavy(&self, day: usize) -> bool {
        self.primary[day]
            .as_ref()
            .is_some_and(|w| w.kind.is_heavy())
    }

    fn next_to_heavy(&self, day: usize) -> bool {
        (day > 0 && self.is_heavy(day - 1)) || (day < 6 && self.is_heavy(day + 1))
    }

    fn next_to_strength(&self, day: usize) -> bool {
        (day > 0 && self.secondary[day - 1].is_some())
            || (day < 6 && self.secondary[day + 1].is_some())
    }

    fn volume_of(&self, workout: &Workout) -> f64 {
        match self.sport {
            Sport::Running => workout
                .target_distance_km
                .unwrap_or_else(|| steps_volume(self.sport, &workout.steps, self.paces)),
            Sport::Cycling => workout
                .target_load
                .unwrap_or_else(|| steps_volume(self.sport, &workout.steps, self.paces)),
        }
    }

    fn scheduled_volume(&self) -> f64 {
        self.primary
            .iter()
            .flatten()
            .map(|w| self.volume_of(w))
            .sum()
    }

    fn with_volume(&self, workout: Workout, volume: f64) -> Workout {
        match self.sport {
            Sport::Running => workout.with_distance(round1(volume)),
            Sport::Cycling => workout.with_load(round1(volume)),
        }
    }
}

fn workout_name(kind: WorkoutType, sport: Sport) -> &'static str {
    match (kind, sport) {
        (WorkoutType::LongRun, Sport::Running) => "Long run",
        (WorkoutType::LongRun, Sport::Cycling) => "Long ride",
        (WorkoutType::Easy, Sport::Running) => "Easy run",
        (WorkoutType::Easy, Sport::Cycling) => "Endurance ride",
        (WorkoutType::Recovery, Sport::Running) => "Recovery run",
        (WorkoutType::Recovery, Sport::Cycling) => "Recovery ride",
        (WorkoutType::Tempo, _) => "Tempo",
        (WorkoutType::Intervals, _) => "Intervals",
        (WorkoutType::Strength, _) => "Strength",
        (WorkoutType::Rest, _) => "Rest",
    }
}

impl MicrocycleScheduler {
    /// Create a scheduler
    #[must_use]
    pub const fn new(config: SchedulerConfig, library: TemplateLibrary) -> Self {
        Self { config, library }
    }

    /// Build the schedule for one week
    ///
    /// Every slot's primary workout fits inside that day's available hours.
    /// `paces` converts between running distance and time; cycling ignores it.
    #[must_use]
    pub fn build_week_schedule(
        &self,
        week: &WeekInput,
        availability: &WeekAvailability,
        options: &ScheduleOptions,
        paces: &ZonePaces,
    ) -> WeekSchedule {
        let mut draft = WeekDraft {
            sport: week.sport,
            paces,
            seconds: availability.0.map(|day| day.total_seconds()),
            evening: availability.0.map(|day| day.evening_hours()),
            reserved: [0; 7],
            primary: array::from_fn(|_| None),
            secondary: array::from_fn(|_| None),
        };
        let mut warnings = Vec::new();

        if availability.is_empty() {
            debug!(phase = %week.phase, "No availability, week set to rest");
            warnings.push(ScheduleWarning::NoAvailability);
            return Self::assemble(week, availability, draft, None, warnings);
        }

        let long_day = if week.long_session > 0.0 {
            Self::place_long_session(week, options, &mut draft, &mut warnings)
        } else {
            None
        };

        for kind in week.key_sessions() {
            if !self.place_key_session(kind, week, long_day, &mut draft, &mut warnings) {
                debug!(%kind, "No open day has room, key session dropped");
                warnings.push(ScheduleWarning::KeySessionDropped { kind });
            }
        }

        let wanted = week.strength_sessions();
        let placed = self.place_strength_sessions(wanted, long_day, &mut draft, &mut warnings);
        if placed < wanted {
            warnings.push(ScheduleWarning::StrengthSessionsReduced {
                requested: wanted,
                placed,
            });
        }

        self.fill_easy_volume(week, &mut draft);

        let scheduled = draft.scheduled_volume();
        if scheduled + self.shortfall_tolerance(week.sport) < week.target_volume {
            warnings.push(ScheduleWarning::VolumeShortfall {
                target: week.target_volume,
                scheduled: round1(scheduled),
            });
        }

        Self::assemble(week, availability, draft, long_day, warnings)
    }

    fn shortfall_tolerance(&self, sport: Sport) -> f64 {
        match sport {
            Sport::Running => self.config.min_run_km,
            Sport::Cycling => self.config.min_ride_tss,
        }
    }

    fn place_long_session(
        week: &WeekInput,
        options: &ScheduleOptions,
        draft: &mut WeekDraft<'_>,
        warnings: &mut Vec<ScheduleWarning>,
    ) -> Option<usize> {
        let zone = if week.is_race_week { Zone::Z3 } else { Zone::Z2 };
        let required = match week.sport {
            Sport::Running => draft.paces.seconds_for_km(zone, week.long_session),
            Sport::Cycling => week.long_session * 3600.0,
        }
        .floor() as u32;
        if required == 0 {
            debug!(long_session = week.long_session, "Long session rounds to zero, not placed");
            return None;
        }

        let seconds = draft.seconds;
        let available: Vec<usize> = (0..7).filter(|d| seconds[*d] > 0).collect();
        let most_hours = available
            .iter()
            .copied()
            .min_by_key(|d| (Reverse(seconds[*d]), rank(&LONG_DAY_ORDER, *d)))?;

        let preferred = options
            .preferred_long_session_day
            .map(|w| w.num_days_from_monday() as usize);
        let day = match preferred {
            Some(p) if seconds[p] >= required => p,
            Some(p) => {
                let next_best = available
                    .iter()
                    .copied()
                    .filter(|d| seconds[*d] >= required)
                    .min_by_key(|d| (d.abs_diff(p), rank(&LONG_DAY_ORDER, *d)))
                    .unwrap_or(most_hours);
                warnings.push(ScheduleWarning::LongSessionMoved {
                    preferred: weekday_for_index(p),
                    placed: weekday_for_index(next_best),
                });
                next_best
            }
            None => most_hours,
        };

        let duration = required.min(seconds[day]);
        if duration < required {
            debug!(required, available = seconds[day], "Long session reduced to fit the day");
            warnings.push(ScheduleWarning::LongSessionReduced {
                requested_seconds: required,
                available_seconds: seconds[day],
            });
        }

        let volume = match week.sport {
            Sport::Running if duration < required => {
                draft.paces.km_for_seconds(zone, f64::from(duration))
            }
            Sport::Running => week.long_session,
            Sport::Cycling => volume_for_seconds(week.sport, f64::from(duration), zone, draft.paces),
        };
        let name = if week.is_race_week {
            "Race"
        } else {
            workout_name(WorkoutType::LongRun, week.sport)
        };
        let workout = Workout::new(
            WorkoutType::LongRun,
            name,
            vec![Step::leaf(StepKind::Work, duration, zone)],
        );
        draft.primary[day] = Some(draft.with_volume(workout, volume));
        Some(day)
    }

    fn place_key_session(
        &self,
        kind: WorkoutType,
        week: &WeekInput,
        long_day: Option<usize>,
        draft: &mut WeekDraft<'_>,
        warnings: &mut Vec<ScheduleWarning>,
    ) -> bool {
        let Some(structure) = self.library.resolve(kind) else {
            return false;
        };
        let minimum = structure.fixed_seconds(draft.paces) + self.config.min_quality_main_seconds;

        let next_to_long = |d: usize| long_day.is_some_and(|l| adjacent(d, l));
        let candidates: Vec<usize> = (0..7)
            .filter(|d| draft.is_open(*d))
            .filter(|d| draft.seconds[*d] >= minimum)
            .collect();
        let buffered = candidates
            .iter()
            .copied()
            .filter(|d| !next_to_long(*d) && !draft.next_to_heavy(*d))
            .min_by_key(|d| rank(&QUALITY_DAY_ORDER, *d));
        let (day, relaxed) = match buffered {
            Some(day) => (day, false),
            None => {
                let Some(day) = candidates.iter().copied().min_by_key(|d| {
                    (
                        next_to_long(*d),
                        draft.next_to_heavy(*d),
                        rank(&QUALITY_DAY_ORDER, *d),
                    )
                }) else {
                    return false;
                };
                (day, true)
            }
        };

        let share_volume = week.target_volume * self.config.key_session_volume_share;
        let desired = seconds_for_volume(week.sport, share_volume, Zone::Z2, draft.paces).floor() as u32;
        let budget = desired.max(minimum).min(draft.seconds[day]);
        let Some(steps) =
            structure.fit_to_seconds(budget, self.config.min_quality_main_seconds, draft.paces)
        else {
            return false;
        };

        if relaxed {
            debug!(%kind, day, "No day keeps the recovery buffer, placing next to a hard day");
            warnings.push(ScheduleWarning::RecoveryBufferRelaxed {
                kind,
                placed: weekday_for_index(day),
            });
        }
        let volume = steps_volume(week.sport, &steps, draft.paces);
        let workout = Workout::new(kind, workout_name(kind, week.sport), steps);
        draft.primary[day] = Some(draft.with_volume(workout, volume));
        true
    }

    fn place_strength_sessions(
        &self,
        wanted: u32,
        long_day: Option<usize>,
        draft: &mut WeekDraft<'_>,
        warnings: &mut Vec<ScheduleWarning>,
    ) -> u32 {
        let session = self.config.strength_session_seconds;
        let session_hours = f64::from(session) / 3600.0;
        let next_to_long = |d: usize| long_day.is_some_and(|l| adjacent(d, l));
        let mut placed = 0;

        while placed < wanted {
            let day = (0..7)
                .filter(|d| draft.secondary[*d].is_none())
                .filter(|d| long_day != Some(*d))
                .filter(|d| !draft.primary[*d].as_ref().is_some_and(|w| w.kind.is_key()))
                .filter(|d| {
                    let used = draft.primary[*d].as_ref().map_or(0, |w| w.duration_seconds);
                    draft.seconds[*d].saturating_sub(used) >= session
                })
                .min_by_key(|d| {
                    let evening = draft.evening[*d] >= session_hours;
                    (
                        next_to_long(*d),
                        draft.next_to_strength(*d),
                        !evening,
                        rank(&QUALITY_DAY_ORDER, *d),
                    )
                });
            let Some(day) = day else {
                break;
            };
            if next_to_long(day) {
                debug!(day, "No day keeps the strength buffer, placing next to the long session");
                warnings.push(ScheduleWarning::RecoveryBufferRelaxed {
                    kind: WorkoutType::Strength,
                    placed: weekday_for_index(day),
                });
            }

            let steps = self
                .library
                .resolve(WorkoutType::Strength)
                .map_or_else(
                    || vec![Step::leaf(StepKind::Work, session, Zone::Z1)],
                    |s| vec![Step::leaf(StepKind::Work, session, s.main.work.zone)],
                );
            draft.secondary[day] = Some(Workout::new(
                WorkoutType::Strength,
                workout_name(WorkoutType::Strength, draft.sport),
                steps,
            ));
            draft.reserved[day] = session;
            placed += 1;
        }
        placed
    }

    fn fill_easy_volume(&self, week: &WeekInput, draft: &mut WeekDraft<'_>) {
        let remaining = week.target_volume - draft.scheduled_volume();
        let capacity: [u32; 7] =
            array::from_fn(|d| draft.seconds[d].saturating_sub(draft.reserved[d]));
        let days: Vec<usize> = (0..7)
            .filter(|d| draft.primary[*d].is_none() && capacity[*d] > 0)
            .collect();
        if remaining <= 0.0 || days.is_empty() {
            return;
        }

        let room: [f64; 7] = array::from_fn(|d| {
            volume_for_seconds(week.sport, f64::from(capacity[d]), Zone::Z2, draft.paces)
        });
        let mut allocation = [0.0_f64; 7];
        let mut open = days;
        let mut left = remaining;

        // Proportional to hours; volume a full day cannot hold spills to the others
        while left > 1e-6 && !open.is_empty() {
            let hours: f64 = open.iter().map(|d| f64::from(capacity[*d])).sum();
            let mut still_open = Vec::with_capacity(open.len());
            let mut spilled = 0.0;
            for day in open {
                let share = left * f64::from(capacity[day]) / hours;
                let free = room[day] - allocation[day];
                if share >= free {
                    allocation[day] += free;
                    spilled += share - free;
                } else {
                    allocation[day] += share;
                    still_open.push(day);
                }
            }
            left = spilled;
            open = still_open;
        }

        let (minimum, recovery_max) = match week.sport {
            Sport::Running => (self.config.min_run_km, self.config.recovery_run_max_km),
            Sport::Cycling => (self.config.min_ride_tss, self.config.recovery_ride_max_tss),
        };
        for day in 0..7 {
            let volume = allocation[day];
            if volume < minimum || volume <= 0.0 {
                continue;
            }
            let (kind, zone) = if volume <= recovery_max {
                (WorkoutType::Recovery, Zone::Z1)
            } else {
                (WorkoutType::Easy, Zone::Z2)
            };
            let wanted = seconds_for_volume(week.sport, volume, zone, draft.paces).floor() as u32;
            let duration = wanted.min(capacity[day]);
            let volume = if duration < wanted {
                volume_for_seconds(week.sport, f64::from(duration), zone, draft.paces)
            } else {
                volume
            };
            let workout = Workout::new(
                kind,
                workout_name(kind, week.sport),
                vec![Step::leaf(StepKind::Work, duration, zone)],
            );
            draft.primary[day] = Some(draft.with_volume(workout, volume));
        }
    }

    fn assemble(
        week: &WeekInput,
        availability: &WeekAvailability,
        draft: WeekDraft<'_>,
        long_session_day: Option<usize>,
        warnings: Vec<ScheduleWarning>,
    ) -> WeekSchedule {
        let WeekDraft {
            primary, secondary, ..
        } = draft;
        let slots = primary
            .into_iter()
            .zip(secondary)
            .enumerate()
            .map(|(day_index, (primary, secondary))| ScheduleSlot {
                day_index,
                weekday: weekday_for_index(day_index),
                date: week
                    .start_date
                    .and_then(|start| start.checked_add_days(Days::new(day_index as u64))),
                availability: availability.day(day_index),
                primary,
                secondary,
            })
            .collect();

        WeekSchedule {
            sport: week.sport,
            phase: week.phase,
            slots,
            long_session_day,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::models::DayAvailability;

    fn running_week(phase: Phase, volume: f64, long: f64) -> WeekInput {
        WeekInput {
            sport: Sport::Running,
            phase,
            target_volume: volume,
            long_session: long,
            is_recovery_week: false,
            is_race_week: false,
            long_run_dominant: false,
            gym_sessions_target: 0,
            start_date: None,
        }
    }

    fn scheduler() -> MicrocycleScheduler {
        MicrocycleScheduler::new(SchedulerConfig::default(), TemplateLibrary::standard())
    }

    fn options() -> ScheduleOptions {
        ScheduleOptions::default()
    }

    fn paces() -> ZonePaces {
        ZonePaces::from_threshold(300.0)
    }

    fn assert_fits(schedule: &WeekSchedule) {
        for slot in &schedule.slots {
            assert!(
                slot.primary_seconds() <= slot.available_seconds(),
                "day {} over its hours",
                slot.day_index
            );
        }
    }

    #[test]
    fn test_no_availability_is_all_rest() {
        let schedule = scheduler().build_week_schedule(
            &running_week(Phase::Base, 40.0, 14.0),
            &WeekAvailability::uniform(0.0),
            &options(),
            &paces(),
        );
        assert!(schedule.slots.iter().all(ScheduleSlot::is_rest));
        assert_eq!(schedule.warnings, vec![ScheduleWarning::NoAvailability]);
    }

    #[test]
    fn test_long_session_on_most_available_day_prefers_weekend() {
        let schedule = scheduler().build_week_schedule(
            &running_week(Phase::Base, 40.0, 14.0),
            &WeekAvailability::uniform(2.0),
            &options(),
            &paces(),
        );
        assert_eq!(schedule.long_session_day, Some(6));
        assert_fits(&schedule);
    }

    #[test]
    fn test_preferred_day_respected() {
        let opts = ScheduleOptions {
            preferred_long_session_day: Some(Weekday::Sat),
            ..options()
        };
        let schedule = scheduler().build_week_schedule(
            &running_week(Phase::Base, 40.0, 14.0),
            &WeekAvailability::uniform(2.0),
            &opts,
            &paces(),
        );
        assert_eq!(schedule.long_session_day, Some(5));
        assert!(schedule.warnings.is_empty());
    }

    #[test]
    fn test_long_session_moved_and_reduced() {
        let opts = ScheduleOptions {
            preferred_long_session_day: Some(Weekday::Sun),
            ..options()
        };
        let availability = WeekAvailability::from_hours([1.0, 1.0, 1.0, 1.0, 1.0, 1.5, 0.5]);
        let schedule =
            scheduler().build_week_schedule(
                &running_week(Phase::Base, 40.0, 20.0),
                &availability,
                &opts,
                &paces(),
            );
        assert_eq!(schedule.long_session_day, Some(5));
        assert!(schedule
            .warnings
            .iter()
            .any(|w| matches!(w, ScheduleWarning::LongSessionMoved { .. })));
        assert!(schedule
            .warnings
            .iter()
            .any(|w| matches!(w, ScheduleWarning::LongSessionReduced { .. })));
        assert_fits(&schedule);
    }

    #[test]
    fn test_key_sessions_keep_buffer_from_long_day() {
        let schedule = scheduler().build_week_schedule(
            &running_week(Phase::Build, 50.0, 16.0),
            &WeekAvailability::uniform(1.5),
            &options(),
            &paces(),
        );
        let long = schedule.long_session_day.unwrap();
        let keys: Vec<usize> = schedule
            .slots
            .iter()
            .filter(|s| s.workout_type().is_key())
            .map(|s| s.day_index)
            .collect();
        assert_eq!(keys.len(), 2);
        for day in &keys {
            assert!(day.abs_diff(long) > 1);
        }
        assert!(keys[0].abs_diff(keys[1]) > 1);
        assert_fits(&schedule);
    }

    #[test]
    fn test_recovery_week_has_no_key_sessions() {
        let mut week = running_week(Phase::Build, 30.0, 10.0);
        week.is_recovery_week = true;
        week.gym_sessions_target = 3;
        let schedule = scheduler().build_week_schedule(
            &week,
            &WeekAvailability::uniform(1.5),
            &options(),
            &paces(),
        );
        assert_eq!(schedule.count(WorkoutType::Tempo), 0);
        assert_eq!(schedule.count(WorkoutType::Intervals), 0);
        assert!(schedule.strength_sessions() <= 1);
    }

    #[test]
    fn test_strength_prefers_evening_slots_away_from_long_day() {
        let mut week = running_week(Phase::Base, 30.0, 10.0);
        week.gym_sessions_target = 1;
        let mut days = [DayAvailability::Hours(1.5); 7];
        days[0] = DayAvailability::split(0.5, 1.0);
        let schedule = scheduler().build_week_schedule(
            &week,
            &WeekAvailability(days),
            &options(),
            &paces(),
        );
        assert_eq!(schedule.long_session_day, Some(6));
        assert!(schedule.slots[0].has_strength());
        assert_fits(&schedule);
    }

    #[test]
    fn test_zero_hour_days_rest_and_volume_proportional() {
        let availability = WeekAvailability::from_hours([1.0, 0.0, 2.0, 0.0, 1.0, 0.0, 2.5]);
        let mut week = running_week(Phase::Base, 30.0, 12.0);
        week.long_run_dominant = true;
        let schedule = scheduler().build_week_schedule(&week, &availability, &options(), &paces());
        for day in [1, 3, 5] {
            assert!(schedule.slots[day].is_rest());
        }
        assert_fits(&schedule);
    }

    #[test]
    fn test_tiny_long_session_is_not_placed() {
        let opts = ScheduleOptions {
            preferred_long_session_day: Some(Weekday::Mon),
            ..options()
        };
        let availability = WeekAvailability::from_hours([0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]);
        let schedule = scheduler().build_week_schedule(
            &running_week(Phase::Base, 20.0, 0.001),
            &availability,
            &opts,
            &paces(),
        );
        assert_eq!(schedule.long_session_day, None);
        assert!(schedule.slots[0].is_rest());
        assert_eq!(schedule.count(WorkoutType::LongRun), 0);
        assert_fits(&schedule);
    }

    #[test]
    fn test_key_session_goes_next_to_long_day_when_no_other_day_fits() {
        let availability = WeekAvailability::from_hours([0.0, 0.0, 0.0, 0.0, 0.0, 1.5, 2.5]);
        let schedule = scheduler().build_week_schedule(
            &running_week(Phase::Base, 30.0, 14.0),
            &availability,
            &options(),
            &paces(),
        );
        assert_eq!(schedule.long_session_day, Some(6));
        assert_eq!(schedule.slots[5].workout_type(), WorkoutType::Tempo);
        assert!(schedule.warnings.contains(&ScheduleWarning::RecoveryBufferRelaxed {
            kind: WorkoutType::Tempo,
            placed: Weekday::Sat,
        }));
        assert!(!schedule
            .warnings
            .iter()
            .any(|w| matches!(w, ScheduleWarning::KeySessionDropped { .. })));
        assert_fits(&schedule);
    }

    #[test]
    fn test_strength_goes_next_to_long_day_when_no_other_day_fits() {
        let mut week = running_week(Phase::Build, 20.0, 10.0);
        week.is_recovery_week = true;
        week.gym_sessions_target = 2;
        let availability = WeekAvailability::from_hours([0.0, 0.0, 0.0, 0.0, 0.0, 1.5, 2.5]);
        let schedule = scheduler().build_week_schedule(&week, &availability, &options(), &paces());
        assert_eq!(schedule.long_session_day, Some(6));
        assert!(schedule.slots[5].has_strength());
        assert_eq!(schedule.strength_sessions(), 1);
        assert!(schedule.warnings.contains(&ScheduleWarning::RecoveryBufferRelaxed {
            kind: WorkoutType::Strength,
            placed: Weekday::Sat,
        }));
        assert!(!schedule
            .warnings
            .iter()
            .any(|w| matches!(w, ScheduleWarning::StrengthSessionsReduced { .. })));
        assert_fits(&schedule);
    }

    #[test]
    fn test_cycling_week_uses_load() {
        let week = WeekInput {
            sport: Sport::Cycling,
            ..running_week(Phase::Base, 400.0, 3.0)
        };
        let schedule = scheduler().build_week_schedule(
            &week,
            &WeekAvailability::uniform(2.0),
            &options(),
            &paces(),
        );
        let long = schedule.slot(schedule.long_session_day.unwrap()).unwrap();
        let ride = long.primary.as_ref().unwrap();
        // Three hours do not fit two, the ride is reduced to 2 h at 50 TSS/h
        assert_eq!(ride.duration_seconds, 7200);
        assert!((ride.target_load.unwrap() - 100.0).abs() < 1e-9);
        assert!(schedule.scheduled_load() > 0.0);
        assert_fits(&schedule);
    }
}
