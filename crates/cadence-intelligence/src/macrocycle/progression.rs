// ABOUTME: Sport-independent forward walk accumulating capacity and long-session size week by week
// ABOUTME: Applies progression, recovery cutback and re-entry, taper factors, race week, and safety rails
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use cadence_core::constants::progression::MAX_PLAN_WEEKS;
use cadence_core::models::{
    MacrocyclePlan, Phase, PlanWarning, RaceType, Sport, WeekDescriptor,
};
use chrono::Duration;
use tracing::{debug, info};

use super::phases::{count_weeks, monday_of, PhaseLayout};
use super::{AthleteHistory, MacrocycleInputs, PlanSettings};
use crate::config::MacrocycleConfig;

/// Everything the long-session rails need for one week
pub(crate) struct LongSessionContext<'a> {
    pub week_number: u32,
    pub volume: f64,
    pub requested: f64,
    pub phase: Phase,
    pub is_recovery: bool,
    pub race_type: RaceType,
    pub history: &'a AthleteHistory,
    pub config: &'a MacrocycleConfig,
}

/// Unit-specific rules for one sport's load model
pub(crate) trait LoadModel {
    fn sport(&self) -> Sport;

    /// Default weekly growth (fraction or ramp)
    fn default_rate(&self) -> f64;

    /// Default long-session growth per loading week
    fn default_long_step(&self) -> f64;

    /// Reject inputs the model cannot plan from
    fn validate(&self, inputs: &MacrocycleInputs, rate: f64) -> Result<(), String>;

    /// Capacity after one loading week
    fn progress(&self, capacity: f64, rate: f64) -> f64;

    /// Capacity for the first loading week after a recovery week
    fn restart(&self, previous: f64, rate: f64, config: &MacrocycleConfig) -> f64;

    /// Largest long-session increase allowed for a given weekly volume increase
    fn long_increase_cap(&self, volume_increase: f64, share: f64) -> f64;

    /// Race-week volume and long session
    fn race_week(
        &self,
        capacity: f64,
        long_session: f64,
        race_type: RaceType,
        config: &MacrocycleConfig,
    ) -> (f64, f64);

    /// Long session after ratio, floor, and absolute rails
    fn constrain_long(&self, ctx: &LongSessionContext<'_>, warnings: &mut Vec<PlanWarning>) -> f64;

    /// Long session as a share of the weekly volume
    fn long_share(&self, long_session: f64, volume: f64) -> f64;
}

/// State carried from the previous week
#[derive(Clone, Copy)]
struct PreviousWeek {
    target_volume: f64,
    long_session: f64,
    is_recovery_week: bool,
    phase: Phase,
}

/// Round to one decimal
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round down to one decimal
pub(crate) fn floor1(value: f64) -> f64 {
    (value * 10.0 + 1e-9).floor() / 10.0
}

/// Walk the plan forward and produce week descriptors
// Long function: the walk keeps the whole week state machine in one place
pub(crate) fn generate<M: LoadModel>(
    model: &M,
    config: &MacrocycleConfig,
    inputs: &MacrocycleInputs,
    settings: &PlanSettings,
    history: &AthleteHistory,
) -> MacrocyclePlan {
    let sport = model.sport();
    let race_type = inputs.race_type;

    if !race_type.supports(sport) {
        return MacrocyclePlan::unavailable(
            sport,
            race_type,
            format!("race type {race_type} is not a {sport} event"),
        );
    }

    let rate = inputs.progression_rate.unwrap_or_else(|| model.default_rate());
    let long_step = inputs
        .long_session_progression
        .unwrap_or_else(|| model.default_long_step());
    if let Err(reason) = model.validate(inputs, rate) {
        return MacrocyclePlan::unavailable(sport, race_type, reason);
    }
    if !long_step.is_finite() || long_step < 0.0 {
        return MacrocyclePlan::unavailable(
            sport,
            race_type,
            "long-session progression must be a non-negative number",
        );
    }

    let weeks_between = count_weeks(settings.plan_start_date, settings.goal_date);
    if weeks_between < 1 {
        return MacrocyclePlan::unavailable(sport, race_type, "goal date is before the plan start");
    }
    if weeks_between > MAX_PLAN_WEEKS {
        return MacrocyclePlan::unavailable(
            sport,
            race_type,
            format!("plan spans {weeks_between} weeks, the longest supported plan is {MAX_PLAN_WEEKS}"),
        );
    }
    let total_weeks = weeks_between as u32;

    let requested_taper = inputs
        .taper_weeks
        .unwrap_or_else(|| race_type.default_taper_weeks());
    let layout = PhaseLayout::compute(total_weeks, requested_taper, config);
    let mut warnings = layout.warnings();

    let cadence = settings.recovery_cadence.unwrap_or(config.recovery_cadence);
    let recovery = layout.recovery_weeks(
        cadence,
        &settings.forced_recovery_weeks,
        &settings.forced_build_weeks,
        &mut warnings,
    );
    let phases = layout.pinned_phases(&recovery);
    let ceiling = race_type.max_weekly_volume(sport);
    let start_monday = monday_of(settings.plan_start_date);

    let mut capacity = inputs.start_volume;
    let mut long_session = inputs.start_long_session;
    let mut pre_recovery: Option<(f64, f64)> = None;
    let mut previous: Option<PreviousWeek> = None;
    let mut weeks: Vec<WeekDescriptor> = Vec::with_capacity(total_weeks as usize);
    let mut block = 1;

    for week_number in 1..=total_weeks {
        let index = week_number as usize;
        let phase = phases[index];
        let is_race = week_number == total_weeks;
        let is_recovery = !is_race && recovery[index];
        let is_loading = !is_race && !is_recovery && phase != Phase::Taper;

        if let Some(prev) = previous {
            if prev.is_recovery_week || prev.phase != phase {
                block += 1;
            }
        }

        let (raw_volume, raw_long) = if is_race {
            model.race_week(capacity, long_session, race_type, config)
        } else if is_recovery {
            let (base_volume, base_long) =
                previous.map_or((capacity, long_session), |p| (p.target_volume, p.long_session));
            if !previous.is_some_and(|p| p.is_recovery_week) {
                pre_recovery = Some((capacity, long_session));
            }
            (
                base_volume * config.recovery_cutback,
                base_long * config.recovery_cutback,
            )
        } else if phase == Phase::Taper {
            let factor = config.taper_factor(total_weeks - week_number);
            (capacity * factor, long_session * factor)
        } else {
            if week_number > 1 {
                if previous.is_some_and(|p| p.is_recovery_week) {
                    if let Some((pre_capacity, pre_long)) = pre_recovery.take() {
                        capacity = model.restart(pre_capacity, rate, config);
                        long_session = pre_long;
                    }
                } else {
                    let next = model.progress(capacity, rate);
                    let increase = (next - capacity).max(0.0);
                    long_session += long_step.min(
                        model.long_increase_cap(increase, config.long_session_increase_share),
                    );
                    capacity = next;
                }
            }
            (capacity, long_session)
        };

        let mut volume = raw_volume.max(0.0);
        if volume > ceiling {
            debug!(week_number, requested = volume, ceiling, "Weekly volume clamped");
            warnings.push(PlanWarning::VolumeClamped {
                week_number,
                requested: round1(volume),
                ceiling,
            });
            volume = ceiling;
        }
        if is_loading {
            capacity = capacity.min(ceiling);
        }
        volume = if is_recovery {
            floor1(volume)
        } else {
            round1(volume)
        };

        let long = if is_race {
            round1(raw_long.max(0.0))
        } else {
            let ctx = LongSessionContext {
                week_number,
                volume,
                requested: raw_long.max(0.0),
                phase,
                is_recovery,
                race_type,
                history,
                config,
            };
            model.constrain_long(&ctx, &mut warnings)
        };
        if is_loading {
            long_session = long;
        }

        let long_run_dominant =
            !is_recovery && model.long_share(long, volume) > config.long_run_dominant_share;

        weeks.push(WeekDescriptor {
            sport,
            week_number,
            start_date: start_monday + Duration::weeks(i64::from(week_number - 1)),
            phase,
            block,
            target_volume: volume,
            long_session: long,
            is_recovery_week: is_recovery,
            is_race_week: is_race,
            long_run_dominant,
        });
        previous = Some(PreviousWeek {
            target_volume: volume,
            long_session: long,
            is_recovery_week: is_recovery,
            phase,
        });
    }

    info!(
        %sport,
        %race_type,
        weeks = weeks.len(),
        warnings = warnings.len(),
        "Generated macrocycle"
    );

    MacrocyclePlan {
        sport,
        race_type,
        weeks,
        warnings,
    }
}
