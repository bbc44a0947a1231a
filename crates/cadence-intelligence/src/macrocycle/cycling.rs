// ABOUTME: Cycling macrocycle planner with weekly TSS volumes and a CTL ramp rate
// ABOUTME: Long-ride hours are bounded by a share of weekly TSS and a per-race hour cap
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use cadence_core::constants::{cycling, progression};
use cadence_core::models::{MacrocyclePlan, Phase, PlanWarning, RaceType, Sport};

use super::progression::{floor1, generate, round1, LoadModel, LongSessionContext};
use super::{AthleteHistory, MacrocycleInputs, MacrocyclePlanner, PlanSettings};
use crate::config::MacrocycleConfig;

/// Longest ride the weekly TSS can carry at endurance intensity
fn allowed_long_hours(volume_tss: f64, share: f64, race_type: RaceType) -> f64 {
    floor1(volume_tss * share / cycling::TSS_PER_HOUR_Z2)
        .min(race_type.long_session_cap(Sport::Cycling))
}

/// TSS load model with a linear CTL ramp
struct CyclingModel;

impl LoadModel for CyclingModel {
    fn sport(&self) -> Sport {
        Sport::Cycling
    }

    fn default_rate(&self) -> f64 {
        cycling::DEFAULT_RAMP_RATE
    }

    fn default_long_step(&self) -> f64 {
        progression::DEFAULT_LONG_RIDE_PROGRESSION_HOURS
    }

    fn validate(&self, inputs: &MacrocycleInputs, rate: f64) -> Result<(), String> {
        if !inputs.start_volume.is_finite() || inputs.start_volume <= 0.0 {
            return Err("starting weekly TSS must be a positive number".to_owned());
        }
        if !inputs.start_long_session.is_finite() || inputs.start_long_session < 0.0 {
            return Err("starting long ride must be a non-negative number of hours".to_owned());
        }
        if !rate.is_finite() || !(0.0..=cycling::MAX_RAMP_RATE).contains(&rate) {
            return Err(format!(
                "ramp rate {rate} is outside 0..={} CTL per week",
                cycling::MAX_RAMP_RATE
            ));
        }
        Ok(())
    }

    fn progress(&self, capacity: f64, rate: f64) -> f64 {
        rate.mul_add(cycling::DAYS_PER_WEEK, capacity)
    }

    fn restart(&self, previous: f64, rate: f64, config: &MacrocycleConfig) -> f64 {
        config
            .restart_policy
            .restart_from_step(previous, rate * cycling::DAYS_PER_WEEK)
    }

    fn long_increase_cap(&self, volume_increase: f64, share: f64) -> f64 {
        volume_increase * share / cycling::TSS_PER_HOUR_Z2
    }

    fn race_week(
        &self,
        capacity: f64,
        long_session: f64,
        race_type: RaceType,
        config: &MacrocycleConfig,
    ) -> (f64, f64) {
        let volume = capacity * config.race_week_volume_factor;
        match race_type.event_duration_hours() {
            Some(hours) => (volume.max(hours * cycling::TSS_PER_HOUR_Z3), hours),
            None => (
                volume,
                long_session.min(allowed_long_hours(
                    round1(volume),
                    cycling::LONG_RIDE_MAX_SHARE,
                    race_type,
                )),
            ),
        }
    }

    fn constrain_long(&self, ctx: &LongSessionContext<'_>, warnings: &mut Vec<PlanWarning>) -> f64 {
        let share = if ctx.is_recovery {
            cycling::LONG_RIDE_RECOVERY_SHARE
        } else if ctx.phase == Phase::Peak {
            cycling::LONG_RIDE_PEAK_SHARE
        } else {
            cycling::LONG_RIDE_MAX_SHARE
        };
        let allowed = allowed_long_hours(ctx.volume, share, ctx.race_type);

        if ctx.requested > allowed + 1e-9 {
            if !ctx.is_recovery {
                warnings.push(PlanWarning::LongSessionClamped {
                    week_number: ctx.week_number,
                    requested: round1(ctx.requested),
                    limit: allowed,
                });
            }
            return allowed;
        }
        round1(ctx.requested)
    }

    fn long_share(&self, long_session: f64, volume: f64) -> f64 {
        if volume > 0.0 {
            long_session * cycling::TSS_PER_HOUR_Z2 / volume
        } else {
            0.0
        }
    }
}

/// Macrocycle planner for cycling plans
#[derive(Debug, Clone, Default)]
pub struct CyclingPlanner {
    config: MacrocycleConfig,
}

impl CyclingPlanner {
    /// Create a planner with the given configuration
    #[must_use]
    pub const fn new(config: MacrocycleConfig) -> Self {
        Self { config }
    }
}

impl MacrocyclePlanner for CyclingPlanner {
    fn sport(&self) -> Sport {
        Sport::Cycling
    }

    fn generate_plan(
        &self,
        inputs: &MacrocycleInputs,
        settings: &PlanSettings,
        history: &AthleteHistory,
    ) -> MacrocyclePlan {
        generate(&CyclingModel, &self.config, inputs, settings, history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn gran_fondo_plan() -> MacrocyclePlan {
        let inputs = MacrocycleInputs::cycling_from_ctl(50.0, 2.5, RaceType::GranFondo);
        let settings = PlanSettings::new(date(2025, 3, 3), date(2025, 6, 15));
        CyclingPlanner::default().generate_plan(&inputs, &settings, &AthleteHistory::default())
    }

    #[test]
    fn test_ctl_seeded_start() {
        let plan = gran_fondo_plan();
        assert!((plan.weeks[0].target_volume - 350.0).abs() < 1e-9);
        assert!((plan.weeks[0].long_session - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_linear_ramp() {
        let plan = gran_fondo_plan();
        // Default ramp of 5 CTL/week adds 35 TSS per loading week
        assert!((plan.weeks[1].target_volume - 385.0).abs() < 1e-9);
        assert!((plan.weeks[2].target_volume - 420.0).abs() < 1e-9);
    }

    #[test]
    fn test_long_ride_caps() {
        let plan = gran_fondo_plan();
        for week in plan.weeks.iter().filter(|w| !w.is_race_week) {
            assert!(week.long_session <= 6.0 + 1e-9);
            let share = week.long_session * 50.0 / week.target_volume;
            assert!(share <= 0.50 + 1e-6, "week {} share {share}", week.week_number);
        }
        let race = plan.race_week().unwrap();
        assert!((race.long_session - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_ramp_rate_bounds() {
        let inputs =
            MacrocycleInputs::cycling_from_ctl(50.0, 2.0, RaceType::RoadRace).with_progression_rate(15.0);
        let settings = PlanSettings::new(date(2025, 3, 3), date(2025, 6, 15));
        let plan = CyclingPlanner::default().generate_plan(&inputs, &settings, &AthleteHistory::default());
        assert!(plan.is_empty());
        assert!(matches!(plan.warnings.as_slice(), [PlanWarning::InvalidInput { .. }]));
    }

    #[test]
    fn test_running_race_rejected() {
        let inputs = MacrocycleInputs::cycling_from_ctl(50.0, 2.0, RaceType::Marathon);
        let settings = PlanSettings::new(date(2025, 3, 3), date(2025, 6, 15));
        assert!(CyclingPlanner::default()
            .generate_plan(&inputs, &settings, &AthleteHistory::default())
            .is_empty());
    }
}
