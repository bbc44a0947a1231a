// ABOUTME: Running macrocycle planner with kilometre volumes and percentage progression
// ABOUTME: Long-run ratio decay, Peak-phase exceptions, and the history-gated Peak floor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use cadence_core::constants::{long_run, progression};
use cadence_core::models::{MacrocyclePlan, Phase, PlanWarning, RaceType, Sport};
use tracing::debug;

use super::progression::{floor1, generate, round1, LoadModel, LongSessionContext};
use super::{AthleteHistory, MacrocycleInputs, MacrocyclePlanner, PlanSettings};
use crate::config::{MacrocycleConfig, PeakFloorPolicy};

/// Long-run limits for one week
#[derive(Debug, Clone, PartialEq)]
pub struct LongRunConstraints {
    /// Largest long run as a share of weekly volume
    pub max_ratio: f64,
    /// Minimum long run (km) when the Peak floor applies
    pub floor: Option<f64>,
    /// Why a Peak floor was not applied, when one exists for the race
    pub floor_skipped: Option<String>,
}

/// Long-run constraints for a week of running volume
///
/// The ratio decays linearly with volume (`0.45 − 0.0025 × (volume − 30)`,
/// clamped to `[0.20, 0.50]`). Marathon and half-marathon Peak weeks raise the
/// ceiling and may carry a floor; recovery weeks cap the ratio at 0.40 and
/// never carry a floor.
#[must_use]
pub fn long_run_constraints(
    volume_km: f64,
    race_type: RaceType,
    phase: Phase,
    is_recovery: bool,
    history: &AthleteHistory,
    config: &MacrocycleConfig,
) -> LongRunConstraints {
    let decayed = long_run::RATIO_DECAY_PER_KM
        .mul_add(-(volume_km - long_run::REFERENCE_VOLUME_KM), long_run::BASE_RATIO)
        .clamp(long_run::MIN_RATIO, long_run::MAX_RATIO);

    if is_recovery {
        return LongRunConstraints {
            max_ratio: decayed.min(long_run::RECOVERY_MAX_RATIO),
            floor: None,
            floor_skipped: None,
        };
    }

    let Some((peak_ratio, peak_floor)) = race_type
        .peak_long_run_exception()
        .filter(|_| phase == Phase::Peak)
    else {
        return LongRunConstraints {
            max_ratio: decayed,
            floor: None,
            floor_skipped: None,
        };
    };

    match peak_floor_blocker(race_type, history, config) {
        None => LongRunConstraints {
            max_ratio: peak_ratio,
            floor: Some(peak_floor),
            floor_skipped: None,
        },
        Some(reason) => LongRunConstraints {
            max_ratio: peak_ratio,
            floor: None,
            floor_skipped: Some(reason),
        },
    }
}

/// Reason the Peak floor must not apply, if any
fn peak_floor_blocker(
    race_type: RaceType,
    history: &AthleteHistory,
    config: &MacrocycleConfig,
) -> Option<String> {
    if config.peak_floor_policy == PeakFloorPolicy::Never {
        return Some("disabled".to_owned());
    }
    match history.avg_recent_volume_km {
        None => return Some("no recent volume history".to_owned()),
        Some(avg) if avg < config.peak_floor_min_recent_volume_km => {
            return Some(format!(
                "recent volume {avg:.1} km is below {:.1} km",
                config.peak_floor_min_recent_volume_km
            ));
        }
        Some(_) => {}
    }
    if history.recent_injury {
        return Some("recent injury".to_owned());
    }
    if history.first_marathon && race_type == RaceType::Marathon {
        return Some("first marathon".to_owned());
    }
    None
}

/// Kilometre load model with percentage growth
struct RunningModel;

impl LoadModel for RunningModel {
    fn sport(&self) -> Sport {
        Sport::Running
    }

    fn default_rate(&self) -> f64 {
        progression::DEFAULT_PROGRESSION_RATE
    }

    fn default_long_step(&self) -> f64 {
        progression::DEFAULT_LONG_RUN_PROGRESSION_KM
    }

    fn validate(&self, inputs: &MacrocycleInputs, rate: f64) -> Result<(), String> {
        if !inputs.start_volume.is_finite() || inputs.start_volume <= 0.0 {
            return Err("starting weekly volume must be a positive number".to_owned());
        }
        if !inputs.start_long_session.is_finite() || inputs.start_long_session < 0.0 {
            return Err("starting long run must be a non-negative number".to_owned());
        }
        if !rate.is_finite() || !(0.0..=progression::MAX_PROGRESSION_RATE).contains(&rate) {
            return Err(format!(
                "progression rate {rate} is outside 0..={}",
                progression::MAX_PROGRESSION_RATE
            ));
        }
        Ok(())
    }

    fn progress(&self, capacity: f64, rate: f64) -> f64 {
        capacity * (1.0 + rate)
    }

    fn restart(&self, previous: f64, rate: f64, config: &MacrocycleConfig) -> f64 {
        config.restart_policy.restart_capacity(previous, rate)
    }

    fn long_increase_cap(&self, volume_increase: f64, share: f64) -> f64 {
        volume_increase * share
    }

    fn race_week(
        &self,
        capacity: f64,
        long_session: f64,
        race_type: RaceType,
        config: &MacrocycleConfig,
    ) -> (f64, f64) {
        let volume = capacity * config.race_week_volume_factor;
        match race_type.race_distance_km() {
            Some(distance) => (volume.max(distance), distance),
            None => (volume, long_session.min(floor1(round1(volume) * long_run::MAX_RATIO))),
        }
    }

    fn constrain_long(&self, ctx: &LongSessionContext<'_>, warnings: &mut Vec<PlanWarning>) -> f64 {
        let constraints = long_run_constraints(
            ctx.volume,
            ctx.race_type,
            ctx.phase,
            ctx.is_recovery,
            ctx.history,
            ctx.config,
        );
        let allowed = floor1(ctx.volume * constraints.max_ratio);

        let mut long = ctx.requested;
        if long > allowed + 1e-9 {
            if !ctx.is_recovery {
                warnings.push(PlanWarning::LongSessionClamped {
                    week_number: ctx.week_number,
                    requested: round1(long),
                    limit: allowed,
                });
            }
            long = allowed;
        }

        if let Some(floor) = constraints.floor {
            let floor = floor.min(allowed);
            if long < floor {
                debug!(week_number = ctx.week_number, floor, "Peak long-run floor applied");
                warnings.push(PlanWarning::PeakFloorApplied {
                    week_number: ctx.week_number,
                    floor,
                });
                long = floor;
            }
        } else if let Some(reason) = constraints.floor_skipped {
            if let Some((_, floor)) = ctx.race_type.peak_long_run_exception() {
                if long < floor {
                    warnings.push(PlanWarning::PeakFloorSkipped {
                        week_number: ctx.week_number,
                        reason,
                    });
                }
            }
        }

        round1(long.min(long_run::ABSOLUTE_MAX_LONG_RUN_KM))
    }

    fn long_share(&self, long_session: f64, volume: f64) -> f64 {
        if volume > 0.0 {
            long_session / volume
        } else {
            0.0
        }
    }
}

/// Macrocycle planner for running plans
#[derive(Debug, Clone, Default)]
pub struct RunningPlanner {
    config: MacrocycleConfig,
}

impl RunningPlanner {
    /// Create a planner with the given configuration
    #[must_use]
    pub const fn new(config: MacrocycleConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &MacrocycleConfig {
        &self.config
    }
}

impl MacrocyclePlanner for RunningPlanner {
    fn sport(&self) -> Sport {
        Sport::Running
    }

    fn generate_plan(
        &self,
        inputs: &MacrocycleInputs,
        settings: &PlanSettings,
        history: &AthleteHistory,
    ) -> MacrocyclePlan {
        generate(&RunningModel, &self.config, inputs, settings, history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn qualified_history() -> AthleteHistory {
        AthleteHistory {
            avg_recent_volume_km: Some(60.0),
            recent_injury: false,
            first_marathon: false,
        }
    }

    fn marathon_plan(history: &AthleteHistory) -> MacrocyclePlan {
        let planner = RunningPlanner::default();
        let inputs = MacrocycleInputs::running(50.0, 16.0, RaceType::Marathon);
        // 2025-01-06 .. 2025-04-27 is 16 calendar weeks
        let settings = PlanSettings::new(date(2025, 1, 6), date(2025, 4, 27));
        planner.generate_plan(&inputs, &settings, history)
    }

    #[test]
    fn test_ratio_decay() {
        let config = MacrocycleConfig::default();
        let history = AthleteHistory::default();
        let at_30 = long_run_constraints(30.0, RaceType::TenK, Phase::Base, false, &history, &config);
        assert!((at_30.max_ratio - 0.45).abs() < 1e-9);
        let at_70 = long_run_constraints(70.0, RaceType::TenK, Phase::Base, false, &history, &config);
        assert!((at_70.max_ratio - 0.35).abs() < 1e-9);
        let at_200 = long_run_constraints(200.0, RaceType::TenK, Phase::Base, false, &history, &config);
        assert!((at_200.max_ratio - 0.20).abs() < 1e-9);
        let at_5 = long_run_constraints(5.0, RaceType::TenK, Phase::Base, false, &history, &config);
        assert!((at_5.max_ratio - 0.50).abs() < 1e-9);
    }

    #[test]
    fn test_recovery_caps_ratio_and_drops_floor() {
        let config = MacrocycleConfig::default();
        let c = long_run_constraints(
            20.0,
            RaceType::Marathon,
            Phase::Peak,
            true,
            &qualified_history(),
            &config,
        );
        assert!((c.max_ratio - 0.40).abs() < 1e-9);
        assert!(c.floor.is_none());
    }

    #[test]
    fn test_peak_floor_gated_by_history() {
        let config = MacrocycleConfig::default();
        let qualified = long_run_constraints(
            70.0,
            RaceType::Marathon,
            Phase::Peak,
            false,
            &qualified_history(),
            &config,
        );
        assert!((qualified.max_ratio - 0.60).abs() < 1e-9);
        assert_eq!(qualified.floor, Some(28.0));

        let first = AthleteHistory {
            first_marathon: true,
            ..qualified_history()
        };
        let gated = long_run_constraints(70.0, RaceType::Marathon, Phase::Peak, false, &first, &config);
        assert!(gated.floor.is_none());
        assert_eq!(gated.floor_skipped.as_deref(), Some("first marathon"));

        // First-marathon flag only gates the marathon floor
        let half = long_run_constraints(50.0, RaceType::HalfMarathon, Phase::Peak, false, &first, &config);
        assert_eq!(half.floor, Some(16.0));
        assert!((half.max_ratio - 0.55).abs() < 1e-9);
    }

    #[test]
    fn test_peak_floor_disabled_by_policy() {
        let config = MacrocycleConfig {
            peak_floor_policy: PeakFloorPolicy::Never,
            ..MacrocycleConfig::default()
        };
        let c = long_run_constraints(
            70.0,
            RaceType::Marathon,
            Phase::Peak,
            false,
            &qualified_history(),
            &config,
        );
        assert!(c.floor.is_none());
        assert_eq!(c.floor_skipped.as_deref(), Some("disabled"));
    }

    #[test]
    fn test_marathon_plan_shape() {
        let plan = marathon_plan(&qualified_history());
        assert_eq!(plan.weeks.len(), 16);
        assert!(plan.weeks[15].is_race_week);
        assert_eq!(plan.weeks[15].phase, Phase::Race);
        assert!((plan.weeks[15].long_session - 42.2).abs() < 1e-9);
        assert!(plan.weeks[8].is_recovery_week);
        assert_eq!(plan.weeks[9].phase, Phase::Peak);
        assert_eq!(plan.weeks[12].phase, Phase::Taper);
    }

    #[test]
    fn test_first_week_uses_starting_values() {
        let plan = marathon_plan(&AthleteHistory::default());
        assert!((plan.weeks[0].target_volume - 50.0).abs() < 1e-9);
        assert!(plan.weeks[0].long_session <= 16.0 + 1e-9);
    }

    #[test]
    fn test_recovery_cutback_and_reentry() {
        let plan = marathon_plan(&AthleteHistory::default());
        let week3 = &plan.weeks[2];
        let week4 = &plan.weeks[3];
        let week5 = &plan.weeks[4];
        assert!(week4.is_recovery_week);
        assert!(week4.target_volume <= week3.target_volume * 0.60 + 1e-9);
        // Conservative re-entry sits below the pre-recovery peak
        assert!(week5.target_volume < week3.target_volume);
        assert!(week5.target_volume > week4.target_volume);
    }

    #[test]
    fn test_peak_floor_skipped_without_history() {
        let plan = marathon_plan(&AthleteHistory::default());
        assert!(plan
            .warnings
            .iter()
            .any(|w| matches!(w, PlanWarning::PeakFloorSkipped { .. })));
        assert!(!plan
            .warnings
            .iter()
            .any(|w| matches!(w, PlanWarning::PeakFloorApplied { .. })));
    }

    #[test]
    fn test_invalid_inputs_yield_empty_plan() {
        let planner = RunningPlanner::default();
        let settings = PlanSettings::new(date(2025, 1, 6), date(2025, 4, 20));

        let negative = MacrocycleInputs::running(-5.0, 10.0, RaceType::Marathon);
        let plan = planner.generate_plan(&negative, &settings, &AthleteHistory::default());
        assert!(plan.is_empty());
        assert!(matches!(plan.warnings.as_slice(), [PlanWarning::InvalidInput { .. }]));

        let cycling_race = MacrocycleInputs::running(40.0, 10.0, RaceType::GranFondo);
        assert!(planner
            .generate_plan(&cycling_race, &settings, &AthleteHistory::default())
            .is_empty());

        let past = PlanSettings::new(date(2025, 4, 20), date(2025, 1, 6));
        let inputs = MacrocycleInputs::running(40.0, 10.0, RaceType::Marathon);
        assert!(planner
            .generate_plan(&inputs, &past, &AthleteHistory::default())
            .is_empty());
    }

    #[test]
    fn test_general_race_week_keeps_ratio() {
        let planner = RunningPlanner::default();
        let inputs = MacrocycleInputs::running(40.0, 14.0, RaceType::General);
        let settings = PlanSettings::new(date(2025, 1, 6), date(2025, 3, 2));
        let plan = planner.generate_plan(&inputs, &settings, &AthleteHistory::default());
        let race = plan.race_week().unwrap();
        assert!(race.long_session <= race.target_volume * 0.5 + 1e-9);
    }
}
