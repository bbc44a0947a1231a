// ABOUTME: Phase layout working backward from the race week: Taper, Peak, Build, then Base
// ABOUTME: Compresses short plans, shortens oversized tapers, and plans recovery weeks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeSet;

use cadence_core::models::{Phase, PlanWarning};
use chrono::{Datelike, Duration, NaiveDate};

use crate::config::MacrocycleConfig;

/// Monday of the week containing `date`
#[must_use]
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Number of calendar weeks from the plan start week through the goal week
///
/// Zero or negative when the goal is before the start.
#[must_use]
pub fn count_weeks(plan_start: NaiveDate, goal: NaiveDate) -> i64 {
    let start = monday_of(plan_start);
    let goal_week = monday_of(goal);
    if goal_week < start {
        return 0;
    }
    (goal_week - start).num_weeks() + 1
}

/// Week counts per phase for one plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseLayout {
    /// Total weeks including the race week
    pub total_weeks: u32,
    /// Base weeks
    pub base_weeks: u32,
    /// Build weeks (the last one is the pre-Peak recovery week when present)
    pub build_weeks: u32,
    /// Peak weeks
    pub peak_weeks: u32,
    /// Taper weeks applied
    pub taper_weeks: u32,
    /// Taper weeks requested
    pub requested_taper_weeks: u32,
    /// Base removed and Build/Peak re-split
    pub compressed: bool,
}

impl PhaseLayout {
    /// Lay out phases backward from the race week
    #[must_use]
    pub fn compute(total_weeks: u32, requested_taper_weeks: u32, config: &MacrocycleConfig) -> Self {
        let non_race = total_weeks.saturating_sub(1);
        let taper_weeks = requested_taper_weeks.min(non_race / 2);
        let available = non_race - taper_weeks;
        let full = config.build_weeks + config.peak_weeks;

        let (base_weeks, build_weeks, peak_weeks, compressed) = if available >= full {
            (available - full, config.build_weeks, config.peak_weeks, false)
        } else {
            let build = ((f64::from(available) * config.short_plan_build_share).round() as u32)
                .min(available);
            (0, build, available - build, true)
        };

        Self {
            total_weeks,
            base_weeks,
            build_weeks,
            peak_weeks,
            taper_weeks,
            requested_taper_weeks,
            compressed,
        }
    }

    /// Phase a week falls into by position (1-based)
    #[must_use]
    pub const fn phase_of(&self, week_number: u32) -> Phase {
        if week_number >= self.total_weeks {
            Phase::Race
        } else if week_number > self.base_weeks + self.build_weeks + self.peak_weeks {
            Phase::Taper
        } else if week_number > self.base_weeks + self.build_weeks {
            Phase::Peak
        } else if week_number > self.base_weeks {
            Phase::Build
        } else {
            Phase::Base
        }
    }

    /// Mandatory recovery week closing the Build block, if the Build block is long enough
    #[must_use]
    pub const fn pre_peak_recovery_week(&self) -> Option<u32> {
        if self.build_weeks >= 3 && self.peak_weeks >= 1 {
            Some(self.base_weeks + self.build_weeks)
        } else {
            None
        }
    }

    /// Layout diagnostics
    #[must_use]
    pub fn warnings(&self) -> Vec<PlanWarning> {
        let mut warnings = Vec::new();
        if self.taper_weeks < self.requested_taper_weeks {
            warnings.push(PlanWarning::TaperShortened {
                requested: self.requested_taper_weeks,
                applied: self.taper_weeks,
            });
        }
        if self.compressed && self.total_weeks > 1 {
            warnings.push(PlanWarning::ShortPlanCompressed {
                total_weeks: self.total_weeks,
                build_weeks: self.build_weeks,
                peak_weeks: self.peak_weeks,
            });
        }
        warnings
    }

    /// Decide which weeks are recovery weeks
    ///
    /// Precedence: forced build weeks, then forced recovery weeks, then the
    /// pre-Peak recovery week, then the cadence. Cadence recoveries only fall in
    /// Base and Build and never directly before another recovery week.
    #[must_use]
    pub fn recovery_weeks(
        &self,
        cadence: u32,
        forced_recovery: &[u32],
        forced_build: &[u32],
        warnings: &mut Vec<PlanWarning>,
    ) -> Vec<bool> {
        let total = self.total_weeks as usize;
        let mut flags = vec![false; total + 1];
        let forced_build: BTreeSet<u32> = forced_build.iter().copied().collect();

        for &week in forced_recovery.iter().collect::<BTreeSet<_>>() {
            let reason = if week < 2 || week > self.total_weeks {
                Some("outside the trainable weeks of the plan")
            } else if matches!(self.phase_of(week), Phase::Taper | Phase::Race) {
                Some("taper and race weeks cannot be recovery weeks")
            } else if forced_build.contains(&week) {
                Some("also listed as a forced build week")
            } else {
                None
            };
            match reason {
                Some(reason) => warnings.push(PlanWarning::ForcedRecoveryIgnored {
                    week_number: week,
                    reason: reason.to_owned(),
                }),
                None => flags[week as usize] = true,
            }
        }

        if let Some(week) = self.pre_peak_recovery_week() {
            if !forced_build.contains(&week) {
                flags[week as usize] = true;
            }
        }

        let mut loading_since_recovery = 0;
        for week in 1..=self.total_weeks {
            let index = week as usize;
            if flags[index] {
                loading_since_recovery = 0;
                continue;
            }
            let phase = self.phase_of(week);
            let next_is_recovery = flags.get(index + 1).copied().unwrap_or(false);
            let cadence_due = cadence > 0 && loading_since_recovery + 1 >= cadence;
            if week > 1
                && cadence_due
                && matches!(phase, Phase::Base | Phase::Build)
                && !next_is_recovery
                && !forced_build.contains(&week)
            {
                flags[index] = true;
                loading_since_recovery = 0;
            } else if matches!(phase, Phase::Base | Phase::Build | Phase::Peak) {
                loading_since_recovery += 1;
            }
        }

        flags
    }

    /// Phase per week with recovery weeks pinned to the block they close
    #[must_use]
    pub fn pinned_phases(&self, recovery: &[bool]) -> Vec<Phase> {
        let mut phases = vec![Phase::Base; self.total_weeks as usize + 1];
        for week in 1..=self.total_weeks {
            let index = week as usize;
            let positional = self.phase_of(week);
            phases[index] = if index > 1 && recovery.get(index).copied().unwrap_or(false) {
                phases[index - 1].min(positional)
            } else {
                positional
            };
        }
        phases
    }
}
