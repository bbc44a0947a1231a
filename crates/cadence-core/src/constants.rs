// ABOUTME: Physiological constants and safety rails for plan generation and scheduling
// ABOUTME: Progression factors, volume ceilings, long-session ratios, zone multipliers, distribution targets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Physiological constants used by the planning engine.
//!
//! Values are grouped by the component that consumes them. Tunable policies
//! (recovery cadence, cutback, restart policy) take these as defaults and can be
//! overridden through the engine configuration.

/// Macrocycle progression and periodization defaults
pub mod progression {
    /// Default weekly volume growth rate (10 %)
    pub const DEFAULT_PROGRESSION_RATE: f64 = 0.10;

    /// Default long-session growth per loading week (km)
    pub const DEFAULT_LONG_RUN_PROGRESSION_KM: f64 = 2.0;

    /// Default long-ride growth per loading week (hours)
    pub const DEFAULT_LONG_RIDE_PROGRESSION_HOURS: f64 = 0.5;

    /// Long-session increase may not exceed this share of the week's volume increase
    pub const LONG_SESSION_INCREASE_SHARE: f64 = 0.40;

    /// Volume and long session multiplier applied in recovery weeks ("60 % cutback")
    pub const RECOVERY_CUTBACK_FACTOR: f64 = 0.60;

    /// Default recovery week cadence (every 4th week)
    pub const DEFAULT_RECOVERY_CADENCE: u32 = 4;

    /// Race week volume as a fraction of current capacity
    pub const RACE_WEEK_VOLUME_FACTOR: f64 = 0.40;

    /// Taper factor for the week closest to the race
    pub const TAPER_FACTOR_MIN: f64 = 0.60;

    /// Taper factor ceiling (week furthest from the race)
    pub const TAPER_FACTOR_MAX: f64 = 0.90;

    /// Taper factor step per week away from the race
    pub const TAPER_FACTOR_STEP: f64 = 0.15;

    /// Weeks in the Peak block
    pub const PEAK_WEEKS: u32 = 3;

    /// Weeks in the Build block
    pub const BUILD_WEEKS: u32 = 4;

    /// Share of compressed non-taper weeks assigned to Build in a short plan
    pub const SHORT_PLAN_BUILD_SHARE: f64 = 0.60;

    /// Long-session share above which a week is long-run dominant
    pub const LONG_RUN_DOMINANT_SHARE: f64 = 0.50;

    /// Longest supported plan (weeks)
    pub const MAX_PLAN_WEEKS: i64 = 52;

    /// Upper bound accepted for a percentage progression rate
    pub const MAX_PROGRESSION_RATE: f64 = 0.30;
}

/// Long-session ratio constraints (share of weekly volume)
pub mod long_run {
    /// Ratio at the reference volume
    pub const BASE_RATIO: f64 = 0.45;

    /// Ratio decay per km above the reference volume
    pub const RATIO_DECAY_PER_KM: f64 = 0.0025;

    /// Reference weekly volume for the decay formula (km)
    pub const REFERENCE_VOLUME_KM: f64 = 30.0;

    /// Lower clamp of the decayed ratio
    pub const MIN_RATIO: f64 = 0.20;

    /// Upper clamp of the decayed ratio
    pub const MAX_RATIO: f64 = 0.50;

    /// Peak-phase ratio ceiling for marathon plans
    pub const PEAK_RATIO_MARATHON: f64 = 0.60;

    /// Peak-phase ratio ceiling for half-marathon plans
    pub const PEAK_RATIO_HALF: f64 = 0.55;

    /// Peak-phase long run floor for marathon plans (km)
    pub const PEAK_FLOOR_MARATHON_KM: f64 = 28.0;

    /// Peak-phase long run floor for half-marathon plans (km)
    pub const PEAK_FLOOR_HALF_KM: f64 = 16.0;

    /// Recovery weeks never exceed this long-session ratio
    pub const RECOVERY_MAX_RATIO: f64 = 0.40;

    /// Recent average weekly volume required before the Peak floor applies (km)
    pub const PEAK_FLOOR_MIN_RECENT_VOLUME_KM: f64 = 55.0;

    /// Absolute ceiling for a single long run (km)
    pub const ABSOLUTE_MAX_LONG_RUN_KM: f64 = 35.0;
}

/// Maximum weekly volume by race type (km for running, TSS for cycling)
pub mod weekly_ceilings {
    /// Marathon weekly ceiling (km)
    pub const MARATHON_KM: f64 = 120.0;
    /// Half marathon weekly ceiling (km)
    pub const HALF_MARATHON_KM: f64 = 80.0;
    /// 10k weekly ceiling (km)
    pub const TEN_K_KM: f64 = 60.0;
    /// 5k weekly ceiling (km)
    pub const FIVE_K_KM: f64 = 50.0;
    /// General running fitness weekly ceiling (km)
    pub const GENERAL_RUNNING_KM: f64 = 70.0;
    /// Gran fondo weekly ceiling (TSS)
    pub const GRAN_FONDO_TSS: f64 = 900.0;
    /// Road race weekly ceiling (TSS)
    pub const ROAD_RACE_TSS: f64 = 850.0;
    /// Time trial weekly ceiling (TSS)
    pub const TIME_TRIAL_TSS: f64 = 700.0;
    /// General cycling fitness weekly ceiling (TSS)
    pub const GENERAL_CYCLING_TSS: f64 = 700.0;
}

/// Cycling load model
pub mod cycling {
    /// Weekly TSS per point of CTL (CTL is a daily average)
    pub const DAYS_PER_WEEK: f64 = 7.0;

    /// Default ramp rate (CTL points per week)
    pub const DEFAULT_RAMP_RATE: f64 = 5.0;

    /// Upper bound accepted for the ramp rate (CTL points per week)
    pub const MAX_RAMP_RATE: f64 = 10.0;

    /// Training stress per hour at each Friel zone (IF² × 100)
    pub const TSS_PER_HOUR_Z1: f64 = 30.0;
    /// Endurance riding
    pub const TSS_PER_HOUR_Z2: f64 = 50.0;
    /// Tempo riding
    pub const TSS_PER_HOUR_Z3: f64 = 68.0;
    /// Threshold riding
    pub const TSS_PER_HOUR_Z4: f64 = 90.0;
    /// VO2max and above
    pub const TSS_PER_HOUR_Z5: f64 = 115.0;

    /// Long-ride share ceiling outside Peak
    pub const LONG_RIDE_MAX_SHARE: f64 = 0.45;
    /// Long-ride share ceiling during Peak
    pub const LONG_RIDE_PEAK_SHARE: f64 = 0.50;
    /// Long-ride share ceiling in recovery weeks
    pub const LONG_RIDE_RECOVERY_SHARE: f64 = 0.40;
}

/// Zone calculation multipliers and bands
pub mod zones {
    /// Z1 starts slower than this multiple of threshold pace
    pub const PACE_Z1_SLOWER_THAN: f64 = 1.29;
    /// Z2 fast boundary
    pub const PACE_Z2_FAST: f64 = 1.14;
    /// Z3 fast boundary
    pub const PACE_Z3_FAST: f64 = 1.06;
    /// Z4 fast boundary (threshold pace)
    pub const PACE_Z4_FAST: f64 = 1.00;
    /// Z5 starts faster than this multiple of threshold pace
    pub const PACE_Z5_FASTER_THAN: f64 = 0.98;

    /// Open-ended Z1 representative pace extension
    pub const OPEN_SLOW_BAND_EXTENSION: f64 = 1.05;
    /// Open-ended Z5 representative pace extension
    pub const OPEN_FAST_BAND_EXTENSION: f64 = 0.97;

    /// Power zone upper bounds as % of FTP (Z1..Z5)
    pub const POWER_UPPER_PERCENT: [f64; 5] = [55.0, 75.0, 90.0, 105.0, 120.0];

    /// Heart-rate-reserve lower bounds (Z1..Z5), upper bound of Z5 is 100 %
    pub const HRR_LOWER_PERCENT: [f64; 5] = [50.0, 60.0, 70.0, 80.0, 90.0];

    /// Fallback threshold pace when no zone data is available (5:00 min/km)
    pub const FALLBACK_THRESHOLD_PACE_SEC_PER_KM: f64 = 300.0;
}

/// Intensity distribution targets (Low / Threshold / High percentages)
pub mod distribution {
    /// Pyramidal model for low-volume weeks
    pub const PYRAMIDAL: (f64, f64, f64) = (50.0, 40.0, 10.0);
    /// Hybrid model for mid-volume weeks
    pub const HYBRID: (f64, f64, f64) = (65.0, 25.0, 10.0);
    /// Polarized model for high-volume weeks
    pub const POLARIZED: (f64, f64, f64) = (80.0, 5.0, 15.0);

    /// Running weekly km below which the pyramidal model applies
    pub const RUNNING_LOW_VOLUME_KM: f64 = 50.0;
    /// Running weekly km below which the hybrid model applies
    pub const RUNNING_MID_VOLUME_KM: f64 = 80.0;
    /// Cycling weekly hours below which the pyramidal model applies
    pub const CYCLING_LOW_VOLUME_HOURS: f64 = 8.0;
    /// Cycling weekly hours below which the hybrid model applies
    pub const CYCLING_MID_VOLUME_HOURS: f64 = 12.0;

    /// A bucket this many percentage points below target triggers an upgrade
    pub const DEFICIT_TOLERANCE_PCT: f64 = 10.0;
}

/// Weekly scheduling parameters
pub mod scheduling {
    /// Fixed warm-up overhead for upgraded quality sessions (seconds)
    pub const QUALITY_WARMUP_SECONDS: u32 = 600;
    /// Fixed cool-down overhead for upgraded quality sessions (seconds)
    pub const QUALITY_COOLDOWN_SECONDS: u32 = 300;
    /// Shortest main set worth scheduling for a quality session (seconds)
    pub const MIN_QUALITY_MAIN_SECONDS: u32 = 300;
    /// Strength session duration (seconds)
    pub const STRENGTH_SESSION_SECONDS: u32 = 2700;
    /// Share of weekly volume given to a key (quality) session
    pub const KEY_SESSION_VOLUME_SHARE: f64 = 0.15;
    /// Shortest run placed on an easy day (km)
    pub const MIN_RUN_KM: f64 = 2.0;
    /// Easy runs at or below this distance are scheduled as recovery runs (km)
    pub const RECOVERY_RUN_MAX_KM: f64 = 5.0;
    /// Shortest ride placed on an easy day (TSS)
    pub const MIN_RIDE_TSS: f64 = 20.0;
    /// Rides at or below this load are scheduled as recovery rides (TSS)
    pub const RECOVERY_RIDE_MAX_TSS: f64 = 35.0;
}
