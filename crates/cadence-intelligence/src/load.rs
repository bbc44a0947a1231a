// ABOUTME: Conversions between step structures and sport volume units
// ABOUTME: Running steps map to kilometres through zone paces, cycling steps to TSS through zone intensity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use cadence_core::constants::cycling::{
    TSS_PER_HOUR_Z1, TSS_PER_HOUR_Z2, TSS_PER_HOUR_Z3, TSS_PER_HOUR_Z4, TSS_PER_HOUR_Z5,
};
use cadence_core::models::{Sport, Step, StepLeaf, Zone};

use crate::zones::ZonePaces;

/// Training stress per hour ridden in a zone
#[must_use]
pub const fn tss_per_hour(zone: Zone) -> f64 {
    match zone {
        Zone::Z1 => TSS_PER_HOUR_Z1,
        Zone::Z2 => TSS_PER_HOUR_Z2,
        Zone::Z3 => TSS_PER_HOUR_Z3,
        Zone::Z4 => TSS_PER_HOUR_Z4,
        Zone::Z5a | Zone::Z5b | Zone::Z5c => TSS_PER_HOUR_Z5,
    }
}

/// Distance covered by a step list (km)
///
/// Distance-authored leaves count their distance, time-authored leaves are
/// converted at the zone's pace.
#[must_use]
pub fn steps_distance_km(steps: &[Step], paces: &ZonePaces) -> f64 {
    let mut km = 0.0;
    for step in steps {
        step.for_each_leaf(&mut |leaf: &StepLeaf, times: u32| {
            let one = leaf.distance_km.unwrap_or_else(|| {
                paces.km_for_seconds(leaf.zone, f64::from(leaf.duration_seconds))
            });
            km += one * f64::from(times);
        });
    }
    km
}

/// Training stress of a step list (TSS)
#[must_use]
pub fn steps_load(steps: &[Step]) -> f64 {
    let mut tss = 0.0;
    for step in steps {
        step.for_each_leaf(&mut |leaf: &StepLeaf, times: u32| {
            tss += f64::from(leaf.duration_seconds) * f64::from(times) / 3600.0
                * tss_per_hour(leaf.zone);
        });
    }
    tss
}

/// Volume of a step list in the sport's weekly unit (km or TSS)
#[must_use]
pub fn steps_volume(sport: Sport, steps: &[Step], paces: &ZonePaces) -> f64 {
    match sport {
        Sport::Running => steps_distance_km(steps, paces),
        Sport::Cycling => steps_load(steps),
    }
}

/// Seconds needed to produce `volume` of the sport's unit at a steady zone
#[must_use]
pub fn seconds_for_volume(sport: Sport, volume: f64, zone: Zone, paces: &ZonePaces) -> f64 {
    match sport {
        Sport::Running => paces.seconds_for_km(zone, volume),
        Sport::Cycling => volume / tss_per_hour(zone) * 3600.0,
    }
}

/// Volume produced by `seconds` at a steady zone
#[must_use]
pub fn volume_for_seconds(sport: Sport, seconds: f64, zone: Zone, paces: &ZonePaces) -> f64 {
    match sport {
        Sport::Running => paces.km_for_seconds(zone, seconds),
        Sport::Cycling => seconds / 3600.0 * tss_per_hour(zone),
    }
}
