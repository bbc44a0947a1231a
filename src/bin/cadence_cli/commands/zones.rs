// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Zone command for cadence-cli
// ABOUTME: Prints the zone set for threshold pace, power or heart-rate inputs

use anyhow::Result;
use cadence_intelligence::zones::{ThresholdData, ZoneCalculator};

use crate::helpers::io::print_json;

/// Print zones for the given thresholds
pub fn show(thresholds: &ThresholdData, pretty: bool) -> Result<()> {
    let zones = ZoneCalculator::new().compute(thresholds);
    print_json(&zones, pretty)
}
