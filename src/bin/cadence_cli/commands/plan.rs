// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Plan commands for cadence-cli
// ABOUTME: Runs the full pipeline or the macrocycle stage for a JSON request

use std::path::Path;

use anyhow::Result;
use cadence_planner::PlanSession;
use tracing::info;

use crate::helpers::io::{print_json, read_request};

/// Full plan: macrocycle, schedules, distribution and durations
pub fn generate(input: &Path, pretty: bool) -> Result<()> {
    let session = PlanSession::from_env(read_request(input)?)?;
    let plan = session.generate();
    info!(weeks = plan.weeks.len(), "Plan ready");
    print_json(&plan, pretty)
}

/// One week of the plan
pub fn week(input: &Path, week_number: u32, pretty: bool) -> Result<()> {
    let session = PlanSession::from_env(read_request(input)?)?;
    let week = session.regenerate_week(week_number)?;
    print_json(&week, pretty)
}

/// Week descriptors and planner warnings only
pub fn macrocycle(input: &Path, pretty: bool) -> Result<()> {
    let session = PlanSession::from_env(read_request(input)?)?;
    print_json(&session.macrocycle(), pretty)
}
