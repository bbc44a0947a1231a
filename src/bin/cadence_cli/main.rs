// ABOUTME: Cadence CLI - command-line front end for the training planner
// ABOUTME: Generates full plans, macrocycles, single weeks, and zone tables as JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Full plan from a request file
//! cadence-cli plan --input request.json --pretty
//!
//! # Only the week descriptors
//! cadence-cli macrocycle --input request.json
//!
//! # Regenerate one week
//! cadence-cli week --input request.json --week 5
//!
//! # Zones for a 4:30/km threshold with heart-rate bands
//! cadence-cli zones --threshold-pace 270 --resting-hr 50 --max-hr 190
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;

use anyhow::Result;
use cadence_intelligence::zones::ThresholdData;
use cadence_planner::logging::LoggingConfig;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cadence-cli",
    about = "Cadence training planner CLI",
    long_about = "Periodized running and cycling plans from a JSON request. Output is JSON on stdout; logs go to stderr."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline and print the training plan
    Plan {
        /// Request file (`-` for stdin)
        #[arg(long, short = 'i')]
        input: PathBuf,
    },

    /// Print week descriptors and planner warnings only
    Macrocycle {
        /// Request file (`-` for stdin)
        #[arg(long, short = 'i')]
        input: PathBuf,
    },

    /// Regenerate a single week
    Week {
        /// Request file (`-` for stdin)
        #[arg(long, short = 'i')]
        input: PathBuf,

        /// 1-based week number
        #[arg(long, short = 'w')]
        week: u32,
    },

    /// Print training zones
    Zones {
        /// Threshold pace (sec/km)
        #[arg(long)]
        threshold_pace: Option<f64>,

        /// Functional threshold power (watts)
        #[arg(long)]
        threshold_power: Option<f64>,

        /// Resting heart rate (bpm)
        #[arg(long)]
        resting_hr: Option<u32>,

        /// Maximum heart rate (bpm)
        #[arg(long)]
        max_hr: Option<u32>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env();
    let logging = if cli.verbose {
        logging.with_level("debug")
    } else {
        logging
    };
    logging.init()?;

    match cli.command {
        Command::Plan { input } => commands::plan::generate(&input, cli.pretty),
        Command::Macrocycle { input } => commands::plan::macrocycle(&input, cli.pretty),
        Command::Week { input, week } => commands::plan::week(&input, week, cli.pretty),
        Command::Zones {
            threshold_pace,
            threshold_power,
            resting_hr,
            max_hr,
        } => {
            let thresholds = ThresholdData {
                threshold_pace_sec_per_km: threshold_pace,
                threshold_power_watts: threshold_power,
                resting_hr,
                max_hr,
                pace_zone_table: None,
            };
            commands::zones::show(&thresholds, cli.pretty)
        }
    }
}
