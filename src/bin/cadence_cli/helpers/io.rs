// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Input and output helpers for cadence-cli
// ABOUTME: Reads plan requests from a file or stdin and prints JSON to stdout

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use cadence_planner::PlanRequest;
use serde::Serialize;

/// Read a plan request; `-` reads stdin
pub fn read_request(path: &Path) -> Result<PlanRequest> {
    let raw = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read request from stdin")?;
        buffer
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read request file {}", path.display()))?
    };
    serde_json::from_str(&raw).context("Request is not a valid plan request")
}

/// Print a value as JSON on stdout
pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    const REQUEST: &str = r#"{
        "athlete": {
            "sport": "running",
            "race_type": "10k",
            "thresholds": { "threshold_pace_sec_per_km": 240 },
            "start_long_session": 10
        },
        "plan_start_date": "2025-04-07",
        "goal_date": "2025-05-31",
        "availability": [1, 1, 1, 1, 1, 1, 2]
    }"#;

    #[test]
    fn test_read_request_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(REQUEST.as_bytes()).unwrap();

        let request = read_request(file.path()).unwrap();
        assert!((request.athlete.start_long_session - 10.0).abs() < f64::EPSILON);
        assert!(request.athlete.start_volume.is_none());
    }

    #[test]
    fn test_read_request_reports_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ \"athlete\": ").unwrap();

        let error = read_request(file.path()).unwrap_err();
        assert!(error.to_string().contains("not a valid plan request"));
    }

    #[test]
    fn test_read_request_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let error = read_request(&dir.path().join("missing.json")).unwrap_err();
        assert!(error.to_string().contains("Failed to read request file"));
    }
}
