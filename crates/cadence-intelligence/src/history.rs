// ABOUTME: Starting-volume estimate from already-fetched recent activity history
// ABOUTME: Sums running distance in the last full Mon-Sun week and averages the last four weeks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::macrocycle::{monday_of, AthleteHistory};

/// Weeks averaged for the recent-volume figure
const AVERAGE_WINDOW_WEEKS: i64 = 4;

/// Activity types counted as running
const RUNNING_TYPES: [&str; 3] = ["run", "trailrun", "virtualrun"];

/// One activity from a fitness provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityRecord {
    /// Provider activity type (`Run`, `Ride`, ...)
    #[serde(alias = "type")]
    pub activity_type: String,
    /// Distance in metres
    #[serde(alias = "distanceMeters", default)]
    pub distance_meters: f64,
    /// Local start time (`YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS`)
    #[serde(alias = "startDateLocal")]
    pub start_date_local: String,
}

impl ActivityRecord {
    /// Whether the activity counts toward running volume
    #[must_use]
    pub fn is_running(&self) -> bool {
        let normalized = self.activity_type.to_ascii_lowercase().replace(['_', ' '], "");
        RUNNING_TYPES.contains(&normalized.as_str())
    }

    /// Local start date, `None` when malformed
    #[must_use]
    pub fn start_date(&self) -> Option<NaiveDate> {
        let raw = self.start_date_local.trim();
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
            .map(|dt| dt.date())
            .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
            .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
            .ok()
    }
}

/// Where the starting volume came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VolumeSource {
    /// Running distance in the last full week
    History,
    /// Caller-supplied default
    Default,
}

/// Starting weekly volume for a running plan
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct StartingVolume {
    /// Weekly km to start the plan from
    pub weekly_km: f64,
    /// Average over the last four full weeks, when any running was logged
    pub avg_recent_km: Option<f64>,
    /// Origin of `weekly_km`
    pub source: VolumeSource,
}

impl StartingVolume {
    /// Fill the recent-volume average of `history` when the caller left it empty
    #[must_use]
    pub fn apply_to(&self, mut history: AthleteHistory) -> AthleteHistory {
        if history.avg_recent_volume_km.is_none() {
            history.avg_recent_volume_km = self.avg_recent_km;
        }
        history
    }
}

/// Estimate the starting weekly volume from recent activities
///
/// Counts running-type activities in the Monday-to-Sunday week before the
/// week containing `reference_date`. Falls back to `default_km` when that week
/// has no running. Records with malformed dates are skipped.
#[must_use]
pub fn estimate_starting_volume(
    history: &[ActivityRecord],
    reference_date: NaiveDate,
    default_km: f64,
) -> StartingVolume {
    let current_week = monday_of(reference_date);
    let mut weekly_km = [0.0_f64; AVERAGE_WINDOW_WEEKS as usize];
    let mut counted = 0_usize;

    for record in history.iter().filter(|r| r.is_running()) {
        let Some(date) = record.start_date() else {
            warn!(
                start_date_local = %record.start_date_local,
                "Skipping activity with malformed start date"
            );
            continue;
        };
        let weeks_back = (current_week - monday_of(date)).num_weeks();
        if (1..=AVERAGE_WINDOW_WEEKS).contains(&weeks_back) {
            let index = (weeks_back - 1) as usize;
            weekly_km[index] += record.distance_meters.max(0.0) / 1000.0;
            counted += 1;
        }
    }

    let avg_recent_km = (counted > 0)
        .then(|| weekly_km.iter().sum::<f64>() / AVERAGE_WINDOW_WEEKS as f64);
    let last_week = weekly_km[0];

    debug!(
        window_start = %(current_week - Duration::weeks(1)),
        last_week_km = last_week,
        ?avg_recent_km,
        counted,
        "Estimated starting volume from history"
    );

    if last_week > 0.0 {
        StartingVolume {
            weekly_km: (last_week * 10.0).round() / 10.0,
            avg_recent_km,
            source: VolumeSource::History,
        }
    } else {
        StartingVolume {
            weekly_km: default_km,
            avg_recent_km,
            source: VolumeSource::Default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: &str, meters: f64, date: &str) -> ActivityRecord {
        ActivityRecord {
            activity_type: kind.to_owned(),
            distance_meters: meters,
            start_date_local: date.to_owned(),
        }
    }

    fn wednesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()
    }

    #[test]
    fn test_sums_previous_week_runs() {
        let history = vec![
            record("Run", 10_000.0, "2025-03-03T07:00:00"),
            record("TrailRun", 15_500.0, "2025-03-09T08:30:00"),
            record("Ride", 60_000.0, "2025-03-05T08:30:00"),
            // Current week is ignored
            record("Run", 8_000.0, "2025-03-10"),
        ];
        let volume = estimate_starting_volume(&history, wednesday(), 30.0);
        assert_eq!(volume.source, VolumeSource::History);
        assert!((volume.weekly_km - 25.5).abs() < 1e-9);
    }

    #[test]
    fn test_falls_back_to_default() {
        let history = vec![record("Ride", 60_000.0, "2025-03-05")];
        let volume = estimate_starting_volume(&history, wednesday(), 30.0);
        assert_eq!(volume.source, VolumeSource::Default);
        assert!((volume.weekly_km - 30.0).abs() < f64::EPSILON);
        assert!(volume.avg_recent_km.is_none());
    }

    #[test]
    fn test_malformed_dates_skipped() {
        let history = vec![
            record("Run", 12_000.0, "yesterday"),
            record("run", 6_000.0, "2025-03-04T06:15:00Z"),
        ];
        let volume = estimate_starting_volume(&history, wednesday(), 30.0);
        assert!((volume.weekly_km - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_four_week_average() {
        let history = vec![
            record("Run", 40_000.0, "2025-03-04"),
            record("Run", 60_000.0, "2025-02-25"),
            record("Run", 60_000.0, "2025-02-18"),
            record("Run", 80_000.0, "2025-02-11"),
            // Five weeks back, outside the window
            record("Run", 100_000.0, "2025-02-04"),
        ];
        let volume = estimate_starting_volume(&history, wednesday(), 30.0);
        assert!((volume.avg_recent_km.unwrap() - 60.0).abs() < 1e-9);

        let gated = volume.apply_to(AthleteHistory::default());
        assert_eq!(gated.avg_recent_volume_km, volume.avg_recent_km);
    }

    #[test]
    fn test_camel_case_records() {
        let json = r#"[{"type":"VirtualRun","distanceMeters":5000,"startDateLocal":"2025-03-06T18:00:00"}]"#;
        let history: Vec<ActivityRecord> = serde_json::from_str(json).unwrap();
        assert!(history[0].is_running());
        let volume = estimate_starting_volume(&history, wednesday(), 30.0);
        assert!((volume.weekly_km - 5.0).abs() < 1e-9);
    }
}
