// ABOUTME: Intensity distribution models: realized time-in-zone percentages and target distribution shapes
// ABOUTME: Percentages are bucket time over total non-strength time, times 100
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::distribution::{HYBRID, POLARIZED, PYRAMIDAL};

use super::zones::IntensityBucket;

/// Realized time in each scientific bucket
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct IntensityDistribution {
    /// Minutes below the first threshold
    pub low_minutes: f64,
    /// Minutes between thresholds
    pub threshold_minutes: f64,
    /// Minutes above the second threshold
    pub high_minutes: f64,
}

impl IntensityDistribution {
    /// Add seconds to a bucket
    pub fn add_seconds(&mut self, bucket: IntensityBucket, seconds: f64) {
        let minutes = seconds / 60.0;
        match bucket {
            IntensityBucket::Low => self.low_minutes += minutes,
            IntensityBucket::Threshold => self.threshold_minutes += minutes,
            IntensityBucket::High => self.high_minutes += minutes,
        }
    }

    /// Total minutes across buckets
    #[must_use]
    pub fn total_minutes(&self) -> f64 {
        self.low_minutes + self.threshold_minutes + self.high_minutes
    }

    fn percent(&self, minutes: f64) -> f64 {
        let total = self.total_minutes();
        if total <= 0.0 {
            0.0
        } else {
            minutes / total * 100.0
        }
    }

    /// Low bucket share (%)
    #[must_use]
    pub fn low_pct(&self) -> f64 {
        self.percent(self.low_minutes)
    }

    /// Threshold bucket share (%)
    #[must_use]
    pub fn threshold_pct(&self) -> f64 {
        self.percent(self.threshold_minutes)
    }

    /// High bucket share (%)
    #[must_use]
    pub fn high_pct(&self) -> f64 {
        self.percent(self.high_minutes)
    }

    /// Share of a bucket (%)
    #[must_use]
    pub fn pct(&self, bucket: IntensityBucket) -> f64 {
        match bucket {
            IntensityBucket::Low => self.low_pct(),
            IntensityBucket::Threshold => self.threshold_pct(),
            IntensityBucket::High => self.high_pct(),
        }
    }
}

/// Target percentages for the three buckets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DistributionTarget {
    /// Low bucket target (%)
    pub low_pct: f64,
    /// Threshold bucket target (%)
    pub threshold_pct: f64,
    /// High bucket target (%)
    pub high_pct: f64,
}

impl DistributionTarget {
    const fn from_tuple((low_pct, threshold_pct, high_pct): (f64, f64, f64)) -> Self {
        Self {
            low_pct,
            threshold_pct,
            high_pct,
        }
    }

    /// Target share of a bucket (%)
    #[must_use]
    pub const fn pct(&self, bucket: IntensityBucket) -> f64 {
        match bucket {
            IntensityBucket::Low => self.low_pct,
            IntensityBucket::Threshold => self.threshold_pct,
            IntensityBucket::High => self.high_pct,
        }
    }
}

/// Named target distribution shape, chosen by weekly volume
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DistributionModel {
    /// Low volume: 50 / 40 / 10
    Pyramidal,
    /// Mid volume: 65 / 25 / 10
    Hybrid,
    /// High volume: 80 / 5 / 15
    Polarized,
}

impl DistributionModel {
    /// Target percentages for this model
    #[must_use]
    pub const fn target(&self) -> DistributionTarget {
        match self {
            Self::Pyramidal => DistributionTarget::from_tuple(PYRAMIDAL),
            Self::Hybrid => DistributionTarget::from_tuple(HYBRID),
            Self::Polarized => DistributionTarget::from_tuple(POLARIZED),
        }
    }
}

impl fmt::Display for DistributionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pyramidal => write!(f, "pyramidal"),
            Self::Hybrid => write!(f, "hybrid"),
            Self::Polarized => write!(f, "polarized"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentages_from_minutes() {
        let mut dist = IntensityDistribution::default();
        dist.add_seconds(IntensityBucket::Low, 3600.0);
        dist.add_seconds(IntensityBucket::Threshold, 1800.0);
        dist.add_seconds(IntensityBucket::High, 1800.0);
        assert!((dist.total_minutes() - 120.0).abs() < 1e-9);
        assert!((dist.low_pct() - 50.0).abs() < 1e-9);
        assert!((dist.threshold_pct() - 25.0).abs() < 1e-9);
        assert!((dist.pct(IntensityBucket::High) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_distribution_is_zero() {
        let dist = IntensityDistribution::default();
        assert!(dist.threshold_pct().abs() < f64::EPSILON);
    }

    #[test]
    fn test_model_targets() {
        let target = DistributionModel::Pyramidal.target();
        assert!((target.threshold_pct - 40.0).abs() < f64::EPSILON);
        let target = DistributionModel::Polarized.target();
        assert!((target.pct(IntensityBucket::Low) - 80.0).abs() < f64::EPSILON);
    }
}
