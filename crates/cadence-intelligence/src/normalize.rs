// ABOUTME: Boundary adapter turning loosely-shaped external workout steps into canonical steps
// ABOUTME: Accepts zone/intensity, steps/structure, duration/duration_seconds and reps/repetitions spellings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Step Normalization
//!
//! Template registries and AI-generated plans describe steps with several
//! field spellings. Everything entering the engine goes through
//! [`ExternalStep::normalize`] so the planner only ever sees [`Step`].

use std::str::FromStr;

use cadence_core::errors::{AppError, AppResult};
use cadence_core::models::{Step, StepKind, StepLeaf, Zone};
use serde::{Deserialize, Serialize};

use crate::zones::ZonePaces;

/// Deepest repeat nesting accepted from outside
const MAX_NESTING: usize = 4;

/// Zone written as text (`"Z2"`, `"z5b"`) or as a bare number
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ExternalZone {
    /// Zone number 1-5
    Number(u8),
    /// Zone code
    Text(String),
}

impl ExternalZone {
    fn to_zone(&self) -> AppResult<Zone> {
        match self {
            Self::Number(n) => Zone::from_str(&n.to_string()),
            Self::Text(text) => Zone::from_str(text),
        }
    }
}

/// Step as it arrives from a template registry or AI response
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExternalStep {
    /// Step code (`WU`, `W`, `R`, `CD` or long forms); work when absent
    #[serde(default, alias = "code", alias = "type")]
    pub kind: Option<String>,
    /// Duration in seconds
    #[serde(default, alias = "duration_seconds", alias = "durationSeconds")]
    pub duration: Option<f64>,
    /// Distance in km, used when no duration is given
    #[serde(default, alias = "distanceKm", alias = "distance")]
    pub distance_km: Option<f64>,
    /// Target zone
    #[serde(default, alias = "intensity")]
    pub zone: Option<ExternalZone>,
    /// Repetitions of a nested block
    #[serde(default, alias = "repetitions")]
    pub reps: Option<u32>,
    /// Nested block
    #[serde(default, alias = "structure")]
    pub steps: Option<Vec<ExternalStep>>,
}

impl ExternalStep {
    /// Convert to the canonical step
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` for unknown codes or zones, `MissingRequiredField`
    /// when a leaf has no zone or no length, and `ValueOutOfRange` for
    /// negative lengths, zero repetitions, or excessive nesting
    pub fn normalize(&self, paces: &ZonePaces) -> AppResult<Step> {
        self.normalize_at(paces, 0)
    }

    fn normalize_at(&self, paces: &ZonePaces, depth: usize) -> AppResult<Step> {
        match &self.steps {
            Some(children) => {
                if depth >= MAX_NESTING {
                    return Err(AppError::value_out_of_range(format!(
                        "repeat blocks nested deeper than {MAX_NESTING}"
                    )));
                }
                if children.is_empty() {
                    return Err(AppError::invalid_input("repeat block has no steps"));
                }
                let repetitions = self.reps.unwrap_or(1);
                if repetitions == 0 {
                    return Err(AppError::value_out_of_range("repetitions must be at least 1")
                        .with_field("reps"));
                }
                let steps = children
                    .iter()
                    .map(|child| child.normalize_at(paces, depth + 1))
                    .collect::<AppResult<Vec<_>>>()?;
                Ok(Step::repeat(repetitions, steps))
            }
            None => self.normalize_leaf(paces),
        }
    }

    fn normalize_leaf(&self, paces: &ZonePaces) -> AppResult<Step> {
        let zone = self
            .zone
            .as_ref()
            .ok_or_else(|| AppError::missing_field("zone"))?
            .to_zone()?;
        let kind = self
            .kind
            .as_deref()
            .map_or(Ok(StepKind::Work), StepKind::from_str)?;

        let (duration_seconds, distance_km) = match (self.duration, self.distance_km) {
            (Some(seconds), _) => (checked_length(seconds, "duration")?, None),
            (None, Some(km)) => {
                let km = checked_length(km, "distance_km")?;
                (paces.seconds_for_km(zone, km), Some(km))
            }
            (None, None) => return Err(AppError::missing_field("duration")),
        };

        Ok(Step::Leaf(StepLeaf {
            kind,
            duration_seconds: duration_seconds.round() as u32,
            distance_km,
            zone,
        }))
    }
}

fn checked_length(value: f64, field: &str) -> AppResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(AppError::value_out_of_range(format!("{field} must be a non-negative number"))
            .with_field(field))
    }
}

/// Normalize a list of external steps
///
/// # Errors
///
/// Returns the first normalization error
pub fn normalize_steps(steps: &[ExternalStep], paces: &ZonePaces) -> AppResult<Vec<Step>> {
    steps.iter().map(|step| step.normalize(paces)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::errors::ErrorCode;

    fn paces() -> ZonePaces {
        ZonePaces::from_threshold(300.0)
    }

    #[test]
    fn test_alias_spellings_agree() {
        let a: ExternalStep =
            serde_json::from_str(r#"{"code":"WU","duration":600,"zone":"Z1"}"#).unwrap();
        let b: ExternalStep =
            serde_json::from_str(r#"{"type":"warmup","duration_seconds":600,"intensity":1}"#)
                .unwrap();
        assert_eq!(a.normalize(&paces()).unwrap(), b.normalize(&paces()).unwrap());
    }

    #[test]
    fn test_nested_structure() {
        let json = r#"{"repetitions":4,"structure":[
            {"code":"W","durationSeconds":180,"intensity":"z5a"},
            {"code":"R","duration":120,"zone":"Z1"}
        ]}"#;
        let step: ExternalStep = serde_json::from_str(json).unwrap();
        let step = step.normalize(&paces()).unwrap();
        assert_eq!(step.total_seconds(), 4 * 300);
        assert_eq!(step.depth(), 1);
    }

    #[test]
    fn test_distance_only_leaf() {
        let p = paces();
        let step: ExternalStep =
            serde_json::from_str(r#"{"distanceKm":2.0,"zone":"Z3"}"#).unwrap();
        let Step::Leaf(leaf) = step.normalize(&p).unwrap() else {
            panic!("expected a leaf");
        };
        assert_eq!(leaf.kind, StepKind::Work);
        assert_eq!(leaf.distance_km, Some(2.0));
        assert_eq!(leaf.duration_seconds, (2.0 * p.pace(Zone::Z3)).round() as u32);
    }

    #[test]
    fn test_rejections() {
        let p = paces();
        let missing_zone = ExternalStep {
            duration: Some(60.0),
            ..ExternalStep::default()
        };
        assert_eq!(
            missing_zone.normalize(&p).unwrap_err().code,
            ErrorCode::MissingRequiredField
        );

        let bad_zone = ExternalStep {
            duration: Some(60.0),
            zone: Some(ExternalZone::Text("Z9".to_owned())),
            ..ExternalStep::default()
        };
        assert_eq!(bad_zone.normalize(&p).unwrap_err().code, ErrorCode::InvalidFormat);

        let negative = ExternalStep {
            duration: Some(-5.0),
            zone: Some(ExternalZone::Number(2)),
            ..ExternalStep::default()
        };
        assert_eq!(negative.normalize(&p).unwrap_err().code, ErrorCode::ValueOutOfRange);

        let empty_block = ExternalStep {
            reps: Some(3),
            steps: Some(Vec::new()),
            ..ExternalStep::default()
        };
        assert_eq!(empty_block.normalize(&p).unwrap_err().code, ErrorCode::InvalidInput);
    }
}
