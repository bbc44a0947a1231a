// ABOUTME: Parser for the compact workout micro-syntax returned by AI plan generators
// ABOUTME: Hydrates `CODE~SECONDS~ZONE` leaves, `|` separators and `Nx(...)` repeat blocks into steps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Micro-syntax Hydration
//!
//! ```text
//! sequence := block ('|' block)*
//! block    := repeat | leaf
//! repeat   := COUNT ('x' | 'X') [LETTER] '(' sequence ')'
//! leaf     := CODE '~' SECONDS '~' ZONE
//! ```
//!
//! `WU~600~Z1|4x(W~180~Z5a|R~120~Z1)|CD~300~Z1` is a warm-up, four
//! three-minute efforts with two-minute recoveries, and a cool-down. The
//! optional letter after `x` (`4xC(...)`) is a block marker and is ignored.

use std::str::FromStr;

use cadence_core::errors::{AppError, ErrorCode};
use cadence_core::models::{Step, StepKind, Zone};
use thiserror::Error;

/// Deepest repeat nesting accepted
const MAX_DEPTH: usize = 4;

/// Micro-syntax parse failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HydrationError {
    /// Nothing to parse
    #[error("empty workout text")]
    Empty,

    /// Input ended inside a block
    #[error("unexpected end of input at {position}")]
    UnexpectedEnd {
        /// Byte offset
        position: usize,
    },

    /// Character not allowed here
    #[error("unexpected '{found}' at {position}")]
    UnexpectedChar {
        /// Offending character
        found: char,
        /// Byte offset
        position: usize,
    },

    /// Leaf without exactly three `~`-separated fields
    #[error("malformed step '{0}', expected CODE~SECONDS~ZONE")]
    MalformedLeaf(String),

    /// Unknown step code
    #[error("unknown step code '{0}'")]
    UnknownCode(String),

    /// Unknown zone
    #[error("unknown zone '{0}'")]
    UnknownZone(String),

    /// Duration that is not a whole number of seconds
    #[error("invalid duration '{0}'")]
    InvalidDuration(String),

    /// Repeat count of zero or not a number
    #[error("invalid repeat count '{0}'")]
    InvalidRepetitions(String),

    /// Repeat blocks nested too deeply
    #[error("repeat blocks nested deeper than {MAX_DEPTH}")]
    TooDeep,
}

impl From<HydrationError> for AppError {
    fn from(error: HydrationError) -> Self {
        Self::new(ErrorCode::InvalidFormat, error.to_string()).with_source(error)
    }
}

/// Parse micro-syntax text into canonical steps
///
/// # Errors
///
/// Returns a [`HydrationError`] naming the offending token or position
pub fn parse_steps(text: &str) -> Result<Vec<Step>, HydrationError> {
    let mut parser = Parser { text, position: 0 };
    parser.skip_whitespace();
    if parser.peek().is_none() {
        return Err(HydrationError::Empty);
    }
    let steps = parser.sequence(0)?;
    parser.skip_whitespace();
    match parser.peek() {
        None => Ok(steps),
        Some(found) => Err(HydrationError::UnexpectedChar {
            found,
            position: parser.position,
        }),
    }
}

struct Parser<'a> {
    text: &'a str,
    position: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.text[self.position..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn expect(&mut self, wanted: char) -> Result<(), HydrationError> {
        self.skip_whitespace();
        match self.bump() {
            Some(c) if c == wanted => Ok(()),
            Some(found) => Err(HydrationError::UnexpectedChar {
                found,
                position: self.position - found.len_utf8(),
            }),
            None => Err(HydrationError::UnexpectedEnd {
                position: self.position,
            }),
        }
    }

    /// Blocks up to end of input or a closing parenthesis
    fn sequence(&mut self, depth: usize) -> Result<Vec<Step>, HydrationError> {
        let mut steps = vec![self.block(depth)?];
        loop {
            self.skip_whitespace();
            if self.peek() == Some('|') {
                self.bump();
                steps.push(self.block(depth)?);
            } else {
                return Ok(steps);
            }
        }
    }

    fn block(&mut self, depth: usize) -> Result<Step, HydrationError> {
        self.skip_whitespace();
        match self.peek() {
            Some(c) if c.is_ascii_digit() => self.repeat(depth),
            Some(_) => self.leaf(),
            None => Err(HydrationError::UnexpectedEnd {
                position: self.position,
            }),
        }
    }

    fn repeat(&mut self, depth: usize) -> Result<Step, HydrationError> {
        if depth >= MAX_DEPTH {
            return Err(HydrationError::TooDeep);
        }
        let start = self.position;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
        let count = &self.text[start..self.position];
        let repetitions = count
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| HydrationError::InvalidRepetitions(count.to_owned()))?;

        match self.bump() {
            Some('x' | 'X') => {}
            Some(found) => {
                return Err(HydrationError::UnexpectedChar {
                    found,
                    position: self.position - found.len_utf8(),
                })
            }
            None => {
                return Err(HydrationError::UnexpectedEnd {
                    position: self.position,
                })
            }
        }
        if self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.bump();
        }
        self.expect('(')?;
        let steps = self.sequence(depth + 1)?;
        self.expect(')')?;
        Ok(Step::repeat(repetitions, steps))
    }

    fn leaf(&mut self) -> Result<Step, HydrationError> {
        let start = self.position;
        while self.peek().is_some_and(|c| c != '|' && c != ')' && c != '(') {
            self.bump();
        }
        let token = self.text[start..self.position].trim();
        if let Some(found) = self.peek().filter(|c| *c == '(') {
            return Err(HydrationError::UnexpectedChar {
                found,
                position: self.position,
            });
        }

        let fields: Vec<&str> = token.split('~').map(str::trim).collect();
        let [code, seconds, zone] = fields.as_slice() else {
            return Err(HydrationError::MalformedLeaf(token.to_owned()));
        };
        let kind =
            StepKind::from_str(code).map_err(|_| HydrationError::UnknownCode((*code).to_owned()))?;
        let duration_seconds = seconds
            .parse::<u32>()
            .map_err(|_| HydrationError::InvalidDuration((*seconds).to_owned()))?;
        let zone = Zone::from_str(zone).map_err(|_| HydrationError::UnknownZone((*zone).to_owned()))?;
        Ok(Step::leaf(kind, duration_seconds, zone))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::models::{total_step_seconds, Workout, WorkoutType};

    #[test]
    fn test_full_workout() {
        let steps = parse_steps("WU~600~Z1|4x(W~180~Z5a|R~120~Z1)|CD~300~Z1").unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(total_step_seconds(&steps), 600 + 4 * 300 + 300);
        let Step::Repeat(block) = &steps[1] else {
            panic!("expected repeat block");
        };
        assert_eq!(block.repetitions, 4);
        assert_eq!(block.steps[0], Step::leaf(StepKind::Work, 180, Zone::Z5a));
    }

    #[test]
    fn test_marker_letter_and_whitespace() {
        let plain = parse_steps("3x(W~60~Z4|R~60~Z1)").unwrap();
        let marked = parse_steps(" 3xC( W~60~Z4 | R~60~Z1 ) ").unwrap();
        assert_eq!(plain, marked);
    }

    #[test]
    fn test_nested_repeats() {
        let steps = parse_steps("2x(3x(W~30~Z5c|R~30~Z1)|R~300~Z1)").unwrap();
        assert_eq!(steps[0].depth(), 2);
        assert_eq!(steps[0].total_seconds(), 2 * (3 * 60 + 300));
    }

    #[test]
    fn test_huge_durations_saturate() {
        let steps = parse_steps("W~4294967295~Z1|W~1~Z1").unwrap();
        assert_eq!(total_step_seconds(&steps), u32::MAX);

        let workout = Workout::new(WorkoutType::Easy, "Imported", steps);
        assert_eq!(workout.duration_seconds, u32::MAX);
    }

    #[test]
    fn test_errors_name_the_token() {
        assert_eq!(parse_steps("  "), Err(HydrationError::Empty));
        assert_eq!(
            parse_steps("WU~600"),
            Err(HydrationError::MalformedLeaf("WU~600".to_owned()))
        );
        assert_eq!(
            parse_steps("XX~600~Z1"),
            Err(HydrationError::UnknownCode("XX".to_owned()))
        );
        assert_eq!(
            parse_steps("W~ten~Z1"),
            Err(HydrationError::InvalidDuration("ten".to_owned()))
        );
        assert_eq!(
            parse_steps("W~60~Z8"),
            Err(HydrationError::UnknownZone("Z8".to_owned()))
        );
        assert_eq!(
            parse_steps("0x(W~60~Z1)"),
            Err(HydrationError::InvalidRepetitions("0".to_owned()))
        );
        assert!(matches!(
            parse_steps("2x(W~60~Z1"),
            Err(HydrationError::UnexpectedEnd { .. })
        ));
        assert!(matches!(
            parse_steps("W~60~Z1)"),
            Err(HydrationError::UnexpectedChar { found: ')', .. })
        ));
    }

    #[test]
    fn test_converts_to_app_error() {
        let error: AppError = parse_steps("W~60").unwrap_err().into();
        assert_eq!(error.code, ErrorCode::InvalidFormat);
    }
}
