//! Player answers for column problems and their validation.
//!
//! An answer is correct only when the overflow cell, every result digit and
//! every carry/borrow mark are right. Blank cells are ordinary input: a blank
//! may stand in for a leading zero (any zero except in the ones column), and
//! a blank or zero overflow cell is fine when there is no overflow digit.

use crate::analysis::CarryAnalysis;
use crate::digits::DigitCount;
use crate::{EngineError, EngineErrorKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// What the player has entered for one column problem.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserAnswer {
    overflow: Option<u8>,
    digits: Vec<Option<u8>>,
    carry_flags: Vec<bool>,
}

impl UserAnswer {
    /// An empty answer sheet: no digits entered, no carries marked.
    pub fn blank(digit_count: DigitCount) -> Self {
        Self {
            overflow: None,
            digits: vec![None; digit_count.positions()],
            carry_flags: vec![false; digit_count.boundaries()],
        }
    }

    /// Builds an answer from already-parsed parts.
    pub fn from_parts(
        overflow: Option<u8>,
        digits: Vec<Option<u8>>,
        carry_flags: Vec<bool>,
    ) -> Self {
        Self {
            overflow,
            digits,
            carry_flags,
        }
    }

    /// Builds an answer from text cells, where `""` is a blank cell.
    #[instrument]
    pub fn from_entries(
        overflow: &str,
        digits: &[&str],
        carry_flags: &[bool],
    ) -> Result<Self, EngineError> {
        Ok(Self {
            overflow: parse_entry(overflow)?,
            digits: digits
                .iter()
                .map(|entry| parse_entry(entry))
                .collect::<Result<_, _>>()?,
            carry_flags: carry_flags.to_vec(),
        })
    }

    /// Overflow cell.
    pub fn overflow(&self) -> Option<u8> {
        self.overflow
    }

    /// Result cells, most significant first.
    pub fn digits(&self) -> &[Option<u8>] {
        &self.digits
    }

    /// Carry/borrow marks, most significant boundary first.
    pub fn carry_flags(&self) -> &[bool] {
        &self.carry_flags
    }

    /// Enters a digit at `position`, or blanks it with `None`.
    #[instrument(skip(self))]
    pub fn set_digit(&mut self, position: usize, digit: Option<u8>) -> Result<(), EngineError> {
        check_digit(digit)?;
        let len = self.digits.len();
        let slot = self.digits.get_mut(position).ok_or_else(|| {
            EngineError::new(EngineErrorKind::PositionOutOfRange {
                index: position,
                len,
            })
        })?;
        *slot = digit;
        Ok(())
    }

    /// Blanks the cell at `position`.
    pub fn clear_digit(&mut self, position: usize) -> Result<(), EngineError> {
        self.set_digit(position, None)
    }

    /// Enters or blanks the overflow cell.
    #[instrument(skip(self))]
    pub fn set_overflow(&mut self, digit: Option<u8>) -> Result<(), EngineError> {
        check_digit(digit)?;
        self.overflow = digit;
        Ok(())
    }

    /// Flips the carry mark above `boundary` and returns its new state.
    #[instrument(skip(self))]
    pub fn toggle_carry(&mut self, boundary: usize) -> Result<bool, EngineError> {
        let len = self.carry_flags.len();
        let flag = self.carry_flags.get_mut(boundary).ok_or_else(|| {
            EngineError::new(EngineErrorKind::PositionOutOfRange {
                index: boundary,
                len,
            })
        })?;
        *flag = !*flag;
        Ok(*flag)
    }
}

fn parse_entry(entry: &str) -> Result<Option<u8>, EngineError> {
    let trimmed = entry.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.as_bytes() {
        [b @ b'0'..=b'9'] => Ok(Some(*b - b'0')),
        _ => Err(EngineError::new(EngineErrorKind::InvalidDigit(entry.to_string()))),
    }
}

fn check_digit(digit: Option<u8>) -> Result<(), EngineError> {
    match digit {
        Some(d) if d > 9 => Err(EngineError::new(EngineErrorKind::InvalidDigit(d.to_string()))),
        _ => Ok(()),
    }
}

/// Outcome of each of the three answer checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Overflow cell is acceptable.
    pub overflow_ok: bool,
    /// Every result cell is acceptable.
    pub digits_ok: bool,
    /// Every carry/borrow mark matches.
    pub carries_ok: bool,
}

impl ValidationReport {
    /// All three checks passed.
    pub fn is_correct(&self) -> bool {
        self.overflow_ok && self.digits_ok && self.carries_ok
    }
}

/// Runs all three checks against the ground truth.
///
/// Missing cells count as blank and missing carry marks as unset.
#[instrument(skip(answer, analysis))]
pub fn check(answer: &UserAnswer, analysis: &CarryAnalysis) -> ValidationReport {
    let overflow_ok = match analysis.overflow_digit() {
        Some(expected) => answer.overflow == Some(expected),
        None => matches!(answer.overflow, None | Some(0)),
    };

    let ones = analysis.result_digits().len().saturating_sub(1);
    let digits_ok = analysis
        .result_digits()
        .iter()
        .enumerate()
        .all(|(position, &expected)| {
            let entered = answer.digits.get(position).copied().flatten();
            if expected == 0 && position < ones {
                matches!(entered, None | Some(0))
            } else {
                entered == Some(expected)
            }
        });

    let carries_ok = analysis
        .carry_required()
        .iter()
        .enumerate()
        .all(|(boundary, &required)| {
            answer.carry_flags.get(boundary).copied().unwrap_or(false) == required
        });

    let report = ValidationReport {
        overflow_ok,
        digits_ok,
        carries_ok,
    };
    debug!(?report, "Checked column answer");
    report
}

/// Whether the answer is fully correct.
pub fn validate(answer: &UserAnswer, analysis: &CarryAnalysis) -> bool {
    check(answer, analysis).is_correct()
}
