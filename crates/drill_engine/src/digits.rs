//! Digit counts and positional helpers.
//!
//! Positions are indexed from the most significant digit: position 0 is the
//! leftmost column and position `n - 1` is the ones column.

use crate::{EngineError, EngineErrorKind};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Smallest supported operand width.
pub const MIN_DIGITS: u8 = 2;

/// Largest supported operand width.
pub const MAX_DIGITS: u8 = 5;

/// Number of digits in each operand of a column problem (2 to 5).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct DigitCount(u8);

impl DigitCount {
    /// Two-digit problems, the default.
    pub const TWO: Self = Self(2);

    /// Validates a digit count.
    #[track_caller]
    #[instrument]
    pub fn new(count: u8) -> Result<Self, EngineError> {
        if (MIN_DIGITS..=MAX_DIGITS).contains(&count) {
            Ok(Self(count))
        } else {
            Err(EngineError::new(EngineErrorKind::DigitCountOutOfRange(count)))
        }
    }

    /// Returns the raw count.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Number of digit positions (one per column).
    pub fn positions(self) -> usize {
        usize::from(self.0)
    }

    /// Number of carry/borrow boundaries between adjacent positions.
    pub fn boundaries(self) -> usize {
        usize::from(self.0) - 1
    }

    /// Smallest value with exactly this many digits.
    pub fn min_value(self) -> u32 {
        10u32.pow(u32::from(self.0) - 1)
    }

    /// Largest value with exactly this many digits.
    pub fn max_value(self) -> u32 {
        10u32.pow(u32::from(self.0)) - 1
    }

    /// Whether `value` has exactly this many digits.
    pub fn fits_exactly(self, value: u32) -> bool {
        (self.min_value()..=self.max_value()).contains(&value)
    }
}

impl Default for DigitCount {
    fn default() -> Self {
        Self::TWO
    }
}

impl TryFrom<u8> for DigitCount {
    type Error = EngineError;

    #[track_caller]
    fn try_from(count: u8) -> Result<Self, Self::Error> {
        Self::new(count)
    }
}

impl From<DigitCount> for u8 {
    fn from(count: DigitCount) -> Self {
        count.0
    }
}

/// Splits `value` into exactly `width` digits, most significant first,
/// left-padding with zeros. Digits above `width` are dropped.
pub fn to_digits(value: u32, width: usize) -> Vec<u8> {
    let mut digits = vec![0u8; width];
    let mut rest = value;
    for slot in digits.iter_mut().rev() {
        *slot = (rest % 10) as u8;
        rest /= 10;
    }
    digits
}

/// Joins digits (most significant first) back into a number.
pub fn from_digits(digits: &[u8]) -> u32 {
    digits
        .iter()
        .fold(0u32, |acc, &d| acc * 10 + u32::from(d))
}
