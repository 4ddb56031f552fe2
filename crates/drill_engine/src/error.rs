//! Engine error types.

use crate::{DivisibilityClass, MAX_DIGITS, MIN_DIGITS};
use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong inside the engine.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum EngineErrorKind {
    /// Requested digit count is outside the supported range.
    #[display("digit count {} is outside {}..={}", _0, MIN_DIGITS, MAX_DIGITS)]
    DigitCountOutOfRange(u8),

    /// An operand has more digits than the problem allows.
    #[display("operand {operand} does not fit in {digits} digits")]
    OperandWidth {
        /// Offending operand.
        operand: u32,
        /// Digit count of the problem.
        digits: u8,
    },

    /// Subtraction would go below zero.
    #[display("{minuend} - {subtrahend} is negative")]
    NegativeDifference {
        /// Left operand.
        minuend: u32,
        /// Right operand.
        subtrahend: u32,
    },

    /// A digit position or carry boundary index is out of range.
    #[display("index {index} out of range (len {len})")]
    PositionOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of valid slots.
        len: usize,
    },

    /// A digit entry is not a single decimal digit.
    #[display("invalid digit entry {_0:?}")]
    InvalidDigit(String),

    /// Rejection sampling hit its safety cap.
    #[display("no number of class {class} found after {attempts} attempts")]
    RejectionLimit {
        /// Class being sampled.
        class: DivisibilityClass,
        /// Attempts made before giving up.
        attempts: usize,
    },

    /// A generated value broke one of its invariants.
    #[display("invariant violated: {_0}")]
    InvariantViolation(String),
}

/// Engine error with location tracking.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Engine error: {} at {}:{}", kind, file, line)]
pub struct EngineError {
    /// Error kind.
    pub kind: EngineErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl EngineError {
    /// Creates a new engine error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: EngineErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &EngineErrorKind {
        &self.kind
    }
}

impl From<EngineErrorKind> for EngineError {
    #[track_caller]
    fn from(kind: EngineErrorKind) -> Self {
        Self::new(kind)
    }
}
