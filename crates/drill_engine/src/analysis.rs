//! Ground truth for column arithmetic: result digits, overflow digit, and
//! which carry/borrow boundaries must be marked.
//!
//! Carry flag `i` sits above position `i` and is set when a carry (or
//! borrow) moves into position `i` from position `i + 1`. There is no flag
//! above the overflow column.

use crate::digits::{DigitCount, to_digits};
use crate::{EngineError, EngineErrorKind, Operation};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument};

/// Correct answer for a column problem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CarryAnalysis {
    digit_count: DigitCount,
    result_digits: Vec<u8>,
    overflow_digit: Option<u8>,
    carry_required: Vec<bool>,
}

impl CarryAnalysis {
    /// Operand width the analysis was computed for.
    pub fn digit_count(&self) -> DigitCount {
        self.digit_count
    }

    /// Result digits below the overflow column, most significant first.
    pub fn result_digits(&self) -> &[u8] {
        &self.result_digits
    }

    /// Result digits as a zero-padded string, e.g. `"07"`.
    pub fn result_string(&self) -> String {
        self.result_digits
            .iter()
            .map(|d| char::from(b'0' + d))
            .collect()
    }

    /// Extra leading digit when the result needs one more column.
    pub fn overflow_digit(&self) -> Option<u8> {
        self.overflow_digit
    }

    /// One flag per boundary, most significant boundary first.
    pub fn carry_required(&self) -> &[bool] {
        &self.carry_required
    }

    /// Whether any boundary needs a carry or borrow mark.
    pub fn needs_regrouping(&self) -> bool {
        self.carry_required.iter().any(|&c| c)
    }
}

impl fmt::Display for CarryAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(overflow) = self.overflow_digit {
            write!(f, "{overflow}")?;
        }
        write!(f, "{}", self.result_string())
    }
}

/// Computes the ground truth for `operand1 (op) operand2` at `digit_count`
/// columns. Operands narrower than the column count are zero-padded.
#[instrument]
pub fn analyze(
    operand1: u32,
    operand2: u32,
    operation: Operation,
    digit_count: DigitCount,
) -> Result<CarryAnalysis, EngineError> {
    for operand in [operand1, operand2] {
        if operand > digit_count.max_value() {
            return Err(EngineError::new(EngineErrorKind::OperandWidth {
                operand,
                digits: digit_count.get(),
            }));
        }
    }
    if operation == Operation::Subtraction && operand1 < operand2 {
        return Err(EngineError::new(EngineErrorKind::NegativeDifference {
            minuend: operand1,
            subtrahend: operand2,
        }));
    }
    Ok(compute(operand1, operand2, operation, digit_count))
}

/// Analysis for operands already known to fit and not to underflow.
pub(crate) fn compute(
    operand1: u32,
    operand2: u32,
    operation: Operation,
    digit_count: DigitCount,
) -> CarryAnalysis {
    let n = digit_count.positions();
    let top = to_digits(operand1, n);
    let bottom = to_digits(operand2, n);

    let result = match operation {
        Operation::Addition => operand1 + operand2,
        Operation::Subtraction => operand1 - operand2,
    };
    let overflow_digit = (result > digit_count.max_value())
        .then(|| (result / (digit_count.max_value() + 1)) as u8);
    let result_digits = to_digits(result, n);

    let mut carry_required = vec![false; digit_count.boundaries()];
    match operation {
        Operation::Addition => {
            let mut carry = 0u8;
            for i in (0..n).rev() {
                let sum = top[i] + bottom[i] + carry;
                carry = u8::from(sum >= 10);
                if carry == 1 && i > 0 {
                    carry_required[i - 1] = true;
                }
            }
        }
        Operation::Subtraction => {
            let mut borrow = 0u8;
            for i in (1..n).rev() {
                if top[i] < bottom[i] + borrow {
                    carry_required[i - 1] = true;
                    borrow = 1;
                } else {
                    borrow = 0;
                }
            }
        }
    }

    debug!(result, ?overflow_digit, ?carry_required, "Analyzed column problem");
    CarryAnalysis {
        digit_count,
        result_digits,
        overflow_digit,
        carry_required,
    }
}
