//! Column addition and subtraction problems.
//!
//! Problems are built digit by digit. When regrouping is requested it is
//! forced at the ones column; when it is not, every column pair is drawn so
//! no column carries or borrows.

use crate::analysis::{self, CarryAnalysis};
use crate::digits::{DigitCount, from_digits};
use crate::invariants::{GeneratedProblem, GenerationInvariants, InvariantSet};
use crate::{EngineError, EngineErrorKind};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument, warn};

/// Column operation.
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
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Column addition with carrying.
    #[serde(alias = "add")]
    #[strum(to_string = "addition", serialize = "add", serialize = "+")]
    Addition,
    /// Column subtraction with borrowing.
    #[serde(alias = "sub")]
    #[strum(to_string = "subtraction", serialize = "sub", serialize = "-")]
    Subtraction,
}

impl Operation {
    /// Operator symbol shown between the operands.
    pub fn symbol(self) -> char {
        match self {
            Self::Addition => '+',
            Self::Subtraction => '-',
        }
    }
}

/// Two operands of equal width and an operation.
///
/// Both operands always have exactly `digit_count` digits, and for
/// subtraction the first operand is never smaller than the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArithmeticProblem {
    operation: Operation,
    operand1: u32,
    operand2: u32,
    digit_count: DigitCount,
}

impl ArithmeticProblem {
    /// Builds a problem from caller-supplied operands.
    #[track_caller]
    #[instrument]
    pub fn new(
        operation: Operation,
        operand1: u32,
        operand2: u32,
        digit_count: DigitCount,
    ) -> Result<Self, EngineError> {
        for operand in [operand1, operand2] {
            if !digit_count.fits_exactly(operand) {
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
        Ok(Self {
            operation,
            operand1,
            operand2,
            digit_count,
        })
    }

    /// Generates a random problem.
    ///
    /// With `require_carry` the ones column always carries (addition) or
    /// borrows (subtraction). Without it, no column regroups at all.
    #[instrument(skip(rng))]
    pub fn generate<R: Rng + ?Sized>(
        operation: Operation,
        digit_count: DigitCount,
        require_carry: bool,
        rng: &mut R,
    ) -> Result<Self, EngineError> {
        let n = digit_count.positions();
        let (top, bottom) = match (operation, require_carry) {
            (Operation::Addition, true) => addition_with_carry(digit_count, rng),
            (Operation::Addition, false) => addition_without_carry(n, rng),
            (Operation::Subtraction, true) => subtraction_with_borrow(n, rng),
            (Operation::Subtraction, false) => subtraction_without_borrow(n, rng),
        };

        let problem = Self {
            operation,
            operand1: from_digits(&top),
            operand2: from_digits(&bottom),
            digit_count,
        };

        GenerationInvariants::check_all(&GeneratedProblem::new(&problem, require_carry)).map_err(
            |violations| {
                let descriptions = violations
                    .iter()
                    .map(|v| v.description.as_str())
                    .collect::<Vec<_>>()
                    .join("; ");
                warn!(%problem, %descriptions, "Generated problem broke invariants");
                EngineError::new(EngineErrorKind::InvariantViolation(descriptions))
            },
        )?;

        debug!(%problem, require_carry, "Generated column problem");
        Ok(problem)
    }

    /// The operation.
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Top operand.
    pub fn operand1(&self) -> u32 {
        self.operand1
    }

    /// Bottom operand.
    pub fn operand2(&self) -> u32 {
        self.operand2
    }

    /// Width of each operand.
    pub fn digit_count(&self) -> DigitCount {
        self.digit_count
    }

    /// The numeric answer.
    pub fn result(&self) -> u32 {
        match self.operation {
            Operation::Addition => self.operand1 + self.operand2,
            Operation::Subtraction => self.operand1 - self.operand2,
        }
    }

    /// Ground truth for validating a player's answer.
    pub fn analysis(&self) -> CarryAnalysis {
        analysis::compute(self.operand1, self.operand2, self.operation, self.digit_count)
    }
}

impl fmt::Display for ArithmeticProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.operand1, self.operation.symbol(), self.operand2)
    }
}

fn addition_with_carry<R: Rng + ?Sized>(
    digit_count: DigitCount,
    rng: &mut R,
) -> (Vec<u8>, Vec<u8>) {
    let n = digit_count.positions();
    let mut top = Vec::with_capacity(n);
    let mut bottom = Vec::with_capacity(n);

    top.push(rng.gen_range(1..=9));
    bottom.push(rng.gen_range(1..=9));
    for _ in 1..n - 1 {
        top.push(rng.gen_range(0..=9));
        bottom.push(rng.gen_range(0..=9));
    }
    top.push(rng.gen_range(5..=9));
    bottom.push(rng.gen_range(5..=9));

    if from_digits(&top) + from_digits(&bottom) > digit_count.max_value() {
        // Ones of 5 still carry against a top digit of at least 5.
        bottom[n - 1] = 5;
    }
    (top, bottom)
}

fn addition_without_carry<R: Rng + ?Sized>(n: usize, rng: &mut R) -> (Vec<u8>, Vec<u8>) {
    let mut top = Vec::with_capacity(n);
    let mut bottom = Vec::with_capacity(n);

    // Leading pair must sum below 10 with both digits non-zero.
    let lead = rng.gen_range(1..=8);
    top.push(lead);
    bottom.push(rng.gen_range(1..=9 - lead));
    for _ in 1..n {
        let d = rng.gen_range(0..=9);
        top.push(d);
        bottom.push(rng.gen_range(0..=9 - d));
    }
    (top, bottom)
}

fn subtraction_with_borrow<R: Rng + ?Sized>(n: usize, rng: &mut R) -> (Vec<u8>, Vec<u8>) {
    let mut top = Vec::with_capacity(n);
    let mut bottom = Vec::with_capacity(n);

    let lead = rng.gen_range(1..=9);
    top.push(lead);
    bottom.push(rng.gen_range(1..=lead));
    for _ in 1..n - 1 {
        top.push(rng.gen_range(0..=9));
        bottom.push(rng.gen_range(0..=9));
    }
    let ones = rng.gen_range(0..=4);
    top.push(ones);
    bottom.push(rng.gen_range(ones + 1..=9));

    if from_digits(&top) <= from_digits(&bottom) {
        if bottom[0] == 9 {
            // Top lead is already 9; make room below it instead.
            top[0] = 9;
            bottom[0] = 8;
        } else {
            top[0] = bottom[0] + 1;
        }
    }
    (top, bottom)
}

fn subtraction_without_borrow<R: Rng + ?Sized>(n: usize, rng: &mut R) -> (Vec<u8>, Vec<u8>) {
    let mut top = Vec::with_capacity(n);
    let mut bottom = Vec::with_capacity(n);

    let lead = rng.gen_range(1..=9);
    top.push(lead);
    bottom.push(rng.gen_range(1..=lead));
    for _ in 1..n {
        let d = rng.gen_range(0..=9);
        top.push(d);
        bottom.push(rng.gen_range(0..=d));
    }
    (top, bottom)
}
