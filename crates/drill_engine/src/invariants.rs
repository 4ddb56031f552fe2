//! First-class invariants for generated column problems.
//!
//! Generation is checked against these after every draw. A violation means
//! the generator itself is wrong, never that the caller asked for something
//! unreasonable.

use crate::{ArithmeticProblem, Operation};
use tracing::warn;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants over the same state.
pub trait InvariantSet<S> {
    /// Checks all invariants, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
        ]
        .into_iter()
        .filter(|(held, _)| !held)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ]
        .into_iter()
        .filter(|(held, _)| !held)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// A freshly generated problem together with what was asked of it.
#[derive(Debug, Clone, Copy)]
pub struct GeneratedProblem<'a> {
    /// The problem under test.
    pub problem: &'a ArithmeticProblem,
    /// Whether regrouping at the ones column was requested.
    pub require_carry: bool,
}

impl<'a> GeneratedProblem<'a> {
    /// Pairs a problem with its generation request.
    pub fn new(problem: &'a ArithmeticProblem, require_carry: bool) -> Self {
        Self {
            problem,
            require_carry,
        }
    }
}

/// Both operands have exactly the problem's digit count.
pub struct ExactWidth;

impl Invariant<GeneratedProblem<'_>> for ExactWidth {
    fn holds(state: &GeneratedProblem<'_>) -> bool {
        let width = state.problem.digit_count();
        let held = width.fits_exactly(state.problem.operand1())
            && width.fits_exactly(state.problem.operand2());
        if !held {
            warn!(problem = %state.problem, "Operand width violated");
        }
        held
    }

    fn description() -> &'static str {
        "Both operands have exactly the requested number of digits"
    }
}

/// Subtraction never goes below zero.
pub struct MinuendNotSmaller;

impl Invariant<GeneratedProblem<'_>> for MinuendNotSmaller {
    fn holds(state: &GeneratedProblem<'_>) -> bool {
        state.problem.operation() != Operation::Subtraction
            || state.problem.operand1() >= state.problem.operand2()
    }

    fn description() -> &'static str {
        "Subtraction minuend is at least the subtrahend"
    }
}

/// Regrouping happens exactly as requested: at the ones column when asked,
/// nowhere (including the overflow column) when not.
pub struct RegroupingMatchesRequest;

impl Invariant<GeneratedProblem<'_>> for RegroupingMatchesRequest {
    fn holds(state: &GeneratedProblem<'_>) -> bool {
        if !MinuendNotSmaller::holds(state) {
            return false;
        }
        let analysis = state.problem.analysis();
        if state.require_carry {
            analysis.carry_required().last() == Some(&true)
        } else {
            !analysis.needs_regrouping() && analysis.overflow_digit().is_none()
        }
    }

    fn description() -> &'static str {
        "Carry/borrow requirement matches the request"
    }
}

/// Everything a generated column problem must satisfy.
pub type GenerationInvariants = (ExactWidth, MinuendNotSmaller, RegroupingMatchesRequest);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DigitCount;

    fn problem(operation: Operation, a: u32, b: u32) -> ArithmeticProblem {
        ArithmeticProblem::new(operation, a, b, DigitCount::TWO).unwrap()
    }

    #[test]
    fn test_invariants_hold_for_carry_problem() {
        let p = problem(Operation::Addition, 47, 38);
        assert!(GenerationInvariants::check_all(&GeneratedProblem::new(&p, true)).is_ok());
    }

    #[test]
    fn test_detects_missing_carry() {
        let p = problem(Operation::Addition, 41, 38);
        let violations = GenerationInvariants::check_all(&GeneratedProblem::new(&p, true))
            .unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].description,
            RegroupingMatchesRequest::description()
        );
    }

    #[test]
    fn test_detects_unwanted_overflow() {
        // 61 + 52 has no column carry but spills into a third digit.
        let p = problem(Operation::Addition, 61, 52);
        assert!(GenerationInvariants::check_all(&GeneratedProblem::new(&p, false)).is_err());
    }

    #[test]
    fn test_two_invariants_as_set() {
        let p = problem(Operation::Subtraction, 55, 48);
        type Structural = (ExactWidth, MinuendNotSmaller);
        assert!(Structural::check_all(&GeneratedProblem::new(&p, true)).is_ok());
    }
}
