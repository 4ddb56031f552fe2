//! Drill engine - pure problem generation and answer checking
//!
//! The engine behind two children's arithmetic drills:
//!
//! - **Divisibility quiz**: numbers are generated to fall in a requested
//!   class (divisible by 9, by 6 but not 9, by 3 but not 6, or none) and the
//!   player names the class.
//! - **Column arithmetic**: addition and subtraction problems of 2 to 5
//!   digits, generated with or without a forced carry/borrow, checked digit
//!   by digit together with the player's carry/borrow marks.
//!
//! Both drills score correct answers with a time-decayed point curve.
//!
//! Everything here is synchronous and free of I/O. Randomness is always
//! passed in, so a seeded generator gives reproducible problem sets.
//!
//! # Example
//!
//! ```
//! use drill_engine::{ArithmeticProblem, DigitCount, Operation, UserAnswer, validate};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let problem = ArithmeticProblem::generate(Operation::Addition, DigitCount::TWO, true, &mut rng)?;
//! let truth = problem.analysis();
//!
//! let blank = UserAnswer::blank(problem.digit_count());
//! assert!(!validate(&blank, &truth));
//! # Ok::<(), drill_engine::EngineError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod analysis;
mod answer;
mod classify;
mod column;
mod digits;
mod division;
mod error;
pub mod invariants;
mod scoring;

pub use analysis::{CarryAnalysis, analyze};
pub use answer::{UserAnswer, ValidationReport, check, validate};
pub use classify::{DivisibilityClass, classify};
pub use column::{ArithmeticProblem, Operation};
pub use digits::{DigitCount, MAX_DIGITS, MIN_DIGITS, from_digits, to_digits};
pub use division::{DivisionProblem, MAX_REJECTION_ATTEMPTS, Magnitude, generate_number};
pub use error::{EngineError, EngineErrorKind};
pub use scoring::{
    GraceWindow, MAX_POINTS, ScoringCurve, ScoringParameters, ScoringPreset, points,
};
