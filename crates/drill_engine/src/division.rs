//! Number generation for the divisibility quiz.
//!
//! Each class is drawn from a magnitude that is two-digit with probability
//! 0.4 and three-digit otherwise. Class NINE is sampled in closed form; the
//! other classes use rejection sampling, capped at
//! [`MAX_REJECTION_ATTEMPTS`] draws.

use crate::{DivisibilityClass, EngineError, EngineErrorKind, classify};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use tracing::{debug, instrument};

/// Upper bound on rejection-sampling draws for a single number.
pub const MAX_REJECTION_ATTEMPTS: usize = 1000;

/// Magnitude of a quiz number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Magnitude {
    /// 10 to 99.
    TwoDigit,
    /// 100 to 999.
    ThreeDigit,
}

impl Magnitude {
    /// Probability of drawing a two-digit number.
    pub const TWO_DIGIT_PROBABILITY: f64 = 0.4;

    /// Picks a magnitude at random.
    pub fn choose<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(Self::TWO_DIGIT_PROBABILITY) {
            Self::TwoDigit
        } else {
            Self::ThreeDigit
        }
    }

    /// Inclusive range of numbers with this magnitude.
    pub fn range(self) -> RangeInclusive<u32> {
        match self {
            Self::TwoDigit => 10..=99,
            Self::ThreeDigit => 100..=999,
        }
    }
}

/// A quiz question: a number and the class it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DivisionProblem {
    number: u32,
    class: DivisibilityClass,
}

impl DivisionProblem {
    /// Generates a number of the requested class at a random magnitude.
    #[instrument(skip(rng))]
    pub fn generate<R: Rng + ?Sized>(
        class: DivisibilityClass,
        rng: &mut R,
    ) -> Result<Self, EngineError> {
        let magnitude = Magnitude::choose(rng);
        Self::generate_with_magnitude(class, magnitude, rng)
    }

    /// Generates a number of the requested class at a fixed magnitude.
    #[instrument(skip(rng))]
    pub fn generate_with_magnitude<R: Rng + ?Sized>(
        class: DivisibilityClass,
        magnitude: Magnitude,
        rng: &mut R,
    ) -> Result<Self, EngineError> {
        let number = number_in_range(class, magnitude.range(), rng)?;
        debug!(number, %class, "Generated quiz number");
        Ok(Self { number, class })
    }

    /// Wraps an existing number, deriving its class.
    pub fn from_number(number: u32) -> Self {
        Self {
            number,
            class: classify(number),
        }
    }

    /// The number shown to the player.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// The correct class.
    pub fn class(&self) -> DivisibilityClass {
        self.class
    }

    /// Whether `answer` is the correct class for this number.
    pub fn is_correct(&self, answer: DivisibilityClass) -> bool {
        classify(self.number) == answer
    }
}

/// Generates a number of the requested class at a random magnitude.
pub fn generate_number<R: Rng + ?Sized>(
    class: DivisibilityClass,
    rng: &mut R,
) -> Result<u32, EngineError> {
    DivisionProblem::generate(class, rng).map(|p| p.number())
}

fn number_in_range<R: Rng + ?Sized>(
    class: DivisibilityClass,
    range: RangeInclusive<u32>,
    rng: &mut R,
) -> Result<u32, EngineError> {
    match class {
        DivisibilityClass::Nine => Ok(random_multiple(9, &range, rng)),
        DivisibilityClass::Six => sample_until(
            class,
            rng,
            |rng| random_multiple(6, &range, rng),
            |n| n % 9 != 0,
        ),
        DivisibilityClass::Three => sample_until(
            class,
            rng,
            |rng| random_multiple(3, &range, rng),
            |n| n % 6 != 0,
        ),
        DivisibilityClass::Other => sample_until(
            class,
            rng,
            |rng| rng.gen_range(range.clone()),
            |n| n % 3 != 0,
        ),
    }
}

/// Uniform multiple of `k` inside `range`. The range must contain one.
fn random_multiple<R: Rng + ?Sized>(k: u32, range: &RangeInclusive<u32>, rng: &mut R) -> u32 {
    let lo = range.start().div_ceil(k);
    let hi = range.end() / k;
    rng.gen_range(lo..=hi) * k
}

fn sample_until<R, S, A>(
    class: DivisibilityClass,
    rng: &mut R,
    mut sample: S,
    accept: A,
) -> Result<u32, EngineError>
where
    R: Rng + ?Sized,
    S: FnMut(&mut R) -> u32,
    A: Fn(u32) -> bool,
{
    for _ in 0..MAX_REJECTION_ATTEMPTS {
        let n = sample(rng);
        if accept(n) {
            return Ok(n);
        }
    }
    Err(EngineError::new(EngineErrorKind::RejectionLimit {
        class,
        attempts: MAX_REJECTION_ATTEMPTS,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_six_never_multiple_of_nine() {
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..1000 {
            let n = generate_number(DivisibilityClass::Six, &mut rng).unwrap();
            assert_eq!(n % 6, 0, "{n} not divisible by 6");
            assert_ne!(n % 9, 0, "{n} divisible by 9");
        }
    }

    #[test]
    fn test_every_class_matches_classifier() {
        let mut rng = StdRng::seed_from_u64(42);
        for class in DivisibilityClass::ALL {
            for _ in 0..500 {
                let problem = DivisionProblem::generate(class, &mut rng).unwrap();
                assert_eq!(classify(problem.number()), class);
                assert!((10..=999).contains(&problem.number()));
            }
        }
    }

    #[test]
    fn test_magnitude_respected() {
        let mut rng = StdRng::seed_from_u64(7);
        for class in DivisibilityClass::ALL {
            for _ in 0..200 {
                let two =
                    DivisionProblem::generate_with_magnitude(class, Magnitude::TwoDigit, &mut rng)
                        .unwrap();
                assert!((10..=99).contains(&two.number()));
                let three =
                    DivisionProblem::generate_with_magnitude(class, Magnitude::ThreeDigit, &mut rng)
                        .unwrap();
                assert!((100..=999).contains(&three.number()));
            }
        }
    }

    #[test]
    fn test_two_digit_share() {
        let mut rng = StdRng::seed_from_u64(40);
        let draws = 10_000;
        let two_digit = (0..draws)
            .map(|i| DivisibilityClass::ALL[i % DivisibilityClass::ALL.len()])
            .map(|class| DivisionProblem::generate(class, &mut rng).unwrap())
            .filter(|p| p.number() < 100)
            .count();
        let share = two_digit as f64 / draws as f64;
        assert!((0.37..=0.43).contains(&share), "two-digit share {share}");
    }

    #[test]
    fn test_nine_covers_range_edges() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut seen_low = false;
        let mut seen_high = false;
        for _ in 0..2000 {
            let p = DivisionProblem::generate_with_magnitude(
                DivisibilityClass::Nine,
                Magnitude::TwoDigit,
                &mut rng,
            )
            .unwrap();
            seen_low |= p.number() == 18;
            seen_high |= p.number() == 99;
        }
        assert!(seen_low && seen_high);
    }

    #[test]
    fn test_is_correct() {
        let p = DivisionProblem::from_number(54);
        assert_eq!(p.class(), DivisibilityClass::Nine);
        assert!(p.is_correct(DivisibilityClass::Nine));
        assert!(!p.is_correct(DivisibilityClass::Six));
    }
}
