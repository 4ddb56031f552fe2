//! Column arithmetic round.

use super::{GameError, GameErrorKind, RoundSummary, carry_quotas};
use derive_getters::Getters;
use drill_engine::{
    ArithmeticProblem, CarryAnalysis, DigitCount, Operation, ScoringParameters, UserAnswer,
    ValidationReport, check,
};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// One submitted column problem.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct ColumnAnswer {
    /// 1-based position in the round.
    question_number: usize,
    /// The problem answered.
    problem: ArithmeticProblem,
    /// What the player entered.
    answer: UserAnswer,
    /// Ground truth for the problem.
    expected: CarryAnalysis,
    /// Per-check outcome.
    report: ValidationReport,
    /// Points earned; zero when anything was wrong.
    points: u32,
    /// Seconds the player took.
    elapsed_seconds: f64,
}

impl ColumnAnswer {
    /// Whether the whole answer was right.
    pub fn is_correct(&self) -> bool {
        self.report.is_correct()
    }
}

/// A shuffled set of column problems worked through in order.
#[derive(Debug, Clone)]
pub struct ColumnRound {
    problems: Vec<ArithmeticProblem>,
    answers: Vec<ColumnAnswer>,
    scoring: ScoringParameters,
}

impl ColumnRound {
    /// Generates `count` problems of `digit_count` digits.
    ///
    /// A quarter of the problems need no regrouping and the rest force a
    /// carry or borrow at the ones column. Each problem's operation is drawn
    /// uniformly from `operations`.
    #[instrument(skip(rng))]
    pub fn new<R: Rng + ?Sized>(
        count: usize,
        digit_count: DigitCount,
        operations: &[Operation],
        scoring: ScoringParameters,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        if operations.is_empty() {
            return Err(GameError::new(GameErrorKind::NoOperations));
        }
        if count == 0 {
            return Err(GameError::new(GameErrorKind::NoQuestions));
        }

        let (plain, regrouping) = carry_quotas(count);
        let requests =
            std::iter::repeat_n(false, plain).chain(std::iter::repeat_n(true, regrouping));

        let mut problems = Vec::with_capacity(count);
        for require_carry in requests {
            let operation = *operations
                .choose(rng)
                .ok_or_else(|| GameError::new(GameErrorKind::NoOperations))?;
            problems.push(ArithmeticProblem::generate(
                operation,
                digit_count,
                require_carry,
                rng,
            )?);
        }
        problems.shuffle(rng);

        info!(count, digits = digit_count.get(), "Column round ready");
        Ok(Self {
            problems,
            answers: Vec::new(),
            scoring,
        })
    }

    /// Builds a round from fixed problems, in the order given.
    #[instrument(skip(problems), fields(count = problems.len()))]
    pub fn from_problems(
        problems: Vec<ArithmeticProblem>,
        scoring: ScoringParameters,
    ) -> Result<Self, GameError> {
        if problems.is_empty() {
            return Err(GameError::new(GameErrorKind::NoQuestions));
        }
        Ok(Self {
            problems,
            answers: Vec::new(),
            scoring,
        })
    }

    /// All problems in play order.
    pub fn problems(&self) -> &[ArithmeticProblem] {
        &self.problems
    }

    /// Submissions so far.
    pub fn answers(&self) -> &[ColumnAnswer] {
        &self.answers
    }

    /// The problem awaiting an answer, if any.
    pub fn current(&self) -> Option<&ArithmeticProblem> {
        self.problems.get(self.answers.len())
    }

    /// A fresh answer sheet for the current problem.
    pub fn blank_answer(&self) -> Option<UserAnswer> {
        self.current().map(|p| UserAnswer::blank(p.digit_count()))
    }

    /// Whether every problem has been submitted.
    pub fn is_finished(&self) -> bool {
        self.answers.len() >= self.problems.len()
    }

    /// (answered, total).
    pub fn progress(&self) -> (usize, usize) {
        (self.answers.len(), self.problems.len())
    }

    /// Points earned so far.
    pub fn score(&self) -> u32 {
        self.answers.iter().map(|a| a.points).sum()
    }

    /// Submits an answer for the current problem after `elapsed_seconds`.
    #[instrument(skip(self, answer))]
    pub fn submit(
        &mut self,
        answer: UserAnswer,
        elapsed_seconds: f64,
    ) -> Result<ColumnAnswer, GameError> {
        let problem = *self
            .current()
            .ok_or_else(|| GameError::new(GameErrorKind::RoundFinished))?;

        let expected = problem.analysis();
        let report = check(&answer, &expected);
        let points = if report.is_correct() {
            self.scoring.points(elapsed_seconds)
        } else {
            0
        };

        debug!(%problem, correct = report.is_correct(), points, "Column answer recorded");
        let record = ColumnAnswer {
            question_number: self.answers.len() + 1,
            problem,
            answer,
            expected,
            report,
            points,
            elapsed_seconds,
        };
        self.answers.push(record.clone());
        Ok(record)
    }

    /// Closes the round with its total wall-clock time.
    #[instrument(skip(self))]
    pub fn finish(&self, total_seconds: f64) -> RoundSummary {
        let summary = RoundSummary::new(self.score(), total_seconds, self.problems.len());
        info!(
            score = summary.score(),
            per_minute = summary.score_per_minute(),
            "Column round finished"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_engine::ScoringCurve;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn scoring() -> ScoringParameters {
        ScoringParameters::new(12.0, ScoringCurve::HALF_TIME)
    }

    #[test]
    fn test_quarter_of_problems_are_plain() {
        let mut rng = StdRng::seed_from_u64(21);
        let round = ColumnRound::new(
            20,
            DigitCount::new(3).unwrap(),
            &[Operation::Addition, Operation::Subtraction],
            scoring(),
            &mut rng,
        )
        .unwrap();
        assert_eq!(round.problems().len(), 20);
        let regrouping = round
            .problems()
            .iter()
            .filter(|p| p.analysis().carry_required().last() == Some(&true))
            .count();
        assert!(regrouping >= 15);
    }

    #[test]
    fn test_only_enabled_operations() {
        let mut rng = StdRng::seed_from_u64(22);
        let round = ColumnRound::new(
            12,
            DigitCount::TWO,
            &[Operation::Addition],
            scoring(),
            &mut rng,
        )
        .unwrap();
        assert!(round.problems().iter().all(|p| p.operation() == Operation::Addition));
    }

    #[test]
    fn test_no_operations_rejected() {
        let mut rng = StdRng::seed_from_u64(23);
        let err = ColumnRound::new(5, DigitCount::TWO, &[], scoring(), &mut rng).unwrap_err();
        assert_eq!(err.kind(), &GameErrorKind::NoOperations);
    }

    #[test]
    fn test_submit_scores_only_full_answers() {
        let problems = vec![
            ArithmeticProblem::new(Operation::Addition, 47, 38, DigitCount::TWO).unwrap(),
            ArithmeticProblem::new(Operation::Subtraction, 55, 48, DigitCount::TWO).unwrap(),
        ];
        let mut round = ColumnRound::from_problems(problems, scoring()).unwrap();

        let right = UserAnswer::from_entries("", &["8", "5"], &[true]).unwrap();
        let first = round.submit(right, 3.0).unwrap();
        assert!(first.is_correct());
        assert_eq!(*first.points(), 10);

        // Correct digits but the borrow mark is missing.
        let unmarked = UserAnswer::from_entries("", &["", "7"], &[false]).unwrap();
        let second = round.submit(unmarked, 3.0).unwrap();
        assert!(!second.is_correct());
        assert!(second.report().digits_ok);
        assert_eq!(*second.points(), 0);

        assert!(round.blank_answer().is_none());
        let summary = round.finish(60.0);
        assert_eq!(*summary.score(), 10);
        assert_eq!(*summary.max_score(), 20);
    }
}
