//! Divisibility quiz round.

use super::{GameError, GameErrorKind, RoundSummary, class_quotas};
use derive_getters::Getters;
use derive_new::new;
use drill_engine::{DivisibilityClass, DivisionProblem, ScoringParameters};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// One answered quiz question.
#[derive(Debug, Clone, Copy, PartialEq, Getters, Serialize, Deserialize, new)]
pub struct DivisionAnswer {
    /// 1-based position in the round.
    question_number: usize,
    /// The number shown.
    number: u32,
    /// Class the player picked.
    user_answer: DivisibilityClass,
    /// The right class.
    correct_answer: DivisibilityClass,
    /// Whether the pick was right.
    correct: bool,
    /// Points earned; zero when wrong.
    points: u32,
    /// Seconds the player took.
    elapsed_seconds: f64,
}

/// A shuffled set of quiz questions worked through in order.
#[derive(Debug, Clone)]
pub struct DivisionRound {
    questions: Vec<DivisionProblem>,
    answers: Vec<DivisionAnswer>,
    scoring: ScoringParameters,
}

impl DivisionRound {
    /// Generates a round of `count` questions spread evenly over the classes.
    #[instrument(skip(rng))]
    pub fn new<R: Rng + ?Sized>(
        count: usize,
        scoring: ScoringParameters,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        if count == 0 {
            return Err(GameError::new(GameErrorKind::NoQuestions));
        }

        let mut questions = Vec::with_capacity(count);
        for (class, quota) in class_quotas(count) {
            for _ in 0..quota {
                questions.push(DivisionProblem::generate(class, rng)?);
            }
        }
        questions.shuffle(rng);

        info!(count, max_time = scoring.max_time_seconds(), "Division round ready");
        Ok(Self {
            questions,
            answers: Vec::new(),
            scoring,
        })
    }

    /// Builds a round from fixed questions, in the order given.
    #[instrument(skip(questions), fields(count = questions.len()))]
    pub fn from_questions(
        questions: Vec<DivisionProblem>,
        scoring: ScoringParameters,
    ) -> Result<Self, GameError> {
        if questions.is_empty() {
            return Err(GameError::new(GameErrorKind::NoQuestions));
        }
        Ok(Self {
            questions,
            answers: Vec::new(),
            scoring,
        })
    }

    /// All questions in play order.
    pub fn questions(&self) -> &[DivisionProblem] {
        &self.questions
    }

    /// Answers so far.
    pub fn answers(&self) -> &[DivisionAnswer] {
        &self.answers
    }

    /// Scoring in effect.
    pub fn scoring(&self) -> ScoringParameters {
        self.scoring
    }

    /// The question awaiting an answer, if any.
    pub fn current(&self) -> Option<&DivisionProblem> {
        self.questions.get(self.answers.len())
    }

    /// Whether every question has been answered.
    pub fn is_finished(&self) -> bool {
        self.answers.len() >= self.questions.len()
    }

    /// (answered, total).
    pub fn progress(&self) -> (usize, usize) {
        (self.answers.len(), self.questions.len())
    }

    /// Points earned so far.
    pub fn score(&self) -> u32 {
        self.answers.iter().map(|a| a.points).sum()
    }

    /// Best score reachable given the questions answered so far.
    pub fn max_possible_so_far(&self) -> u32 {
        super::max_score(self.answers.len())
    }

    /// Answers the current question after `elapsed_seconds`.
    #[instrument(skip(self))]
    pub fn answer(
        &mut self,
        user_answer: DivisibilityClass,
        elapsed_seconds: f64,
    ) -> Result<DivisionAnswer, GameError> {
        let problem = *self
            .current()
            .ok_or_else(|| GameError::new(GameErrorKind::RoundFinished))?;

        let correct = problem.is_correct(user_answer);
        let points = if correct {
            self.scoring.points(elapsed_seconds)
        } else {
            0
        };
        let record = DivisionAnswer::new(
            self.answers.len() + 1,
            problem.number(),
            user_answer,
            problem.class(),
            correct,
            points,
            elapsed_seconds,
        );
        debug!(number = problem.number(), correct, points, "Quiz answer recorded");
        self.answers.push(record);
        Ok(record)
    }

    /// Closes the round with its total wall-clock time.
    #[instrument(skip(self))]
    pub fn finish(&self, total_seconds: f64) -> RoundSummary {
        let summary = RoundSummary::new(self.score(), total_seconds, self.questions.len());
        info!(
            score = summary.score(),
            per_minute = summary.score_per_minute(),
            "Division round finished"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_engine::{ScoringCurve, classify};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn scoring() -> ScoringParameters {
        ScoringParameters::new(15.0, ScoringCurve::THIRD_TIME)
    }

    #[test]
    fn test_round_has_requested_count_and_balanced_classes() {
        let mut rng = StdRng::seed_from_u64(11);
        let round = DivisionRound::new(20, scoring(), &mut rng).unwrap();
        assert_eq!(round.questions().len(), 20);
        for class in DivisibilityClass::ALL {
            let n = round.questions().iter().filter(|q| q.class() == class).count();
            assert_eq!(n, 5);
        }
        for q in round.questions() {
            assert_eq!(classify(q.number()), q.class());
        }
    }

    #[test]
    fn test_uneven_count_is_exact() {
        let mut rng = StdRng::seed_from_u64(12);
        let round = DivisionRound::new(10, scoring(), &mut rng).unwrap();
        assert_eq!(round.questions().len(), 10);
    }

    #[test]
    fn test_zero_questions_rejected() {
        let mut rng = StdRng::seed_from_u64(13);
        let err = DivisionRound::new(0, scoring(), &mut rng).unwrap_err();
        assert_eq!(err.kind(), &GameErrorKind::NoQuestions);
    }

    #[test]
    fn test_answers_score_and_finish() {
        let questions = vec![
            DivisionProblem::from_number(81),
            DivisionProblem::from_number(24),
        ];
        let mut round = DivisionRound::from_questions(questions, scoring()).unwrap();

        let first = round.answer(DivisibilityClass::Nine, 2.0).unwrap();
        assert!(*first.correct());
        assert_eq!(*first.points(), 10);

        let second = round.answer(DivisibilityClass::Three, 2.0).unwrap();
        assert!(!*second.correct());
        assert_eq!(*second.points(), 0);
        assert_eq!(*second.correct_answer(), DivisibilityClass::Six);
        assert_eq!(*second.question_number(), 2);

        assert!(round.is_finished());
        let err = round.answer(DivisibilityClass::Six, 1.0).unwrap_err();
        assert_eq!(err.kind(), &GameErrorKind::RoundFinished);

        let summary = round.finish(30.0);
        assert_eq!(*summary.score(), 10);
        assert_eq!(*summary.score_per_minute(), 20);
        assert_eq!(*summary.max_score(), 20);
    }
}
