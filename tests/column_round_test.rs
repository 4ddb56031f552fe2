//! Tests for column arithmetic rounds.

use drill_engine::{DigitCount, Operation, UserAnswer};
use number_drills::{ColumnRound, Difficulty, DrillConfig, GameErrorKind};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn round(count: usize, digits: u8, ops: &[Operation], seed: u64) -> ColumnRound {
    let config = DrillConfig::default();
    let digit_count = DigitCount::new(digits).unwrap();
    let scoring = config.column().scoring(Difficulty::Easy, digit_count);
    let mut rng = StdRng::seed_from_u64(seed);
    ColumnRound::new(count, digit_count, ops, scoring, &mut rng).expect("Failed to build round")
}

fn worked_answer(round: &ColumnRound) -> UserAnswer {
    let truth = round.current().expect("round finished").analysis();
    UserAnswer::from_parts(
        truth.overflow_digit(),
        truth.result_digits().iter().map(|&d| Some(d)).collect(),
        truth.carry_required().to_vec(),
    )
}

#[test]
fn test_worked_answers_score_full_marks() {
    let mut r = round(8, 4, &[Operation::Addition, Operation::Subtraction], 7);
    while !r.is_finished() {
        let answer = worked_answer(&r);
        let record = r.submit(answer, 5.0).unwrap();
        assert!(record.is_correct());
        assert_eq!(*record.points(), 10);
    }
    let summary = r.finish(40.0);
    assert_eq!(*summary.score(), 80);
    assert_eq!(*summary.score_per_minute(), 120);
}

#[test]
fn test_blank_answer_scores_nothing() {
    let mut r = round(4, 2, &[Operation::Subtraction], 8);
    let blank = r.blank_answer().unwrap();
    let record = r.submit(blank, 1.0).unwrap();
    assert!(!record.is_correct());
    assert_eq!(*record.points(), 0);
}

#[test]
fn test_submit_after_finish_fails() {
    let mut r = round(1, 2, &[Operation::Addition], 9);
    let answer = worked_answer(&r);
    r.submit(answer.clone(), 1.0).unwrap();
    let err = r.submit(answer, 1.0).unwrap_err();
    assert_eq!(err.kind(), &GameErrorKind::RoundFinished);
}

#[test]
fn test_five_digit_time_limit() {
    let config = DrillConfig::default();
    let five = DigitCount::new(5).unwrap();
    let scoring = config.column().scoring(Difficulty::Easy, five);
    assert_eq!(scoring.max_time_seconds(), 42.0);
    assert_eq!(scoring.points(21.0), 10);
    assert_eq!(scoring.points(42.0), 5);
}
