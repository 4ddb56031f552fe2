//! Tests for divisibility quiz rounds.

use drill_engine::{DivisibilityClass, ScoringCurve, ScoringParameters};
use number_drills::{Difficulty, DivisionRound, DrillConfig};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn medium_round(count: usize, seed: u64) -> DivisionRound {
    let scoring = DrillConfig::default().division().scoring(Difficulty::Medium);
    let mut rng = StdRng::seed_from_u64(seed);
    DivisionRound::new(count, scoring, &mut rng).expect("Failed to build round")
}

#[test]
fn test_same_seed_same_round() {
    let a = medium_round(12, 42);
    let b = medium_round(12, 42);
    assert_eq!(a.questions(), b.questions());
}

#[test]
fn test_perfect_fast_round_scores_maximum() {
    let mut round = medium_round(8, 1);
    while let Some(q) = round.current().copied() {
        round.answer(q.class(), 1.0).unwrap();
    }
    let summary = round.finish(60.0);
    assert_eq!(summary.score(), summary.max_score());
    assert_eq!(*summary.score_per_minute(), 80);
}

#[test]
fn test_slow_answers_fall_to_floor() {
    let mut round = medium_round(4, 2);
    while let Some(q) = round.current().copied() {
        round.answer(q.class(), 30.0).unwrap();
    }
    assert_eq!(round.score(), 4 * 3);
    assert_eq!(round.progress(), (4, 4));
    assert_eq!(round.max_possible_so_far(), 40);
}

#[test]
fn test_wrong_answers_score_nothing() {
    let mut round = medium_round(4, 3);
    while let Some(q) = round.current().copied() {
        let wrong = DivisibilityClass::ALL
            .into_iter()
            .find(|c| *c != q.class())
            .unwrap();
        let record = round.answer(wrong, 1.0).unwrap();
        assert_eq!(*record.points(), 0);
    }
    assert_eq!(round.finish(10.0).score(), &0);
}

#[test]
fn test_hard_scoring_parameters() {
    let params = ScoringParameters::new(6.0, ScoringCurve::THIRD_TIME);
    assert_eq!(DrillConfig::default().division().scoring(Difficulty::Hard), params);
}
