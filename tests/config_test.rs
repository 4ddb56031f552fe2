//! Tests for loading drill configuration from disk.

use drill_engine::{Operation, ScoringCurve};
use number_drills::{Difficulty, DrillConfig};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_from_file_reads_overrides() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("drills.toml");
    fs::write(
        &path,
        r#"
[division]
questions = 12
preset = "half-time"

[column.timings.hard]
base_time = 8.0
extra_time_per_digit = 3.0

[column]
operations = ["addition"]
"#,
    )
    .expect("Failed to write TOML");

    let config = DrillConfig::from_file(&path).expect("Load failed");
    assert_eq!(*config.division().questions(), 12);
    assert_eq!(
        config.division().scoring(Difficulty::Easy).curve(),
        ScoringCurve::HALF_TIME
    );
    assert_eq!(config.column().operations(), &vec![Operation::Addition]);
    let hard = config.column().timings().for_difficulty(Difficulty::Hard);
    assert_eq!(*hard.base_time(), 8.0);
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let err = DrillConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[division\nquestions = ").expect("Write failed");
    assert!(DrillConfig::from_file(&path).is_err());
}

#[test]
fn test_non_positive_time_limit_rejected() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("limits.toml");

    fs::write(&path, "[division.times]\nmedium = -1.0\n").expect("Write failed");
    let err = DrillConfig::from_file(&path).unwrap_err();
    assert!(err.message.contains("division.times.medium"));

    fs::write(
        &path,
        "[column.timings.medium]\nbase_time = 0.0\nextra_time_per_digit = 2.0\n",
    )
    .expect("Write failed");
    let err = DrillConfig::from_file(&path).unwrap_err();
    assert!(err.message.contains("column.timings.medium.base_time"));
}

#[test]
fn test_sub_second_limit_accepted() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("fast.toml");
    fs::write(&path, "[division.times]\nmedium = 0.5\n").expect("Write failed");

    let config = DrillConfig::from_file(&path).expect("Load failed");
    let scoring = config.division().scoring(Difficulty::Medium);
    assert_eq!(scoring.max_time_seconds(), 0.5);
}
