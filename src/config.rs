//! Drill configuration loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) gives the
//! stock timings.

use derive_getters::Getters;
use derive_more::{Display, Error};
use drill_engine::{DigitCount, Operation, ScoringParameters, ScoringPreset};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

/// How much time the player gets per question.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    /// Most time per question.
    Easy,
    /// Stock setting.
    #[default]
    Medium,
    /// Least time per question.
    Hard,
}

impl Difficulty {
    /// Label shown to players.
    #[instrument]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

/// Seconds per division question at each difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Getters, Serialize, Deserialize)]
pub struct DifficultyTimes {
    /// Easy limit.
    #[serde(default = "default_division_easy")]
    easy: f64,
    /// Medium limit.
    #[serde(default = "default_division_medium")]
    medium: f64,
    /// Hard limit.
    #[serde(default = "default_division_hard")]
    hard: f64,
}

fn default_division_easy() -> f64 {
    15.0
}

fn default_division_medium() -> f64 {
    10.0
}

fn default_division_hard() -> f64 {
    6.0
}

impl Default for DifficultyTimes {
    fn default() -> Self {
        Self {
            easy: default_division_easy(),
            medium: default_division_medium(),
            hard: default_division_hard(),
        }
    }
}

impl DifficultyTimes {
    /// Limit for `difficulty`.
    #[instrument(skip(self))]
    pub fn for_difficulty(&self, difficulty: Difficulty) -> f64 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

/// Column time limit: a base plus an allowance for every digit past two.
#[derive(Debug, Clone, Copy, PartialEq, Getters, Serialize, Deserialize)]
pub struct ColumnTiming {
    /// Seconds for a two-digit problem.
    base_time: f64,
    /// Seconds added per extra digit.
    extra_time_per_digit: f64,
}

impl ColumnTiming {
    /// Builds a timing rule.
    pub fn new(base_time: f64, extra_time_per_digit: f64) -> Self {
        Self {
            base_time,
            extra_time_per_digit,
        }
    }

    /// Limit for problems of `digit_count` digits.
    #[instrument(skip(self))]
    pub fn max_time(&self, digit_count: DigitCount) -> f64 {
        let extra_digits = f64::from(digit_count.get().saturating_sub(2));
        self.base_time + extra_digits * self.extra_time_per_digit
    }
}

/// Column timings for each difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Getters, Serialize, Deserialize)]
pub struct ColumnTimings {
    /// Easy timing.
    #[serde(default = "default_column_easy")]
    easy: ColumnTiming,
    /// Medium timing.
    #[serde(default = "default_column_medium")]
    medium: ColumnTiming,
    /// Hard timing.
    #[serde(default = "default_column_hard")]
    hard: ColumnTiming,
}

fn default_column_easy() -> ColumnTiming {
    ColumnTiming::new(18.0, 8.0)
}

fn default_column_medium() -> ColumnTiming {
    ColumnTiming::new(12.0, 4.0)
}

fn default_column_hard() -> ColumnTiming {
    ColumnTiming::new(6.0, 2.0)
}

impl Default for ColumnTimings {
    fn default() -> Self {
        Self {
            easy: default_column_easy(),
            medium: default_column_medium(),
            hard: default_column_hard(),
        }
    }
}

impl ColumnTimings {
    /// Timing rule for `difficulty`.
    pub fn for_difficulty(&self, difficulty: Difficulty) -> ColumnTiming {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

fn default_question_count() -> usize {
    20
}

/// Settings for the divisibility quiz.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct DivisionConfig {
    /// Per-difficulty time limits.
    #[serde(default)]
    times: DifficultyTimes,
    /// Questions per round.
    #[serde(default = "default_question_count")]
    questions: usize,
    /// Scoring curve.
    #[serde(default = "default_division_preset")]
    preset: ScoringPreset,
}

fn default_division_preset() -> ScoringPreset {
    ScoringPreset::ThirdTime
}

impl Default for DivisionConfig {
    fn default() -> Self {
        Self {
            times: DifficultyTimes::default(),
            questions: default_question_count(),
            preset: default_division_preset(),
        }
    }
}

impl DivisionConfig {
    /// Time limit and curve for a round at `difficulty`.
    #[instrument(skip(self))]
    pub fn scoring(&self, difficulty: Difficulty) -> ScoringParameters {
        ScoringParameters::new(self.times.for_difficulty(difficulty), self.preset.curve())
    }
}

/// Settings for column arithmetic.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// Per-difficulty timing rules.
    #[serde(default)]
    timings: ColumnTimings,
    /// Operand width.
    #[serde(default)]
    digits: DigitCount,
    /// Problems per round.
    #[serde(default = "default_question_count")]
    questions: usize,
    /// Operations mixed into a round.
    #[serde(default = "default_operations")]
    operations: Vec<Operation>,
    /// Scoring curve.
    #[serde(default)]
    preset: ScoringPreset,
}

fn default_operations() -> Vec<Operation> {
    vec![Operation::Subtraction]
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            timings: ColumnTimings::default(),
            digits: DigitCount::default(),
            questions: default_question_count(),
            operations: default_operations(),
            preset: ScoringPreset::default(),
        }
    }
}

impl ColumnConfig {
    /// Time limit and curve for `digits`-wide problems at `difficulty`.
    #[instrument(skip(self))]
    pub fn scoring(&self, difficulty: Difficulty, digits: DigitCount) -> ScoringParameters {
        let max_time = self.timings.for_difficulty(difficulty).max_time(digits);
        ScoringParameters::new(max_time, self.preset.curve())
    }
}

fn default_leaderboard_limit() -> usize {
    10
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct DrillConfig {
    /// Divisibility quiz settings.
    #[serde(default)]
    division: DivisionConfig,
    /// Column arithmetic settings.
    #[serde(default)]
    column: ColumnConfig,
    /// Entries shown per leaderboard.
    #[serde(default = "default_leaderboard_limit")]
    leaderboard_limit: usize,
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            division: DivisionConfig::default(),
            column: ColumnConfig::default(),
            leaderboard_limit: default_leaderboard_limit(),
        }
    }
}

impl DrillConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml_str(&content)?;
        info!(
            division_questions = config.division.questions,
            column_questions = config.column.questions,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every time limit is a positive, finite number of seconds.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        for difficulty in Difficulty::iter() {
            let division = self.division.times.for_difficulty(difficulty);
            check_limit(&format!("division.times.{difficulty}"), division)?;

            let column = self.column.timings.for_difficulty(difficulty);
            check_limit(&format!("column.timings.{difficulty}.base_time"), column.base_time)?;
            if !column.extra_time_per_digit.is_finite() || column.extra_time_per_digit < 0.0 {
                return Err(ConfigError::new(format!(
                    "column.timings.{difficulty}.extra_time_per_digit must not be negative, got {}",
                    column.extra_time_per_digit
                )));
            }
        }
        Ok(())
    }
}

fn check_limit(field: &str, seconds: f64) -> Result<(), ConfigError> {
    if seconds.is_finite() && seconds > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::new(format!(
            "{field} must be a positive number of seconds, got {seconds}"
        )))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = DrillConfig::from_toml_str("").unwrap();
        assert_eq!(config, DrillConfig::default());
        assert_eq!(*config.leaderboard_limit(), 10);
    }

    #[test]
    fn test_column_time_limits() {
        let timings = ColumnTimings::default();
        let two = DigitCount::new(2).unwrap();
        let three = DigitCount::new(3).unwrap();
        let five = DigitCount::new(5).unwrap();
        assert_eq!(timings.for_difficulty(Difficulty::Easy).max_time(two), 18.0);
        assert_eq!(timings.for_difficulty(Difficulty::Medium).max_time(three), 16.0);
        assert_eq!(timings.for_difficulty(Difficulty::Easy).max_time(five), 42.0);
        assert_eq!(timings.for_difficulty(Difficulty::Hard).max_time(five), 12.0);
    }

    #[test]
    fn test_division_times() {
        let times = DifficultyTimes::default();
        assert_eq!(times.for_difficulty(Difficulty::Easy), 15.0);
        assert_eq!(times.for_difficulty(Difficulty::Medium), 10.0);
        assert_eq!(times.for_difficulty(Difficulty::Hard), 6.0);
    }

    #[test]
    fn test_partial_override() {
        let config = DrillConfig::from_toml_str(
            r#"
leaderboard_limit = 5

[division.times]
hard = 4.0

[column]
digits = 3
operations = ["add", "subtraction"]
"#,
        )
        .unwrap();
        assert_eq!(*config.leaderboard_limit(), 5);
        assert_eq!(*config.division().times().hard(), 4.0);
        assert_eq!(*config.division().times().easy(), 15.0);
        assert_eq!(config.column().digits().get(), 3);
        assert_eq!(
            config.column().operations(),
            &vec![Operation::Addition, Operation::Subtraction]
        );
    }

    #[test]
    fn test_rejects_bad_digit_count() {
        let err = DrillConfig::from_toml_str("[column]\ndigits = 9\n").unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }

    #[test]
    fn test_rejects_zero_division_limit() {
        let err = DrillConfig::from_toml_str("[division.times]\nmedium = 0.0\n").unwrap_err();
        assert!(err.message.contains("division.times.medium"));
    }

    #[test]
    fn test_rejects_negative_column_limit() {
        let err = DrillConfig::from_toml_str(
            "[column.timings.hard]\nbase_time = -2.0\nextra_time_per_digit = 1.0\n",
        )
        .unwrap_err();
        assert!(err.message.contains("column.timings.hard.base_time"));

        let err = DrillConfig::from_toml_str(
            "[column.timings.easy]\nbase_time = 10.0\nextra_time_per_digit = -1.0\n",
        )
        .unwrap_err();
        assert!(err.message.contains("extra_time_per_digit"));
    }

    #[test]
    fn test_accepts_short_positive_limit() {
        let config = DrillConfig::from_toml_str("[division.times]\nhard = 0.5\n").unwrap();
        assert_eq!(config.division().times().for_difficulty(Difficulty::Hard), 0.5);
    }

    #[test]
    fn test_difficulty_names() {
        use std::str::FromStr;
        assert_eq!(Difficulty::from_str("hard").unwrap(), Difficulty::Hard);
        assert_eq!(Difficulty::Easy.to_string(), "easy");
        assert_eq!(Difficulty::Medium.display_name(), "Medium");
    }
}
