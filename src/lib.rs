//! Number Drills - timed arithmetic practice for children
//!
//! Two drills built on [`drill_engine`]:
//!
//! - **Divisibility quiz**: name the finest class (9, 6, 3 or other) a number
//!   belongs to.
//! - **Column arithmetic**: work 2 to 5 digit addition and subtraction in
//!   columns, marking every carry and borrow.
//!
//! # Architecture
//!
//! - **Config**: TOML settings with stock defaults for every field
//! - **Games**: round orchestration, scoring and summaries
//! - **Leaderboard**: per-group boards keyed by game settings, behind an
//!   async store trait
//! - **Simulation**: checks that no constant guess pays off in the quiz
//!
//! # Example
//!
//! ```
//! use number_drills::{Difficulty, DivisionRound, DrillConfig};
//! use rand::SeedableRng;
//!
//! let config = DrillConfig::default();
//! let scoring = config.division().scoring(Difficulty::Medium);
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//!
//! let mut round = DivisionRound::new(8, scoring, &mut rng)?;
//! let question = *round.current().expect("round has questions");
//! let answer = round.answer(question.class(), 2.5)?;
//! assert_eq!(*answer.points(), 10);
//! # Ok::<(), number_drills::GameError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod games;
pub mod leaderboard;
mod simulation;

// Crate-level exports - Configuration
pub use config::{
    ColumnConfig, ColumnTiming, ColumnTimings, ConfigError, Difficulty, DifficultyTimes,
    DivisionConfig, DrillConfig,
};

// Crate-level exports - Rounds
pub use games::{
    ColumnAnswer, ColumnRound, DivisionAnswer, DivisionRound, GameError, GameErrorKind,
    RoundSummary, carry_quotas, class_quotas, format_clock, max_score, score_per_minute,
};

// Crate-level exports - Leaderboards
pub use leaderboard::{
    BoardKey, GroupId, InMemoryLeaderboard, LeaderboardEntry, LeaderboardError,
    LeaderboardErrorKind, LeaderboardStore, LocalBoard, merge_leaderboards,
};

// Crate-level exports - Simulation
pub use simulation::{
    ClassWeights, PointScheme, SchemePreset, SearchOutcome, SimulationError, SimulationReport,
    Simulator, StrategyResult, StrategyStats, balance,
};
