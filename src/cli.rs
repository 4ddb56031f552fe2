//! Command-line interface for number_drills.

use clap::{Parser, Subcommand};
use drill_engine::{Operation, ScoringPreset};
use number_drills::{Difficulty, SchemePreset};
use std::path::PathBuf;

/// Number Drills - divisibility and column arithmetic practice
#[derive(Parser, Debug)]
#[command(name = "number_drills")]
#[command(about = "Timed arithmetic drills for children", long_about = None)]
#[command(version)]
pub struct Cli {
    /// TOML configuration file (stock settings when omitted)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a divisibility quiz round and print it as JSON
    Division {
        /// Number of questions (config default when omitted)
        #[arg(short, long)]
        questions: Option<usize>,

        /// Time setting
        #[arg(short, long, default_value = "medium")]
        difficulty: Difficulty,

        /// Seed for a reproducible round
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Generate a column arithmetic round and print it as JSON
    Column {
        /// Number of problems (config default when omitted)
        #[arg(short, long)]
        questions: Option<usize>,

        /// Digits per operand, 2 to 5 (config default when omitted)
        #[arg(long)]
        digits: Option<u8>,

        /// Operations, comma separated: add, sub (config default when omitted)
        #[arg(long, value_delimiter = ',')]
        ops: Vec<Operation>,

        /// Time setting
        #[arg(short, long, default_value = "medium")]
        difficulty: Difficulty,

        /// Seed for a reproducible round
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the worked answer for a column problem
    Analyze {
        /// Top operand
        a: u32,

        /// Bottom operand
        b: u32,

        /// Operation: add or sub
        #[arg(long, default_value = "add")]
        op: Operation,

        /// Column width (width of the larger operand when omitted)
        #[arg(long)]
        digits: Option<u8>,
    },

    /// Points for a correct answer after ELAPSED of MAX seconds
    Points {
        /// Seconds taken
        elapsed: f64,

        /// Time limit in seconds
        max: f64,

        /// Scoring curve: half-time or third-time
        #[arg(long, default_value = "half-time")]
        preset: ScoringPreset,
    },

    /// Print a fresh group id
    GroupId {
        /// Seed for a reproducible id
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Check whether any constant guess beats the others in the quiz
    Simulate {
        /// Rounds per strategy
        #[arg(short, long, default_value = "1000")]
        games: usize,

        /// Questions per round
        #[arg(short, long, default_value = "20")]
        questions: usize,

        /// Point scheme for a single run
        #[arg(long, default_value = "five-penalty-one")]
        scheme: SchemePreset,

        /// Search every class mix and point scheme for the fairest pairing,
        /// then replay the winner at 10, 20 and 40 questions
        #[arg(long)]
        search: bool,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Play a quiz round with a simulated player and post it to a board
    Demo {
        /// Player name
        #[arg(long, default_value = "player")]
        name: String,

        /// Group to post to (default group when omitted)
        #[arg(long, default_value = "")]
        group: String,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },
}
