//! Number Drills - command-line front end
//!
//! Generates rounds, works column problems, scores answers and runs the
//! quiz balance simulation.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use cli::{Cli, Command};
use drill_engine::{
    DigitCount, MAX_DIGITS, MIN_DIGITS, Operation, ScoringPreset, analyze,
};
use number_drills::{
    BoardKey, ClassWeights, ColumnRound, Difficulty, DivisionRound, DrillConfig, GroupId,
    InMemoryLeaderboard, LeaderboardEntry, LeaderboardStore, SchemePreset, Simulator,
    format_clock,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;
use std::path::Path;
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Division {
            questions,
            difficulty,
            seed,
        } => run_division(&config, questions, difficulty, seed),
        Command::Column {
            questions,
            digits,
            ops,
            difficulty,
            seed,
        } => run_column(&config, questions, digits, ops, difficulty, seed),
        Command::Analyze { a, b, op, digits } => run_analyze(a, b, op, digits),
        Command::Points {
            elapsed,
            max,
            preset,
        } => run_points(elapsed, max, preset),
        Command::GroupId { seed } => run_group_id(seed),
        Command::Simulate {
            games,
            questions,
            scheme,
            search,
            seed,
        } => {
            if search {
                run_search(games, questions, seed)
            } else {
                run_simulate(games, questions, scheme, seed)
            }
        }
        Command::Demo { name, group, seed } => run_demo(&config, name, group, seed).await,
    }
}

/// Loads the config file, or stock settings when none is given.
#[instrument]
fn load_config(path: Option<&Path>) -> Result<DrillConfig> {
    match path {
        Some(path) => Ok(DrillConfig::from_file(path)?),
        None => {
            debug!("No config file given, using defaults");
            Ok(DrillConfig::default())
        }
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints a generated divisibility round.
#[instrument(skip(config))]
fn run_division(
    config: &DrillConfig,
    questions: Option<usize>,
    difficulty: Difficulty,
    seed: Option<u64>,
) -> Result<()> {
    let count = questions.unwrap_or(*config.division().questions());
    let scoring = config.division().scoring(difficulty);
    let mut rng = make_rng(seed);
    let round = DivisionRound::new(count, scoring, &mut rng)?;

    print_json(&json!({
        "board": BoardKey::division(count, difficulty).to_string(),
        "scoring": scoring,
        "questions": round.questions(),
    }))
}

/// Prints a generated column round.
#[instrument(skip(config))]
fn run_column(
    config: &DrillConfig,
    questions: Option<usize>,
    digits: Option<u8>,
    ops: Vec<Operation>,
    difficulty: Difficulty,
    seed: Option<u64>,
) -> Result<()> {
    let count = questions.unwrap_or(*config.column().questions());
    let digit_count = match digits {
        Some(d) => DigitCount::new(d)?,
        None => *config.column().digits(),
    };
    let operations = if ops.is_empty() {
        config.column().operations().clone()
    } else {
        ops
    };
    let scoring = config.column().scoring(difficulty, digit_count);
    let mut rng = make_rng(seed);
    let round = ColumnRound::new(count, digit_count, &operations, scoring, &mut rng)?;

    let problems: Vec<_> = round
        .problems()
        .iter()
        .map(|p| {
            json!({
                "problem": p.to_string(),
                "answer": p.analysis().to_string(),
            })
        })
        .collect();
    print_json(&json!({
        "board": BoardKey::column(count, digit_count, &operations, difficulty).to_string(),
        "scoring": scoring,
        "problems": problems,
    }))
}

/// Prints the worked answer for one problem.
#[instrument]
fn run_analyze(a: u32, b: u32, op: Operation, digits: Option<u8>) -> Result<()> {
    let digit_count = match digits {
        Some(d) => DigitCount::new(d)?,
        None => {
            let width = a.max(b).max(1).ilog10() + 1;
            let width = u8::try_from(width)
                .unwrap_or(MAX_DIGITS)
                .clamp(MIN_DIGITS, MAX_DIGITS);
            DigitCount::new(width)?
        }
    };
    let analysis = analyze(a, b, op, digit_count)?;
    print_json(&json!({
        "result": analysis.to_string(),
        "overflow_digit": analysis.overflow_digit(),
        "result_digits": analysis.result_digits(),
        "carry_required": analysis.carry_required(),
    }))
}

/// Prints the points for one answer.
#[instrument]
fn run_points(elapsed: f64, max: f64, preset: ScoringPreset) -> Result<()> {
    let points = preset.curve().points(elapsed, max);
    println!("{points}");
    Ok(())
}

#[instrument]
fn run_group_id(seed: Option<u64>) -> Result<()> {
    let mut rng = make_rng(seed);
    println!("{}", GroupId::generate(&mut rng));
    Ok(())
}

/// Runs the balance simulation with uniform classes.
#[instrument]
fn run_simulate(
    games: usize,
    questions: usize,
    scheme: SchemePreset,
    seed: Option<u64>,
) -> Result<()> {
    let mut rng = make_rng(seed);
    let simulator = Simulator::new(ClassWeights::uniform(), scheme.scheme(), games, questions);
    let report = simulator.run(&mut rng)?;
    print_json(&report)
}

/// Searches the class mix grid against every named scheme, then replays the
/// winner at several round lengths.
#[instrument]
fn run_search(games: usize, questions: usize, seed: Option<u64>) -> Result<()> {
    let seed = seed.unwrap_or_else(|| StdRng::from_entropy().gen_range(0..u64::MAX));
    let grid = ClassWeights::grid();
    let presets: Vec<SchemePreset> = SchemePreset::iter().collect();
    info!(mixes = grid.len(), schemes = presets.len(), seed, "Searching");

    let outcome = Simulator::search(&grid, &presets, games, questions, seed)?;
    let winner = Simulator::new(*outcome.weights(), outcome.preset().scheme(), games, questions);
    let sweep = winner.sweep(&[10, 20, 40], &mut StdRng::seed_from_u64(seed))?;

    print_json(&json!({
        "seed": seed,
        "best": outcome,
        "scheme": outcome.preset().scheme(),
        "sweep": sweep,
    }))
}

/// Plays a quiz round with a simulated player, then posts and reads back
/// the group board.
#[instrument(skip(config))]
async fn run_demo(
    config: &DrillConfig,
    name: String,
    group: String,
    seed: Option<u64>,
) -> Result<()> {
    let difficulty = Difficulty::Medium;
    let count = *config.division().questions();
    let scoring = config.division().scoring(difficulty);
    let mut rng = make_rng(seed);
    let mut round = DivisionRound::new(count, scoring, &mut rng)?;

    let mut total_seconds = 0.0;
    while let Some(question) = round.current().copied() {
        // Up to a little past the limit, so some answers run out of time.
        let latest = (scoring.max_time_seconds() * 1.2).max(1.0);
        let elapsed = rng.gen_range(0.5..=latest);
        // Right four times out of five.
        let guess = if rng.gen_bool(0.8) {
            question.class()
        } else {
            drill_engine::DivisibilityClass::Other
        };
        round.answer(guess, elapsed)?;
        total_seconds += elapsed;
    }
    let summary = round.finish(total_seconds);
    info!(score = summary.score(), time = %format_clock(total_seconds), "Demo round played");

    let store = InMemoryLeaderboard::new();
    let group = GroupId::parse(&group);
    let key = BoardKey::division(count, difficulty);
    let entry = LeaderboardEntry::from_summary(&name, &summary, Utc::now())
        .context("Could not record the demo score")?;
    store.save_score(&group, &key, entry).await?;
    let top = store.top(&group, &key, *config.leaderboard_limit()).await?;

    print_json(&json!({
        "group": group,
        "board": key.to_string(),
        "summary": summary,
        "top": top,
    }))
}
