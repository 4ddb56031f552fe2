//! Strategy-balance simulation for the divisibility quiz.
//!
//! Plays many rounds for each lazy strategy (always answering the same
//! class) to see whether any single guess beats the others under a given
//! mix of classes and point scheme. A well-tuned setup keeps the balance
//! percentage low so no constant guess is worth learning.
//!
//! [`Simulator::search`] tries a grid of class mixes against every named
//! point scheme and keeps the fairest pairing.

use derive_getters::Getters;
use derive_more::{Display, Error};
use drill_engine::{DivisibilityClass, DivisionProblem, EngineError, classify};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Simulation error.
#[derive(Debug, Clone, Display, Error)]
#[display("Simulation error: {} at {}:{}", message, file, line)]
pub struct SimulationError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SimulationError {
    /// Creates a new simulation error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<EngineError> for SimulationError {
    #[track_caller]
    fn from(err: EngineError) -> Self {
        Self::new(format!("Generation failed: {}", err))
    }
}

/// How often each class is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Getters, Serialize, Deserialize)]
pub struct ClassWeights {
    /// Weight of multiples of 9.
    nine: f64,
    /// Weight of multiples of 6 that are not multiples of 9.
    six: f64,
    /// Weight of odd multiples of 3 outside the 9 class.
    three: f64,
    /// Weight of numbers not divisible by 3.
    other: f64,
}

impl ClassWeights {
    /// Builds a mix. Weights are relative and need not sum to one.
    pub fn new(nine: f64, six: f64, three: f64, other: f64) -> Self {
        Self {
            nine,
            six,
            three,
            other,
        }
    }

    /// Every class equally likely, as in a real quiz round.
    pub fn uniform() -> Self {
        Self::new(0.25, 0.25, 0.25, 0.25)
    }

    /// Every mix on a five-percent grid: 9 from 10 to 35, 6 from 10 to 40,
    /// 3 from 10 to 45, with the remaining share of other between 5 and 50.
    #[instrument]
    pub fn grid() -> Vec<Self> {
        let mut mixes = Vec::new();
        for nine in (10..=35).step_by(5) {
            for six in (10..=40).step_by(5) {
                for three in (10..=45).step_by(5) {
                    let other = 100 - nine - six - three;
                    if (5..=50).contains(&other) {
                        mixes.push(Self::new(
                            f64::from(nine) / 100.0,
                            f64::from(six) / 100.0,
                            f64::from(three) / 100.0,
                            f64::from(other) / 100.0,
                        ));
                    }
                }
            }
        }
        debug!(count = mixes.len(), "Built class mix grid");
        mixes
    }

    fn sampler(&self) -> Result<WeightedIndex<f64>, SimulationError> {
        WeightedIndex::new([self.nine, self.six, self.three, self.other])
            .map_err(|e| SimulationError::new(format!("Invalid class weights: {}", e)))
    }
}

impl Default for ClassWeights {
    fn default() -> Self {
        Self::uniform()
    }
}

/// Points for each (actual class, guessed class) pair.
///
/// Each row lists the correct-answer award first, then partial credit for
/// coarser classes, then the penalty for anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PointScheme {
    /// Multiple of 9: guessed 9, 6, 3, other.
    nine: [i32; 4],
    /// Multiple of 6: guessed 6, 3, anything else.
    six: [i32; 3],
    /// Multiple of 3: guessed 3, anything else.
    three: [i32; 2],
    /// Not a multiple of 3: guessed other, anything else.
    other: [i32; 2],
}

impl PointScheme {
    /// Builds a scheme from its four rows.
    pub fn new(nine: [i32; 4], six: [i32; 3], three: [i32; 2], other: [i32; 2]) -> Self {
        Self {
            nine,
            six,
            three,
            other,
        }
    }

    /// Graded credit with a one-point penalty for a wrong class.
    pub fn graded() -> Self {
        Self::new([5, 3, 2, -1], [5, 3, -1], [5, -1], [5, -1])
    }

    /// Points for guessing `guess` when the number is in `actual`.
    pub fn award(&self, actual: DivisibilityClass, guess: DivisibilityClass) -> i32 {
        use DivisibilityClass::{Nine, Other, Six, Three};
        match (actual, guess) {
            (Nine, Nine) => self.nine[0],
            (Nine, Six) => self.nine[1],
            (Nine, Three) => self.nine[2],
            (Nine, Other) => self.nine[3],
            (Six, Six) => self.six[0],
            (Six, Three) => self.six[1],
            (Six, _) => self.six[2],
            (Three, Three) => self.three[0],
            (Three, _) => self.three[1],
            (Other, Other) => self.other[0],
            (Other, _) => self.other[1],
        }
    }
}

/// Named point schemes compared by [`Simulator::search`].
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
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SchemePreset {
    /// Three for any right class, small partial credit, no penalty.
    FlatThree,
    /// Rarer classes pay more, no penalty.
    GradedNoPenalty,
    /// Four for any right class, no penalty.
    FlatFour,
    /// Four for a right class, one off for a wrong one.
    FourPenaltyOne,
    /// Five for a right class, one off for a wrong one.
    #[default]
    FivePenaltyOne,
    /// Five for a right class, two off for a wrong one.
    FivePenaltyTwo,
    /// Six for a right class, two off for a wrong one.
    SixPenaltyTwo,
    /// Ten for 9 and other, seven for 6, four for 3, two off.
    RareTen,
    /// Eight for 9 and other, six for 6, four for 3, one off.
    RareEight,
}

impl SchemePreset {
    /// The point table behind the name.
    pub fn scheme(self) -> PointScheme {
        match self {
            Self::FlatThree => PointScheme::new([3, 2, 1, 0], [3, 2, 0], [3, 0], [3, 0]),
            Self::GradedNoPenalty => PointScheme::new([5, 3, 2, 0], [4, 2, 0], [3, 0], [5, 0]),
            Self::FlatFour => PointScheme::new([4, 2, 1, 0], [4, 2, 0], [4, 0], [4, 0]),
            Self::FourPenaltyOne => PointScheme::new([4, 2, 1, -1], [4, 2, -1], [4, -1], [4, -1]),
            Self::FivePenaltyOne => PointScheme::graded(),
            Self::FivePenaltyTwo => PointScheme::new([5, 3, 2, -2], [5, 3, -2], [5, -2], [5, -2]),
            Self::SixPenaltyTwo => PointScheme::new([6, 4, 2, -2], [6, 3, -2], [6, -2], [6, -2]),
            Self::RareTen => PointScheme::new([10, 5, 3, -2], [7, 4, -2], [4, -2], [10, -2]),
            Self::RareEight => PointScheme::new([8, 5, 3, -1], [6, 4, -1], [4, -1], [8, -1]),
        }
    }
}

impl Default for PointScheme {
    fn default() -> Self {
        Self::graded()
    }
}

/// Score spread over many rounds.
#[derive(Debug, Clone, Copy, PartialEq, Getters, Serialize, Deserialize)]
pub struct StrategyStats {
    /// Mean round score.
    average: f64,
    /// Worst round.
    min: i64,
    /// Best round.
    max: i64,
    /// `(max - min) / average * 100`, how much luck moves a round.
    variance_percent: f64,
}

impl StrategyStats {
    fn from_scores(scores: &[i64]) -> Self {
        let total: i64 = scores.iter().sum();
        let average = if scores.is_empty() {
            0.0
        } else {
            total as f64 / scores.len() as f64
        };
        let min = scores.iter().copied().min().unwrap_or(0);
        let max = scores.iter().copied().max().unwrap_or(0);
        let variance_percent = if average == 0.0 {
            0.0
        } else {
            (max - min) as f64 / average.abs() * 100.0
        };
        Self {
            average,
            min,
            max,
            variance_percent,
        }
    }
}

/// Results for one constant-guess strategy.
#[derive(Debug, Clone, Copy, PartialEq, Getters, Serialize, Deserialize)]
pub struct StrategyResult {
    /// The class always answered.
    strategy: DivisibilityClass,
    /// Its score spread.
    stats: StrategyStats,
}

/// Outcome of a full simulation.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Questions per round.
    questions: usize,
    /// One entry per constant guess, in 3, 6, 9, other order.
    strategies: Vec<StrategyResult>,
    /// Spread between the best and worst strategy averages, as a
    /// percentage of their midpoint. Lower is fairer.
    balance_percent: f64,
    /// A player who always answers correctly.
    perfect: StrategyStats,
}

/// Fairest pairing found by [`Simulator::search`].
#[derive(Debug, Clone, Copy, PartialEq, Getters, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Winning class mix.
    weights: ClassWeights,
    /// Winning point scheme.
    preset: SchemePreset,
    /// Its balance percentage.
    balance_percent: f64,
    /// Pairings tried.
    candidates: usize,
}

/// Runs the lazy strategies against a class mix and point scheme.
#[derive(Debug, Clone, Copy, Getters, Serialize, Deserialize)]
pub struct Simulator {
    /// Class mix.
    weights: ClassWeights,
    /// Point table.
    scheme: PointScheme,
    /// Rounds per strategy.
    games: usize,
    /// Questions per round.
    questions: usize,
}

impl Simulator {
    /// Strategies tried, in report order.
    pub const STRATEGIES: [DivisibilityClass; 4] = [
        DivisibilityClass::Three,
        DivisibilityClass::Six,
        DivisibilityClass::Nine,
        DivisibilityClass::Other,
    ];

    /// Configures a simulation.
    pub fn new(weights: ClassWeights, scheme: PointScheme, games: usize, questions: usize) -> Self {
        Self {
            weights,
            scheme,
            games,
            questions,
        }
    }

    /// Plays every strategy and the perfect player.
    #[instrument(skip(self, rng), fields(games = self.games, questions = self.questions))]
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SimulationReport, SimulationError> {
        let sampler = self.weights.sampler()?;
        let strategies = self.play_strategies(&sampler, rng)?;

        let perfect_scores = self.play_rounds(&sampler, rng, |actual| actual)?;
        let perfect = StrategyStats::from_scores(&perfect_scores);
        let balance_percent = balance(strategies.iter().map(|s| s.stats.average));

        info!(balance_percent, perfect_average = perfect.average, "Simulation complete");
        Ok(SimulationReport {
            questions: self.questions,
            strategies,
            balance_percent,
            perfect,
        })
    }

    /// Runs the same setup at several round lengths.
    #[instrument(skip(self, rng))]
    pub fn sweep<R: Rng + ?Sized>(
        &self,
        question_counts: &[usize],
        rng: &mut R,
    ) -> Result<Vec<SimulationReport>, SimulationError> {
        question_counts
            .iter()
            .map(|&questions| Self { questions, ..*self }.run(&mut *rng))
            .collect()
    }

    /// Tries every mix in `grid` with every scheme in `presets` and keeps the
    /// pairing with the lowest balance. The first one found wins a tie.
    ///
    /// Each pairing is played from a fresh `StdRng` seeded with `seed`, so
    /// all candidates face the same draws.
    #[instrument(skip(grid, presets), fields(mixes = grid.len(), schemes = presets.len()))]
    pub fn search(
        grid: &[ClassWeights],
        presets: &[SchemePreset],
        games: usize,
        questions: usize,
        seed: u64,
    ) -> Result<SearchOutcome, SimulationError> {
        let mut best: Option<SearchOutcome> = None;
        let mut candidates = 0;
        for &weights in grid {
            let sampler = weights.sampler()?;
            for &preset in presets {
                candidates += 1;
                let simulator = Self::new(weights, preset.scheme(), games, questions);
                let mut rng = StdRng::seed_from_u64(seed);
                let strategies = simulator.play_strategies(&sampler, &mut rng)?;
                let balance_percent = balance(strategies.iter().map(|s| s.stats.average));
                if best.is_none_or(|b| balance_percent < b.balance_percent) {
                    debug!(%preset, balance_percent, "New best pairing");
                    best = Some(SearchOutcome {
                        weights,
                        preset,
                        balance_percent,
                        candidates: 0,
                    });
                }
            }
        }

        let best = best.ok_or_else(|| SimulationError::new("Nothing to search"))?;
        info!(
            preset = %best.preset,
            balance_percent = best.balance_percent,
            candidates,
            "Search complete"
        );
        Ok(SearchOutcome { candidates, ..best })
    }

    fn play_strategies<R: Rng + ?Sized>(
        &self,
        sampler: &WeightedIndex<f64>,
        rng: &mut R,
    ) -> Result<Vec<StrategyResult>, SimulationError> {
        let mut strategies = Vec::with_capacity(Self::STRATEGIES.len());
        for strategy in Self::STRATEGIES {
            let scores = self.play_rounds(sampler, rng, |_| strategy)?;
            let stats = StrategyStats::from_scores(&scores);
            debug!(%strategy, average = stats.average, "Strategy simulated");
            strategies.push(StrategyResult { strategy, stats });
        }
        Ok(strategies)
    }

    fn play_rounds<R, F>(
        &self,
        sampler: &WeightedIndex<f64>,
        rng: &mut R,
        guess: F,
    ) -> Result<Vec<i64>, SimulationError>
    where
        R: Rng + ?Sized,
        F: Fn(DivisibilityClass) -> DivisibilityClass,
    {
        let mut scores = Vec::with_capacity(self.games);
        for _ in 0..self.games {
            let mut score = 0i64;
            for _ in 0..self.questions {
                let class = DivisibilityClass::ALL[sampler.sample(rng)];
                let problem = DivisionProblem::generate(class, rng)?;
                let actual = classify(problem.number());
                score += i64::from(self.scheme.award(actual, guess(actual)));
            }
            scores.push(score);
        }
        Ok(scores)
    }
}

/// `(max - min) / |midpoint| * 100` over the averages; zero when they all vanish.
pub fn balance(averages: impl IntoIterator<Item = f64>) -> f64 {
    let (min, max) = averages
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), avg| {
            (lo.min(avg), hi.max(avg))
        });
    let midpoint = (max + min) / 2.0;
    if !midpoint.is_finite() || midpoint == 0.0 {
        0.0
    } else {
        (max - min) / midpoint.abs() * 100.0
    }
}
