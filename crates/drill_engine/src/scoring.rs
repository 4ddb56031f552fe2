//! Time-decayed points for a correct answer.
//!
//! Full credit is given while the answer comes within the grace window.
//! After that, points fall linearly to the floor at the time limit and stay
//! there.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Points for a fast correct answer.
pub const MAX_POINTS: u32 = 10;

/// Share of the time limit that earns full credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraceWindow {
    /// First half of the time limit.
    Half,
    /// First third of the time limit.
    Third,
}

impl GraceWindow {
    /// The window as a fraction of the time limit.
    pub fn fraction(self) -> f64 {
        match self {
            Self::Half => 1.0 / 2.0,
            Self::Third => 1.0 / 3.0,
        }
    }
}

/// Shape of the decay: where it starts and where it bottoms out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoringCurve {
    floor: u32,
    grace: GraceWindow,
}

impl ScoringCurve {
    /// Full credit for the first half, decaying to 5.
    pub const HALF_TIME: Self = Self {
        floor: 5,
        grace: GraceWindow::Half,
    };

    /// Full credit for the first third, decaying to 3.
    pub const THIRD_TIME: Self = Self {
        floor: 3,
        grace: GraceWindow::Third,
    };

    /// A custom curve. The floor is capped at [`MAX_POINTS`].
    pub fn new(floor: u32, grace: GraceWindow) -> Self {
        Self {
            floor: floor.min(MAX_POINTS),
            grace,
        }
    }

    /// Half-time grace window with a custom floor.
    pub fn half_time_with_floor(floor: u32) -> Self {
        Self::new(floor, GraceWindow::Half)
    }

    /// Points once the time limit has passed.
    pub fn floor(&self) -> u32 {
        self.floor
    }

    /// The full-credit window.
    pub fn grace(&self) -> GraceWindow {
        self.grace
    }

    /// Points for a correct answer after `elapsed` seconds against a limit
    /// of `max_time` seconds. Always within `floor..=MAX_POINTS`.
    #[instrument]
    pub fn points(&self, elapsed: f64, max_time: f64) -> u32 {
        let grace_end = max_time * self.grace.fraction();
        if elapsed <= grace_end {
            return MAX_POINTS;
        }
        if elapsed <= max_time {
            let decay_span = max_time - grace_end;
            let drop = f64::from(MAX_POINTS - self.floor);
            let points = f64::from(MAX_POINTS) - (elapsed - grace_end) / decay_span * drop;
            return (points.round() as u32).clamp(self.floor, MAX_POINTS);
        }
        self.floor
    }
}

impl Default for ScoringCurve {
    fn default() -> Self {
        Self::HALF_TIME
    }
}

/// Named curve, as written in configuration files.
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
pub enum ScoringPreset {
    /// [`ScoringCurve::HALF_TIME`].
    #[default]
    HalfTime,
    /// [`ScoringCurve::THIRD_TIME`].
    ThirdTime,
}

impl ScoringPreset {
    /// The curve this preset names.
    pub fn curve(self) -> ScoringCurve {
        match self {
            Self::HalfTime => ScoringCurve::HALF_TIME,
            Self::ThirdTime => ScoringCurve::THIRD_TIME,
        }
    }
}

/// Time limit plus curve for one game configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringParameters {
    max_time_seconds: f64,
    curve: ScoringCurve,
}

impl ScoringParameters {
    /// Bundles a time limit with a curve.
    pub fn new(max_time_seconds: f64, curve: ScoringCurve) -> Self {
        Self {
            max_time_seconds,
            curve,
        }
    }

    /// Time limit per question, in seconds.
    pub fn max_time_seconds(&self) -> f64 {
        self.max_time_seconds
    }

    /// The decay curve.
    pub fn curve(&self) -> ScoringCurve {
        self.curve
    }

    /// Points for a correct answer after `elapsed` seconds.
    pub fn points(&self, elapsed: f64) -> u32 {
        self.curve.points(elapsed, self.max_time_seconds)
    }
}

/// Points with a half-time grace window and the given floor.
pub fn points(elapsed_seconds: f64, max_time_seconds: f64, floor: u32) -> u32 {
    ScoringCurve::half_time_with_floor(floor).points(elapsed_seconds, max_time_seconds)
}
