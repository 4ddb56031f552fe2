//! Group identifiers shared between players.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument};

/// Words used for generated group ids.
pub const GROUP_WORDS: [&str; 40] = [
    "alpha", "beta", "gamma", "delta", "echo", "fox", "golf", "hotel", "india", "jazz", "kilo",
    "lima", "mike", "nova", "oscar", "papa", "quick", "red", "star", "tango", "ultra", "victor",
    "wolf", "xray", "yellow", "zero", "blue", "fire", "ice", "moon", "sun", "wave", "rock",
    "wind", "sky", "sea", "code", "data", "tech", "dev",
];

const DEFAULT_GROUP: &str = "default";

/// A normalised group name: trimmed and lowercase, never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct GroupId(String);

impl GroupId {
    /// Normalises user input. Blank input names the default group.
    #[instrument]
    pub fn parse(raw: &str) -> Self {
        let normalised = raw.trim().to_lowercase();
        if normalised.is_empty() {
            Self(DEFAULT_GROUP.to_string())
        } else {
            Self(normalised)
        }
    }

    /// A fresh `word-word-number` id with two different words.
    #[instrument(skip(rng))]
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut words = GROUP_WORDS.choose_multiple(rng, 2);
        let first = words.next().copied().unwrap_or("alpha");
        let second = words.next().copied().unwrap_or("beta");
        let number = rng.gen_range(0..=100);
        let id = Self(format!("{first}-{second}-{number}"));
        debug!(%id, "Generated group id");
        id
    }

    /// The normalised name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the shared default group.
    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_GROUP
    }
}

impl Default for GroupId {
    fn default() -> Self {
        Self(DEFAULT_GROUP.to_string())
    }
}

impl From<String> for GroupId {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<GroupId> for String {
    fn from(id: GroupId) -> Self {
        id.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
