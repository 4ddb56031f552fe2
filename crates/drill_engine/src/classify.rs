//! Divisibility classes for the 3/6/9 quiz.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// The finest divisibility bucket a number falls into, checked 9, then 6,
/// then 3.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum DivisibilityClass {
    /// Divisible by 9.
    #[serde(rename = "9")]
    #[strum(to_string = "9", serialize = "nine")]
    Nine,
    /// Divisible by 6 but not by 9.
    #[serde(rename = "6")]
    #[strum(to_string = "6", serialize = "six")]
    Six,
    /// Divisible by 3 but not by 6 or 9.
    #[serde(rename = "3")]
    #[strum(to_string = "3", serialize = "three")]
    Three,
    /// Not divisible by 3.
    #[serde(rename = "other")]
    #[strum(to_string = "other")]
    Other,
}

impl DivisibilityClass {
    /// All classes in quota order.
    pub const ALL: [DivisibilityClass; 4] = [
        DivisibilityClass::Nine,
        DivisibilityClass::Six,
        DivisibilityClass::Three,
        DivisibilityClass::Other,
    ];

    /// The divisor that defines this class, if any.
    pub fn divisor(self) -> Option<u32> {
        match self {
            Self::Nine => Some(9),
            Self::Six => Some(6),
            Self::Three => Some(3),
            Self::Other => None,
        }
    }
}

/// Maps a number to its divisibility class.
#[instrument]
pub fn classify(n: u32) -> DivisibilityClass {
    if n % 9 == 0 {
        DivisibilityClass::Nine
    } else if n % 6 == 0 {
        DivisibilityClass::Six
    } else if n % 3 == 0 {
        DivisibilityClass::Three
    } else {
        DivisibilityClass::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_classify_examples() {
        assert_eq!(classify(18), DivisibilityClass::Nine);
        assert_eq!(classify(81), DivisibilityClass::Nine);
        assert_eq!(classify(12), DivisibilityClass::Six);
        assert_eq!(classify(15), DivisibilityClass::Three);
        assert_eq!(classify(14), DivisibilityClass::Other);
    }

    #[test]
    fn test_classes_exclusive_and_exhaustive() {
        for n in 1..=2000u32 {
            let class = classify(n);
            let expected = if n % 9 == 0 {
                DivisibilityClass::Nine
            } else if n % 6 == 0 {
                DivisibilityClass::Six
            } else if n % 3 == 0 {
                DivisibilityClass::Three
            } else {
                DivisibilityClass::Other
            };
            assert_eq!(class, expected, "n = {n}");
        }
    }

    #[test]
    fn test_labels_round_trip() {
        for class in DivisibilityClass::ALL {
            let label = class.to_string();
            assert_eq!(DivisibilityClass::from_str(&label).unwrap(), class);
        }
        assert_eq!(DivisibilityClass::from_str("nine").unwrap(), DivisibilityClass::Nine);
    }
}
