//! The six Bloom's taxonomy cognitive levels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ClassifyError;

/// A cognitive level, ordered from factual recall to original synthesis.
///
/// The derived `Ord` follows declaration order, which is also the tie-break
/// order used when two levels score the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CognitiveLevel {
    Remembering,
    Understanding,
    Applying,
    Analyzing,
    Evaluating,
    Creating,
}

impl CognitiveLevel {
    /// Every level in ascending order of complexity.
    pub const ALL: [CognitiveLevel; 6] = [
        CognitiveLevel::Remembering,
        CognitiveLevel::Understanding,
        CognitiveLevel::Applying,
        CognitiveLevel::Analyzing,
        CognitiveLevel::Evaluating,
        CognitiveLevel::Creating,
    ];

    /// Zero-based position in [`CognitiveLevel::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// One-based level number as used in `BL-n` tags.
    pub fn ordinal(self) -> u8 {
        self as u8 + 1
    }

    /// Inverse of [`CognitiveLevel::ordinal`].
    pub fn from_ordinal(n: u8) -> Option<Self> {
        match n {
            1..=6 => Some(Self::ALL[usize::from(n - 1)]),
            _ => None,
        }
    }

    /// Short form code ("remember", "understand", ...).
    pub fn code(self) -> &'static str {
        match self {
            CognitiveLevel::Remembering => "remember",
            CognitiveLevel::Understanding => "understand",
            CognitiveLevel::Applying => "apply",
            CognitiveLevel::Analyzing => "analyze",
            CognitiveLevel::Evaluating => "evaluate",
            CognitiveLevel::Creating => "create",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CognitiveLevel::Remembering => "Remembering",
            CognitiveLevel::Understanding => "Understanding",
            CognitiveLevel::Applying => "Applying",
            CognitiveLevel::Analyzing => "Analyzing",
            CognitiveLevel::Evaluating => "Evaluating",
            CognitiveLevel::Creating => "Creating",
        }
    }
}

impl fmt::Display for CognitiveLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CognitiveLevel {
    type Err = ClassifyError;

    /// Accepts full names, form codes, and `1`..`6` / `BL-n` ordinals.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let ordinal = normalized.strip_prefix("bl-").unwrap_or(&normalized);
        if let Some(level) = ordinal.parse::<u8>().ok().and_then(Self::from_ordinal) {
            return Ok(level);
        }

        Self::ALL
            .into_iter()
            .find(|level| {
                normalized == level.code() || normalized == level.name().to_lowercase()
            })
            .ok_or_else(|| ClassifyError::UnknownLevel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_display_and_parse() {
        assert_eq!(CognitiveLevel::Analyzing.to_string(), "Analyzing");
        assert_eq!(
            "remembering".parse::<CognitiveLevel>().unwrap(),
            CognitiveLevel::Remembering
        );
        assert_eq!(
            "Evaluating".parse::<CognitiveLevel>().unwrap(),
            CognitiveLevel::Evaluating
        );
        assert_eq!(
            "apply".parse::<CognitiveLevel>().unwrap(),
            CognitiveLevel::Applying
        );
        assert_eq!(
            "3".parse::<CognitiveLevel>().unwrap(),
            CognitiveLevel::Applying
        );
        assert_eq!(
            "BL-6".parse::<CognitiveLevel>().unwrap(),
            CognitiveLevel::Creating
        );
        assert!("7".parse::<CognitiveLevel>().is_err());
        assert!("synthesis".parse::<CognitiveLevel>().is_err());
    }

    #[test]
    fn ordering_follows_complexity() {
        assert!(CognitiveLevel::Remembering < CognitiveLevel::Creating);
        for (i, level) in CognitiveLevel::ALL.iter().enumerate() {
            assert_eq!(level.index(), i);
            assert_eq!(CognitiveLevel::from_ordinal(level.ordinal()), Some(*level));
        }
        assert_eq!(CognitiveLevel::from_ordinal(0), None);
    }

    #[test]
    fn serde_uses_level_names() {
        let json = serde_json::to_string(&CognitiveLevel::Understanding).unwrap();
        assert_eq!(json, "\"Understanding\"");
        let back: CognitiveLevel = serde_json::from_str("\"Creating\"").unwrap();
        assert_eq!(back, CognitiveLevel::Creating);
    }
}
