//! Classifier error types.
//!
//! These errors describe faults inside the classification pipeline and in
//! custom profile tables. [`crate::classify`] never returns them directly:
//! a fault during classification is folded into a degraded
//! [`crate::ClassificationResult`] with `actual_level = "Error"`.

use thiserror::Error;

use crate::level::CognitiveLevel;

/// Errors that can occur while building a registry or classifying a question.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// A level name or code could not be parsed.
    #[error("unknown cognitive level: {0}")]
    UnknownLevel(String),

    /// A profile table does not define a level.
    #[error("profile table is missing level {0}")]
    MissingLevel(CognitiveLevel),

    /// A profile table defines the same level twice.
    #[error("profile table defines level {0} more than once")]
    DuplicateLevel(CognitiveLevel),

    /// A level weight is not a finite positive number.
    #[error("invalid weight {weight} for level {level}: must be finite and > 0")]
    InvalidWeight { level: CognitiveLevel, weight: f64 },

    /// A complexity threshold lies outside `[0, 1]`.
    #[error("invalid complexity threshold {threshold} for level {level}: must be in [0, 1]")]
    InvalidThreshold {
        level: CognitiveLevel,
        threshold: f64,
    },

    /// A keyword or phrase pattern failed to compile.
    #[error("invalid pattern `{pattern}` for level {level}: {source}")]
    InvalidPattern {
        level: CognitiveLevel,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A level score came out NaN or infinite.
    #[error("non-finite score {score} for level {level}")]
    NonFiniteScore { level: CognitiveLevel, score: f64 },
}

impl ClassifyError {
    /// Returns `true` if this error comes from a bad profile table rather
    /// than from scoring a particular question.
    pub fn is_configuration(&self) -> bool {
        !matches!(
            self,
            ClassifyError::NonFiniteScore { .. } | ClassifyError::UnknownLevel(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_level() {
        let err = ClassifyError::InvalidWeight {
            level: CognitiveLevel::Applying,
            weight: -1.0,
        };
        assert_eq!(
            err.to_string(),
            "invalid weight -1 for level Applying: must be finite and > 0"
        );
        assert!(err.is_configuration());

        let err = ClassifyError::NonFiniteScore {
            level: CognitiveLevel::Creating,
            score: f64::INFINITY,
        };
        assert!(err.to_string().contains("Creating"));
        assert!(!err.is_configuration());
    }
}
