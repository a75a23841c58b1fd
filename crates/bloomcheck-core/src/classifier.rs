//! The classification pipeline.
//!
//! normalize → score every level → special cases → decide → validate
//! confidence → explain. Each call builds its own [`ScoreBoard`]; the only
//! shared state is the read-only [`ProfileRegistry`].

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::calibrate::{decide, validate_confidence};
use crate::error::ClassifyError;
use crate::explain::{explain, ExplanationInput};
use crate::level::CognitiveLevel;
use crate::normalize::NormalizedQuestion;
use crate::profile::ProfileRegistry;
use crate::rules::apply_special_cases;
use crate::scoreboard::ScoreBoard;
use crate::signals::{score_level, SourceDocument};

/// The detected level, or `Error` when classification failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActualLevel {
    Level(CognitiveLevel),
    Error,
}

impl ActualLevel {
    pub fn level(self) -> Option<CognitiveLevel> {
        match self {
            ActualLevel::Level(level) => Some(level),
            ActualLevel::Error => None,
        }
    }

    pub fn is_error(self) -> bool {
        self == ActualLevel::Error
    }
}

impl fmt::Display for ActualLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActualLevel::Level(level) => write!(f, "{level}"),
            ActualLevel::Error => f.write_str("Error"),
        }
    }
}

impl Serialize for ActualLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ActualLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s == "Error" {
            return Ok(ActualLevel::Error);
        }
        s.parse()
            .map(ActualLevel::Level)
            .map_err(serde::de::Error::custom)
    }
}

/// Outcome of classifying one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Whether the detected level equals the requested target level.
    pub matches_level: bool,
    /// Calibrated confidence in `[0.1, 0.95]`, or `0.0` on failure.
    pub confidence: f64,
    pub actual_level: ActualLevel,
    pub explanation: String,
    /// Final per-level scores; empty on failure.
    pub scores: BTreeMap<CognitiveLevel, f64>,
}

impl ClassificationResult {
    /// The degraded result returned when the pipeline faults.
    pub fn failed(message: impl fmt::Display) -> Self {
        Self {
            matches_level: false,
            confidence: 0.0,
            actual_level: ActualLevel::Error,
            explanation: format!("Analysis failed: {message}"),
            scores: BTreeMap::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.actual_level.is_error()
    }
}

/// Two decimals, exact halves to even.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// A classifier bound to a profile registry.
#[derive(Debug, Clone)]
pub struct Classifier {
    registry: Cow<'static, ProfileRegistry>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Classifier {
    /// Classifier over the built-in registry.
    pub fn builtin() -> Self {
        Self {
            registry: Cow::Borrowed(ProfileRegistry::builtin()),
        }
    }

    /// Classifier over a custom registry.
    pub fn new(registry: ProfileRegistry) -> Self {
        Self {
            registry: Cow::Owned(registry),
        }
    }

    pub fn registry(&self) -> &ProfileRegistry {
        &self.registry
    }

    /// Classify a question. Never fails: internal faults come back as a
    /// result with `actual_level = Error` and zero confidence.
    pub fn classify(
        &self,
        document: Option<&str>,
        question: &str,
        target: CognitiveLevel,
    ) -> ClassificationResult {
        match self.try_classify(document, question, target) {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("classification failed: {e}");
                ClassificationResult::failed(e)
            }
        }
    }

    /// The fallible pipeline behind [`Classifier::classify`].
    pub fn try_classify(
        &self,
        document: Option<&str>,
        question: &str,
        target: CognitiveLevel,
    ) -> Result<ClassificationResult, ClassifyError> {
        let question = NormalizedQuestion::new(question);
        let document = document.and_then(SourceDocument::new);

        let board = self.score(&question, document.as_ref())?;
        let decision = decide(&board);
        let confidence = validate_confidence(&decision, &question, document.as_ref());

        tracing::debug!(
            level = %decision.level,
            %target,
            confidence,
            words = question.word_count,
            "classified question"
        );

        let explanation = explain(&ExplanationInput {
            question: &question,
            actual: decision.level,
            target,
            confidence,
            board: &board,
            document_supplied: document.is_some(),
        });

        Ok(ClassificationResult {
            matches_level: decision.level == target,
            confidence: round2(confidence),
            actual_level: ActualLevel::Level(decision.level),
            explanation,
            scores: board.iter().map(|(level, s)| (level, round2(s))).collect(),
        })
    }

    /// Score every level and apply the special cases.
    pub fn score(
        &self,
        question: &NormalizedQuestion<'_>,
        document: Option<&SourceDocument<'_>>,
    ) -> Result<ScoreBoard, ClassifyError> {
        let mut board = ScoreBoard::new();
        for profile in self.registry.iter() {
            board.set(profile.level, score_level(profile, question, document).total());
        }

        let fired = apply_special_cases(question, &mut board);
        if !fired.is_empty() {
            tracing::trace!(?fired, "special cases applied");
        }

        match board.non_finite() {
            Some((level, score)) => Err(ClassifyError::NonFiniteScore { level, score }),
            None => Ok(board),
        }
    }
}

/// Classify with the built-in registry.
pub fn classify(
    document: Option<&str>,
    question: &str,
    target: CognitiveLevel,
) -> ClassificationResult {
    Classifier::builtin().classify(document, question, target)
}
