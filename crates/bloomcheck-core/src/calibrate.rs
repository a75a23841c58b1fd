//! Level decision and confidence calibration.

use crate::level::CognitiveLevel;
use crate::normalize::NormalizedQuestion;
use crate::scoreboard::ScoreBoard;
use crate::signals::SourceDocument;

const CONFIDENCE_CAP: f64 = 0.95;
const CONFIDENCE_FLOOR: f64 = 0.1;
const GAP_BOOST: f64 = 0.3;
const FALLBACK_CONFIDENCE: f64 = 0.5;

/// The chosen level and its calibrated confidence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub level: CognitiveLevel,
    pub confidence: f64,
    /// Every level scored zero; the fallback level was used.
    pub fallback: bool,
}

/// Pick the highest-scoring level and derive a gap-boosted confidence.
pub fn decide(board: &ScoreBoard) -> Decision {
    let total = board.total();
    if total == 0.0 {
        return Decision {
            level: CognitiveLevel::Remembering,
            confidence: FALLBACK_CONFIDENCE,
            fallback: true,
        };
    }

    let ((level, top), (_, second)) = board.top_two();
    let base = top / total;
    let gap = (top - second) / top.max(1.0);

    Decision {
        level,
        confidence: (base + gap * GAP_BOOST).min(CONFIDENCE_CAP),
        fallback: false,
    }
}

/// Adjust a decision's confidence from surface features of the question.
///
/// The zero-score fallback is returned unchanged.
pub fn validate_confidence(
    decision: &Decision,
    question: &NormalizedQuestion<'_>,
    document: Option<&SourceDocument<'_>>,
) -> f64 {
    if decision.fallback {
        return decision.confidence;
    }

    let capped = |c: f64, factor: f64| (c * factor).min(CONFIDENCE_CAP);
    let words = question.word_count;
    let mut confidence = decision.confidence;

    if words < 4 {
        confidence *= 0.7;
    }
    if words > 15 {
        confidence = capped(confidence, 1.1);
    }
    if question.has_question_mark() {
        confidence = capped(confidence, 1.05);
    }
    if decision.level != CognitiveLevel::Remembering && words > 8 {
        confidence = capped(confidence, 1.1);
    }
    if document.is_some_and(|doc| doc.char_len() > 100) {
        confidence = capped(confidence, 1.05);
    }

    confidence.clamp(CONFIDENCE_FLOOR, CONFIDENCE_CAP)
}
