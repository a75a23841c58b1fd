//! Special-case adjustments for phrasings the signal scorers misjudge.

use crate::level::CognitiveLevel;
use crate::normalize::NormalizedQuestion;
use crate::scoreboard::ScoreBoard;

/// A special case that fired for a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialCase {
    /// "What did ..." / "What happened ..." is almost always recall.
    FactualRecall,
    /// "How to ..." asks for a procedure.
    HowTo,
    /// "How would/could ..." leans towards application or design.
    HowWould,
    /// "How does/did ..." asks for a mechanism.
    HowDoes,
    /// "Why ..." asks for explanation or analysis.
    Why,
}

/// Apply the special cases in their fixed order and report which fired.
///
/// The recall rule subtracts a flat 1.5 from every other level, floored at
/// zero. That floor is part of the calibration. Prefixes are matched against
/// the untrimmed text.
pub fn apply_special_cases(question: &NormalizedQuestion<'_>, board: &mut ScoreBoard) -> Vec<SpecialCase> {
    let lower = question.lower_raw.as_str();
    let mut fired = Vec::new();

    if lower.starts_with("what did") || lower.starts_with("what happened") {
        board.add(CognitiveLevel::Remembering, 2.5);
        for level in &CognitiveLevel::ALL[1..] {
            board.add(*level, -1.5);
        }
        fired.push(SpecialCase::FactualRecall);
    }

    if lower.starts_with("how ") {
        if lower.contains("how to") {
            board.add(CognitiveLevel::Applying, 1.5);
            fired.push(SpecialCase::HowTo);
        } else if lower.contains("how would") || lower.contains("how could") {
            board.add(CognitiveLevel::Applying, 1.0);
            board.add(CognitiveLevel::Creating, 1.0);
            fired.push(SpecialCase::HowWould);
        } else if lower.contains("how does") || lower.contains("how did") {
            board.add(CognitiveLevel::Understanding, 1.0);
            board.add(CognitiveLevel::Analyzing, 0.5);
            fired.push(SpecialCase::HowDoes);
        }
    }

    if lower.starts_with("why ") {
        board.add(CognitiveLevel::Understanding, 1.0);
        board.add(CognitiveLevel::Analyzing, 1.5);
        fired.push(SpecialCase::Why);
    }

    fired
}
