//! The five per-level signal scorers.
//!
//! Every level is scored independently from the same normalized question:
//! keyword hits, phrase-pattern hits, a leading verb, document-context
//! correlation, and a structural complexity check against the level's
//! threshold.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::level::CognitiveLevel;
use crate::normalize::NormalizedQuestion;
use crate::profile::LevelProfile;

const KEYWORD_FACTOR: f64 = 1.5;
const PATTERN_FACTOR: f64 = 2.0;
const LEADING_VERB_FACTOR: f64 = 1.0;
const LEADING_VERB_WINDOW: usize = 3;

const CITATION_SOURCED: f64 = 2.5;
const CITATION_OTHER: f64 = 1.0;
const ENTITY_OVERLAP: f64 = 1.5;
const SOURCING_MULTIPLIER: f64 = 1.5;

const COMPLEXITY_MATCH: f64 = 0.8;
const COMPLEXITY_MARGIN: f64 = 0.2;

const SUBORDINATORS: [&str; 7] = ["because", "although", "while", "if", "when", "unless", "since"];
const COORDINATORS: [&str; 6] = ["and", "but", "or", "however", "therefore", "thus"];
const MODALS: [&str; 4] = ["would", "could", "might", "should"];

static CITATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"according to (the|this) (text|document|passage|reading|author)",
        r"based on (the|this) (text|document|passage|reading)",
        r"from the (text|document|passage|reading)",
        r"as described in",
        r"as stated in",
        r"the (text|document|passage|reading) (says|states|describes|implies)",
        r"what evidence in the text",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("citation pattern is valid"))
    .collect()
});

static CONTENT_TERM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Z][a-z]+|[0-9]+)\b").expect("content term pattern is valid"));

/// A source document supplied alongside the question.
#[derive(Debug, Clone)]
pub struct SourceDocument<'a> {
    pub text: &'a str,
    lower: String,
}

impl<'a> SourceDocument<'a> {
    /// Returns `None` for an empty document, which counts as not supplied.
    pub fn new(text: &'a str) -> Option<Self> {
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text,
            lower: text.to_lowercase(),
        })
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn mentions(&self, term: &str) -> bool {
        self.lower.contains(&term.to_lowercase())
    }
}

/// Per-signal contributions for one level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SignalBreakdown {
    pub keyword: f64,
    pub pattern: f64,
    pub leading_verb: f64,
    pub document: f64,
    pub complexity: f64,
}

impl SignalBreakdown {
    /// Sum of all contributions, floored at zero.
    pub fn total(&self) -> f64 {
        let sum = self.keyword + self.pattern + self.leading_verb + self.document + self.complexity;
        if sum < 0.0 {
            0.0
        } else {
            sum
        }
    }
}

/// Score one level against a question.
pub fn score_level(
    profile: &LevelProfile,
    question: &NormalizedQuestion<'_>,
    document: Option<&SourceDocument<'_>>,
) -> SignalBreakdown {
    let breakdown = SignalBreakdown {
        keyword: keyword_signal(profile, question),
        pattern: pattern_signal(profile, question),
        leading_verb: leading_verb_signal(profile, question),
        document: document
            .map(|doc| document_context_signal(profile.level, question, doc))
            .unwrap_or(0.0),
        complexity: complexity_signal(estimate_complexity(question), profile.complexity_threshold),
    };

    tracing::trace!(level = %profile.level, ?breakdown, "level signals");
    breakdown
}

/// `1.5 × weight` for every keyword found on word boundaries in the clean form.
pub fn keyword_signal(profile: &LevelProfile, question: &NormalizedQuestion<'_>) -> f64 {
    let hits = profile
        .keywords
        .iter()
        .filter(|k| k.is_match(&question.clean))
        .count();
    hits as f64 * KEYWORD_FACTOR * profile.weight
}

/// `2.0 × weight` for every phrase pattern matching the lower form.
pub fn pattern_signal(profile: &LevelProfile, question: &NormalizedQuestion<'_>) -> f64 {
    let hits = profile
        .patterns
        .iter()
        .filter(|p| p.is_match(&question.lower))
        .count();
    hits as f64 * PATTERN_FACTOR * profile.weight
}

/// `1.0 × weight` if one of the first three tokens is a leading verb.
pub fn leading_verb_signal(profile: &LevelProfile, question: &NormalizedQuestion<'_>) -> f64 {
    if question
        .leading_tokens(LEADING_VERB_WINDOW)
        .any(|token| profile.has_leading_verb(token))
    {
        LEADING_VERB_FACTOR * profile.weight
    } else {
        0.0
    }
}

/// Whether the question explicitly cites its source text.
pub fn cites_document(question: &NormalizedQuestion<'_>) -> bool {
    CITATION_PATTERNS.iter().any(|p| p.is_match(&question.lower))
}

fn asks_for_new_artifact(question: &NormalizedQuestion<'_>) -> bool {
    question.lower.contains("create a new") || question.lower.contains("design an alternative")
}

/// Document-context contribution, including the sourcing multiplier.
pub fn document_context_signal(
    level: CognitiveLevel,
    question: &NormalizedQuestion<'_>,
    document: &SourceDocument<'_>,
) -> f64 {
    let mut score = 0.0;

    if cites_document(question) {
        score += match level {
            CognitiveLevel::Analyzing | CognitiveLevel::Evaluating => CITATION_SOURCED,
            _ => CITATION_OTHER,
        };
    }

    // Named-entity overlap: the artifact to build comes from the document.
    if level == CognitiveLevel::Creating
        && asks_for_new_artifact(question)
        && CONTENT_TERM_RE
            .find_iter(question.original)
            .any(|term| document.mentions(term.as_str()))
    {
        score += ENTITY_OVERLAP;
    }

    match level {
        CognitiveLevel::Remembering | CognitiveLevel::Understanding => score,
        _ => score * SOURCING_MULTIPLIER,
    }
}

/// Structural complexity estimate in `[0, 1]`.
///
/// Indicator words are matched as substrings, so "or" also fires inside
/// "important". The calibration data depends on that.
pub fn estimate_complexity(question: &NormalizedQuestion<'_>) -> f64 {
    let sentence = (question.word_count as f64 / 10.0).min(1.0);
    let text = question.lower.as_str();
    let contains_any = |words: &[&str]| words.iter().any(|w| text.contains(*w));

    let mut structural = if contains_any(&SUBORDINATORS[..]) { 0.4 } else { 0.1 };
    if contains_any(&COORDINATORS[..]) {
        structural += 0.2;
    }
    if contains_any(&MODALS[..]) {
        structural += 0.2;
    }

    (sentence + structural) / 2.0
}

/// `+0.8` at or above the threshold, `-0.8` well below it, otherwise 0.
pub fn complexity_signal(complexity: f64, threshold: f64) -> f64 {
    if complexity >= threshold {
        COMPLEXITY_MATCH
    } else if complexity < threshold - COMPLEXITY_MARGIN {
        -COMPLEXITY_MATCH
    } else {
        0.0
    }
}
