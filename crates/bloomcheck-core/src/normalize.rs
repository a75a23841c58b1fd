//! Question text normalization.

use once_cell::sync::Lazy;
use regex::Regex;

static NON_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s]").expect("non-word pattern is valid"));
static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// The derived forms of a question used by the signal scorers.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedQuestion<'a> {
    /// The question exactly as supplied.
    pub original: &'a str,
    /// Lowercased and trimmed; punctuation kept for phrase patterns.
    pub lower: String,
    /// Lowercased only. Leading whitespace defeats the prefix rules.
    pub lower_raw: String,
    /// Lowercased, punctuation replaced by spaces, whitespace collapsed.
    pub clean: String,
    /// Whitespace-separated token count of the original text.
    pub word_count: usize,
}

impl<'a> NormalizedQuestion<'a> {
    pub fn new(question: &'a str) -> Self {
        let lower_raw = question.to_lowercase();
        let lower = lower_raw.trim().to_string();
        let stripped = NON_WORD_RE.replace_all(&lower, " ");
        let clean = WHITESPACE_RE.replace_all(&stripped, " ").trim().to_string();

        Self {
            original: question,
            lower,
            lower_raw,
            clean,
            word_count: question.split_whitespace().count(),
        }
    }

    /// The first `n` tokens of the clean form.
    pub fn leading_tokens(&self, n: usize) -> impl Iterator<Item = &str> {
        self.clean.split(' ').filter(|t| !t.is_empty()).take(n)
    }

    pub fn has_question_mark(&self) -> bool {
        self.original.contains('?')
    }
}
