//! Natural-language explanation of a classification.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::level::CognitiveLevel;
use crate::normalize::NormalizedQuestion;
use crate::scoreboard::ScoreBoard;

/// Runner-up scores within this margin of the winner get a "close decision" note.
const CLOSE_MARGIN: f64 = 1.0;

struct Reasoning {
    cue: Regex,
    direct: &'static str,
    indirect: &'static str,
}

static REASONING: Lazy<Vec<Reasoning>> = Lazy::new(|| {
    let table: [(&str, &'static str, &'static str); 6] = [
        (
            r"\b(who|what|when|where|list|name|define)\b",
            "Question asks for direct recall of factual information.",
            "Question structure and keywords indicate a request for retrieval of known information.",
        ),
        (
            r"\b(explain|summarize|in your own words|main idea)\b",
            "Question requires explaining ideas or concepts, not just recalling them.",
            "Question asks for interpretation or demonstration of comprehension.",
        ),
        (
            r"\b(use|apply|solve|demonstrate|calculate)\b",
            "Question requires using knowledge or a procedure in a specific situation or problem.",
            "Question prompts the application of learned material in a new context.",
        ),
        (
            r"\b(difference|analyze|compare|contrast|relationship|cause|effect)\b",
            "Question requires breaking down information into parts and examining relationships.",
            "Question prompts deconstruction of concepts to find underlying structure or motives.",
        ),
        (
            r"\b(evaluate|judge|critique|justify|defend|opinion)\b",
            "Question requires making a judgment based on criteria and standards.",
            "Question prompts justification of a decision or critical assessment of a value.",
        ),
        (
            r"\b(create|design|develop|propose|invent|what if)\b",
            "Question requires synthesizing elements into a new, coherent whole or proposing original ideas.",
            "Question prompts the generation of new ideas, products, or ways of viewing things.",
        ),
    ];

    table
        .into_iter()
        .map(|(cue, direct, indirect)| Reasoning {
            cue: Regex::new(cue).expect("reasoning cue is valid"),
            direct,
            indirect,
        })
        .collect()
});

/// Everything the explanation is built from.
#[derive(Debug, Clone, Copy)]
pub struct ExplanationInput<'q, 'a> {
    pub question: &'q NormalizedQuestion<'a>,
    pub actual: CognitiveLevel,
    pub target: CognitiveLevel,
    pub confidence: f64,
    pub board: &'q ScoreBoard,
    pub document_supplied: bool,
}

/// Build the explanation string.
pub fn explain(input: &ExplanationInput<'_, '_>) -> String {
    let mut text = String::new();

    if input.actual == input.target {
        text.push_str(&format!(
            "✓ CORRECT. The question is classified as '{}'.",
            input.actual
        ));
    } else {
        text.push_str(&format!(
            "✗ INCORRECT. The question is classified as '{}', not '{}'.",
            input.actual, input.target
        ));
    }

    text.push_str(&format!(" Confidence: {:.1}%.", input.confidence * 100.0));

    let breakdown: Vec<String> = input
        .board
        .iter()
        .map(|(level, score)| format!("{level}:{score:.1}"))
        .collect();
    text.push_str(&format!(" Score breakdown: {}.", breakdown.join(", ")));

    let words = input.question.word_count;
    let quality = if words > 6 && input.question.has_question_mark() {
        "Well-structured"
    } else {
        "Needs more specificity"
    };
    text.push_str(&format!(" Question quality: {quality} ({words} words)."));

    text.push_str(if input.document_supplied {
        " Document context was utilized."
    } else {
        " No document provided for context."
    });

    text.push(' ');
    text.push_str(&reasoning(input.question, input.actual, input.board));
    text
}

/// The "Reasoning: ..." sentence plus an optional close-decision note.
pub fn reasoning(question: &NormalizedQuestion<'_>, actual: CognitiveLevel, board: &ScoreBoard) -> String {
    let entry = &REASONING[actual.index()];
    let sentence = if entry.cue.is_match(&question.lower) {
        entry.direct
    } else {
        entry.indirect
    };
    let mut text = format!("Reasoning: {sentence}");

    let ((_, first), (runner_up, second)) = board.top_two();
    if first - second < CLOSE_MARGIN {
        text.push_str(&format!(" This was a close decision with '{runner_up}'."));
    }
    text
}
