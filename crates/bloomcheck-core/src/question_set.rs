//! TOML question set parser.
//!
//! Loads labelled question sets from TOML files and directories, and
//! validates them.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::level::CognitiveLevel;

/// A question with the level it is meant to target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub target: CognitiveLevel,
    /// Per-question source document; overrides the set's document.
    #[serde(default)]
    pub document: Option<String>,
}

/// A collection of labelled questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionSet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Source document shared by every question in the set.
    #[serde(default)]
    pub document: Option<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl QuestionSet {
    /// The document a question should be classified against.
    pub fn document_for<'a>(&'a self, question: &'a Question) -> Option<&'a str> {
        question.document.as_deref().or(self.document.as_deref())
    }
}

/// Intermediate TOML structure for parsing question set files.
#[derive(Debug, Deserialize)]
struct TomlQuestionFile {
    question_set: TomlQuestionSetHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestionSetHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    document: Option<String>,
    /// Path to a UTF-8 text document, relative to the set file.
    #[serde(default)]
    document_file: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    text: String,
    target: String,
    #[serde(default)]
    document: Option<String>,
}

/// Parse a single TOML file into a `QuestionSet`.
pub fn parse_question_set(path: &Path) -> Result<QuestionSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question set file: {}", path.display()))?;

    parse_question_set_str(&content, path)
}

/// Parse a TOML string into a `QuestionSet`. `document_file` is resolved
/// against the directory of `source_path`.
pub fn parse_question_set_str(content: &str, source_path: &Path) -> Result<QuestionSet> {
    let parsed: TomlQuestionFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let header = parsed.question_set;
    let document = match (header.document, header.document_file) {
        (Some(_), Some(_)) => {
            anyhow::bail!(
                "question set {} sets both document and document_file",
                header.id
            )
        }
        (Some(text), None) => Some(text),
        (None, Some(file)) => {
            let base = source_path.parent().unwrap_or_else(|| Path::new("."));
            let doc_path = base.join(file);
            let text = std::fs::read_to_string(&doc_path)
                .with_context(|| format!("failed to read document: {}", doc_path.display()))?;
            Some(text)
        }
        (None, None) => None,
    };

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| {
            let target: CognitiveLevel = q
                .target
                .parse()
                .with_context(|| format!("question {}: invalid target level", q.id))?;
            Ok(Question {
                id: q.id,
                text: q.text,
                target,
                document: q.document,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(QuestionSet {
        id: header.id,
        name: header.name,
        description: header.description,
        document,
        questions,
    })
}

/// Recursively load all `.toml` question set files from a directory.
pub fn load_question_directory(dir: &Path) -> Result<Vec<QuestionSet>> {
    let mut sets = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            sets.extend(load_question_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_question_set(&path) {
                Ok(set) => sets.push(set),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(sets)
}

/// Load a single file, or every set under a directory.
pub fn load_question_sets(path: &Path) -> Result<Vec<QuestionSet>> {
    if path.is_dir() {
        load_question_directory(path)
    } else {
        Ok(vec![parse_question_set(path)?])
    }
}

/// A warning from question set validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.question_id {
            Some(id) => write!(f, "[{id}] WARNING: {}", self.message),
            None => write!(f, "WARNING: {}", self.message),
        }
    }
}

/// Validate a question set for common issues.
pub fn validate_question_set(set: &QuestionSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if set.questions.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "question set has no questions".into(),
        });
    }

    let mut seen_ids = std::collections::HashSet::new();
    for question in &set.questions {
        if !seen_ids.insert(&question.id) {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: format!("duplicate question ID: {}", question.id),
            });
        }
    }

    for question in &set.questions {
        if question.text.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: "question text is empty".into(),
            });
        }
    }

    // Whitespace is a non-empty document to the classifier.
    for question in &set.questions {
        if set
            .document_for(question)
            .is_some_and(|d| !d.is_empty() && d.trim().is_empty())
        {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: "document contains only whitespace".into(),
            });
        }
    }

    warnings
}
