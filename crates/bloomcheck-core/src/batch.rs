//! Batch classification of question sets and agreement reports.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classifier::{ClassificationResult, Classifier};
use crate::level::CognitiveLevel;
use crate::question_set::QuestionSet;

/// A complete batch report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    pub question_set: QuestionSetSummary,
    /// One outcome per question, in set order.
    pub outcomes: Vec<QuestionOutcome>,
    pub summary: BatchSummary,
    /// Total wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

/// Summary of a question set (without the questions themselves).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSetSummary {
    pub id: String,
    pub name: String,
    pub question_count: usize,
}

/// The classification of one question against its target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub question_id: String,
    pub target: CognitiveLevel,
    pub result: ClassificationResult,
}

/// Agreement for the questions targeting one level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelAgreement {
    pub target: CognitiveLevel,
    pub total: usize,
    pub matched: usize,
    pub accuracy: f64,
}

/// Aggregate statistics over a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub matched: usize,
    /// Outcomes whose classification degraded to `Error`.
    pub errors: usize,
    /// `matched / total`, 0.0 for an empty batch.
    pub accuracy: f64,
    /// Mean confidence over non-error outcomes.
    pub mean_confidence: f64,
    /// Levels with no questions targeting them are omitted.
    pub per_level: Vec<LevelAgreement>,
    /// `confusion[target][actual]` counts, indexed by level order.
    pub confusion: [[usize; 6]; 6],
}

impl BatchSummary {
    /// Compute the summary from a list of outcomes.
    pub fn from_outcomes(outcomes: &[QuestionOutcome]) -> Self {
        let total = outcomes.len();
        let matched = outcomes.iter().filter(|o| o.result.matches_level).count();
        let errors = outcomes.iter().filter(|o| o.result.is_error()).count();

        let confidences: Vec<f64> = outcomes
            .iter()
            .filter(|o| !o.result.is_error())
            .map(|o| o.result.confidence)
            .collect();
        let mean_confidence = if confidences.is_empty() {
            0.0
        } else {
            confidences.iter().sum::<f64>() / confidences.len() as f64
        };

        let mut confusion = [[0usize; 6]; 6];
        for outcome in outcomes {
            if let Some(actual) = outcome.result.actual_level.level() {
                confusion[outcome.target.index()][actual.index()] += 1;
            }
        }

        let per_level = CognitiveLevel::ALL
            .iter()
            .filter_map(|&target| {
                let targeted: Vec<_> = outcomes.iter().filter(|o| o.target == target).collect();
                if targeted.is_empty() {
                    return None;
                }
                let level_matched = targeted.iter().filter(|o| o.result.matches_level).count();
                Some(LevelAgreement {
                    target,
                    total: targeted.len(),
                    matched: level_matched,
                    accuracy: level_matched as f64 / targeted.len() as f64,
                })
            })
            .collect();

        Self {
            total,
            matched,
            errors,
            accuracy: if total == 0 {
                0.0
            } else {
                matched as f64 / total as f64
            },
            mean_confidence,
            per_level,
            confusion,
        }
    }
}

/// Classify every question in a set.
pub fn run_batch(classifier: &Classifier, set: &QuestionSet) -> BatchReport {
    let start = Instant::now();
    tracing::info!(set = %set.id, questions = set.questions.len(), "running batch");

    let outcomes: Vec<QuestionOutcome> = set
        .questions
        .iter()
        .map(|question| QuestionOutcome {
            question_id: question.id.clone(),
            target: question.target,
            result: classifier.classify(set.document_for(question), &question.text, question.target),
        })
        .collect();

    let summary = BatchSummary::from_outcomes(&outcomes);
    tracing::info!(
        set = %set.id,
        matched = summary.matched,
        total = summary.total,
        errors = summary.errors,
        "batch complete"
    );

    BatchReport {
        id: Uuid::new_v4(),
        created_at: Utc::now(),
        question_set: QuestionSetSummary {
            id: set.id.clone(),
            name: set.name.clone(),
            question_count: set.questions.len(),
        },
        outcomes,
        summary,
        duration_ms: start.elapsed().as_millis() as u64,
    }
}

impl BatchReport {
    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        serde_json::from_str(&content).context("failed to parse report JSON")
    }

    /// Default file name for this report inside an output directory.
    pub fn file_name(&self) -> String {
        format!("batch-{}.json", self.id)
    }

    /// Outcomes whose detected level differs from the target.
    pub fn mismatches(&self) -> impl Iterator<Item = &QuestionOutcome> {
        self.outcomes.iter().filter(|o| !o.result.matches_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question_set::Question;

    fn question(id: &str, text: &str, target: CognitiveLevel) -> Question {
        Question {
            id: id.into(),
            text: text.into(),
            target,
            document: None,
        }
    }

    fn sample_set() -> QuestionSet {
        QuestionSet {
            id: "mixed".into(),
            name: "Mixed".into(),
            description: String::new(),
            document: None,
            questions: vec![
                question("q1", "What is the capital of France?", CognitiveLevel::Remembering),
                question(
                    "q2",
                    "Compare and contrast mitosis and meiosis.",
                    CognitiveLevel::Analyzing,
                ),
                question(
                    "q3",
                    "How does the heart pump blood?",
                    CognitiveLevel::Understanding,
                ),
                question(
                    "q4",
                    "Design a new method to reduce plastic waste.",
                    CognitiveLevel::Creating,
                ),
            ],
        }
    }

    #[test]
    fn batch_summary_counts() {
        let report = run_batch(&Classifier::builtin(), &sample_set());
        let summary = &report.summary;

        assert_eq!(report.question_set.question_count, 4);
        assert_eq!(report.outcomes.len(), 4);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.matched, 3);
        assert_eq!(summary.errors, 0);
        assert!((summary.accuracy - 0.75).abs() < 1e-9);

        let understanding = CognitiveLevel::Understanding.index();
        let remembering = CognitiveLevel::Remembering.index();
        assert_eq!(summary.confusion[understanding][remembering], 1);
        assert_eq!(summary.confusion.iter().flatten().sum::<usize>(), 4);

        assert_eq!(summary.per_level.len(), 4);
        let miss = summary
            .per_level
            .iter()
            .find(|a| a.target == CognitiveLevel::Understanding)
            .unwrap();
        assert_eq!((miss.total, miss.matched), (1, 0));

        let mismatched: Vec<_> = report.mismatches().map(|o| o.question_id.as_str()).collect();
        assert_eq!(mismatched, vec!["q3"]);
    }

    #[test]
    fn empty_batch() {
        let summary = BatchSummary::from_outcomes(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.accuracy, 0.0);
        assert_eq!(summary.mean_confidence, 0.0);
        assert!(summary.per_level.is_empty());
    }

    #[test]
    fn errors_excluded_from_confidence_and_confusion() {
        let ok = classify_outcome("q1", "What is the capital of France?");
        let failed = QuestionOutcome {
            question_id: "q2".into(),
            target: CognitiveLevel::Creating,
            result: ClassificationResult::failed("boom"),
        };
        let summary = BatchSummary::from_outcomes(&[ok, failed]);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.matched, 1);
        assert!((summary.mean_confidence - 0.95).abs() < 1e-9);
        assert_eq!(summary.confusion.iter().flatten().sum::<usize>(), 1);
    }

    fn classify_outcome(id: &str, text: &str) -> QuestionOutcome {
        QuestionOutcome {
            question_id: id.into(),
            target: CognitiveLevel::Remembering,
            result: Classifier::builtin().classify(None, text, CognitiveLevel::Remembering),
        }
    }

    #[test]
    fn set_document_used_for_questions() {
        let mut set = sample_set();
        set.questions = vec![question(
            "q1",
            "Create a new recycling plan for Jakarta.",
            CognitiveLevel::Creating,
        )];
        set.document = Some("Plastic waste in Jakarta is growing.".into());
        let report = run_batch(&Classifier::builtin(), &set);
        let scores = &report.outcomes[0].result.scores;
        assert_eq!(scores[&CognitiveLevel::Creating], 7.85);
    }

    #[test]
    fn save_and_load_json() {
        let report = run_batch(&Classifier::builtin(), &sample_set());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(report.file_name());
        report.save_json(&path).unwrap();

        let loaded = BatchReport::load_json(&path).unwrap();
        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.summary.confusion, report.summary.confusion);
        assert_eq!(loaded.summary.per_level.len(), report.summary.per_level.len());
        assert_eq!(
            loaded.outcomes[0].result.actual_level,
            report.outcomes[0].result.actual_level
        );
        assert_eq!(
            loaded.outcomes[0].result.explanation,
            report.outcomes[0].result.explanation
        );
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("batch-"));
    }
}
