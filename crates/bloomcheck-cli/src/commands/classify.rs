//! The `bloomcheck classify` command.

use std::path::PathBuf;

use anyhow::Result;

use bloomcheck_core::config::{load_config_from, OutputFormat};
use bloomcheck_core::{ClassificationResult, CognitiveLevel};

use super::{read_document, resolve_format};

pub fn execute(
    question: String,
    target: String,
    document_path: Option<PathBuf>,
    format: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let format = resolve_format(format.as_deref(), &config)?;
    let target: CognitiveLevel = target.parse()?;

    let document = match &document_path {
        Some(path) => read_document(path)?,
        None => None,
    };

    let classifier = config.classifier()?;
    let result = classifier.classify(document.as_deref(), &question, target);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => print_result(&result, target),
    }

    Ok(())
}

fn print_result(result: &ClassificationResult, target: CognitiveLevel) {
    use comfy_table::{Cell, Table};

    let verdict = if result.matches_level { "MATCH" } else { "MISMATCH" };
    println!(
        "Classified as: {} (target: {target}) {verdict}",
        result.actual_level
    );
    println!("Confidence: {:.0}%", result.confidence * 100.0);

    if !result.scores.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Level", "Score"]);
        for (level, score) in &result.scores {
            table.add_row(vec![Cell::new(level), Cell::new(format!("{score:.2}"))]);
        }
        println!("{table}");
    }

    println!("{}", result.explanation);
}
