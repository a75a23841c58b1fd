//! The `bloomcheck batch` command.

use std::path::PathBuf;

use anyhow::Result;

use bloomcheck_core::batch::{run_batch, BatchReport};
use bloomcheck_core::config::{load_config_from, OutputFormat};
use bloomcheck_core::question_set::load_question_sets;

use super::resolve_format;

pub fn execute(
    question_set_path: PathBuf,
    output: Option<PathBuf>,
    format: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let format = resolve_format(format.as_deref(), &config)?;
    let output = output.unwrap_or_else(|| config.output_dir.clone());

    let sets = load_question_sets(&question_set_path)?;
    anyhow::ensure!(
        !sets.is_empty(),
        "no question sets found in {}",
        question_set_path.display()
    );

    let classifier = config.classifier()?;

    for set in &sets {
        let report = run_batch(&classifier, set);

        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Text => print_summary(&report),
        }

        let path = output.join(report.file_name());
        report.save_json(&path)?;
        eprintln!("Report saved to: {}", path.display());
    }

    Ok(())
}

fn print_summary(report: &BatchReport) {
    use comfy_table::{Cell, Table};

    let summary = &report.summary;
    println!(
        "{}: {}/{} matched ({:.1}%), {} error(s), mean confidence {:.2}",
        report.question_set.name,
        summary.matched,
        summary.total,
        summary.accuracy * 100.0,
        summary.errors,
        summary.mean_confidence
    );

    let mut table = Table::new();
    table.set_header(vec!["Target", "Questions", "Matched", "Agreement"]);
    for agreement in &summary.per_level {
        table.add_row(vec![
            Cell::new(agreement.target),
            Cell::new(agreement.total),
            Cell::new(agreement.matched),
            Cell::new(format!("{:.1}%", agreement.accuracy * 100.0)),
        ]);
    }
    println!("{table}");

    let mut mismatches = report.mismatches().peekable();
    if mismatches.peek().is_some() {
        println!("\nMismatches:");
        for outcome in mismatches {
            println!(
                "  [{}] target {} -> {} ({:.0}%)",
                outcome.question_id,
                outcome.target,
                outcome.result.actual_level,
                outcome.result.confidence * 100.0
            );
        }
    }
}
