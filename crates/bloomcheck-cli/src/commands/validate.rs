//! The `bloomcheck validate` command.

use std::path::PathBuf;

use anyhow::Result;

use bloomcheck_core::question_set::{load_question_sets, validate_question_set};

pub fn execute(question_set_path: PathBuf) -> Result<()> {
    let sets = load_question_sets(&question_set_path)?;
    anyhow::ensure!(
        !sets.is_empty(),
        "no question sets found in {}",
        question_set_path.display()
    );

    let mut total_warnings = 0;

    for set in &sets {
        println!("Question set: {} ({} questions)", set.name, set.questions.len());

        let warnings = validate_question_set(set);
        for warning in &warnings {
            println!("  {warning}");
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All question sets valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
