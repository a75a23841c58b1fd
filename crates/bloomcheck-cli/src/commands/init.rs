//! The `bloomcheck init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    if Path::new("bloomcheck.toml").exists() {
        println!("bloomcheck.toml already exists, skipping.");
    } else {
        std::fs::write("bloomcheck.toml", SAMPLE_CONFIG)?;
        println!("Created bloomcheck.toml");
    }

    std::fs::create_dir_all("question-sets")?;
    let example_path = Path::new("question-sets/example.toml");
    if example_path.exists() {
        println!("question-sets/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUESTION_SET)?;
        println!("Created question-sets/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: bloomcheck validate --question-set question-sets/example.toml");
    println!("  2. Run: bloomcheck batch --question-set question-sets/example.toml");
    println!("  3. Export the built-in profiles to tune them: bloomcheck levels --export");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# bloomcheck configuration

# Custom profile table (generate one with `bloomcheck levels --export`).
# profiles = "profiles.toml"

output_dir = "./bloomcheck-results"
default_format = "text"
"#;

const EXAMPLE_QUESTION_SET: &str = r#"[question_set]
id = "example"
name = "Example Question Set"
description = "A small question set to get started"
document = """
Photosynthesis converts light energy into chemical energy. Plants use it to
turn carbon dioxide and water into glucose, releasing oxygen.
"""

[[questions]]
id = "define-photosynthesis"
text = "What is photosynthesis?"
target = "remember"

[[questions]]
id = "explain-importance"
text = "Explain why photosynthesis is important."
target = "understand"

[[questions]]
id = "compare-respiration"
text = "Compare and contrast photosynthesis and cellular respiration."
target = "analyze"

[[questions]]
id = "design-experiment"
text = "Design a new experiment to measure the rate of photosynthesis."
target = "create"
"#;
