//! The `bloomcheck levels` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use bloomcheck_core::config::load_config_from;

pub fn execute(export: bool, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let classifier = config.classifier()?;
    let registry = classifier.registry();

    if export {
        let table = toml::to_string_pretty(&registry.to_table())
            .context("failed to serialize profile table")?;
        print!("{table}");
        return Ok(());
    }

    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec![
        "#",
        "Level",
        "Code",
        "Weight",
        "Complexity",
        "Keywords",
        "Patterns",
        "Leading verbs",
    ]);

    for profile in registry.iter() {
        table.add_row(vec![
            Cell::new(profile.level.ordinal()),
            Cell::new(profile.level),
            Cell::new(profile.level.code()),
            Cell::new(format!("{:.1}", profile.weight)),
            Cell::new(format!("{:.1}", profile.complexity_threshold)),
            Cell::new(profile.keywords.len()),
            Cell::new(profile.patterns.len()),
            Cell::new(profile.leading_verbs.join(", ")),
        ]);
    }

    println!("{table}");
    Ok(())
}
