pub mod batch;
pub mod classify;
pub mod init;
pub mod levels;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};

use bloomcheck_core::config::{BloomcheckConfig, OutputFormat};

/// Read a source document. Whitespace-only documents count as absent.
pub fn read_document(path: &Path) -> Result<Option<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read document: {}", path.display()))?;
    Ok(if text.trim().is_empty() { None } else { Some(text) })
}

/// The `--format` flag if given, else the configured default.
pub fn resolve_format(flag: Option<&str>, config: &BloomcheckConfig) -> Result<OutputFormat> {
    match flag {
        Some(f) => f.parse(),
        None => Ok(config.default_format),
    }
}
