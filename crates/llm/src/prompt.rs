//! Analysis prompt templates.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Load a prompt template from disk.
pub fn load_prompt(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path)
        .with_context(|| format!("failed to read prompt template {}", path.display()))
}

/// Fill the `{language}` and `{json_data}` placeholders of an analysis
/// prompt. Any other braces in the template pass through untouched.
pub fn fill_prompt(template: &str, language: &str, json_data: &str) -> String {
    template
        .replace("{language}", language)
        .replace("{json_data}", json_data)
}

// ── Tests ────────────────────────────────────────────────────────────────────
