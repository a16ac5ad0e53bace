use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::VaultSpec;

/// Read and parse a vault spec JSON file.
///
/// Malformed JSON is an input error: it surfaces as `Err` with the file
/// path attached and is expected to be logged at the entry point rather
/// than panicking anywhere below it.
pub fn load_spec(path: impl AsRef<Path>) -> Result<VaultSpec> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read spec file {}", path.display()))?;
    parse_spec(&raw).with_context(|| format!("failed to parse spec file {}", path.display()))
}

/// Parse a vault spec from a JSON string.
pub fn parse_spec(raw: &str) -> Result<VaultSpec> {
    serde_json::from_str(raw).context("spec is not valid JSON")
}

// ── Tests ────────────────────────────────────────────────────────────────────
