//! Box-drawing directory listing for generated vaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Render the contents of `path` as an indented tree, directories before
/// files and each level sorted by name. A missing root renders a single
/// warning line instead of failing.
pub fn render_tree(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(format!("(missing) {}\n", path.display()));
    }

    let mut out = String::new();
    render_level(path, "", &mut out)?;
    Ok(out)
}

fn render_level(dir: &Path, prefix: &str, out: &mut String) -> Result<()> {
    let mut entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory {}", dir.display()))?
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("failed to list directory {}", dir.display()))?;
    entries.sort_by_key(|entry| (!entry.path().is_dir(), entry.file_name()));

    let count = entries.len();
    for (index, entry) in entries.iter().enumerate() {
        let last = index + 1 == count;
        out.push_str(prefix);
        out.push_str(if last { "└── " } else { "├── " });
        out.push_str(&entry.file_name().to_string_lossy());
        out.push('\n');

        let child = entry.path();
        if child.is_dir() {
            let extension = if last { "    " } else { "│   " };
            render_level(&child, &format!("{prefix}{extension}"), out)?;
        }
    }
    Ok(())
}

// ── Tests ────────────────────────────────────────────────────────────────────
