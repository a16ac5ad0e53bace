//! Chat-export simplification.
//!
//! Raw chat exports carry each message's text as either a plain string
//! or an array mixing strings with `{type, text}` entity parts. The
//! analysis prompt only needs date, flattened text, and any links.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ChatExport {
    messages: Vec<ExportMessage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ExportMessage {
    date: String,
    text: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplifiedMessage {
    pub date: String,
    pub text: String,
    pub links: Vec<String>,
}

/// Collapse a chat-export JSON document into a pretty-printed
/// `[{date, text, links}]` array suitable for prompt interpolation.
pub fn simplify_export(raw: &str) -> Result<String> {
    let simplified = simplify_messages(raw)?;
    serde_json::to_string_pretty(&simplified).context("failed to serialize simplified export")
}

/// Typed variant of [`simplify_export`], used directly by tests.
pub fn simplify_messages(raw: &str) -> Result<Vec<SimplifiedMessage>> {
    let export: ChatExport =
        serde_json::from_str(raw).context("chat export is not valid JSON")?;
    Ok(export.messages.iter().map(simplify_message).collect())
}

fn simplify_message(message: &ExportMessage) -> SimplifiedMessage {
    let mut text = String::new();
    let mut links = Vec::new();

    match &message.text {
        Value::String(plain) => text.push_str(plain),
        Value::Array(parts) => {
            for part in parts {
                match part {
                    Value::String(plain) => text.push_str(plain),
                    Value::Object(entity) => {
                        if entity.get("type").and_then(Value::as_str) == Some("link") {
                            if let Some(link) = entity.get("text").and_then(Value::as_str) {
                                links.push(link.to_string());
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
        _ => {}
    }

    SimplifiedMessage {
        date: message.date.clone(),
        text: text.trim().to_string(),
        links,
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
