pub mod prompt;
pub mod simplify;

use anyhow::Result;
use serde_json::json;
use tracing::debug;

use vaultsmith_spec::VaultSpec;

/// Client for an OpenAI-compatible `chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    api_base: String,
    model: String,
    api_key: String,
}

impl ChatClient {
    pub fn new(
        api_base: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    /// Send `prompt` as a single user message and return the reply text.
    ///
    /// A missing key or an error status yields a readable message the
    /// caller can log; only transport failures surface as `Err`. Either
    /// way, downstream structure extraction treats anything unparsable
    /// as "no structure".
    pub async fn chat(&self, prompt: &str) -> Result<String> {
        if self.api_key.trim().is_empty() {
            return Ok(
                "API key missing. Set OPENAI_API_KEY or [llm] api_key in the config."
                    .to_string(),
            );
        }

        let endpoint = format!("{}/chat/completions", self.api_base.trim_end_matches('/'));
        let payload = json!({
            "model": self.model,
            "messages": [
                {"role": "user", "content": prompt}
            ]
        });

        debug!(model = %self.model, prompt_len = prompt.len(), "sending generation request");
        let response = self
            .client
            .post(endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body: serde_json::Value = response.json().await?;
        if !status.is_success() {
            return Ok(format!("generation request failed ({status}): {body}"));
        }

        if let Some(content) = body
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
        {
            return Ok(content.to_string());
        }

        Ok(format!("generation response missing text: {body}"))
    }
}

/// Extract a vault structure from a model reply.
///
/// Tries a fenced ` ```json ` block first, then a bare JSON object
/// spanning the first `{` to the last `}`. Malformed or empty replies
/// yield `None` for the caller to log; nothing here panics on garbage.
pub fn extract_structure(response: &str) -> Option<VaultSpec> {
    if let Some(fence_start) = response.find("```json") {
        let after_fence = &response[fence_start + "```json".len()..];
        if let Some(body_start) = after_fence.find(|c: char| !c.is_whitespace()) {
            let body = &after_fence[body_start..];
            if let Some(fence_end) = body.find("```") {
                let candidate = body[..fence_end].trim();
                if let Ok(spec) = serde_json::from_str(candidate) {
                    return Some(spec);
                }
            }
        }
    }

    let trimmed = response.trim();
    if let Some(start) = trimmed.find('{') {
        if let Some(end) = trimmed.rfind('}') {
            if end > start {
                if let Ok(spec) = serde_json::from_str(&trimmed[start..=end]) {
                    return Some(spec);
                }
            }
        }
    }

    None
}

// ── Tests ────────────────────────────────────────────────────────────────────
