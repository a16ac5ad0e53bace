use std::env;
use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

// ── Generator settings ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Directory under which vaults are created. The vault name from the
    /// spec is appended to this path.
    pub base_path: String,
    /// Width of the file-write worker pool. Sized for local filesystem
    /// I/O, not network-bound work; values below 1 are treated as 1.
    pub workers: usize,
    /// Write a `README.md` index of notes into every generated folder.
    pub write_folder_indexes: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_path: ".".to_string(),
            workers: 4,
            write_folder_indexes: false,
        }
    }
}

// ── Text-generation settings ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible API.
    pub api_base: String,
    pub model: String,
    /// API key for the text-generation endpoint. The `OPENAI_API_KEY`
    /// environment variable takes precedence when set.
    pub api_key: String,
    /// Path to the analysis prompt template with `{language}` and
    /// `{json_data}` placeholders.
    pub prompt_path: String,
    /// Language the generated vault should be written in. The
    /// `VAULT_LANG` environment variable takes precedence when set.
    pub vault_lang: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o".to_string(),
            api_key: String::new(),
            prompt_path: "prompts/analysis_prompt.txt".to_string(),
            vault_lang: "English".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub generator: GeneratorConfig,
    pub llm: LlmConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let mut config = Self::default();
        if let Ok(raw) = fs::read_to_string(path) {
            config = toml::from_str(&raw)?;
        }

        if let Ok(key) = env::var("OPENAI_API_KEY") {
            if !key.is_empty() {
                config.llm.api_key = key;
            }
        }

        if let Ok(lang) = env::var("VAULT_LANG") {
            if !lang.is_empty() {
                config.llm.vault_lang = lang;
            }
        }

        Ok(config)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }

        let rendered = toml::to_string_pretty(self)?;
        fs::write(path, rendered)?;
        Ok(())
    }

    /// Effective worker-pool width, never below 1.
    pub fn worker_count(&self) -> usize {
        self.generator.workers.max(1)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    // ── defaults ───────────────────────────────────────────────────────────

    #[test]
    fn generator_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.generator.base_path, ".");
        assert_eq!(cfg.generator.workers, 4);
        assert!(!cfg.generator.write_folder_indexes);
    }

    #[test]
    fn llm_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.llm.api_base, "https://api.openai.com/v1");
        assert_eq!(cfg.llm.model, "gpt-4o");
        assert!(cfg.llm.api_key.is_empty());
        assert_eq!(cfg.llm.prompt_path, "prompts/analysis_prompt.txt");
        assert_eq!(cfg.llm.vault_lang, "English");
        assert_eq!(cfg.telemetry.log_level, "info");
    }

    #[test]
    fn worker_count_never_below_one() {
        let mut cfg = AppConfig::default();
        cfg.generator.workers = 0;
        assert_eq!(cfg.worker_count(), 1);
        cfg.generator.workers = 8;
        assert_eq!(cfg.worker_count(), 8);
    }

    // ── load_from ──────────────────────────────────────────────────────────

    #[test]
    fn load_from_missing_file_returns_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = AppConfig::load_from(dir.path().join("nonexistent.toml")).unwrap();
        assert_eq!(cfg.generator.workers, 4);
        assert_eq!(cfg.llm.model, "gpt-4o");
    }

    #[test]
    fn load_from_valid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.toml");
        fs::write(
            &path,
            r#"
[generator]
base_path = "/tmp/vaults"
workers = 2
write_folder_indexes = true

[llm]
model = "gpt-4o-mini"
vault_lang = "Spanish"
"#,
        )
        .unwrap();

        let cfg = AppConfig::load_from(&path).unwrap();
        assert_eq!(cfg.generator.base_path, "/tmp/vaults");
        assert_eq!(cfg.generator.workers, 2);
        assert!(cfg.generator.write_folder_indexes);
        assert_eq!(cfg.llm.model, "gpt-4o-mini");
        assert_eq!(cfg.llm.vault_lang, "Spanish");
        // Unspecified sections should have defaults
        assert_eq!(cfg.telemetry.log_level, "info");
    }

    #[test]
    fn load_from_partial_toml_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partial.toml");
        fs::write(
            &path,
            r#"
[generator]
workers = 7
"#,
        )
        .unwrap();

        let cfg = AppConfig::load_from(&path).unwrap();
        assert_eq!(cfg.generator.workers, 7);
        assert_eq!(cfg.generator.base_path, ".");
        assert_eq!(cfg.llm.api_base, "https://api.openai.com/v1");
    }

    #[test]
    fn load_from_invalid_toml_returns_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "this is not valid toml {{{{").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }

    // ── save_to + roundtrip ────────────────────────────────────────────────

    #[test]
    fn save_and_reload_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sub/config.toml");

        let mut cfg = AppConfig::default();
        cfg.generator.base_path = "/data/vaults".to_string();
        cfg.generator.workers = 3;
        cfg.llm.model = "gpt-4.1-mini".to_string();
        cfg.telemetry.log_level = "debug".to_string();

        cfg.save_to(&path).unwrap();
        assert!(path.exists());

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.generator.base_path, "/data/vaults");
        assert_eq!(loaded.generator.workers, 3);
        assert_eq!(loaded.llm.model, "gpt-4.1-mini");
        assert_eq!(loaded.telemetry.log_level, "debug");
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/c/config.toml");
        AppConfig::default().save_to(&path).unwrap();
        assert!(path.exists());
    }

    // ── Env var overrides ──────────────────────────────────────────────────

    #[test]
    fn env_api_key_overrides_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("key.toml");
        fs::write(
            &path,
            r#"
[llm]
api_key = "from-file"
"#,
        )
        .unwrap();

        // SAFETY: test is single-threaded for this env var.
        unsafe { env::set_var("OPENAI_API_KEY", "from-env") };
        let cfg = AppConfig::load_from(&path).unwrap();
        assert_eq!(cfg.llm.api_key, "from-env");
        unsafe { env::remove_var("OPENAI_API_KEY") };
    }

    #[test]
    fn env_vault_lang_overrides_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lang.toml");
        fs::write(
            &path,
            r#"
[llm]
vault_lang = "English"
"#,
        )
        .unwrap();

        // SAFETY: test is single-threaded for this env var.
        unsafe { env::set_var("VAULT_LANG", "French") };
        let cfg = AppConfig::load_from(&path).unwrap();
        assert_eq!(cfg.llm.vault_lang, "French");
        unsafe { env::remove_var("VAULT_LANG") };
    }
}
