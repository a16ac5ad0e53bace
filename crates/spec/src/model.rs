use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// Vault name used when the spec omits `obsidian_config.vault_name`.
pub const DEFAULT_VAULT_NAME: &str = "MyZettelkastenVault";

/// Root of a parsed vault specification.
///
/// Built once per run from the input JSON (or from a structure derived by
/// the text-generation API) and immutable during generation. Two input
/// shapes parse into this model: the canonical spec shape
/// (`folder_name` / `notes` / `filename`) and the API-driven shape
/// (`name` / `files` / `subfolders`), unified through serde aliases.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VaultSpec {
    pub obsidian_config: ObsidianConfig,
    pub global_tags: Vec<String>,
    pub folders: Vec<FolderSpec>,
}

/// The `obsidian_config` block: vault name plus the contents of the
/// generated `.obsidian/app.json`, passed through verbatim.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObsidianConfig {
    #[serde(default = "default_vault_name")]
    pub vault_name: String,
    pub plugins_enabled: Vec<String>,
    pub settings: serde_json::Value,
}

impl Default for ObsidianConfig {
    fn default() -> Self {
        Self {
            vault_name: default_vault_name(),
            plugins_enabled: vec![],
            settings: serde_json::Value::Object(serde_json::Map::new()),
        }
    }
}

fn default_vault_name() -> String {
    DEFAULT_VAULT_NAME.to_string()
}

/// One folder of the vault. `folder_name` is required; everything else
/// defaults. Subfolders only appear in the API-driven variant, but the
/// writer handles nesting generically.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FolderSpec {
    #[serde(alias = "name")]
    pub folder_name: String,
    #[serde(default)]
    pub folder_type: String,
    #[serde(default, alias = "files")]
    pub notes: Vec<NoteSpec>,
    #[serde(default)]
    pub subfolders: Vec<FolderSpec>,
}

/// One note. Timestamps are opaque strings, never parsed as dates.
/// An empty or missing `filename` means the note produces no file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NoteSpec {
    #[serde(alias = "name")]
    pub filename: Option<String>,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub created_at: String,
    pub modified_at: String,
    pub priority: String,
    pub status: String,
    pub frontmatter: Frontmatter,
}

impl NoteSpec {
    /// The filename this note writes to, treating empty as absent.
    pub fn target_filename(&self) -> Option<&str> {
        self.filename.as_deref().filter(|name| !name.is_empty())
    }
}

/// Free-form frontmatter supplied by the spec author.
///
/// Keys render into the note header in their JSON definition order, so
/// this is a plain entry list rather than a map type that would re-sort
/// or hash them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter(Vec<(String, FrontmatterValue)>);

impl Frontmatter {
    pub fn iter(&self) -> impl Iterator<Item = &(String, FrontmatterValue)> {
        self.0.iter()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: FrontmatterValue) {
        self.0.push((key.into(), value));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<'de> Deserialize<'de> for Frontmatter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FrontmatterVisitor;

        impl<'de> Visitor<'de> for FrontmatterVisitor {
            type Value = Frontmatter;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of frontmatter keys to scalar values")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, FrontmatterValue>()? {
                    entries.push(entry);
                }
                Ok(Frontmatter(entries))
            }
        }

        deserializer.deserialize_map(FrontmatterVisitor)
    }
}

/// The closed set of value kinds allowed in free-form frontmatter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FrontmatterValue {
    Flag(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl fmt::Display for FrontmatterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(flag) => write!(f, "{flag}"),
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
            Self::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
