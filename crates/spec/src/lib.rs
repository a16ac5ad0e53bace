pub mod loader;
pub mod model;

pub use loader::{load_spec, parse_spec};
pub use model::{
    DEFAULT_VAULT_NAME, FolderSpec, Frontmatter, FrontmatterValue, NoteSpec, ObsidianConfig,
    VaultSpec,
};
