use modelpick_models::{ModelKind, Persistence};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration as stored in TOML files (with optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawModelpickConfig {
    #[serde(default)]
    pub selection: RawSelectionConfig,
}

/// Selection config as stored in TOML (optional fields for proper merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawSelectionConfig {
    /// Model kind to pick
    pub kind: Option<ModelKind>,

    /// Where remembered keys and model ids live
    pub persistence: Option<Persistence>,

    /// Directory for durable preferences
    pub storage_dir: Option<PathBuf>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ModelpickConfig {
    #[serde(default)]
    pub selection: SelectionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Model kind to pick
    pub kind: ModelKind,

    /// Where remembered keys and model ids live
    pub persistence: Persistence,

    /// Directory for durable preferences (defaults to the data directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            kind: ModelKind::default(),
            persistence: DEFAULT_PERSISTENCE,
            storage_dir: None,
        }
    }
}

/// Each CLI invocation is a fresh process, so preferences default to disk.
pub const DEFAULT_PERSISTENCE: Persistence = Persistence::Durable;
