use super::types::{ModelpickConfig, RawModelpickConfig, RawSelectionConfig, SelectionConfig};
use super::types::DEFAULT_PERSISTENCE;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user + project)
    pub fn load() -> Result<ModelpickConfig> {
        let mut raw = RawModelpickConfig::default();

        // Layer 1: User config
        if let Some(user_path) = Self::user_config_path() {
            raw = Self::merge_raw(raw, Self::read_raw(&user_path)?);
        }

        // Layer 2: Project config
        raw = Self::merge_raw(raw, Self::read_raw(&Self::project_config_path())?);

        // Convert to final config with defaults applied
        Ok(Self::finalize(raw))
    }

    /// Get user config path (platform-specific)
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "modelpick").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Get project config path
    /// Can be overridden with MODELPICK_PROJECT_CONFIG_DIR env var (useful for isolated tests)
    pub fn project_config_path() -> PathBuf {
        if let Ok(dir) = std::env::var("MODELPICK_PROJECT_CONFIG_DIR") {
            PathBuf::from(dir).join("config.toml")
        } else {
            PathBuf::from(".modelpick/config.toml")
        }
    }

    /// Read a raw config file; a missing file is an empty config
    fn read_raw(path: &Path) -> Result<RawModelpickConfig> {
        if !path.exists() {
            return Ok(RawModelpickConfig::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("invalid config in {}", path.display()))
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawModelpickConfig, overlay: RawModelpickConfig) -> RawModelpickConfig {
        RawModelpickConfig {
            selection: RawSelectionConfig {
                kind: overlay.selection.kind.or(base.selection.kind),
                persistence: overlay.selection.persistence.or(base.selection.persistence),
                storage_dir: overlay.selection.storage_dir.or(base.selection.storage_dir),
            },
        }
    }

    /// Convert raw config to final config with defaults applied
    fn finalize(raw: RawModelpickConfig) -> ModelpickConfig {
        ModelpickConfig {
            selection: SelectionConfig {
                kind: raw.selection.kind.unwrap_or_default(),
                persistence: raw.selection.persistence.unwrap_or(DEFAULT_PERSISTENCE),
                storage_dir: raw.selection.storage_dir,
            },
        }
    }

    /// Load config from a specific path (for testing)
    #[cfg(test)]
    pub fn load_from_path(path: &Path) -> Result<ModelpickConfig> {
        Ok(Self::finalize(Self::read_raw(path)?))
    }
}
