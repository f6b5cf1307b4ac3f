//! Opens a [`ModelSelector`] for one CLI invocation.
//!
//! Every command starts the same way: build the selector from the catalog
//! and the merged config, then switch to `--provider` if one was given.
//! Durable model ids go to a [`FileStore`]; durable API keys go to the
//! system keyring. Providers without a remembered key read `*_API_KEY`.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Args;
use modelpick_models::providers::catalog;
use modelpick_models::store::{FileStore, PreferenceStore};
use modelpick_models::{ModelKind, ModelSelector, Persistence};
use tracing::debug;

use crate::config::ModelpickConfig;

/// Flags shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Provider to select before running the command (e.g., OpenAI, Google)
    #[arg(short, long, global = true)]
    pub provider: Option<String>,

    /// Model kind: language, embedding or image
    #[arg(short, long, global = true)]
    pub kind: Option<ModelKind>,

    /// Keep keys and models in memory for this invocation only
    #[arg(long, global = true)]
    pub ephemeral: bool,
}

/// Build a selector for this invocation.
pub fn open(config: &ModelpickConfig, args: &SelectionArgs) -> Result<ModelSelector> {
    let kind = args.kind.unwrap_or(config.selection.kind);
    let persistence = if args.ephemeral {
        Persistence::Ephemeral
    } else {
        config.selection.persistence
    };
    let store: Arc<dyn PreferenceStore> = Arc::new(match &config.selection.storage_dir {
        Some(dir) => FileStore::new(dir),
        None => FileStore::in_data_dir(),
    });

    let mut selector = ModelSelector::builder(catalog::descriptors(kind))
        .model_kind(kind)
        .persistence(persistence)
        .store(store)
        .with_env_fallback()
        .build()
        .with_context(|| format!("no providers offer {kind} models"))?;

    if let Some(requested) = &args.provider {
        let name = resolve_provider(&selector, requested)?;
        selector.set_selected_provider(&name)?;
    }

    debug!(
        provider = selector.selected_provider(),
        %kind,
        %persistence,
        "opened selector"
    );
    Ok(selector)
}

/// Match a provider name case-insensitively.
fn resolve_provider(selector: &ModelSelector, requested: &str) -> Result<String> {
    if let Some(name) = selector
        .providers()
        .find(|name| name.eq_ignore_ascii_case(requested))
    {
        return Ok(name.to_string());
    }
    let available: Vec<&str> = selector.providers().collect();
    bail!(
        "Unknown provider '{}' for {} models. Available: {}",
        requested,
        selector.model_kind(),
        available.join(", ")
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SelectionConfig;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> ModelpickConfig {
        ModelpickConfig {
            selection: SelectionConfig {
                storage_dir: Some(dir.path().to_path_buf()),
                ..Default::default()
            },
        }
    }

    #[test]
    fn opens_on_first_catalog_provider() {
        let dir = TempDir::new().unwrap();
        let selector = open(&config_in(&dir), &SelectionArgs::default()).unwrap();
        assert_eq!(selector.selected_provider(), "OpenAI");
    }

    #[test]
    fn provider_flag_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let args = SelectionArgs {
            provider: Some("google".to_string()),
            ..Default::default()
        };
        let selector = open(&config_in(&dir), &args).unwrap();
        assert_eq!(selector.selected_provider(), "Google");
    }

    #[test]
    fn unknown_provider_lists_alternatives() {
        let dir = TempDir::new().unwrap();
        let args = SelectionArgs {
            provider: Some("Anthropic".to_string()),
            kind: Some(ModelKind::Image),
            ..Default::default()
        };
        let err = open(&config_in(&dir), &args).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Anthropic"));
        assert!(message.contains("OpenAI, Google"));
    }

    #[test]
    fn durable_edits_are_visible_to_next_invocation() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let args = SelectionArgs {
            provider: Some("Google".to_string()),
            ..Default::default()
        };

        let mut first = open(&config, &args).unwrap();
        first.set_model_id("gemini-exp");

        let second = open(&config, &args).unwrap();
        assert_eq!(second.model_id(), "gemini-exp");
    }

    #[test]
    fn ephemeral_flag_skips_disk() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let args = SelectionArgs {
            ephemeral: true,
            ..Default::default()
        };

        let mut selector = open(&config, &args).unwrap();
        selector.set_credential("sk-1");

        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }
}
