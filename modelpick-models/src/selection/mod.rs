//! Provider, API key and model selection state.
//!
//! [`ModelSelector`] owns the selected provider, the entered API key and the
//! chosen model id, and remembers the last key and model id per provider.
//! Every setter runs to completion and then re-derives the active
//! [`ModelHandle`] exactly once, so a half-applied state (new provider with
//! the old key) is never observed.
//!
//! # Example
//!
//! ```
//! use modelpick_models::ModelSelector;
//! use modelpick_models::providers::catalog;
//! use modelpick_models::ModelKind;
//!
//! let mut selector = ModelSelector::builder(catalog::descriptors(ModelKind::Language))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(selector.selected_provider(), "OpenAI");
//! assert_eq!(selector.model_id(), "gpt-4o");
//!
//! selector.set_credential("sk-1");
//! selector.set_selected_provider("Google").unwrap();
//! assert!(selector.credential().is_empty());
//!
//! selector.set_selected_provider("OpenAI").unwrap();
//! assert_eq!(selector.credential().expose_secret(), "sk-1");
//! ```

mod persisted;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::auth::{self, ApiKey, Credentials};
use crate::providers::{ModelHandle, ProviderDescriptor};
use crate::store::{self, FileStore, KeyringStore, PreferenceStore};
use crate::{Error, ModelKind, Persistence, Result, SelectorConfig};

use persisted::PersistentMap;

/// Outcome of the latest handle derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum HandleStatus {
    /// The active handle matches the current provider, key and model id.
    Ready,
    /// The latest derivation failed. The previous handle, if any, is still served.
    Unavailable {
        /// Why the provider refused to build a handle.
        reason: String,
    },
}

impl HandleStatus {
    /// Whether the active handle reflects the current state.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// Serializable view of a selector. The API key is masked.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionSnapshot {
    /// Selected provider name.
    pub provider: String,
    /// Configured model kind.
    pub model_kind: ModelKind,
    /// Where preferences are remembered.
    pub persistence: Persistence,
    /// Current model id.
    pub model_id: String,
    /// Known model ids of the selected provider.
    pub known_model_ids: Vec<String>,
    /// Whether the model id is entered as free text.
    pub custom_model: bool,
    /// Masked API key, empty when no key is set.
    pub api_key: String,
    /// Result of the latest handle derivation.
    pub status: HandleStatus,
}

/// Build the model handle for a provider, key and model id.
///
/// Constructs the provider with `credentials` and binds `model_id` through
/// the accessor for `kind`. Has no side effects.
pub fn derive_handle(
    descriptor: &ProviderDescriptor,
    kind: ModelKind,
    credentials: &Credentials,
    model_id: &str,
) -> Result<ModelHandle> {
    descriptor.construct(credentials)?.model(kind, model_id)
}

/// Builder for [`ModelSelector`].
pub struct ModelSelectorBuilder {
    providers: Vec<ProviderDescriptor>,
    config: SelectorConfig,
    store: Option<Arc<dyn PreferenceStore>>,
    credential_store: Option<Arc<dyn PreferenceStore>>,
    env_fallback: bool,
}

impl ModelSelectorBuilder {
    fn new(providers: Vec<ProviderDescriptor>) -> Self {
        Self {
            providers,
            config: SelectorConfig::default(),
            store: None,
            credential_store: None,
            env_fallback: false,
        }
    }

    /// Set the model kind used to derive handles.
    pub fn model_kind(mut self, kind: ModelKind) -> Self {
        self.config.model_kind = kind;
        self
    }

    /// Set where preferences are remembered.
    pub fn persistence(mut self, persistence: Persistence) -> Self {
        self.config.persistence = persistence;
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: SelectorConfig) -> Self {
        self.config = config;
        self
    }

    /// Store for remembered model ids in [`Persistence::Durable`] mode.
    ///
    /// Defaults to a [`FileStore`] in the modelpick data directory.
    /// Ignored in [`Persistence::Ephemeral`] mode.
    pub fn store(mut self, store: Arc<dyn PreferenceStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Store for remembered API keys in [`Persistence::Durable`] mode.
    ///
    /// Defaults to a [`KeyringStore`] so keys stay out of plain-text files.
    /// Ignored in [`Persistence::Ephemeral`] mode.
    pub fn credential_store(mut self, store: Arc<dyn PreferenceStore>) -> Self {
        self.credential_store = Some(store);
        self
    }

    /// Start a provider without a remembered key from its `*_API_KEY`
    /// environment variable.
    pub fn with_env_fallback(mut self) -> Self {
        self.env_fallback = true;
        self
    }

    /// Build the selector.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoProviders` for an empty provider list and
    /// `Error::DuplicateProvider` when two providers share a name.
    pub fn build(self) -> Result<ModelSelector> {
        if self.providers.is_empty() {
            return Err(Error::NoProviders);
        }
        for (i, provider) in self.providers.iter().enumerate() {
            if self.providers[..i]
                .iter()
                .any(|earlier| earlier.name() == provider.name())
            {
                return Err(Error::DuplicateProvider(provider.name().to_string()));
            }
        }

        let (credentials, model_ids) = match self.config.persistence {
            Persistence::Ephemeral => (
                PersistentMap::ephemeral(store::API_KEYS),
                PersistentMap::ephemeral(store::MODEL_IDS),
            ),
            Persistence::Durable => {
                let keys = self
                    .credential_store
                    .unwrap_or_else(|| Arc::new(KeyringStore::default()));
                let models = self
                    .store
                    .unwrap_or_else(|| Arc::new(FileStore::in_data_dir()));
                (
                    PersistentMap::load(store::API_KEYS, keys),
                    PersistentMap::load(store::MODEL_IDS, models),
                )
            }
        };

        let (updates, _) = watch::channel(None);
        let mut selector = ModelSelector {
            providers: self.providers,
            config: self.config,
            selected: 0,
            credential: ApiKey::default(),
            model_id: String::new(),
            custom_model: false,
            active: None,
            status: HandleStatus::Ready,
            credentials,
            model_ids,
            env_fallback: self.env_fallback,
            updates,
        };
        selector.restore();
        selector.refresh();
        Ok(selector)
    }
}

impl fmt::Debug for ModelSelectorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelSelectorBuilder")
            .field("providers", &self.providers)
            .field("config", &self.config)
            .field("store", &self.store.is_some())
            .field("credential_store", &self.credential_store.is_some())
            .field("env_fallback", &self.env_fallback)
            .finish()
    }
}

/// State manager for picking a provider, API key and model.
///
/// Invariants:
/// - the selected provider is always one of the supplied providers;
/// - the model id may be any string, known or not;
/// - the active handle is re-derived once per committed change and never
///   replaced by a failed derivation.
pub struct ModelSelector {
    providers: Vec<ProviderDescriptor>,
    config: SelectorConfig,
    selected: usize,
    credential: ApiKey,
    model_id: String,
    custom_model: bool,
    active: Option<ModelHandle>,
    status: HandleStatus,
    credentials: PersistentMap,
    model_ids: PersistentMap,
    env_fallback: bool,
    updates: watch::Sender<Option<ModelHandle>>,
}

impl ModelSelector {
    /// Start building a selector over `providers`.
    pub fn builder(providers: Vec<ProviderDescriptor>) -> ModelSelectorBuilder {
        ModelSelectorBuilder::new(providers)
    }

    /// Build a selector with the given configuration and the default store.
    pub fn new(providers: Vec<ProviderDescriptor>, config: SelectorConfig) -> Result<Self> {
        Self::builder(providers).config(config).build()
    }

    /// Provider names in the order they were supplied.
    pub fn providers(&self) -> impl Iterator<Item = &str> {
        self.providers.iter().map(ProviderDescriptor::name)
    }

    /// All provider descriptors in the order they were supplied.
    pub fn descriptors(&self) -> &[ProviderDescriptor] {
        &self.providers
    }

    /// Selector configuration.
    pub fn config(&self) -> SelectorConfig {
        self.config
    }

    /// Configured model kind.
    pub fn model_kind(&self) -> ModelKind {
        self.config.model_kind
    }

    /// Name of the selected provider.
    pub fn selected_provider(&self) -> &str {
        self.descriptor().name()
    }

    /// Descriptor of the selected provider.
    pub fn descriptor(&self) -> &ProviderDescriptor {
        &self.providers[self.selected]
    }

    /// Switch to another provider and restore its remembered key and model id.
    ///
    /// Providers never visited before start with an empty key and their
    /// first known model id. Selecting the current provider again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `Error::ProviderNotFound` if `name` is not one of the
    /// supplied providers. The selection is left unchanged.
    pub fn set_selected_provider(&mut self, name: &str) -> Result<()> {
        let index = self
            .providers
            .iter()
            .position(|p| p.name() == name)
            .ok_or_else(|| Error::ProviderNotFound(name.to_string()))?;
        if index == self.selected {
            return Ok(());
        }

        self.selected = index;
        self.restore();
        self.refresh();
        Ok(())
    }

    /// Current API key.
    pub fn credential(&self) -> &ApiKey {
        &self.credential
    }

    /// Set the API key and remember it for the selected provider.
    pub fn set_credential(&mut self, value: impl Into<String>) {
        let value = value.into();
        let provider = self.providers[self.selected].name();
        self.credentials.insert(provider, &value);
        if self.credential.expose_secret() == value {
            return;
        }
        self.credential = ApiKey::new(value);
        self.refresh();
    }

    /// Current model id.
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Set the model id and remember it for the selected provider.
    ///
    /// Any string is accepted, including ids outside
    /// [`known_model_ids`](Self::known_model_ids).
    pub fn set_model_id(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.custom_model = !self.descriptor().is_known_model(&value);
        self.apply_model_id(value);
    }

    /// Known model ids of the selected provider.
    pub fn known_model_ids(&self) -> &[String] {
        self.descriptor().known_model_ids()
    }

    /// Whether the model id is entered as free text rather than picked from the list.
    pub fn is_custom_model(&self) -> bool {
        self.custom_model
    }

    /// Flip between list and free-text entry.
    ///
    /// Entering free-text mode starts from the provider's first known model
    /// id. Leaving it keeps the model id as it is.
    pub fn toggle_custom_model(&mut self) {
        if self.custom_model {
            self.custom_model = false;
            return;
        }
        self.custom_model = true;
        let default = self.descriptor().default_model_id().to_string();
        self.apply_model_id(default);
    }

    /// The derived model handle, or `None` until one has been built.
    pub fn active_model(&self) -> Option<&ModelHandle> {
        self.active.as_ref()
    }

    /// Result of the latest handle derivation.
    pub fn handle_status(&self) -> &HandleStatus {
        &self.status
    }

    /// Watch freshly derived handles.
    ///
    /// Only successful derivations are published; when several changes
    /// happen before the receiver looks, it sees the latest one.
    pub fn subscribe(&self) -> watch::Receiver<Option<ModelHandle>> {
        self.updates.subscribe()
    }

    /// Remembered API key for `provider`, if one was ever set.
    pub fn credential_for(&self, provider: &str) -> Option<&str> {
        self.credentials.get(provider)
    }

    /// Remembered model id for `provider`, if one was ever set.
    pub fn model_id_for(&self, provider: &str) -> Option<&str> {
        self.model_ids.get(provider)
    }

    /// Serializable view of the current selection.
    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            provider: self.selected_provider().to_string(),
            model_kind: self.config.model_kind,
            persistence: if self.model_ids.is_durable() {
                Persistence::Durable
            } else {
                Persistence::Ephemeral
            },
            model_id: self.model_id.clone(),
            known_model_ids: self.known_model_ids().to_vec(),
            custom_model: self.custom_model,
            api_key: self.credential.masked(),
            status: self.status.clone(),
        }
    }

    fn apply_model_id(&mut self, value: String) {
        let provider = self.providers[self.selected].name();
        self.model_ids.insert(provider, &value);
        if self.model_id == value {
            return;
        }
        self.model_id = value;
        self.refresh();
    }

    /// Load the selected provider's remembered model id and key.
    ///
    /// A remembered key, even an empty one, wins over the environment.
    fn restore(&mut self) {
        let descriptor = &self.providers[self.selected];
        let name = descriptor.name();

        self.model_id = self
            .model_ids
            .get(name)
            .unwrap_or_else(|| descriptor.default_model_id())
            .to_string();
        let from_env = || {
            self.env_fallback
                .then(|| auth::api_key_from_env(name))
                .flatten()
        };
        let (credential, key_source) = match self.credentials.get(name) {
            Some(key) => (ApiKey::new(key), "remembered"),
            None => match from_env() {
                Some(key) => (key, "environment"),
                None => (ApiKey::default(), "none"),
            },
        };
        self.credential = credential;
        self.custom_model = !descriptor.is_known_model(&self.model_id);

        debug!(
            provider = name,
            model = %self.model_id,
            key_source,
            remembered = self.model_ids.len(),
            "restored provider preferences"
        );
    }

    /// Re-derive the active handle from the committed state.
    fn refresh(&mut self) {
        let descriptor = &self.providers[self.selected];
        let credentials = Credentials {
            api_key: self.credential.clone(),
        };
        match derive_handle(
            descriptor,
            self.config.model_kind,
            &credentials,
            &self.model_id,
        ) {
            Ok(handle) => {
                debug!(
                    provider = descriptor.name(),
                    model = %self.model_id,
                    kind = %self.config.model_kind,
                    "derived model handle"
                );
                self.status = HandleStatus::Ready;
                self.active = Some(handle.clone());
                self.updates.send_replace(Some(handle));
            }
            Err(e) => {
                warn!(
                    provider = descriptor.name(),
                    model = %self.model_id,
                    error = %e,
                    "model handle unavailable, keeping previous handle"
                );
                self.status = HandleStatus::Unavailable {
                    reason: e.to_string(),
                };
            }
        }
    }
}

impl fmt::Debug for ModelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelSelector")
            .field("provider", &self.selected_provider())
            .field("model_id", &self.model_id)
            .field("credential", &self.credential)
            .field("custom_model", &self.custom_model)
            .field("config", &self.config)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}
