//! Preference storage for remembered API keys and model ids.
//!
//! A [`PreferenceStore`] maps a string key to a string-keyed map. The
//! selector uses two keys, [`API_KEYS`] and [`MODEL_IDS`], one per
//! remembered value. [`MemoryStore`] lives as long as the process;
//! [`FileStore`] writes one JSON document per key to a directory;
//! [`KeyringStore`] keeps each map in the system keyring and is where
//! durable API keys go.

mod file;
mod keychain;
mod memory;

use std::collections::BTreeMap;

pub use file::FileStore;
pub use keychain::{DEFAULT_SERVICE, KeyringStore};
pub use memory::MemoryStore;

use crate::Result;

/// Storage key for provider name → API key.
pub const API_KEYS: &str = "provider-api-keys";

/// Storage key for provider name → last used model id.
pub const MODEL_IDS: &str = "provider-model-ids";

/// A string-keyed map of per-provider values.
pub type ProviderMap = BTreeMap<String, String>;

/// Key/value storage for per-provider preferences.
pub trait PreferenceStore: Send + Sync {
    /// Read the map stored under `key`, or `None` if nothing was stored.
    fn get(&self, key: &str) -> Result<Option<ProviderMap>>;

    /// Replace the map stored under `key`.
    fn set(&self, key: &str, value: &ProviderMap) -> Result<()>;
}
