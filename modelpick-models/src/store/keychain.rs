//! Preference store backed by the system keyring.
//!
//! Each storage key is one keyring entry under the store's service name.
//! The entry's secret is the JSON-encoded provider map, so remembered API
//! keys never touch the filesystem in plain text.

use tracing::debug;

use super::{PreferenceStore, ProviderMap};
use crate::{Error, Result};

/// Keyring service name used by the modelpick CLI.
pub const DEFAULT_SERVICE: &str = "modelpick";

/// Preference store that keeps each map in the system keyring.
#[derive(Debug, Clone)]
pub struct KeyringStore {
    service_name: String,
}

impl KeyringStore {
    /// Create a store.
    ///
    /// # Arguments
    ///
    /// * `service_name` - Service identifier for keyring (e.g., "modelpick")
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }

    /// Service identifier entries are stored under.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    fn entry(&self, key: &str) -> Result<keyring::Entry> {
        keyring::Entry::new(&self.service_name, key).map_err(|e| Error::Keyring(e.to_string()))
    }
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE)
    }
}

impl PreferenceStore for KeyringStore {
    fn get(&self, key: &str) -> Result<Option<ProviderMap>> {
        let secret = match self.entry(key)?.get_password() {
            Ok(secret) => secret,
            Err(keyring::Error::NoEntry) => return Ok(None),
            Err(e) => return Err(Error::Keyring(e.to_string())),
        };
        let map: ProviderMap = serde_json::from_str(&secret)?;
        debug!(key, entries = map.len(), "loaded preferences from keyring");
        Ok(Some(map))
    }

    fn set(&self, key: &str, value: &ProviderMap) -> Result<()> {
        let secret = serde_json::to_string(value)?;
        self.entry(key)?
            .set_password(&secret)
            .map_err(|e| Error::Keyring(e.to_string()))?;
        debug!(key, entries = value.len(), "saved preferences to keyring");
        Ok(())
    }
}
