//! Per-provider map with optional write-through storage.

use std::sync::Arc;

use tracing::warn;

use crate::store::{PreferenceStore, ProviderMap};

/// Provider name → value, loaded once and written through on every insert.
///
/// The in-memory copy is authoritative for the session. Storage errors are
/// logged and otherwise ignored.
pub(crate) struct PersistentMap {
    key: &'static str,
    values: ProviderMap,
    store: Option<Arc<dyn PreferenceStore>>,
}

impl PersistentMap {
    /// Map that lives only as long as its selector.
    pub(crate) fn ephemeral(key: &'static str) -> Self {
        Self {
            key,
            values: ProviderMap::new(),
            store: None,
        }
    }

    /// Map loaded from, and written back to, `store`.
    pub(crate) fn load(key: &'static str, store: Arc<dyn PreferenceStore>) -> Self {
        let values = match store.get(key) {
            Ok(values) => values.unwrap_or_default(),
            Err(e) => {
                warn!(key, error = %e, "failed to load preferences, starting empty");
                ProviderMap::new()
            }
        };
        Self {
            key,
            values,
            store: Some(store),
        }
    }

    pub(crate) fn get(&self, provider: &str) -> Option<&str> {
        self.values.get(provider).map(String::as_str)
    }

    pub(crate) fn insert(&mut self, provider: &str, value: &str) {
        self.values.insert(provider.to_string(), value.to_string());
        if let Some(store) = &self.store
            && let Err(e) = store.set(self.key, &self.values)
        {
            warn!(key = self.key, provider, error = %e, "failed to save preferences");
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn is_durable(&self) -> bool {
        self.store.is_some()
    }
}
