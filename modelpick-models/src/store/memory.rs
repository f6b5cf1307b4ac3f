//! In-process preference store.

use std::collections::HashMap;
use std::sync::RwLock;

use super::{PreferenceStore, ProviderMap};
use crate::{Error, Result};

/// Preference store held in memory.
///
/// Shared between selectors through an `Arc`, it behaves like durable
/// storage for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, ProviderMap>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<ProviderMap>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| Error::Storage(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &ProviderMap) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| Error::Storage(e.to_string()))?;
        entries.insert(key.to_string(), value.clone());
        Ok(())
    }
}
