//! On-disk preference store.
//!
//! Each key is a pretty-printed JSON object in `<dir>/<key>.json`. Writes
//! go to a uniquely named, owner-only temp file in the same directory and
//! are renamed into place, so a crash mid-write leaves the previous
//! document intact.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use super::{PreferenceStore, ProviderMap};
use crate::{Error, Result};

/// Preference store backed by JSON files in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create a store in the modelpick data directory.
    pub fn in_data_dir() -> Self {
        Self::new(modelpick_paths::data_dir())
    }

    /// Directory the store writes to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn validate_key(key: &str) -> Result<()> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(())
        } else {
            Err(Error::Storage(format!("invalid storage key: {key:?}")))
        }
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<ProviderMap>> {
        Self::validate_key(key)?;
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)?;
        let map: ProviderMap = serde_json::from_str(&contents)?;
        debug!(key, entries = map.len(), "loaded preferences");
        Ok(Some(map))
    }

    fn set(&self, key: &str, value: &ProviderMap) -> Result<()> {
        Self::validate_key(key)?;
        fs::create_dir_all(&self.dir)?;

        // NamedTempFile is created 0600 with a random name.
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        serde_json::to_writer_pretty(&mut tmp, value)?;
        tmp.as_file().sync_all()?;
        tmp.persist(self.path_for(key)).map_err(|e| e.error)?;

        debug!(key, entries = value.len(), "saved preferences");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> ProviderMap {
        let mut map = ProviderMap::new();
        map.insert("OpenAI".to_string(), "gpt-4o".to_string());
        map.insert("Google".to_string(), "custom-model".to_string());
        map
    }

    #[test]
    fn missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.get("provider-model-ids").unwrap().is_none());
    }

    #[test]
    fn set_then_get_from_new_instance() {
        let dir = TempDir::new().unwrap();
        FileStore::new(dir.path())
            .set("provider-model-ids", &sample())
            .unwrap();

        let reopened = FileStore::new(dir.path());
        assert_eq!(reopened.get("provider-model-ids").unwrap(), Some(sample()));
    }

    #[test]
    fn set_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileStore::new(&nested);

        store.set("provider-model-ids", &sample()).unwrap();
        assert!(store.path_for("provider-model-ids").exists());
        assert_eq!(fs::read_dir(&nested).unwrap().count(), 1);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        fs::write(store.path_for("provider-model-ids"), "{not json").unwrap();

        let err = store.get("provider-model-ids").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn path_like_keys_are_rejected() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.set("../escape", &sample()).is_err());
        assert!(store.get("").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn no_file_is_broader_than_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        store.set("provider-model-ids", &sample()).unwrap();
        store.set("provider-model-ids", &ProviderMap::new()).unwrap();
        store.set("provider-api-keys", &sample()).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap())
            .collect();
        assert_eq!(entries.len(), 2, "temp files left behind");
        for entry in entries {
            let mode = entry.metadata().unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600, "{:?}", entry.path());
        }
    }

    #[test]
    fn stale_temp_file_does_not_block_writes() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        fs::write(dir.path().join(".provider-model-ids.json.tmp"), "junk").unwrap();

        store.set("provider-model-ids", &sample()).unwrap();
        assert_eq!(store.get("provider-model-ids").unwrap(), Some(sample()));
    }
}
