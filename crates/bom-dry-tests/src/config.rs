// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory config store fake for testing without filesystem I/O.

use bom_app_core::config::{ConfigError, ConfigStore};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// In-memory implementation of [`ConfigStore`] for testing.
///
/// Clones share the same backing map, so a test can hand one clone to a
/// `ConfigService` and inspect the other.
///
/// # Example
///
/// ```
/// use bom_app_core::config::ConfigService;
/// use bom_app_core::prefs::{CliPrefs, CLI_PREFS_KEY};
/// use bom_dry_tests::InMemoryConfigStore;
///
/// let store = InMemoryConfigStore::new();
/// let service = ConfigService::new(store.clone());
///
/// let prefs: CliPrefs = service.load_or_init(CLI_PREFS_KEY).unwrap();
/// assert_eq!(prefs, CliPrefs::default());
/// assert!(store.contains_key(CLI_PREFS_KEY));
/// assert_eq!(store.save_count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct InMemoryConfigStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    data: HashMap<String, Vec<u8>>,
    load_count: usize,
    save_count: usize,
    fail_on_load: bool,
    fail_on_save: bool,
}

impl InMemoryConfigStore {
    /// Create a new empty in-memory config store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding one pre-serialized blob.
    pub fn with_entry(key: &str, data: impl Into<Vec<u8>>) -> Self {
        let store = Self::new();
        store.lock().data.insert(key.to_owned(), data.into());
        store
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Configure the store to fail on load operations.
    pub fn set_fail_on_load(&self, fail: bool) {
        self.lock().fail_on_load = fail;
    }

    /// Configure the store to fail on save operations.
    pub fn set_fail_on_save(&self, fail: bool) {
        self.lock().fail_on_save = fail;
    }

    /// Number of `load_raw` attempts, including failed ones.
    pub fn load_count(&self) -> usize {
        self.lock().load_count
    }

    /// Number of `save_raw` attempts, including failed ones.
    pub fn save_count(&self) -> usize {
        self.lock().save_count
    }

    /// Check if a key exists in the store.
    pub fn contains_key(&self, key: &str) -> bool {
        self.lock().data.contains_key(key)
    }

    /// Raw blob stored under `key`.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.lock().data.get(key).cloned()
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        let mut inner = self.lock();
        inner.load_count += 1;
        if inner.fail_on_load {
            return Err(ConfigError::Unavailable("simulated load failure".into()));
        }
        inner
            .data
            .get(key)
            .cloned()
            .ok_or_else(|| ConfigError::Missing(key.to_owned()))
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let mut inner = self.lock();
        inner.save_count += 1;
        if inner.fail_on_save {
            return Err(ConfigError::Unavailable("simulated save failure".into()));
        }
        inner.data.insert(key.to_owned(), data.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use bom_app_core::config::ConfigService;
    use bom_app_core::prefs::{CliPrefs, CLI_PREFS_KEY};

    #[test]
    fn stored_prefs_are_loaded_not_overwritten() {
        let store = InMemoryConfigStore::with_entry(
            CLI_PREFS_KEY,
            serde_json::to_vec(&serde_json::json!({"error_prefix": "E: "})).unwrap(),
        );
        let service = ConfigService::new(store.clone());
        let prefs: CliPrefs = service.load_or_init(CLI_PREFS_KEY).unwrap();
        assert_eq!(prefs.error_prefix, "E: ");
        assert_eq!(store.save_count(), 0);
        assert_eq!(store.load_count(), 1);
    }

    #[test]
    fn fail_on_load_surfaces_error() {
        let store = InMemoryConfigStore::new();
        store.set_fail_on_load(true);
        let service = ConfigService::new(store);
        assert!(matches!(
            service.load::<CliPrefs>(CLI_PREFS_KEY),
            Err(ConfigError::Unavailable(_))
        ));
    }

    #[test]
    fn fail_on_save_keeps_store_empty() {
        let store = InMemoryConfigStore::new();
        store.set_fail_on_save(true);
        assert!(store.save_raw("k", b"v").is_err());
        assert!(!store.contains_key("k"));
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn malformed_blob_is_reported_and_kept() {
        let store = InMemoryConfigStore::with_entry(CLI_PREFS_KEY, b"not json".to_vec());
        let service = ConfigService::new(store.clone());
        assert!(matches!(
            service.load_or_init::<CliPrefs>(CLI_PREFS_KEY),
            Err(ConfigError::Malformed { .. })
        ));
        assert_eq!(store.get(CLI_PREFS_KEY).as_deref(), Some(&b"not json"[..]));
    }
}
