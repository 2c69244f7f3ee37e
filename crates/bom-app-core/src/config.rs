// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Preference storage port and the JSON service on top of it.
//!
//! A [`ConfigStore`] moves opaque bytes under a key; [`ConfigService`] owns
//! the JSON encoding and the "write defaults on first run" policy the console
//! relies on. Keys end up as file names in the filesystem adapter, so the
//! service only accepts short identifier-like keys.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Longest accepted preference key.
pub const MAX_KEY_LEN: usize = 64;

/// Byte storage for preference blobs.
pub trait ConfigStore {
    /// Returns the blob stored under `key`, or [`ConfigError::Missing`].
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
    /// Replaces the blob stored under `key`.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

/// Why preferences could not be read or written.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Nothing is stored under the key.
    #[error("no preferences stored under {0:?}")]
    Missing(String),
    /// The key is empty, too long, or not `[A-Za-z0-9_-]`.
    #[error("invalid preference key {0:?}")]
    InvalidKey(String),
    /// The stored blob is not valid JSON for the requested type.
    #[error("preferences under {key:?} are unreadable: {source}")]
    Malformed {
        /// Key that was read.
        key: String,
        /// Decoder failure.
        source: serde_json::Error,
    },
    /// A value could not be encoded.
    #[error("cannot encode preferences: {0}")]
    Encode(#[from] serde_json::Error),
    /// The backing storage failed.
    #[error("preference storage failed: {0}")]
    Io(#[from] std::io::Error),
    /// The backing storage is not usable at all.
    #[error("preference storage unavailable: {0}")]
    Unavailable(String),
}

/// Returns `true` if `key` can be used with any [`ConfigStore`].
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key.len() <= MAX_KEY_LEN
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// JSON (de)serialization of typed preferences over a [`ConfigStore`].
pub struct ConfigService<S> {
    store: S,
}

impl<S> ConfigService<S> {
    /// Wraps `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: ConfigStore> ConfigService<S> {
    /// Loads the value under `key`; `Ok(None)` when absent or empty.
    pub fn load<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: DeserializeOwned,
    {
        let bytes = match self.store.load_raw(checked_key(key)?) {
            Ok(bytes) if bytes.is_empty() => return Ok(None),
            Ok(bytes) => bytes,
            Err(ConfigError::Missing(_)) => return Ok(None),
            Err(e) => return Err(e),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| ConfigError::Malformed {
                key: key.to_owned(),
                source,
            })
    }

    /// Stores `value` under `key` as pretty-printed JSON.
    pub fn save<T>(&self, key: &str, value: &T) -> Result<(), ConfigError>
    where
        T: Serialize,
    {
        let key = checked_key(key)?;
        let data = serde_json::to_vec_pretty(value)?;
        self.store.save_raw(key, &data)
    }

    /// Loads `key`, or stores and returns `T::default()` when it is absent.
    ///
    /// A malformed blob is reported and left in place for the user to fix.
    pub fn load_or_init<T>(&self, key: &str) -> Result<T, ConfigError>
    where
        T: DeserializeOwned + Serialize + Default,
    {
        if let Some(value) = self.load(key)? {
            return Ok(value);
        }
        let value = T::default();
        self.save(key, &value)?;
        Ok(value)
    }
}

fn checked_key(key: &str) -> Result<&str, ConfigError> {
    if is_valid_key(key) {
        Ok(key)
    } else {
        Err(ConfigError::InvalidKey(key.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MapStore(RefCell<HashMap<String, Vec<u8>>>);

    impl ConfigStore for MapStore {
        fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
            self.0
                .borrow()
                .get(key)
                .cloned()
                .ok_or_else(|| ConfigError::Missing(key.to_owned()))
        }

        fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
            self.0.borrow_mut().insert(key.to_owned(), data.to_vec());
            Ok(())
        }
    }

    #[test]
    fn keys_must_be_identifier_like() {
        assert!(is_valid_key("cli"));
        assert!(is_valid_key("cli_v2-beta"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("../cli"));
        assert!(!is_valid_key("cli.json"));
        assert!(!is_valid_key(&"k".repeat(MAX_KEY_LEN + 1)));
    }

    #[test]
    fn invalid_key_never_reaches_the_store() {
        let service = ConfigService::new(MapStore::default());
        assert!(matches!(
            service.save("../escape", &1_u8),
            Err(ConfigError::InvalidKey(k)) if k == "../escape"
        ));
        assert!(service.store.0.borrow().is_empty());
        assert!(matches!(
            service.load::<u8>("a/b"),
            Err(ConfigError::InvalidKey(_))
        ));
    }

    #[test]
    fn empty_blob_counts_as_absent() {
        let store = MapStore::default();
        store.save_raw("cli", b"").unwrap();
        let service = ConfigService::new(store);
        assert_eq!(service.load::<u8>("cli").unwrap(), None);
        assert_eq!(service.load_or_init::<u8>("cli").unwrap(), 0);
        assert_eq!(service.load::<u8>("cli").unwrap(), Some(0));
    }

    #[test]
    fn malformed_blob_names_its_key() {
        let store = MapStore::default();
        store.save_raw("cli", b"{oops").unwrap();
        let err = ConfigService::new(store).load::<u8>("cli").unwrap_err();
        assert!(matches!(&err, ConfigError::Malformed { key, .. } if key == "cli"));
        assert!(err.to_string().starts_with("preferences under \"cli\" are unreadable"));
    }
}
