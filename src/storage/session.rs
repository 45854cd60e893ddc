/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use crate::storage::store::{AuthStorage, CredentialStore};
use parking_lot::Mutex;
use std::collections::HashMap;

/// Session-like credential store
///
/// Keeps the values in a map owned by whoever constructs it, typically one
/// instance per user session on the server side. Writes and removals are
/// visible immediately.
#[derive(Debug, Default)]
pub struct SessionStore {
    values: Mutex<HashMap<String, String>>,
}

impl SessionStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with `values`
    pub fn from_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values = values
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            values: Mutex::new(values),
        }
    }

    /// Number of stored values
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.lock().len()
    }

    /// Whether the store holds no value
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }
}

impl CredentialStore for SessionStore {
    fn set(&self, key: &str, value: &str) {
        self.values.lock().insert(key.to_string(), value.to_string());
    }

    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn unset(&self, key: &str) {
        self.values.lock().remove(key);
    }

    fn backend(&self) -> AuthStorage {
        AuthStorage::Session
    }
}
