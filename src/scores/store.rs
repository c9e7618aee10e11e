//! Key-value store collaborator
//!
//! The hosting platform provides the real store; only the string get/set/
//! increment surface is relied upon.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("value at `{key}` is not an integer")]
    NotAnInteger { key: String },
}

/// String key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Add `by` to the integer stored at `key` (missing counts as 0), returning the new value
    fn increment(&self, key: &str, by: i64) -> Result<i64, StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn increment(&self, key: &str, by: i64) -> Result<i64, StoreError> {
        (**self).increment(key, by)
    }
}

/// In-process store for tests and the native demo
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.values
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn increment(&self, key: &str, by: i64) -> Result<i64, StoreError> {
        let mut values = self.lock()?;
        let current = match values.get(key) {
            Some(v) => v.parse::<i64>().map_err(|_| StoreError::NotAnInteger {
                key: key.to_string(),
            })?,
            None => 0,
        };
        let next = current + by;
        values.insert(key.to_string(), next.to_string());
        Ok(next)
    }
}
