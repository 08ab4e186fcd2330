//! Key-value storage backends
//!
//! LocalStorage on web, an in-memory map everywhere else (native builds and
//! tests).

use std::collections::HashMap;

use crate::error::Result;

/// Minimal string key-value store
pub trait KeyValueStore {
    /// Read a value. `Ok(None)` when the key is absent.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing whatever was there
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Browser LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    /// `None` when the page has no window or storage is disabled
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()?;
        Some(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| crate::error::GameError::Storage(format!("{:?}", e)))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| crate::error::GameError::Storage(format!("{:?}", e)))
    }
}

/// Store whose reads and writes always fail
#[cfg(test)]
pub(crate) struct BrokenStorage;

#[cfg(test)]
impl KeyValueStore for BrokenStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>> {
        Err(crate::error::GameError::Storage("unavailable".to_string()))
    }

    fn set_item(&mut self, _key: &str, _value: &str) -> Result<()> {
        Err(crate::error::GameError::Storage("quota exceeded".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let mut store = MemoryStorage::new();
        assert_eq!(store.get_item("k").unwrap(), None);
        store.set_item("k", "v1").unwrap();
        store.set_item("k", "v2").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v2"));
    }
}
