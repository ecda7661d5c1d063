use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use crate::error::StorageError;
use super::CartStorage;

/// In-process storage. Clones share the same underlying map, so a test or
/// a second cart instance can observe what was written.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored value, bypassing deserialization.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_entries() {
        let storage = MemoryStorage::new();
        let other = storage.clone();

        storage.save("k", "[]").unwrap();
        assert_eq!(other.load("k").unwrap().as_deref(), Some("[]"));
        assert_eq!(other.raw("k").as_deref(), Some("[]"));
        assert_eq!(other.load("missing").unwrap(), None);
    }
}
