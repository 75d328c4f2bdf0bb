use super::{check_quota, KeyValueStore, StorageResult};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// In-process store, mainly for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RefCell<BTreeMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: RefCell::default(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Total bytes currently held (keys plus values).
    pub fn used_bytes(&self) -> usize {
        self.entries
            .borrow()
            .iter()
            .map(|(key, value)| key.len() + value.len())
            .sum()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let others: usize = self
            .entries
            .borrow()
            .iter()
            .filter(|(existing, _)| existing.as_str() != key)
            .map(|(existing, stored)| existing.len() + stored.len())
            .sum();
        check_quota(self.quota_bytes, others, key, value)?;

        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryKeyValueStore;
    use crate::storage::{KeyValueStore, StorageError};

    #[test]
    fn overwrite_does_not_count_previous_value_against_quota() {
        let store = MemoryKeyValueStore::with_quota(10);
        store.set("k", "123456789").expect("fits exactly");
        store.set("k", "987654321").expect("overwrite fits");
        assert_eq!(store.used_bytes(), 10);
    }

    #[test]
    fn over_quota_write_keeps_previous_value() {
        let store = MemoryKeyValueStore::with_quota(8);
        store.set("k", "abc").expect("fits");
        let err = store.set("k", "abcdefghij").expect_err("should exceed quota");
        assert!(matches!(err, StorageError::QuotaExceeded { quota_bytes: 8, .. }));
        assert_eq!(store.get("k").expect("read").as_deref(), Some("abc"));
    }
}
