//! In-process preference store
//!
//! Keeps a working copy and a "durable" copy that only catches up on
//! `save`, so tests can observe exactly what a flush would have persisted.

use crate::{PreferenceStore, StoreError, StoredValue, ValueMap};

#[derive(Debug, Default)]
pub struct MemoryStore {
    working: ValueMap,
    durable: ValueMap,
    save_count: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times `save` has been called.
    pub fn save_count(&self) -> usize {
        self.save_count
    }

    /// Value as of the last flush.
    pub fn saved_value(&self, key: &str) -> Option<&StoredValue> {
        self.durable.get(key)
    }

    /// Current, possibly unflushed, values.
    pub fn values(&self) -> &ValueMap {
        &self.working
    }
}

impl PreferenceStore for MemoryStore {
    fn get_string(&self, key: &str) -> String {
        self.working.get_string(key)
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.working.insert(key, StoredValue::String(value.to_string()));
    }

    fn get_int(&self, key: &str) -> i32 {
        self.working.get_int(key)
    }

    fn set_int(&mut self, key: &str, value: i32) {
        self.working.insert(key, StoredValue::Int(value));
    }

    fn get_float(&self, key: &str) -> f32 {
        self.working.get_float(key)
    }

    fn set_float(&mut self, key: &str, value: f32) {
        self.working.insert(key, StoredValue::Float(value));
    }

    fn has_key(&self, key: &str) -> bool {
        self.working.contains(key)
    }

    fn delete_key(&mut self, key: &str) {
        self.working.remove(key);
    }

    fn delete_all(&mut self) {
        self.working.clear();
    }

    fn save(&mut self) -> Result<(), StoreError> {
        self.durable = self.working.clone();
        self.save_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_are_not_durable_until_saved() {
        let mut store = MemoryStore::new();
        store.set_string("_fname", "Ada");
        assert_eq!(store.get_string("_fname"), "Ada");
        assert_eq!(store.saved_value("_fname"), None);

        store.save().unwrap();
        assert_eq!(
            store.saved_value("_fname"),
            Some(&StoredValue::String("Ada".into()))
        );
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn absent_keys_read_as_defaults() {
        let store = MemoryStore::new();
        assert_eq!(store.get_string("_nothing"), "");
        assert_eq!(store.get_int("_nothing"), 0);
        assert_eq!(store.get_float("_nothing"), 0.0);
        assert!(!store.has_key("_nothing"));
    }

    #[test]
    fn delete_all_clears_every_slot() {
        let mut store = MemoryStore::new();
        store.set_string("_a", "x");
        store.set_int("_b", 1);
        store.set_float("_c", 1.5);

        store.delete_all();
        assert!(store.values().is_empty());
    }
}
