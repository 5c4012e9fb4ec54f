//! Slot-typed values shared by the store backends

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single stored value, tagged with the slot it was written through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum StoredValue {
    String(String),
    Int(i32),
    Float(f32),
}

/// Ordered key -> value map implementing the store's read defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueMap {
    values: BTreeMap<String, StoredValue>,
}

impl ValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&StoredValue> {
        self.values.get(key)
    }

    pub fn get_string(&self, key: &str) -> String {
        match self.values.get(key) {
            Some(StoredValue::String(value)) => value.clone(),
            _ => String::new(),
        }
    }

    pub fn get_int(&self, key: &str) -> i32 {
        match self.values.get(key) {
            Some(StoredValue::Int(value)) => *value,
            _ => 0,
        }
    }

    pub fn get_float(&self, key: &str) -> f32 {
        match self.values.get(key) {
            Some(StoredValue::Float(value)) => *value,
            _ => 0.0,
        }
    }

    pub fn insert(&mut self, key: &str, value: StoredValue) {
        self.values.insert(key.to_string(), value);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<StoredValue> {
        self.values.remove(key)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StoredValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }
}
