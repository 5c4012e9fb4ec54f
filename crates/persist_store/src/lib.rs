//! Persist Store Layer
//!
//! The key-value preference store the typed registry sits on top of.
//!
//! The store keeps three value slots (string, int, float) keyed by string.
//! Reads never fail: an absent key, or a key holding a different slot type,
//! reads as that getter's default (`""`, `0`, `0.0`). Writes are only
//! guaranteed durable after an explicit [`PreferenceStore::save`].
//!
//! Two backends ship with the crate:
//! - [`MemoryStore`] for tests and tooling; it records every flush.
//! - [`JsonFileStore`] which persists to a JSON file on `save`.

mod error;
mod file;
mod memory;
mod value;

pub use error::StoreError;
pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use value::{StoredValue, ValueMap};

/// Contract every preference backend honors.
pub trait PreferenceStore {
    /// Read a string value, `""` when absent.
    fn get_string(&self, key: &str) -> String;

    fn set_string(&mut self, key: &str, value: &str);

    /// Read an int value, `0` when absent.
    fn get_int(&self, key: &str) -> i32;

    fn set_int(&mut self, key: &str, value: i32);

    /// Read a float value, `0.0` when absent.
    fn get_float(&self, key: &str) -> f32;

    fn set_float(&mut self, key: &str, value: f32);

    /// Whether any slot holds a value for `key`.
    fn has_key(&self, key: &str) -> bool;

    /// Remove `key` from every slot. Absent keys are ignored.
    fn delete_key(&mut self, key: &str);

    /// Remove every key.
    fn delete_all(&mut self);

    /// Flush pending writes to durable storage.
    fn save(&mut self) -> Result<(), StoreError>;
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Box<S> {
    fn get_string(&self, key: &str) -> String {
        (**self).get_string(key)
    }

    fn set_string(&mut self, key: &str, value: &str) {
        (**self).set_string(key, value)
    }

    fn get_int(&self, key: &str) -> i32 {
        (**self).get_int(key)
    }

    fn set_int(&mut self, key: &str, value: i32) {
        (**self).set_int(key, value)
    }

    fn get_float(&self, key: &str) -> f32 {
        (**self).get_float(key)
    }

    fn set_float(&mut self, key: &str, value: f32) {
        (**self).set_float(key, value)
    }

    fn has_key(&self, key: &str) -> bool {
        (**self).has_key(key)
    }

    fn delete_key(&mut self, key: &str) {
        (**self).delete_key(key)
    }

    fn delete_all(&mut self) {
        (**self).delete_all()
    }

    fn save(&mut self) -> Result<(), StoreError> {
        (**self).save()
    }
}
