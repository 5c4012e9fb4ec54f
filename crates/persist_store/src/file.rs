//! JSON file backed preference store
//!
//! Values live in memory and the whole map is rewritten on `save`. The file
//! is a flat JSON object of tagged values:
//!
//! ```json
//! { "_coin": { "type": "string", "value": "50" } }
//! ```

use crate::{PreferenceStore, StoreError, StoredValue, ValueMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub struct JsonFileStore {
    path: PathBuf,
    values: ValueMap,
    dirty: bool,
}

impl JsonFileStore {
    /// Platform config location: `<config dir>/persist/prefs.json`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("persist")
            .join("prefs.json")
    }

    /// Open the store at `path`. A missing file opens empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => ValueMap::new(),
            Ok(text) => serde_json::from_str(&text).map_err(|source| StoreError::Malformed {
                path: path.clone(),
                source,
            })?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!("no preference file at {}, starting empty", path.display());
                ValueMap::new()
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        tracing::debug!(
            "opened preference file {} ({} keys)",
            path.display(),
            values.len()
        );

        Ok(Self {
            path,
            values,
            dirty: false,
        })
    }

    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(Self::default_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether there are writes not yet flushed by `save`.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn write(&mut self, key: &str, value: StoredValue) {
        self.values.insert(key, value);
        self.dirty = true;
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl PreferenceStore for JsonFileStore {
    fn get_string(&self, key: &str) -> String {
        self.values.get_string(key)
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.write(key, StoredValue::String(value.to_string()));
    }

    fn get_int(&self, key: &str) -> i32 {
        self.values.get_int(key)
    }

    fn set_int(&mut self, key: &str, value: i32) {
        self.write(key, StoredValue::Int(value));
    }

    fn get_float(&self, key: &str) -> f32 {
        self.values.get_float(key)
    }

    fn set_float(&mut self, key: &str, value: f32) {
        self.write(key, StoredValue::Float(value));
    }

    fn has_key(&self, key: &str) -> bool {
        self.values.contains(key)
    }

    fn delete_key(&mut self, key: &str) {
        if self.values.remove(key).is_some() {
            self.dirty = true;
        }
    }

    fn delete_all(&mut self) {
        self.values.clear();
        self.dirty = true;
    }

    fn save(&mut self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let json = serde_json::to_string_pretty(&self.values).map_err(|source| {
            StoreError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;

        // Write beside the target, then swap in.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;

        self.dirty = false;
        tracing::debug!(
            "saved {} preference keys to {}",
            self.values.len(),
            self.path.display()
        );
        Ok(())
    }
}
