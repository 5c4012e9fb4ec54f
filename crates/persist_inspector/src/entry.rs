use persist_registry::DataType;
use std::fmt;

/// Identifies one entry: category plus store key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId {
    pub category: String,
    pub key: String,
}

impl EntryId {
    pub fn new(category: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.category, self.key)
    }
}

/// A discovered preference with its current stored value.
#[derive(Clone, Debug, PartialEq)]
pub struct PreferenceEntry {
    pub category: String,
    pub key: String,
    pub field_name: String,
    pub data_type: DataType,
    /// Canonical string form of the stored value.
    pub value: String,
}

impl PreferenceEntry {
    pub fn id(&self) -> EntryId {
        EntryId::new(&self.category, &self.key)
    }

    pub fn is(&self, id: &EntryId) -> bool {
        self.category == id.category && self.key == id.key
    }

    /// Case-insensitive substring match over key, value, category and
    /// field name. `needle` must already be lowercase.
    pub(crate) fn contains_lowercase(&self, needle: &str) -> bool {
        [&self.key, &self.value, &self.category, &self.field_name]
            .iter()
            .any(|text| text.to_lowercase().contains(needle))
    }
}
