//! Registry configuration

use serde::{Deserialize, Serialize};

/// How boolean fields are written to the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoolEncoding {
    /// `"True"` / `"False"` in the string slot (save-file compatible).
    #[default]
    Text,
    /// `1` / `0` in the int slot.
    Native,
}

/// What a read returns for a key that has never been written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsentPolicy {
    /// Parse whatever the store returns. An absent boolean reads as `""` and
    /// fails with a format error.
    #[default]
    Strict,
    /// Absent keys read as the field type's zero value.
    TypeDefault,
}

/// Registry settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub bool_encoding: BoolEncoding,
    pub absent_values: AbsentPolicy,
}
