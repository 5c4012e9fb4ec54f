//! Value types and their canonical string forms

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type of a preference field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    String,
    Bool,
    Int,
    Float,
}

impl DataType {
    /// Display name used in listings.
    pub fn name(self) -> &'static str {
        match self {
            DataType::String => "String",
            DataType::Bool => "Bool",
            DataType::Int => "Int",
            DataType::Float => "Float",
        }
    }

    /// Look up a type by name. Accepts the runtime aliases `Boolean`,
    /// `Int32` and `Single` alongside the display names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "String" => Some(DataType::String),
            "Bool" | "Boolean" => Some(DataType::Bool),
            "Int" | "Int32" => Some(DataType::Int),
            "Float" | "Single" => Some(DataType::Float),
            _ => None,
        }
    }

    /// String shown for a field after its key has been wiped.
    pub fn zero_value(self) -> &'static str {
        match self {
            DataType::String => "",
            DataType::Bool => "False",
            DataType::Int => "0",
            DataType::Float => "0.0",
        }
    }

    /// Parse canonical text into a value of this type.
    pub fn parse(self, text: &str) -> Option<PrefValue> {
        match self {
            DataType::String => Some(PrefValue::String(text.to_string())),
            DataType::Bool => parse_bool(text).map(PrefValue::Bool),
            DataType::Int => text.trim().parse().ok().map(PrefValue::Int),
            DataType::Float => text.trim().parse().ok().map(PrefValue::Float),
        }
    }

    /// Whether two texts hold the same value of this type (`"true"` and
    /// `"True"`, `"0.0"` and `"0"`). Text that does not parse compares
    /// verbatim.
    pub fn same_value(self, a: &str, b: &str) -> bool {
        match (self.parse(a), self.parse(b)) {
            (Some(a), Some(b)) => a == b,
            _ => a == b,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse a boolean token: `true`/`false` in any case, surrounding
/// whitespace ignored. Everything else, the empty string included, is
/// rejected.
pub fn parse_bool(text: &str) -> Option<bool> {
    let token = text.trim();
    if token.eq_ignore_ascii_case("true") {
        Some(true)
    } else if token.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// A typed preference value.
#[derive(Debug, Clone, PartialEq)]
pub enum PrefValue {
    String(String),
    Bool(bool),
    Int(i32),
    Float(f32),
}

impl PrefValue {
    pub fn data_type(&self) -> DataType {
        match self {
            PrefValue::String(_) => DataType::String,
            PrefValue::Bool(_) => DataType::Bool,
            PrefValue::Int(_) => DataType::Int,
            PrefValue::Float(_) => DataType::Float,
        }
    }

    /// Zero value for `data_type`.
    pub fn zero(data_type: DataType) -> Self {
        match data_type {
            DataType::String => PrefValue::String(String::new()),
            DataType::Bool => PrefValue::Bool(false),
            DataType::Int => PrefValue::Int(0),
            DataType::Float => PrefValue::Float(0.0),
        }
    }

    /// Canonical string form (`True`/`False` for booleans).
    pub fn to_canonical(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PrefValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefValue::String(value) => f.write_str(value),
            PrefValue::Bool(true) => f.write_str("True"),
            PrefValue::Bool(false) => f.write_str("False"),
            PrefValue::Int(value) => write!(f, "{value}"),
            PrefValue::Float(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for PrefValue {
    fn from(value: &str) -> Self {
        PrefValue::String(value.to_string())
    }
}

impl From<String> for PrefValue {
    fn from(value: String) -> Self {
        PrefValue::String(value)
    }
}

impl From<bool> for PrefValue {
    fn from(value: bool) -> Self {
        PrefValue::Bool(value)
    }
}

impl From<i32> for PrefValue {
    fn from(value: i32) -> Self {
        PrefValue::Int(value)
    }
}

impl From<f32> for PrefValue {
    fn from(value: f32) -> Self {
        PrefValue::Float(value)
    }
}
