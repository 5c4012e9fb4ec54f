use crate::DataType;
use persist_store::StoreError;
use thiserror::Error;

/// Errors returned by typed registry access.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("value '{value}' under key '{key}' is not a valid {expected}")]
    Format {
        key: String,
        value: String,
        expected: DataType,
    },

    #[error("unknown preference category '{category}'")]
    UnknownCategory { category: String },

    #[error("category '{category}' has no field '{field}'")]
    UnknownField { category: String, field: String },

    #[error("field '{category}.{field}' is {expected}, not {actual}")]
    TypeMismatch {
        category: String,
        field: String,
        expected: DataType,
        actual: DataType,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}
