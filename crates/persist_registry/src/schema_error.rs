use thiserror::Error;

/// Errors that can occur while declaring a preference schema.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("category '{name}' is declared more than once")]
    DuplicateCategory { name: String },

    #[error("category '{category}' has no fields")]
    EmptyCategory { category: String },

    #[error("category '{category}' declares key '{key}' more than once")]
    DuplicateKey { category: String, key: String },

    #[error("category '{category}' declares field '{field}' more than once")]
    DuplicateField { category: String, field: String },
}
