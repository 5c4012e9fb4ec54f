//! Persist Typed Registry
//!
//! Named, typed accessors over preference store keys, grouped into
//! categories:
//! - Schema: the statically declared category/key/field table
//! - Registry: typed get/set through a [`PreferenceStore`]
//! - Config: storage encoding and absent-key policy
//!
//! # Usage
//!
//! ```ignore
//! use persist_registry::{game, Registry};
//! use persist_store::MemoryStore;
//!
//! let mut prefs = Registry::new(game::schema().clone(), MemoryStore::new());
//! prefs.set("Currency", "Coin", "50")?;
//! prefs.save()?;
//! assert_eq!(prefs.get_string("Currency", "Coin")?, "50");
//! ```

mod config;
mod data_type;
mod error;
pub mod game;
mod macros;
mod registry;
mod schema;
mod schema_error;

pub use config::{AbsentPolicy, BoolEncoding, RegistryConfig};
pub use data_type::{parse_bool, DataType, PrefValue};
pub use error::RegistryError;
pub use registry::Registry;
pub use schema::{CategoryBuilder, CategoryDef, FieldDef, KeyDef, Schema, SchemaBuilder};
pub use schema_error::SchemaError;

pub use persist_store::PreferenceStore;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
