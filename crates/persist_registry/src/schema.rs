//! Statically declared preference schema
//!
//! A category declares its store keys and its accessor fields separately.
//! A field is bound to the key whose name matches the field name ignoring
//! case; a field with no matching key is declared but unbound and never
//! shows up in discovery.

use crate::{DataType, SchemaError};
use std::collections::{HashMap, HashSet};

/// Named store key (`coin` -> `_coin`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyDef {
    name: String,
    store_key: String,
}

impl KeyDef {
    pub fn new(name: impl Into<String>, store_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            store_key: store_key.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn store_key(&self) -> &str {
        &self.store_key
    }
}

/// Typed accessor field (`Coin: String`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDef {
    name: String,
    data_type: DataType,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }
}

/// One category of keys and fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryDef {
    name: String,
    keys: Vec<KeyDef>,
    fields: Vec<FieldDef>,
}

impl CategoryDef {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keys(&self) -> &[KeyDef] {
        &self.keys
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Field by name, ignoring case.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields
            .iter()
            .find(|field| field.name.eq_ignore_ascii_case(name))
    }

    /// Key whose name matches `field_name` ignoring case.
    pub fn key_for(&self, field_name: &str) -> Option<&KeyDef> {
        self.keys
            .iter()
            .find(|key| key.name.eq_ignore_ascii_case(field_name))
    }

    /// Field and key backing `field_name`, if the field is bound.
    pub fn binding(&self, field_name: &str) -> Option<(&FieldDef, &KeyDef)> {
        let field = self.field(field_name)?;
        let key = self.key_for(&field.name)?;
        Some((field, key))
    }

    /// Field bound to `store_key`, if any.
    pub fn field_for_store_key(&self, store_key: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|field| {
            self.key_for(&field.name)
                .is_some_and(|key| key.store_key == store_key)
        })
    }

    /// Every bound field with its key, in declaration order.
    pub fn bindings(&self) -> impl Iterator<Item = (&FieldDef, &KeyDef)> {
        self.fields
            .iter()
            .filter_map(|field| self.key_for(&field.name).map(|key| (field, key)))
    }

    /// Fields with no matching key.
    pub fn unbound_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields
            .iter()
            .filter(|field| self.key_for(&field.name).is_none())
    }
}

/// Closed set of categories, fixed once built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schema {
    categories: Vec<CategoryDef>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Categories in declaration order.
    pub fn categories(&self) -> &[CategoryDef] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&CategoryDef> {
        self.categories.iter().find(|category| category.name == name)
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|category| category.name.as_str())
    }
}

/// Builder for a single category.
#[derive(Debug)]
pub struct CategoryBuilder {
    name: String,
    keys: Vec<KeyDef>,
    fields: Vec<FieldDef>,
}

impl CategoryBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keys: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Declare a store key.
    pub fn key(mut self, name: impl Into<String>, store_key: impl Into<String>) -> Self {
        self.keys.push(KeyDef::new(name, store_key));
        self
    }

    /// Declare an accessor field.
    pub fn field(mut self, name: impl Into<String>, data_type: DataType) -> Self {
        self.fields.push(FieldDef::new(name, data_type));
        self
    }

    /// Declare a field together with its key (key name is the lowercased
    /// field name).
    pub fn entry(self, field: &str, store_key: impl Into<String>, data_type: DataType) -> Self {
        self.key(field.to_lowercase(), store_key)
            .field(field, data_type)
    }

    fn build(self) -> Result<CategoryDef, SchemaError> {
        if self.fields.is_empty() {
            return Err(SchemaError::EmptyCategory { category: self.name });
        }

        let mut key_names = HashSet::new();
        let mut store_keys = HashSet::new();
        for key in &self.keys {
            if !key_names.insert(key.name.to_lowercase()) {
                return Err(SchemaError::DuplicateKey {
                    category: self.name,
                    key: key.name.clone(),
                });
            }
            if !store_keys.insert(key.store_key.as_str()) {
                return Err(SchemaError::DuplicateKey {
                    category: self.name,
                    key: key.store_key.clone(),
                });
            }
        }

        let mut field_names = HashSet::new();
        for field in &self.fields {
            if !field_names.insert(field.name.to_lowercase()) {
                return Err(SchemaError::DuplicateField {
                    category: self.name,
                    field: field.name.clone(),
                });
            }
        }

        Ok(CategoryDef {
            name: self.name,
            keys: self.keys,
            fields: self.fields,
        })
    }
}

/// Builder for a [`Schema`].
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    categories: Vec<CategoryBuilder>,
}

impl SchemaBuilder {
    /// Declare a category, configuring it through `declare`.
    pub fn category<F>(mut self, name: impl Into<String>, declare: F) -> Self
    where
        F: FnOnce(CategoryBuilder) -> CategoryBuilder,
    {
        self.categories.push(declare(CategoryBuilder::new(name)));
        self
    }

    /// Validate and freeze the schema.
    pub fn build(self) -> Result<Schema, SchemaError> {
        let mut names = HashSet::new();
        let mut categories = Vec::with_capacity(self.categories.len());

        for builder in self.categories {
            if !names.insert(builder.name.clone()) {
                return Err(SchemaError::DuplicateCategory { name: builder.name });
            }
            categories.push(builder.build()?);
        }

        // Store keys are global to the backend, so sharing one across
        // categories aliases the same value.
        let mut owners: HashMap<&str, &str> = HashMap::new();
        for category in &categories {
            for key in &category.keys {
                if let Some(owner) = owners.insert(&key.store_key, &category.name) {
                    tracing::warn!(
                        "store key '{}' is declared by both '{}' and '{}'",
                        key.store_key,
                        owner,
                        category.name
                    );
                }
            }
        }

        for category in &categories {
            for field in category.unbound_fields() {
                tracing::debug!(
                    "field '{}.{}' has no matching key and will not be listed",
                    category.name,
                    field.name
                );
            }
        }

        Ok(Schema { categories })
    }
}
