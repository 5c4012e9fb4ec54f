use crate::{
    parse_bool, AbsentPolicy, BoolEncoding, CategoryDef, DataType, FieldDef, KeyDef, PrefValue,
    RegistryConfig, RegistryError, Schema,
};
use persist_store::PreferenceStore;

/// Typed, categorized access to a preference store.
///
/// The registry owns its store; components that need preferences take the
/// registry by reference.
pub struct Registry<S> {
    schema: Schema,
    store: S,
    config: RegistryConfig,
}

impl<S: PreferenceStore> Registry<S> {
    pub fn new(schema: Schema, store: S) -> Self {
        Self::with_config(schema, store, RegistryConfig::default())
    }

    pub fn with_config(schema: Schema, store: S, config: RegistryConfig) -> Self {
        Self {
            schema,
            store,
            config,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn category(&self, name: &str) -> Result<&CategoryDef, RegistryError> {
        self.schema
            .category(name)
            .ok_or_else(|| RegistryError::UnknownCategory {
                category: name.to_string(),
            })
    }

    fn binding(&self, category: &str, field: &str) -> Result<(&FieldDef, &KeyDef), RegistryError> {
        self.category(category)?
            .binding(field)
            .ok_or_else(|| RegistryError::UnknownField {
                category: category.to_string(),
                field: field.to_string(),
            })
    }

    /// Read `category.field`, converted to its declared type.
    pub fn get(&self, category: &str, field: &str) -> Result<PrefValue, RegistryError> {
        let (field, key) = self.binding(category, field)?;
        self.read(key.store_key(), field.data_type())
    }

    pub fn get_string(&self, category: &str, field: &str) -> Result<String, RegistryError> {
        match self.get_typed(category, field, DataType::String)? {
            PrefValue::String(value) => Ok(value),
            other => Ok(other.to_canonical()),
        }
    }

    pub fn get_bool(&self, category: &str, field: &str) -> Result<bool, RegistryError> {
        match self.get_typed(category, field, DataType::Bool)? {
            PrefValue::Bool(value) => Ok(value),
            other => Err(self.mismatch(category, field, DataType::Bool, other.data_type())),
        }
    }

    pub fn get_int(&self, category: &str, field: &str) -> Result<i32, RegistryError> {
        match self.get_typed(category, field, DataType::Int)? {
            PrefValue::Int(value) => Ok(value),
            other => Err(self.mismatch(category, field, DataType::Int, other.data_type())),
        }
    }

    pub fn get_float(&self, category: &str, field: &str) -> Result<f32, RegistryError> {
        match self.get_typed(category, field, DataType::Float)? {
            PrefValue::Float(value) => Ok(value),
            other => Err(self.mismatch(category, field, DataType::Float, other.data_type())),
        }
    }

    fn get_typed(
        &self,
        category: &str,
        field: &str,
        wanted: DataType,
    ) -> Result<PrefValue, RegistryError> {
        let (def, key) = self.binding(category, field)?;
        if def.data_type() != wanted {
            return Err(self.mismatch(category, def.name(), def.data_type(), wanted));
        }
        self.read(key.store_key(), wanted)
    }

    fn mismatch(
        &self,
        category: &str,
        field: &str,
        expected: DataType,
        actual: DataType,
    ) -> RegistryError {
        RegistryError::TypeMismatch {
            category: category.to_string(),
            field: field.to_string(),
            expected,
            actual,
        }
    }

    fn read(&self, store_key: &str, data_type: DataType) -> Result<PrefValue, RegistryError> {
        if self.config.absent_values == AbsentPolicy::TypeDefault && !self.store.has_key(store_key)
        {
            return Ok(PrefValue::zero(data_type));
        }

        if data_type == DataType::Bool && self.config.bool_encoding == BoolEncoding::Native {
            // Keys written before switching to native encoding still hold text.
            let flag = parse_bool(&self.store.get_string(store_key))
                .unwrap_or_else(|| self.store.get_int(store_key) != 0);
            return Ok(PrefValue::Bool(flag));
        }

        let raw = self.store.get_string(store_key);
        data_type
            .parse(&raw)
            .ok_or_else(|| RegistryError::Format {
                key: store_key.to_string(),
                value: raw,
                expected: data_type,
            })
    }

    /// Write `value` to `category.field`. Not durable until [`save`](Self::save).
    pub fn set(
        &mut self,
        category: &str,
        field: &str,
        value: impl Into<PrefValue>,
    ) -> Result<(), RegistryError> {
        let value = value.into();
        let (def, key) = self.binding(category, field)?;
        if def.data_type() != value.data_type() {
            return Err(self.mismatch(category, def.name(), def.data_type(), value.data_type()));
        }

        let store_key = key.store_key().to_string();
        self.write(&store_key, &value);
        Ok(())
    }

    /// Parse `text` as the field's type and write it.
    pub fn set_from_str(
        &mut self,
        category: &str,
        field: &str,
        text: &str,
    ) -> Result<(), RegistryError> {
        let (def, key) = self.binding(category, field)?;
        let value = def
            .data_type()
            .parse(text)
            .ok_or_else(|| RegistryError::Format {
                key: key.store_key().to_string(),
                value: text.to_string(),
                expected: def.data_type(),
            })?;

        let store_key = key.store_key().to_string();
        self.write(&store_key, &value);
        Ok(())
    }

    /// Write `text` straight to `store_key` by type, bypassing the schema.
    ///
    /// Numbers go to their native slots; text that does not parse as the
    /// requested number type, or parses to a non-finite float, is skipped.
    pub fn write_raw(&mut self, store_key: &str, text: &str, data_type: DataType) {
        match data_type {
            DataType::String | DataType::Bool => self.store.set_string(store_key, text),
            DataType::Int => match text.trim().parse::<i32>() {
                Ok(value) => self.store.set_int(store_key, value),
                Err(_) => tracing::debug!("skipping non-integer '{text}' for '{store_key}'"),
            },
            DataType::Float => match text.trim().parse::<f32>() {
                Ok(value) if value.is_finite() => self.store.set_float(store_key, value),
                _ => tracing::debug!("skipping non-float '{text}' for '{store_key}'"),
            },
        }
    }

    fn write(&mut self, store_key: &str, value: &PrefValue) {
        match (value, self.config.bool_encoding) {
            (PrefValue::Bool(flag), BoolEncoding::Native) => {
                self.store.set_int(store_key, i32::from(*flag))
            }
            _ => self.store.set_string(store_key, &value.to_canonical()),
        }
        tracing::debug!("set '{store_key}' = '{value}'");
    }

    /// Flush pending writes.
    pub fn save(&mut self) -> Result<(), RegistryError> {
        self.store.save()?;
        Ok(())
    }

    pub fn delete_key(&mut self, store_key: &str) {
        self.store.delete_key(store_key);
    }

    pub fn delete_all(&mut self) {
        self.store.delete_all();
    }
}
