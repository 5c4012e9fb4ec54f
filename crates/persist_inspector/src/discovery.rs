//! Entry discovery
//!
//! Walks the registry's declared schema and materializes one entry per
//! bound field. Unbound fields are left out and unreadable values are
//! replaced by [`READ_ERROR_VALUE`]; neither is reported to the caller.

use crate::PreferenceEntry;
use persist_registry::{CategoryDef, Registry};
use persist_store::PreferenceStore;

/// Value shown for an entry whose stored value could not be read.
pub const READ_ERROR_VALUE: &str = "Error reading value";

/// Every bound field, categories sorted by name and entries by key.
pub fn discover<S: PreferenceStore>(registry: &Registry<S>) -> Vec<PreferenceEntry> {
    let mut categories: Vec<&CategoryDef> = registry.schema().categories().iter().collect();
    categories.sort_by(|a, b| a.name().cmp(b.name()));

    let mut entries = Vec::new();
    for category in categories {
        let mut found = discover_category(registry, category);
        found.sort_by(|a, b| a.key.cmp(&b.key));
        entries.extend(found);
    }

    tracing::debug!("discovered {} preference entries", entries.len());
    entries
}

fn discover_category<S: PreferenceStore>(
    registry: &Registry<S>,
    category: &CategoryDef,
) -> Vec<PreferenceEntry> {
    let mut entries = Vec::with_capacity(category.fields().len());

    for field in category.fields() {
        let Some(key) = category.key_for(field.name()) else {
            tracing::debug!(
                "skipping '{}.{}': no matching key",
                category.name(),
                field.name()
            );
            continue;
        };

        entries.push(PreferenceEntry {
            category: category.name().to_string(),
            key: key.store_key().to_string(),
            field_name: field.name().to_string(),
            data_type: field.data_type(),
            value: read_value(registry, category.name(), field.name()),
        });
    }

    entries
}

/// Current value of `category.field` as a display string.
pub fn read_value<S: PreferenceStore>(registry: &Registry<S>, category: &str, field: &str) -> String {
    match registry.get(category, field) {
        Ok(value) => value.to_canonical(),
        Err(err) => {
            tracing::warn!("failed to read '{category}.{field}': {err}");
            READ_ERROR_VALUE.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use persist_registry::{game, DataType, Schema};
    use persist_store::MemoryStore;

    #[test]
    fn unbound_fields_are_omitted() {
        let schema = Schema::builder()
            .category("Player", |c| {
                c.key("firstname", "_fname")
                    .field("FirstName", DataType::String)
                    .field("Ghost", DataType::String)
            })
            .build()
            .unwrap();
        let registry = Registry::new(schema, MemoryStore::new());

        let entries = discover(&registry);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].field_name, "FirstName");
        assert_eq!(entries[0].key, "_fname");
    }

    #[test]
    fn entries_are_sorted_by_category_then_key() {
        let registry = Registry::new(game::schema().clone(), MemoryStore::new());
        let entries = discover(&registry);

        let order: Vec<(&str, &str)> = entries
            .iter()
            .map(|e| (e.category.as_str(), e.key.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("Currency", "_coin"),
                ("Currency", "_gem"),
                ("Player", "_dob"),
                ("Player", "_flname"),
                ("Player", "_fname"),
                ("Player", "_gender"),
                ("Player", "_lname"),
                ("Setting", "_music"),
                ("Setting", "_sound"),
                ("Setting", "_vibration"),
            ]
        );
    }

    #[test]
    fn unreadable_values_become_the_sentinel() {
        let mut registry = Registry::new(game::schema().clone(), MemoryStore::new());
        registry.set("Setting", "Music", true).unwrap();

        let entries = discover(&registry);
        let music = entries.iter().find(|e| e.key == "_music").unwrap();
        let sound = entries.iter().find(|e| e.key == "_sound").unwrap();
        assert_eq!(music.value, "True");
        assert_eq!(sound.value, READ_ERROR_VALUE);
    }
}
