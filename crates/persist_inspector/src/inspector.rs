//! Edit tracking over discovered entries
//!
//! The inspector caches discovered entries and keeps one pending edit per
//! entry. An entry is modified while its pending edit holds a different
//! value of the entry's type than the cached stored value. Nothing reaches the store until a commit, and every
//! commit path flushes exactly once.

use crate::discovery::{discover, read_value};
use crate::{EntryFilter, EntryId, InspectorError, PreferenceEntry};
use persist_registry::{DataType, Registry, RegistryError};
use persist_store::PreferenceStore;
use std::collections::HashMap;

/// Entries of one category, as shown after filtering.
#[derive(Debug)]
pub struct CategoryGroup<'a> {
    pub name: &'a str,
    pub entries: Vec<&'a PreferenceEntry>,
}

/// Outcome of [`Inspector::commit_all`].
#[derive(Debug, Default)]
pub struct CommitReport {
    pub written: Vec<EntryId>,
    pub failed: Vec<(EntryId, RegistryError)>,
}

impl CommitReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct Inspector {
    entries: Vec<PreferenceEntry>,
    pending: HashMap<EntryId, String>,
    filter: EntryFilter,
}

impl Inspector {
    /// Discover entries and seed a pending edit for each from its stored
    /// value.
    pub fn open<S: PreferenceStore>(registry: &Registry<S>) -> Self {
        let mut inspector = Self::default();
        inspector.refresh(registry);
        inspector
    }

    /// Rediscover entries and reseed every pending edit, dropping unsaved
    /// edits.
    pub fn refresh<S: PreferenceStore>(&mut self, registry: &Registry<S>) {
        self.entries = discover(registry);
        self.pending = self
            .entries
            .iter()
            .map(|entry| (entry.id(), entry.value.clone()))
            .collect();
    }

    /// Rediscover entries, keeping pending edits as they are.
    fn reload<S: PreferenceStore>(&mut self, registry: &Registry<S>) {
        self.entries = discover(registry);
    }

    pub fn entries(&self) -> &[PreferenceEntry] {
        &self.entries
    }

    pub fn entry(&self, id: &EntryId) -> Option<&PreferenceEntry> {
        self.entries.iter().find(|entry| entry.is(id))
    }

    /// Category names with at least one entry, sorted.
    pub fn categories(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.iter().map(|e| e.category.as_str()).collect();
        names.dedup();
        names
    }

    /// Stage `value` for `id`, replacing any earlier edit.
    pub fn stage_edit(&mut self, id: EntryId, value: impl Into<String>) {
        self.pending.insert(id, value.into());
    }

    pub fn pending(&self, id: &EntryId) -> Option<&str> {
        self.pending.get(id).map(String::as_str)
    }

    /// Value to show in the editor for `id`, seeding the pending edit from
    /// the stored value the first time the entry is shown.
    pub fn edit_value(&mut self, id: &EntryId) -> Option<&str> {
        if !self.pending.contains_key(id) {
            let value = self.entry(id)?.value.clone();
            self.pending.insert(id.clone(), value);
        }
        self.pending.get(id).map(String::as_str)
    }

    pub fn is_modified(&self, id: &EntryId) -> bool {
        match (self.pending.get(id), self.entry(id)) {
            (Some(pending), Some(entry)) => !entry.data_type.same_value(pending, &entry.value),
            _ => false,
        }
    }

    /// Whether any staged edit differs from its stored value.
    pub fn has_modified_values(&self) -> bool {
        self.entries.iter().any(|entry| self.is_modified(&entry.id()))
    }

    /// Drop the pending edit for `id`; the stored value shows again.
    pub fn reset_one(&mut self, id: &EntryId) {
        self.pending.remove(id);
    }

    /// Write the pending edit for `id` and flush. Returns `false` when
    /// nothing was staged.
    pub fn commit_one<S: PreferenceStore>(
        &mut self,
        registry: &mut Registry<S>,
        id: &EntryId,
    ) -> Result<bool, InspectorError> {
        let entry = self
            .entry(id)
            .cloned()
            .ok_or_else(|| InspectorError::UnknownEntry { id: id.clone() })?;
        let Some(value) = self.pending.get(id).cloned() else {
            return Ok(false);
        };

        write_back(registry, &entry, &value)?;
        registry.save()?;
        tracing::info!("saved preference '{id}'");

        // Store may canonicalize ("true" -> "True"); show what it holds now.
        let stored = read_value(registry, &entry.category, &entry.field_name);
        if let Some(cached) = self.entries.iter_mut().find(|e| e.is(id)) {
            cached.value = stored.clone();
        }
        self.pending.insert(id.clone(), stored);
        Ok(true)
    }

    /// Write every modified edit, flush once, then refresh.
    ///
    /// Edits that fail to convert are reported and skipped; the rest are
    /// still written.
    pub fn commit_all<S: PreferenceStore>(
        &mut self,
        registry: &mut Registry<S>,
    ) -> Result<CommitReport, InspectorError> {
        let mut staged: Vec<(&EntryId, &String)> = self.pending.iter().collect();
        staged.sort_by(|a, b| a.0.cmp(b.0));

        let mut report = CommitReport::default();
        for (id, value) in staged {
            let Some(entry) = self.entry(id) else {
                continue;
            };
            if entry.data_type.same_value(&entry.value, value) {
                continue;
            }
            match write_back(registry, entry, value) {
                Ok(()) => report.written.push(id.clone()),
                Err(err) => {
                    tracing::warn!("could not save '{id}': {err}");
                    report.failed.push((id.clone(), err));
                }
            }
        }

        registry.save()?;
        tracing::info!(
            "saved {} preference changes ({} failed)",
            report.written.len(),
            report.failed.len()
        );

        self.refresh(registry);
        Ok(report)
    }

    /// Delete every key of `category` from the store, flush, and set each
    /// entry's pending edit to its type's zero value. Returns the number of
    /// keys removed.
    pub fn reset_category<S: PreferenceStore>(
        &mut self,
        registry: &mut Registry<S>,
        category: &str,
    ) -> Result<usize, InspectorError> {
        registry.category(category)?;

        let targets: Vec<(EntryId, DataType)> = self
            .entries
            .iter()
            .filter(|entry| entry.category == category)
            .map(|entry| (entry.id(), entry.data_type))
            .collect();

        for (id, data_type) in &targets {
            registry.delete_key(&id.key);
            self.pending
                .insert(id.clone(), data_type.zero_value().to_string());
        }

        registry.save()?;
        tracing::info!("reset {} preferences in '{category}'", targets.len());

        self.reload(registry);
        Ok(targets.len())
    }

    /// Wipe the whole store and flush.
    pub fn delete_all_and_save<S: PreferenceStore>(
        &mut self,
        registry: &mut Registry<S>,
    ) -> Result<(), InspectorError> {
        registry.delete_all();
        registry.save()?;
        tracing::info!("deleted all preferences");

        self.refresh(registry);
        Ok(())
    }

    pub fn filter(&self) -> &EntryFilter {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut EntryFilter {
        &mut self.filter
    }

    /// Entries passing both the search text and the "modified only" toggle.
    pub fn filtered_entries(&self) -> Vec<&PreferenceEntry> {
        self.entries
            .iter()
            .filter(|entry| self.filter.matches_text(entry))
            .filter(|entry| !self.filter.modified_only() || self.is_modified(&entry.id()))
            .collect()
    }

    /// Filtered entries grouped by category, categories and keys sorted.
    pub fn grouped_view(&self) -> Vec<CategoryGroup<'_>> {
        let mut groups: Vec<CategoryGroup<'_>> = Vec::new();
        for entry in self.filtered_entries() {
            match groups.last_mut() {
                Some(group) if group.name == entry.category => group.entries.push(entry),
                _ => groups.push(CategoryGroup {
                    name: &entry.category,
                    entries: vec![entry],
                }),
            }
        }
        groups
    }

    /// Message for an empty filtered view.
    pub fn empty_message(&self) -> &'static str {
        if self.filter.is_searching() {
            "No matching preferences found."
        } else {
            "No preferences found."
        }
    }
}

/// Write `value` through the typed setter, falling back to a raw write when
/// the entry is no longer backed by a declared field.
fn write_back<S: PreferenceStore>(
    registry: &mut Registry<S>,
    entry: &PreferenceEntry,
    value: &str,
) -> Result<(), RegistryError> {
    match registry.set_from_str(&entry.category, &entry.field_name, value) {
        Err(RegistryError::UnknownCategory { .. } | RegistryError::UnknownField { .. }) => {
            registry.write_raw(&entry.key, value, entry.data_type);
            Ok(())
        }
        result => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use persist_registry::{game, AbsentPolicy, RegistryConfig, Schema};
    use persist_store::{MemoryStore, StoredValue};

    fn currency_registry() -> Registry<MemoryStore> {
        let schema = Schema::builder()
            .category("Currency", |c| {
                c.entry("Coin", "_coin", DataType::Int)
                    .entry("Gem", "_gem", DataType::Int)
            })
            .build()
            .unwrap();
        let mut registry = Registry::new(schema, MemoryStore::new());
        registry.set("Currency", "Coin", 50).unwrap();
        registry.set("Currency", "Gem", 10).unwrap();
        registry.save().unwrap();
        registry
    }

    fn game_registry() -> Registry<MemoryStore> {
        let mut registry = Registry::new(game::schema().clone(), MemoryStore::new());
        for (field, value) in [
            ("FullName", "Ada Lovelace"),
            ("FirstName", "Ada"),
            ("LastName", "Lovelace"),
            ("DateOfBirth", "1815-12-10"),
            ("Gender", "F"),
        ] {
            registry.set("Player", field, value).unwrap();
        }
        registry.set("Currency", "Coin", "50").unwrap();
        registry.set("Currency", "Gem", "10").unwrap();
        registry.set("Setting", "Music", true).unwrap();
        registry.set("Setting", "Sound", true).unwrap();
        registry.set("Setting", "Vibration", false).unwrap();
        registry.save().unwrap();
        registry
    }

    fn coin() -> EntryId {
        EntryId::new("Currency", "_coin")
    }

    fn gem() -> EntryId {
        EntryId::new("Currency", "_gem")
    }

    #[test]
    fn open_seeds_pending_from_store() {
        let registry = currency_registry();
        let inspector = Inspector::open(&registry);

        assert_eq!(inspector.pending(&coin()), Some("50"));
        assert!(!inspector.is_modified(&coin()));
        assert!(!inspector.has_modified_values());
    }

    #[test]
    fn staging_the_stored_value_is_not_a_modification() {
        let registry = currency_registry();
        let mut inspector = Inspector::open(&registry);

        inspector.stage_edit(coin(), "75");
        assert!(inspector.is_modified(&coin()));

        inspector.stage_edit(coin(), "50");
        assert!(!inspector.is_modified(&coin()));
    }

    #[test]
    fn staging_another_spelling_of_the_stored_value_is_not_a_modification() {
        let mut registry = game_registry();
        let mut inspector = Inspector::open(&registry);
        let music = EntryId::new("Setting", "_music");

        inspector.stage_edit(music.clone(), "true");
        assert!(!inspector.is_modified(&music));
        assert!(!inspector.has_modified_values());

        let flushes_before = registry.store().save_count();
        let report = inspector.commit_all(&mut registry).unwrap();
        assert!(report.written.is_empty());
        assert_eq!(registry.store().save_count(), flushes_before + 1);
    }

    #[test]
    fn staging_does_not_touch_the_store() {
        let registry = currency_registry();
        let mut inspector = Inspector::open(&registry);

        inspector.stage_edit(coin(), "999");
        assert_eq!(registry.store().get_string("_coin"), "50");
        assert_eq!(registry.store().save_count(), 1);
    }

    #[test]
    fn edit_value_seeds_missing_pending_edit() {
        let registry = currency_registry();
        let mut inspector = Inspector::open(&registry);

        inspector.reset_one(&gem());
        assert_eq!(inspector.pending(&gem()), None);
        assert_eq!(inspector.edit_value(&gem()), Some("10"));
        assert_eq!(inspector.pending(&gem()), Some("10"));
        assert_eq!(inspector.edit_value(&EntryId::new("Currency", "_ruby")), None);
    }

    #[test]
    fn reset_one_restores_stored_value() {
        let registry = currency_registry();
        let mut inspector = Inspector::open(&registry);

        inspector.stage_edit(gem(), "3");
        inspector.reset_one(&gem());
        assert!(!inspector.is_modified(&gem()));
        assert_eq!(inspector.edit_value(&gem()), Some("10"));
    }

    #[test]
    fn commit_one_writes_and_flushes() {
        let mut registry = currency_registry();
        let mut inspector = Inspector::open(&registry);

        inspector.stage_edit(coin(), "75");
        assert!(inspector.commit_one(&mut registry, &coin()).unwrap());

        assert_eq!(registry.store().save_count(), 2);
        assert_eq!(
            registry.store().saved_value("_coin"),
            Some(&StoredValue::String("75".into()))
        );
        assert_eq!(inspector.entry(&coin()).unwrap().value, "75");
        assert!(!inspector.is_modified(&coin()));
    }

    #[test]
    fn commit_one_canonicalizes_booleans() {
        let mut registry = game_registry();
        let mut inspector = Inspector::open(&registry);
        let music = EntryId::new("Setting", "_music");

        inspector.stage_edit(music.clone(), "false");
        inspector.commit_one(&mut registry, &music).unwrap();

        assert_eq!(registry.store().get_string("_music"), "False");
        assert_eq!(inspector.pending(&music), Some("False"));
        assert!(!inspector.is_modified(&music));
    }

    #[test]
    fn commit_one_reports_bad_input_without_flushing() {
        let mut registry = currency_registry();
        let mut inspector = Inspector::open(&registry);

        inspector.stage_edit(coin(), "lots");
        let result = inspector.commit_one(&mut registry, &coin());
        assert!(matches!(
            result,
            Err(InspectorError::Registry(RegistryError::Format { .. }))
        ));
        assert_eq!(registry.store().save_count(), 1);
    }

    #[test]
    fn commit_one_unknown_entry() {
        let mut registry = currency_registry();
        let mut inspector = Inspector::open(&registry);
        let result = inspector.commit_one(&mut registry, &EntryId::new("Currency", "_ruby"));
        assert!(matches!(result, Err(InspectorError::UnknownEntry { .. })));
    }

    #[test]
    fn commit_all_flushes_once() {
        let mut registry = game_registry();
        let mut inspector = Inspector::open(&registry);
        let flushes_before = registry.store().save_count();

        inspector.stage_edit(EntryId::new("Player", "_fname"), "Grace");
        inspector.stage_edit(EntryId::new("Player", "_lname"), "Hopper");
        inspector.stage_edit(EntryId::new("Currency", "_coin"), "500");
        inspector.stage_edit(EntryId::new("Currency", "_gem"), "25");
        inspector.stage_edit(EntryId::new("Setting", "_music"), "False");

        let report = inspector.commit_all(&mut registry).unwrap();
        assert!(report.is_clean());
        assert_eq!(report.written.len(), 5);
        assert_eq!(registry.store().save_count(), flushes_before + 1);

        assert_eq!(registry.get_string("Player", "FirstName").unwrap(), "Grace");
        assert!(!registry.get_bool("Setting", "Music").unwrap());
        assert!(!inspector.has_modified_values());
    }

    #[test]
    fn commit_all_skips_unmodified_and_reports_failures() {
        let mut registry = game_registry();
        let mut inspector = Inspector::open(&registry);

        inspector.stage_edit(EntryId::new("Currency", "_coin"), "60");
        inspector.stage_edit(EntryId::new("Setting", "_sound"), "loud");

        let report = inspector.commit_all(&mut registry).unwrap();
        assert_eq!(report.written, vec![EntryId::new("Currency", "_coin")]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, EntryId::new("Setting", "_sound"));
        assert_eq!(registry.store().get_string("_sound"), "True");
        assert_eq!(registry.store().get_string("_coin"), "60");
    }

    #[test]
    fn reset_category_wipes_keys_and_zeroes_pending() {
        let mut registry = currency_registry();
        let mut inspector = Inspector::open(&registry);

        let removed = inspector.reset_category(&mut registry, "Currency").unwrap();
        assert_eq!(removed, 2);

        assert!(!registry.store().has_key("_coin"));
        assert!(!registry.store().has_key("_gem"));
        assert_eq!(registry.store().saved_value("_coin"), None);
        assert_eq!(inspector.pending(&coin()), Some("0"));
        assert_eq!(inspector.pending(&gem()), Some("0"));
    }

    #[test]
    fn reset_float_category_is_not_modified_after_reset() {
        let schema = Schema::builder()
            .category("Stats", |c| {
                c.entry("Volume", "_volume", DataType::Float)
                    .entry("Music", "_music", DataType::Bool)
            })
            .build()
            .unwrap();
        let config = RegistryConfig {
            absent_values: AbsentPolicy::TypeDefault,
            ..RegistryConfig::default()
        };
        let mut registry = Registry::with_config(schema, MemoryStore::new(), config);
        registry.set("Stats", "Volume", 0.5f32).unwrap();
        registry.set("Stats", "Music", true).unwrap();
        registry.save().unwrap();

        let mut inspector = Inspector::open(&registry);
        let volume = EntryId::new("Stats", "_volume");
        inspector.reset_category(&mut registry, "Stats").unwrap();

        assert_eq!(inspector.pending(&volume), Some("0.0"));
        assert_eq!(inspector.entry(&volume).unwrap().value, "0");
        assert!(!inspector.is_modified(&volume));
        assert!(!inspector.has_modified_values());

        let report = inspector.commit_all(&mut registry).unwrap();
        assert!(report.written.is_empty());
        assert!(!registry.store().has_key("_volume"));
        assert!(!registry.store().has_key("_music"));
    }

    #[test]
    fn reset_category_leaves_other_categories() {
        let mut registry = game_registry();
        let mut inspector = Inspector::open(&registry);

        inspector.reset_category(&mut registry, "Setting").unwrap();

        assert!(!registry.store().has_key("_music"));
        assert_eq!(registry.store().get_string("_coin"), "50");
        assert_eq!(inspector.pending(&EntryId::new("Setting", "_music")), Some("False"));
        assert_eq!(inspector.pending(&coin()), Some("50"));
    }

    #[test]
    fn reset_unknown_category_fails() {
        let mut registry = currency_registry();
        let mut inspector = Inspector::open(&registry);
        assert!(matches!(
            inspector.reset_category(&mut registry, "Inventory"),
            Err(InspectorError::Registry(RegistryError::UnknownCategory { .. }))
        ));
    }

    #[test]
    fn delete_all_and_save_wipes_store() {
        let mut registry = game_registry();
        let mut inspector = Inspector::open(&registry);

        inspector.delete_all_and_save(&mut registry).unwrap();
        assert!(registry.store().values().is_empty());
        assert_eq!(registry.store().saved_value("_fname"), None);
        assert_eq!(inspector.entry(&coin()).unwrap().value, "");
    }

    #[test]
    fn search_filter_selects_matching_entries() {
        let registry = currency_registry();
        let mut inspector = Inspector::open(&registry);

        inspector.filter_mut().set_search("coin");
        let visible: Vec<&str> = inspector
            .filtered_entries()
            .iter()
            .map(|e| e.key.as_str())
            .collect();
        assert_eq!(visible, vec!["_coin"]);
    }

    #[test]
    fn modified_only_composes_with_search() {
        let registry = game_registry();
        let mut inspector = Inspector::open(&registry);

        inspector.stage_edit(EntryId::new("Player", "_fname"), "Grace");
        inspector.stage_edit(coin(), "1");
        inspector.filter_mut().set_modified_only(true);
        assert_eq!(inspector.filtered_entries().len(), 2);

        inspector.filter_mut().set_search("player");
        let visible = inspector.filtered_entries();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].field_name, "FirstName");
    }

    #[test]
    fn grouped_view_is_sorted() {
        let registry = game_registry();
        let inspector = Inspector::open(&registry);

        let groups = inspector.grouped_view();
        let names: Vec<&str> = groups.iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["Currency", "Player", "Setting"]);
        assert_eq!(groups[1].entries[0].key, "_dob");
        assert_eq!(inspector.categories(), vec!["Currency", "Player", "Setting"]);
    }

    #[test]
    fn empty_message_depends_on_search() {
        let registry = currency_registry();
        let mut inspector = Inspector::open(&registry);
        assert_eq!(inspector.empty_message(), "No preferences found.");

        inspector.filter_mut().set_search("zzz");
        assert!(inspector.grouped_view().is_empty());
        assert_eq!(inspector.empty_message(), "No matching preferences found.");
    }

    #[test]
    fn refresh_discards_unsaved_edits() {
        let registry = currency_registry();
        let mut inspector = Inspector::open(&registry);

        inspector.stage_edit(coin(), "1");
        inspector.refresh(&registry);
        assert_eq!(inspector.pending(&coin()), Some("50"));
    }
}
