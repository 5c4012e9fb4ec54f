//! Search and "modified only" filtering

use crate::PreferenceEntry;
use std::borrow::Cow;

/// Keys longer than this are shortened for display.
pub const DISPLAY_KEY_LIMIT: usize = 20;

/// Visible-subset filter. Both conditions must hold for an entry to show.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntryFilter {
    search: String,
    modified_only: bool,
}

impl EntryFilter {
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    pub fn is_searching(&self) -> bool {
        !self.search.is_empty()
    }

    pub fn modified_only(&self) -> bool {
        self.modified_only
    }

    pub fn set_modified_only(&mut self, enabled: bool) {
        self.modified_only = enabled;
    }

    /// Search-text half of the filter.
    pub fn matches_text(&self, entry: &PreferenceEntry) -> bool {
        if self.search.is_empty() {
            return true;
        }
        entry.contains_lowercase(&self.search.to_lowercase())
    }
}

/// Key shortened to 17 characters plus `...` when over the display limit.
pub fn display_key(key: &str) -> Cow<'_, str> {
    if key.chars().count() <= DISPLAY_KEY_LIMIT {
        return Cow::Borrowed(key);
    }
    let head: String = key.chars().take(DISPLAY_KEY_LIMIT - 3).collect();
    Cow::Owned(format!("{head}..."))
}
