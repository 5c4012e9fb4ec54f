//! Persist Registry Inspector
//!
//! Development-time browsing and editing of every preference the registry
//! declares:
//! - Discovery: enumerate categories and bound fields with live values
//! - Edit tracking: stage edits, compare against stored values
//! - Commit/reset: write staged edits back in one flush, wipe categories
//! - Filtering: search text and "modified only" views
//!
//! Destructive operations (`reset_category`, `delete_all_and_save`) do not
//! ask for confirmation; callers gate them.

pub mod discovery;
mod entry;
mod error;
mod filter;
mod inspector;

pub use discovery::{discover, READ_ERROR_VALUE};
pub use entry::{EntryId, PreferenceEntry};
pub use error::InspectorError;
pub use filter::{display_key, EntryFilter, DISPLAY_KEY_LIMIT};
pub use inspector::{CategoryGroup, CommitReport, Inspector};
