//! JournalEntry — an arbitrary typed log record (meal, mood, sleep, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted journal entry. `id` is store-assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
  pub id:         i64,
  /// Free-form tag, e.g. `"meal"`, `"mood"`, `"sleep"`.
  pub entry_type: String,
  /// Arbitrary structured payload; opaque to the planner.
  pub content:    serde_json::Value,
  pub timestamp:  DateTime<Utc>,
}

/// Input to [`PlannerStore::add_entry`](crate::store::PlannerStore::add_entry).
#[derive(Debug, Clone)]
pub struct NewJournalEntry {
  pub entry_type: String,
  pub content:    serde_json::Value,
  /// Defaults to the creation instant when not supplied.
  pub timestamp:  Option<DateTime<Utc>>,
}

/// Partial update for a journal entry. Both fields are required in storage,
/// so an explicit null means "no replacement supplied".
#[derive(Debug, Clone, Default)]
pub struct JournalPatch {
  pub content:   Option<serde_json::Value>,
  pub timestamp: Option<DateTime<Utc>>,
}

impl JournalEntry {
  /// Apply a patch in place.
  pub fn apply(&mut self, patch: JournalPatch) {
    if let Some(content) = patch.content {
      self.content = content;
    }
    if let Some(timestamp) = patch.timestamp {
      self.timestamp = timestamp;
    }
  }
}
