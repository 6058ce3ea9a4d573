//! Task — a to-do item, optionally the template of a recurring series.
//!
//! A recurring template and its generated siblings share an opaque
//! `recurrence_group_id`, assigned once at series-creation time and never
//! recomputed. Due date and recurrence fields are immutable after creation;
//! only the fields on [`TaskPatch`] can change.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::patch::Patch;

/// A persisted task. `id` and `created_at` are store-assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
  pub id:                   i64,
  pub title:                String,
  pub description:          Option<String>,
  pub is_recurring:         bool,
  pub is_completed:         bool,
  pub due_date:             Option<NaiveDate>,
  pub start_time:           Option<DateTime<Utc>>,
  pub end_time:             Option<DateTime<Utc>>,
  pub time_tracked_seconds: i64,
  pub created_at:           DateTime<Utc>,
  /// Stored verbatim, even for cadences outside the expansion table.
  pub recurrence_type:      Option<String>,
  /// Present iff the task belongs to a recurring series.
  pub recurrence_group_id:  Option<String>,
}

/// Input to [`PlannerStore::add_task`](crate::store::PlannerStore::add_task).
///
/// `id` and `created_at` are always set by the store; the completion flag
/// and tracked duration start at their defaults (false, 0) for every row,
/// siblings included.
#[derive(Debug, Clone)]
pub struct NewTask {
  pub title:               String,
  pub description:         Option<String>,
  pub is_recurring:        bool,
  pub due_date:            Option<NaiveDate>,
  pub start_time:          Option<DateTime<Utc>>,
  pub end_time:            Option<DateTime<Utc>>,
  pub recurrence_type:     Option<String>,
  pub recurrence_group_id: Option<String>,
}

/// Partial update for a task. Only these four fields are mutable
/// post-creation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskPatch {
  pub title:                Option<String>,
  #[serde(default)]
  pub description:          Patch<String>,
  pub is_completed:         Option<bool>,
  pub time_tracked_seconds: Option<i64>,
}

impl Task {
  /// Apply a patch in place. Omitted fields are left unchanged; an explicit
  /// null clears the nullable `description` but leaves the required `title`
  /// alone.
  pub fn apply(&mut self, patch: TaskPatch) {
    if let Some(title) = patch.title {
      self.title = title;
    }
    match patch.description {
      Patch::Missing => {}
      Patch::Null => self.description = None,
      Patch::Value(d) => self.description = Some(d),
    }
    if let Some(done) = patch.is_completed {
      self.is_completed = done;
    }
    if let Some(seconds) = patch.time_tracked_seconds {
      self.time_tracked_seconds = seconds;
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;

  fn task() -> Task {
    Task {
      id:                   1,
      title:                "water plants".to_string(),
      description:          Some("the ferns too".to_string()),
      is_recurring:         false,
      is_completed:         false,
      due_date:             None,
      start_time:           None,
      end_time:             None,
      time_tracked_seconds: 0,
      created_at:           Utc::now(),
      recurrence_type:      None,
      recurrence_group_id:  None,
    }
  }

  #[test]
  fn empty_patch_changes_nothing() {
    let mut t = task();
    t.apply(TaskPatch::default());
    assert_eq!(t.title, "water plants");
    assert_eq!(t.description.as_deref(), Some("the ferns too"));
    assert!(!t.is_completed);
  }

  #[test]
  fn null_title_is_preserved_but_null_description_clears() {
    let mut t = task();
    let patch: TaskPatch =
      serde_json::from_str(r#"{"title":null,"description":null}"#).unwrap();
    t.apply(patch);
    assert_eq!(t.title, "water plants");
    assert!(t.description.is_none());
  }

  #[test]
  fn completion_and_tracked_duration_update() {
    let mut t = task();
    let patch: TaskPatch =
      serde_json::from_str(r#"{"is_completed":true,"time_tracked_seconds":420}"#)
        .unwrap();
    t.apply(patch);
    assert!(t.is_completed);
    assert_eq!(t.time_tracked_seconds, 420);
  }
}
