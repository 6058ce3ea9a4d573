//! Event — a scheduled occurrence with a required start instant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::patch::Patch;

/// A persisted event. `id` and `created_at` are store-assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
  pub id:          i64,
  pub title:       String,
  pub description: Option<String>,
  pub start_time:  DateTime<Utc>,
  /// Events can have a start instant without a defined end.
  pub end_time:    Option<DateTime<Utc>>,
  pub created_at:  DateTime<Utc>,
}

/// Input to [`PlannerStore::add_event`](crate::store::PlannerStore::add_event).
#[derive(Debug, Clone)]
pub struct NewEvent {
  pub title:       String,
  pub description: Option<String>,
  pub start_time:  DateTime<Utc>,
  pub end_time:    Option<DateTime<Utc>>,
}

/// Partial update for an event.
///
/// `start_time` is required in storage, so "no replacement supplied" (an
/// omitted key, an explicit null, or an empty string on the wire) leaves the
/// stored instant untouched. `end_time` is nullable, so an explicit null
/// clears it — which is why it is a [`Patch`] and not an `Option`.
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
  pub title:       Option<String>,
  pub description: Patch<String>,
  pub start_time:  Option<DateTime<Utc>>,
  pub end_time:    Patch<DateTime<Utc>>,
}

impl Event {
  /// Apply a patch in place.
  pub fn apply(&mut self, patch: EventPatch) {
    if let Some(title) = patch.title {
      self.title = title;
    }
    match patch.description {
      Patch::Missing => {}
      Patch::Null => self.description = None,
      Patch::Value(d) => self.description = Some(d),
    }
    if let Some(start) = patch.start_time {
      self.start_time = start;
    }
    match patch.end_time {
      Patch::Missing => {}
      Patch::Null => self.end_time = None,
      Patch::Value(end) => self.end_time = Some(end),
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};

  use super::*;

  fn event() -> Event {
    let start = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
    Event {
      id:          1,
      title:       "standup".to_string(),
      description: None,
      start_time:  start,
      end_time:    Some(start + chrono::Duration::minutes(15)),
      created_at:  Utc::now(),
    }
  }

  #[test]
  fn missing_start_time_is_preserved() {
    let mut e = event();
    let before = e.start_time;
    e.apply(EventPatch { start_time: None, ..Default::default() });
    assert_eq!(e.start_time, before);
  }

  #[test]
  fn explicit_null_end_time_clears() {
    let mut e = event();
    e.apply(EventPatch { end_time: Patch::Null, ..Default::default() });
    assert!(e.end_time.is_none());
  }

  #[test]
  fn omitted_end_time_is_preserved() {
    let mut e = event();
    let before = e.end_time;
    e.apply(EventPatch::default());
    assert_eq!(e.end_time, before);
  }

  #[test]
  fn supplied_start_time_replaces() {
    let mut e = event();
    let later = Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap();
    e.apply(EventPatch { start_time: Some(later), ..Default::default() });
    assert_eq!(e.start_time, later);
  }
}
