//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Instants are stored as RFC 3339 strings and calendar dates as
//! `YYYY-MM-DD`, so `due_date >= ?` range predicates compare correctly as
//! text. Journal content is stored as compact JSON.

use chrono::{DateTime, NaiveDate, Utc};
use planner_core::{event::Event, journal::JournalEntry, task::Task};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `tasks` row.
pub struct RawTask {
  pub task_id:              i64,
  pub title:                String,
  pub description:          Option<String>,
  pub is_recurring:         bool,
  pub is_completed:         bool,
  pub due_date:             Option<String>,
  pub start_time:           Option<String>,
  pub end_time:             Option<String>,
  pub time_tracked_seconds: i64,
  pub created_at:           String,
  pub recurrence_type:      Option<String>,
  pub recurrence_group_id:  Option<String>,
}

impl RawTask {
  pub fn into_task(self) -> Result<Task> {
    Ok(Task {
      id:                   self.task_id,
      title:                self.title,
      description:          self.description,
      is_recurring:         self.is_recurring,
      is_completed:         self.is_completed,
      due_date:             self.due_date.as_deref().map(decode_date).transpose()?,
      start_time:           self.start_time.as_deref().map(decode_dt).transpose()?,
      end_time:             self.end_time.as_deref().map(decode_dt).transpose()?,
      time_tracked_seconds: self.time_tracked_seconds,
      created_at:           decode_dt(&self.created_at)?,
      recurrence_type:      self.recurrence_type,
      recurrence_group_id:  self.recurrence_group_id,
    })
  }
}

/// Raw values read directly from an `events` row.
pub struct RawEvent {
  pub event_id:    i64,
  pub title:       String,
  pub description: Option<String>,
  pub start_time:  String,
  pub end_time:    Option<String>,
  pub created_at:  String,
}

impl RawEvent {
  pub fn into_event(self) -> Result<Event> {
    Ok(Event {
      id:          self.event_id,
      title:       self.title,
      description: self.description,
      start_time:  decode_dt(&self.start_time)?,
      end_time:    self.end_time.as_deref().map(decode_dt).transpose()?,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values read directly from a `journal_entries` row.
pub struct RawJournalEntry {
  pub entry_id:   i64,
  pub entry_type: String,
  pub content:    String,
  pub timestamp:  String,
}

impl RawJournalEntry {
  pub fn into_entry(self) -> Result<JournalEntry> {
    Ok(JournalEntry {
      id:         self.entry_id,
      entry_type: self.entry_type,
      content:    serde_json::from_str(&self.content)?,
      timestamp:  decode_dt(&self.timestamp)?,
    })
  }
}
