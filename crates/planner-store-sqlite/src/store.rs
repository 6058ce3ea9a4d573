//! [`SqliteStore`] — the SQLite implementation of [`PlannerStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;

use planner_core::{
  event::{Event, EventPatch, NewEvent},
  journal::{JournalEntry, JournalPatch, NewJournalEntry},
  store::{DeleteScope, PlannerStore},
  task::{NewTask, Task, TaskPatch},
};

use crate::{
  Error, Result,
  encode::{RawEvent, RawJournalEntry, RawTask, encode_date, encode_dt},
  schema::SCHEMA,
};

const TASK_COLUMNS: &str = "task_id, title, description, is_recurring, \
   is_completed, due_date, start_time, end_time, time_tracked_seconds, \
   created_at, recurrence_type, recurrence_group_id";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A planner store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn fetch_task(&self, id: i64) -> Result<Option<Task>> {
    let raw: Option<RawTask> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE task_id = ?1"),
              rusqlite::params![id],
              task_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawTask::into_task).transpose()
  }

}

// ─── Row mappers ─────────────────────────────────────────────────────────────

fn task_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawTask> {
  Ok(RawTask {
    task_id:              row.get(0)?,
    title:                row.get(1)?,
    description:          row.get(2)?,
    is_recurring:         row.get(3)?,
    is_completed:         row.get(4)?,
    due_date:             row.get(5)?,
    start_time:           row.get(6)?,
    end_time:             row.get(7)?,
    time_tracked_seconds: row.get(8)?,
    created_at:           row.get(9)?,
    recurrence_type:      row.get(10)?,
    recurrence_group_id:  row.get(11)?,
  })
}

fn event_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawEvent> {
  Ok(RawEvent {
    event_id:    row.get(0)?,
    title:       row.get(1)?,
    description: row.get(2)?,
    start_time:  row.get(3)?,
    end_time:    row.get(4)?,
    created_at:  row.get(5)?,
  })
}

fn entry_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawJournalEntry> {
  Ok(RawJournalEntry {
    entry_id:   row.get(0)?,
    entry_type: row.get(1)?,
    content:    row.get(2)?,
    timestamp:  row.get(3)?,
  })
}

/// Carry a domain-level decode failure out of a `conn.call` closure.
fn domain(e: Error) -> tokio_rusqlite::Error {
  tokio_rusqlite::Error::Other(Box::new(e))
}

// ─── Insert plumbing ─────────────────────────────────────────────────────────

/// Column values for one task INSERT, pre-encoded so the whole batch can
/// move into the connection closure.
struct TaskInsert {
  title:               String,
  description:         Option<String>,
  is_recurring:        bool,
  due_date:            Option<String>,
  start_time:          Option<String>,
  end_time:            Option<String>,
  created_at:          String,
  recurrence_type:     Option<String>,
  recurrence_group_id: Option<String>,
}

fn task_insert_values(new: &NewTask, created_at: DateTime<Utc>) -> TaskInsert {
  TaskInsert {
    title:               new.title.clone(),
    description:         new.description.clone(),
    is_recurring:        new.is_recurring,
    due_date:            new.due_date.map(encode_date),
    start_time:          new.start_time.map(encode_dt),
    end_time:            new.end_time.map(encode_dt),
    created_at:          encode_dt(created_at),
    recurrence_type:     new.recurrence_type.clone(),
    recurrence_group_id: new.recurrence_group_id.clone(),
  }
}

fn insert_task_row(
  conn: &rusqlite::Connection,
  row: &TaskInsert,
) -> rusqlite::Result<i64> {
  conn.execute(
    "INSERT INTO tasks (
       title, description, is_recurring, is_completed, due_date,
       start_time, end_time, time_tracked_seconds, created_at,
       recurrence_type, recurrence_group_id
     ) VALUES (?1, ?2, ?3, 0, ?4, ?5, ?6, 0, ?7, ?8, ?9)",
    rusqlite::params![
      row.title,
      row.description,
      row.is_recurring,
      row.due_date,
      row.start_time,
      row.end_time,
      row.created_at,
      row.recurrence_type,
      row.recurrence_group_id,
    ],
  )?;
  Ok(conn.last_insert_rowid())
}

// ─── PlannerStore impl ───────────────────────────────────────────────────────

impl PlannerStore for SqliteStore {
  type Error = Error;

  // ── Tasks ─────────────────────────────────────────────────────────────────

  async fn add_task(
    &self,
    template: NewTask,
    siblings: Vec<NewTask>,
  ) -> Result<Task> {
    // One creation instant per row, assigned here so the returned template
    // matches exactly what was persisted.
    let created_at = Utc::now();
    let template_row = task_insert_values(&template, created_at);
    let sibling_rows: Vec<TaskInsert> = siblings
      .iter()
      .map(|sibling| task_insert_values(sibling, Utc::now()))
      .collect();

    let template_id = self
      .conn
      .call(move |conn| {
        // Template and siblings land together or not at all.
        let tx = conn.transaction()?;
        let id = insert_task_row(&tx, &template_row)?;
        for row in &sibling_rows {
          insert_task_row(&tx, row)?;
        }
        tx.commit()?;
        Ok(id)
      })
      .await?;

    Ok(Task {
      id:                   template_id,
      title:                template.title,
      description:          template.description,
      is_recurring:         template.is_recurring,
      is_completed:         false,
      due_date:             template.due_date,
      start_time:           template.start_time,
      end_time:             template.end_time,
      time_tracked_seconds: 0,
      created_at,
      recurrence_type:      template.recurrence_type,
      recurrence_group_id:  template.recurrence_group_id,
    })
  }

  async fn get_task(&self, id: i64) -> Result<Option<Task>> {
    self.fetch_task(id).await
  }

  async fn list_tasks(&self) -> Result<Vec<Task>> {
    let raws: Vec<RawTask> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {TASK_COLUMNS} FROM tasks"))?;
        let rows = stmt
          .query_map([], task_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawTask::into_task).collect()
  }

  async fn update_task(&self, id: i64, patch: TaskPatch) -> Result<Option<Task>> {
    // Read, patch, and write inside one closure so no other writer can
    // interleave.
    let updated = self
      .conn
      .call(move |conn| {
        let raw: Option<RawTask> = conn
          .query_row(
            &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE task_id = ?1"),
            rusqlite::params![id],
            task_from_row,
          )
          .optional()?;
        let Some(raw) = raw else {
          return Ok(None);
        };

        let mut task = raw.into_task().map_err(domain)?;
        task.apply(patch);

        conn.execute(
          "UPDATE tasks SET title = ?1, description = ?2, is_completed = ?3, \
           time_tracked_seconds = ?4 WHERE task_id = ?5",
          rusqlite::params![
            task.title,
            task.description,
            task.is_completed,
            task.time_tracked_seconds,
            id
          ],
        )?;
        Ok(Some(task))
      })
      .await?;

    Ok(updated)
  }

  async fn remove_task(&self, id: i64, scope: DeleteScope) -> Result<bool> {
    let deleted = self
      .conn
      .call(move |conn| {
        let target: Option<(Option<String>, Option<String>)> = conn
          .query_row(
            "SELECT recurrence_group_id, due_date FROM tasks WHERE task_id = ?1",
            rusqlite::params![id],
            |row| Ok((row.get(0)?, row.get(1)?)),
          )
          .optional()?;

        let Some((group_id, due_date)) = target else {
          return Ok(false);
        };

        match (scope, group_id, due_date) {
          (DeleteScope::SeriesFromHere, Some(group), Some(due)) => {
            // Inclusive threshold: the addressed task goes too. One
            // statement, so the predicate delete is atomic. ISO dates
            // compare correctly as text.
            conn.execute(
              "DELETE FROM tasks \
               WHERE recurrence_group_id = ?1 AND due_date >= ?2",
              rusqlite::params![group, due],
            )?;
          }
          // No group identity (or no due date) — nothing to scope over.
          _ => {
            conn.execute(
              "DELETE FROM tasks WHERE task_id = ?1",
              rusqlite::params![id],
            )?;
          }
        }
        Ok(true)
      })
      .await?;

    Ok(deleted)
  }

  // ── Events ────────────────────────────────────────────────────────────────

  async fn add_event(&self, new: NewEvent) -> Result<Event> {
    let created_at = Utc::now();

    let title = new.title.clone();
    let description = new.description.clone();
    let start_str = encode_dt(new.start_time);
    let end_str = new.end_time.map(encode_dt);
    let created_str = encode_dt(created_at);
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO events (title, description, start_time, end_time, created_at) \
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![title, description, start_str, end_str, created_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Event {
      id,
      title: new.title,
      description: new.description,
      start_time: new.start_time,
      end_time: new.end_time,
      created_at,
    })
  }

  async fn list_events(&self) -> Result<Vec<Event>> {
    let raws: Vec<RawEvent> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT event_id, title, description, start_time, end_time, \
           created_at FROM events",
        )?;
        let rows = stmt
          .query_map([], event_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEvent::into_event).collect()
  }

  async fn update_event(
    &self,
    id: i64,
    patch: EventPatch,
  ) -> Result<Option<Event>> {
    let updated = self
      .conn
      .call(move |conn| {
        let raw: Option<RawEvent> = conn
          .query_row(
            "SELECT event_id, title, description, start_time, end_time, \
             created_at FROM events WHERE event_id = ?1",
            rusqlite::params![id],
            event_from_row,
          )
          .optional()?;
        let Some(raw) = raw else {
          return Ok(None);
        };

        let mut event = raw.into_event().map_err(domain)?;
        event.apply(patch);

        conn.execute(
          "UPDATE events SET title = ?1, description = ?2, start_time = ?3, \
           end_time = ?4 WHERE event_id = ?5",
          rusqlite::params![
            event.title,
            event.description,
            encode_dt(event.start_time),
            event.end_time.map(encode_dt),
            id
          ],
        )?;
        Ok(Some(event))
      })
      .await?;

    Ok(updated)
  }

  async fn remove_event(&self, id: i64) -> Result<bool> {
    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM events WHERE event_id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;
    Ok(affected > 0)
  }

  // ── Journal ───────────────────────────────────────────────────────────────

  async fn add_entry(&self, new: NewJournalEntry) -> Result<JournalEntry> {
    let timestamp = new.timestamp.unwrap_or_else(Utc::now);
    let content_str = serde_json::to_string(&new.content)?;

    let entry_type = new.entry_type.clone();
    let content_for_insert = content_str.clone();
    let timestamp_str = encode_dt(timestamp);
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO journal_entries (entry_type, content, timestamp) \
           VALUES (?1, ?2, ?3)",
          rusqlite::params![entry_type, content_for_insert, timestamp_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(JournalEntry {
      id,
      entry_type: new.entry_type,
      content: new.content,
      timestamp,
    })
  }

  async fn list_entries(&self) -> Result<Vec<JournalEntry>> {
    let raws: Vec<RawJournalEntry> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT entry_id, entry_type, content, timestamp \
           FROM journal_entries ORDER BY timestamp DESC",
        )?;
        let rows = stmt
          .query_map([], entry_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawJournalEntry::into_entry).collect()
  }

  async fn update_entry(
    &self,
    id: i64,
    patch: JournalPatch,
  ) -> Result<Option<JournalEntry>> {
    let updated = self
      .conn
      .call(move |conn| {
        let raw: Option<RawJournalEntry> = conn
          .query_row(
            "SELECT entry_id, entry_type, content, timestamp \
             FROM journal_entries WHERE entry_id = ?1",
            rusqlite::params![id],
            entry_from_row,
          )
          .optional()?;
        let Some(raw) = raw else {
          return Ok(None);
        };

        let mut entry = raw.into_entry().map_err(domain)?;
        entry.apply(patch);

        let content_str = serde_json::to_string(&entry.content)
          .map_err(Error::from)
          .map_err(domain)?;
        conn.execute(
          "UPDATE journal_entries SET content = ?1, timestamp = ?2 \
           WHERE entry_id = ?3",
          rusqlite::params![content_str, encode_dt(entry.timestamp), id],
        )?;
        Ok(Some(entry))
      })
      .await?;

    Ok(updated)
  }

  async fn remove_entry(&self, id: i64) -> Result<bool> {
    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM journal_entries WHERE entry_id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;
    Ok(affected > 0)
  }
}
