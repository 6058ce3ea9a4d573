//! The `PlannerStore` trait and deletion scope.
//!
//! The trait is implemented by storage backends (e.g.
//! `planner-store-sqlite`). The API layer depends on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use serde::Deserialize;

use crate::{
  event::{Event, EventPatch, NewEvent},
  journal::{JournalEntry, JournalPatch, NewJournalEntry},
  task::{NewTask, Task, TaskPatch},
};

// ─── Deletion scope ──────────────────────────────────────────────────────────

/// How much of a recurring series a task deletion covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteScope {
  /// Delete exactly the addressed record.
  #[default]
  Single,
  /// Delete the addressed record and every record in its group with an
  /// equal or later due date. Earlier instances are preserved. Degrades to
  /// [`Single`](Self::Single) when the record has no group identity.
  SeriesFromHere,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a planner store backend.
///
/// The store assigns identifiers and creation instants on insert. Two
/// operations carry atomicity requirements: the multi-row insert behind
/// [`add_task`](Self::add_task) and the predicate delete behind
/// [`remove_task`](Self::remove_task) with [`DeleteScope::SeriesFromHere`]
/// are both all-or-nothing; no partial batch is ever observable.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait PlannerStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Tasks ─────────────────────────────────────────────────────────────

  /// Persist a template together with its expanded siblings in one
  /// transaction and return the stored template.
  fn add_task(
    &self,
    template: NewTask,
    siblings: Vec<NewTask>,
  ) -> impl Future<Output = Result<Task, Self::Error>> + Send + '_;

  /// Retrieve a task by id. Returns `None` if not found.
  fn get_task(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Task>, Self::Error>> + Send + '_;

  /// List all tasks, templates and generated siblings alike.
  fn list_tasks(
    &self,
  ) -> impl Future<Output = Result<Vec<Task>, Self::Error>> + Send + '_;

  /// Apply a partial update. Returns `None` if the task does not exist.
  fn update_task(
    &self,
    id: i64,
    patch: TaskPatch,
  ) -> impl Future<Output = Result<Option<Task>, Self::Error>> + Send + '_;

  /// Delete a task at the given scope. Returns `false` if the addressed
  /// task does not exist.
  fn remove_task(
    &self,
    id: i64,
    scope: DeleteScope,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Events ────────────────────────────────────────────────────────────

  fn add_event(
    &self,
    new: NewEvent,
  ) -> impl Future<Output = Result<Event, Self::Error>> + Send + '_;

  fn list_events(
    &self,
  ) -> impl Future<Output = Result<Vec<Event>, Self::Error>> + Send + '_;

  /// Apply a partial update. Returns `None` if the event does not exist.
  fn update_event(
    &self,
    id: i64,
    patch: EventPatch,
  ) -> impl Future<Output = Result<Option<Event>, Self::Error>> + Send + '_;

  /// Delete an event. Returns `false` if it does not exist.
  fn remove_event(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Journal ───────────────────────────────────────────────────────────

  /// Record a new entry. The timestamp defaults to the creation instant
  /// when the input carries none.
  fn add_entry(
    &self,
    new: NewJournalEntry,
  ) -> impl Future<Output = Result<JournalEntry, Self::Error>> + Send + '_;

  /// List all entries, most recent timestamp first.
  fn list_entries(
    &self,
  ) -> impl Future<Output = Result<Vec<JournalEntry>, Self::Error>> + Send + '_;

  /// Apply a partial update. Returns `None` if the entry does not exist.
  fn update_entry(
    &self,
    id: i64,
    patch: JournalPatch,
  ) -> impl Future<Output = Result<Option<JournalEntry>, Self::Error>> + Send + '_;

  /// Delete an entry. Returns `false` if it does not exist.
  fn remove_entry(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
