//! JSON REST API for the planner.
//!
//! Exposes an axum [`Router`] backed by any
//! [`planner_core::store::PlannerStore`]. CORS, TLS, and transport concerns
//! are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = planner_api::api_router(store.clone());
//! ```

pub mod error;
pub mod events;
pub mod journal;
pub mod tasks;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, put},
};
use planner_core::store::PlannerStore;
use serde::Deserialize;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `PLANNER_*` environment variables. Every field has a development default.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 5000 }
fn default_store_path() -> PathBuf { PathBuf::from("planner.db") }

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: PlannerStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Tasks
    .route("/tasks", get(tasks::list::<S>).post(tasks::create::<S>))
    .route(
      "/tasks/{id}",
      put(tasks::update::<S>).delete(tasks::remove::<S>),
    )
    // Events
    .route("/events", get(events::list::<S>).post(events::create::<S>))
    .route(
      "/events/{id}",
      put(events::update::<S>).delete(events::remove::<S>),
    )
    // Journal
    .route("/journal", get(journal::list::<S>).post(journal::create::<S>))
    .route(
      "/journal/{id}",
      put(journal::update::<S>).delete(journal::remove::<S>),
    )
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
  };
  use planner_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  use super::api_router;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(store))
  }

  async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
      Some(v) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(v.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  // ── Tasks ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_task_requires_title_and_due_date() {
    let app = app().await;

    let (status, body) = send(&app, "POST", "/tasks", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) =
      send(&app, "POST", "/tasks", Some(json!({ "title": "no date" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn create_task_rejects_unparseable_due_date() {
    let app = app().await;
    let (status, _) = send(
      &app,
      "POST",
      "/tasks",
      Some(json!({ "title": "x", "due_date": "someday" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn create_and_read_back_single_task() {
    let app = app().await;
    let (status, created) = send(
      &app,
      "POST",
      "/tasks",
      Some(json!({
        "title": "buy milk",
        "due_date": "2025-03-01T10:00:00Z",
      })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["title"], "buy milk");
    // The instant form collapses to its date component.
    assert_eq!(created["due_date"], "2025-03-01");
    assert_eq!(created["is_completed"], false);
    assert_eq!(created["time_tracked_seconds"], 0);
    assert!(created["recurrence_group_id"].is_null());

    // created_at serialises in a stable, parseable round-trip form.
    let created_at = created["created_at"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(created_at).is_ok());

    let (status, listed) = send(&app, "GET", "/tasks", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["id"], created["id"]);
  }

  #[tokio::test]
  async fn recurring_daily_task_fans_out_to_ninety_one_rows() {
    let app = app().await;
    let (status, created) = send(
      &app,
      "POST",
      "/tasks",
      Some(json!({
        "title": "stretch",
        "due_date": "2025-03-01",
        "is_recurring": true,
        "recurrence_type": "daily",
      })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let group = created["recurrence_group_id"].as_str().unwrap().to_string();

    let (_, listed) = send(&app, "GET", "/tasks", None).await;
    let tasks = listed.as_array().unwrap();
    assert_eq!(tasks.len(), 91);
    assert!(
      tasks
        .iter()
        .all(|t| t["recurrence_group_id"] == group.as_str())
    );
    assert!(tasks.iter().all(|t| t["is_completed"] == false));
  }

  #[tokio::test]
  async fn unknown_cadence_stores_template_alone() {
    let app = app().await;
    let (status, created) = send(
      &app,
      "POST",
      "/tasks",
      Some(json!({
        "title": "pay rent",
        "due_date": "2025-03-01",
        "is_recurring": true,
        "recurrence_type": "monthly",
      })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["is_recurring"], true);
    assert_eq!(created["recurrence_type"], "monthly");

    let (_, listed) = send(&app, "GET", "/tasks", None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
  }

  #[tokio::test]
  async fn series_from_here_delete_respects_threshold() {
    let app = app().await;
    send(
      &app,
      "POST",
      "/tasks",
      Some(json!({
        "title": "stretch",
        "due_date": "2025-03-01",
        "is_recurring": true,
        "recurrence_type": "daily",
      })),
    )
    .await;

    let (_, listed) = send(&app, "GET", "/tasks", None).await;
    let target_id = listed
      .as_array()
      .unwrap()
      .iter()
      .find(|t| t["due_date"] == "2025-03-06")
      .unwrap()["id"]
      .as_i64()
      .unwrap();

    let (status, _) = send(
      &app,
      "DELETE",
      &format!("/tasks/{target_id}?scope=series_from_here"),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, remaining) = send(&app, "GET", "/tasks", None).await;
    let tasks = remaining.as_array().unwrap();
    assert_eq!(tasks.len(), 5);
    assert!(
      tasks
        .iter()
        .all(|t| t["due_date"].as_str().unwrap() < "2025-03-06")
    );
  }

  #[tokio::test]
  async fn single_delete_on_series_member_removes_one_row() {
    let app = app().await;
    send(
      &app,
      "POST",
      "/tasks",
      Some(json!({
        "title": "stretch",
        "due_date": "2025-03-01",
        "is_recurring": true,
        "recurrence_type": "daily",
      })),
    )
    .await;

    let (_, listed) = send(&app, "GET", "/tasks", None).await;
    let target_id = listed
      .as_array()
      .unwrap()
      .iter()
      .find(|t| t["due_date"] == "2025-03-06")
      .unwrap()["id"]
      .as_i64()
      .unwrap();

    let (status, _) =
      send(&app, "DELETE", &format!("/tasks/{target_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, remaining) = send(&app, "GET", "/tasks", None).await;
    let tasks = remaining.as_array().unwrap();
    assert_eq!(tasks.len(), 90);
    assert!(tasks.iter().any(|t| t["due_date"] == "2025-03-05"));
    assert!(tasks.iter().any(|t| t["due_date"] == "2025-03-07"));
  }

  #[tokio::test]
  async fn delete_missing_task_returns_404() {
    let app = app().await;
    let (status, _) = send(&app, "DELETE", "/tasks/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn update_task_changes_only_supplied_fields() {
    let app = app().await;
    let (_, created) = send(
      &app,
      "POST",
      "/tasks",
      Some(json!({ "title": "buy milk", "due_date": "2025-03-01" })),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = send(
      &app,
      "PUT",
      &format!("/tasks/{id}"),
      Some(json!({ "is_completed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["is_completed"], true);
    assert_eq!(updated["title"], "buy milk");
    assert_eq!(updated["due_date"], "2025-03-01");
  }

  #[tokio::test]
  async fn update_task_rejects_negative_tracked_time() {
    let app = app().await;
    let (_, created) = send(
      &app,
      "POST",
      "/tasks",
      Some(json!({ "title": "buy milk", "due_date": "2025-03-01" })),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, _) = send(
      &app,
      "PUT",
      &format!("/tasks/{id}"),
      Some(json!({ "time_tracked_seconds": -5 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  // ── Events ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_event_requires_title_and_start_time() {
    let app = app().await;
    let (status, _) = send(
      &app,
      "POST",
      "/events",
      Some(json!({ "title": "dentist" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn event_update_preserves_null_start_and_clears_null_end() {
    let app = app().await;
    let (_, created) = send(
      &app,
      "POST",
      "/events",
      Some(json!({
        "title": "dentist",
        "start_time": "2025-06-01T09:00:00Z",
        "end_time": "2025-06-01T10:00:00Z",
      })),
    )
    .await;
    let id = created["id"].as_i64().unwrap();
    let start = created["start_time"].as_str().unwrap().to_string();

    let (status, updated) = send(
      &app,
      "PUT",
      &format!("/events/{id}"),
      Some(json!({ "start_time": null, "end_time": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["start_time"], start.as_str());
    assert!(updated["end_time"].is_null());
  }

  #[tokio::test]
  async fn event_update_with_omitted_end_time_is_a_noop() {
    let app = app().await;
    let (_, created) = send(
      &app,
      "POST",
      "/events",
      Some(json!({
        "title": "dentist",
        "start_time": "2025-06-01T09:00:00Z",
        "end_time": "2025-06-01T10:00:00Z",
      })),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (_, updated) = send(
      &app,
      "PUT",
      &format!("/events/{id}"),
      Some(json!({ "title": "dentist (moved)" })),
    )
    .await;
    assert_eq!(updated["title"], "dentist (moved)");
    assert_eq!(updated["end_time"], created["end_time"]);
  }

  #[tokio::test]
  async fn delete_event_then_it_is_gone() {
    let app = app().await;
    let (_, created) = send(
      &app,
      "POST",
      "/events",
      Some(json!({ "title": "dentist", "start_time": "2025-06-01T09:00:00Z" })),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, _) = send(&app, "DELETE", &format!("/events/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "DELETE", &format!("/events/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Journal ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_journal_entry_requires_type_and_content() {
    let app = app().await;

    let (status, _) = send(
      &app,
      "POST",
      "/journal",
      Some(json!({ "entry_type": "meal" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
      &app,
      "POST",
      "/journal",
      Some(json!({ "entry_type": "meal", "content": null })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn journal_lists_most_recent_first() {
    let app = app().await;
    for (hour, what) in [(12, "lunch"), (18, "dinner"), (7, "breakfast")] {
      send(
        &app,
        "POST",
        "/journal",
        Some(json!({
          "entry_type": "meal",
          "content": { "what": what },
          "timestamp": format!("2025-06-01T{hour:02}:00:00Z"),
        })),
      )
      .await;
    }

    let (status, listed) = send(&app, "GET", "/journal", None).await;
    assert_eq!(status, StatusCode::OK);
    let whats: Vec<&str> = listed
      .as_array()
      .unwrap()
      .iter()
      .map(|e| e["content"]["what"].as_str().unwrap())
      .collect();
    assert_eq!(whats, vec!["dinner", "lunch", "breakfast"]);
  }

  #[tokio::test]
  async fn journal_update_replaces_content_and_keeps_timestamp_on_null() {
    let app = app().await;
    let (_, created) = send(
      &app,
      "POST",
      "/journal",
      Some(json!({
        "entry_type": "mood",
        "content": "fine",
        "timestamp": "2025-06-01T08:00:00Z",
      })),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = send(
      &app,
      "PUT",
      &format!("/journal/{id}"),
      Some(json!({ "content": "great", "timestamp": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["content"], "great");
    assert_eq!(updated["timestamp"], created["timestamp"]);
  }
}
