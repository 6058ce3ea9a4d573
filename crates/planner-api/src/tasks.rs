//! Handlers for `/tasks` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/tasks` | All tasks, templates and generated siblings alike |
//! | `POST`   | `/tasks` | Body: [`CreateBody`]; recurring templates fan out |
//! | `PUT`    | `/tasks/:id` | Body: [`TaskPatch`]; 404 if not found |
//! | `DELETE` | `/tasks/:id` | Optional `?scope=single\|series_from_here` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use planner_core::{
  recurrence,
  store::{DeleteScope, PlannerStore},
  task::{NewTask, Task, TaskPatch},
  time::{parse_date, parse_instant},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /tasks`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Task>>, ApiError>
where
  S: PlannerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let tasks = store
    .list_tasks()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(tasks))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /tasks`. Date and instant fields arrive as
/// strings and go through the parsing collaborators, so both bare dates and
/// full instants are accepted for `due_date`.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub title:           Option<String>,
  pub description:     Option<String>,
  #[serde(default)]
  pub is_recurring:    bool,
  pub recurrence_type: Option<String>,
  pub due_date:        Option<String>,
  pub start_time:      Option<String>,
  pub end_time:        Option<String>,
}

/// `POST /tasks` — returns 201 + the stored template.
///
/// A recurring template fans out into its generated siblings here; the whole
/// batch is persisted in one transaction. The group id is assigned whenever
/// the recurrence flag is set, even if the cadence turns out not to expand.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PlannerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let title = body.title.filter(|t| !t.is_empty());
  let due_date = body.due_date.as_deref().map(parse_date).transpose()?.flatten();
  let (Some(title), Some(due_date)) = (title, due_date) else {
    return Err(ApiError::BadRequest(
      "title and due_date are required".to_string(),
    ));
  };

  let group_id = body.is_recurring.then(|| Uuid::new_v4().to_string());

  let template = NewTask {
    title,
    description: body.description,
    is_recurring: body.is_recurring,
    due_date: Some(due_date),
    start_time: body.start_time.as_deref().map(parse_instant).transpose()?.flatten(),
    end_time: body.end_time.as_deref().map(parse_instant).transpose()?.flatten(),
    recurrence_type: body.recurrence_type,
    recurrence_group_id: group_id,
  };

  let siblings = recurrence::expand(&template);
  let task = store
    .add_task(template, siblings)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(task)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /tasks/:id` — body: [`TaskPatch`].
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(patch): Json<TaskPatch>,
) -> Result<Json<Task>, ApiError>
where
  S: PlannerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if patch.time_tracked_seconds.is_some_and(|s| s < 0) {
    return Err(ApiError::BadRequest(
      "time_tracked_seconds must be non-negative".to_string(),
    ));
  }

  let task = store
    .update_task(id, patch)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("task {id} not found")))?;
  Ok(Json(task))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct DeleteParams {
  #[serde(default)]
  pub scope: DeleteScope,
}

/// `DELETE /tasks/:id[?scope=single|series_from_here]`
pub async fn remove<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Query(params): Query<DeleteParams>,
) -> Result<StatusCode, ApiError>
where
  S: PlannerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let deleted = store
    .remove_task(id, params.scope)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !deleted {
    return Err(ApiError::NotFound(format!("task {id} not found")));
  }
  Ok(StatusCode::NO_CONTENT)
}
