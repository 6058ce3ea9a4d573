//! Handlers for `/events` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/events` | All events |
//! | `POST`   | `/events` | Body: [`CreateBody`]; 400 without title/start_time |
//! | `PUT`    | `/events/:id` | Body: [`UpdateBody`]; key-absent vs key-null matters |
//! | `DELETE` | `/events/:id` | 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use planner_core::{
  event::{Event, EventPatch, NewEvent},
  patch::Patch,
  store::PlannerStore,
  time::parse_instant,
};
use serde::Deserialize;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /events`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Event>>, ApiError>
where
  S: PlannerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let events = store
    .list_events()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(events))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /events`.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub title:       Option<String>,
  pub description: Option<String>,
  pub start_time:  Option<String>,
  pub end_time:    Option<String>,
}

/// `POST /events` — returns 201 + the stored event.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PlannerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let title = body.title.filter(|t| !t.is_empty());
  let start_time =
    body.start_time.as_deref().map(parse_instant).transpose()?.flatten();
  let (Some(title), Some(start_time)) = (title, start_time) else {
    return Err(ApiError::BadRequest(
      "title and start_time are required".to_string(),
    ));
  };

  let event = store
    .add_event(NewEvent {
      title,
      description: body.description,
      start_time,
      end_time: body.end_time.as_deref().map(parse_instant).transpose()?.flatten(),
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(event)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `PUT /events/:id`.
///
/// `start_time` is required in storage: an omitted key, an explicit null, or
/// an empty string all mean "no replacement" and preserve the stored value.
/// `end_time` is nullable: an omitted key is a no-op, while an explicit null
/// (or empty string) clears it.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBody {
  pub title:       Option<String>,
  #[serde(default)]
  pub description: Patch<String>,
  pub start_time:  Option<String>,
  #[serde(default)]
  pub end_time:    Patch<String>,
}

impl UpdateBody {
  fn into_patch(self) -> Result<EventPatch, planner_core::Error> {
    let start_time =
      self.start_time.as_deref().map(parse_instant).transpose()?.flatten();
    let end_time = match self.end_time {
      Patch::Missing => Patch::Missing,
      Patch::Null => Patch::Null,
      Patch::Value(s) => match parse_instant(&s)? {
        Some(instant) => Patch::Value(instant),
        // An explicit empty string clears the field, like an explicit null.
        None => Patch::Null,
      },
    };
    Ok(EventPatch {
      title: self.title,
      description: self.description,
      start_time,
      end_time,
    })
  }
}

/// `PUT /events/:id` — body: [`UpdateBody`].
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(body): Json<UpdateBody>,
) -> Result<Json<Event>, ApiError>
where
  S: PlannerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let patch = body.into_patch()?;
  let event = store
    .update_event(id, patch)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("event {id} not found")))?;
  Ok(Json(event))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /events/:id`
pub async fn remove<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError>
where
  S: PlannerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let deleted = store
    .remove_event(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !deleted {
    return Err(ApiError::NotFound(format!("event {id} not found")));
  }
  Ok(StatusCode::NO_CONTENT)
}
