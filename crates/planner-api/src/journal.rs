//! Handlers for `/journal` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/journal` | All entries, most recent timestamp first |
//! | `POST`   | `/journal` | Body: [`CreateBody`]; 400 without entry_type/content |
//! | `PUT`    | `/journal/:id` | Body: [`UpdateBody`] |
//! | `DELETE` | `/journal/:id` | 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use planner_core::{
  journal::{JournalEntry, JournalPatch, NewJournalEntry},
  store::PlannerStore,
  time::parse_instant,
};
use serde::Deserialize;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /journal`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<JournalEntry>>, ApiError>
where
  S: PlannerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let entries = store
    .list_entries()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(entries))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /journal`. `content` is an arbitrary JSON
/// payload, opaque to the planner.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub entry_type: Option<String>,
  pub content:    Option<serde_json::Value>,
  pub timestamp:  Option<String>,
}

/// `POST /journal` — returns 201 + the stored entry. The timestamp defaults
/// to the creation instant when not supplied.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PlannerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let entry_type = body.entry_type.filter(|t| !t.is_empty());
  let (Some(entry_type), Some(content)) = (entry_type, body.content) else {
    return Err(ApiError::BadRequest(
      "entry_type and content are required".to_string(),
    ));
  };

  let entry = store
    .add_entry(NewJournalEntry {
      entry_type,
      content,
      timestamp: body.timestamp.as_deref().map(parse_instant).transpose()?.flatten(),
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(entry)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `PUT /journal/:id`. Both fields are required in
/// storage, so an explicit null leaves the stored value unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBody {
  pub content:   Option<serde_json::Value>,
  pub timestamp: Option<String>,
}

/// `PUT /journal/:id` — body: [`UpdateBody`].
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(body): Json<UpdateBody>,
) -> Result<Json<JournalEntry>, ApiError>
where
  S: PlannerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let patch = JournalPatch {
    content:   body.content,
    timestamp: body.timestamp.as_deref().map(parse_instant).transpose()?.flatten(),
  };
  let entry = store
    .update_entry(id, patch)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("journal entry {id} not found")))?;
  Ok(Json(entry))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /journal/:id`
pub async fn remove<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError>
where
  S: PlannerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let deleted = store
    .remove_entry(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !deleted {
    return Err(ApiError::NotFound(format!("journal entry {id} not found")));
  }
  Ok(StatusCode::NO_CONTENT)
}
