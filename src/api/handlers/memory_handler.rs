//! Memory handlers.

use axum::{
    extract::{OriginalUri, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;

use super::payload::{provided_id, provided_text, provided_timestamp, required, timestamp};
use crate::api::extractors::{JsonBody, Resolvable, Resolved};
use crate::api::AppState;
use crate::config::{MEMORY_NOT_FOUND, MEMORY_UPDATE_REQUIRED};
use crate::domain::{Memory, MemoryChanges, NewMemory};
use crate::errors::{AppError, AppResult};
use crate::types::{Created, NoContent};

/// Memory creation request
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateMemoryRequest {
    #[schema(example = "Dogs!")]
    pub memory_title: Option<String>,
    /// RFC 3339 timestamp or a plain `YYYY-MM-DD` date
    #[serde(default, deserialize_with = "timestamp")]
    #[schema(value_type = Option<String>, example = "2019-01-03T00:00:00.000Z")]
    pub memory_date: Option<DateTime<Utc>>,
    #[schema(example = "Walking the dogs on the beach.")]
    pub memory_desc: Option<String>,
    #[schema(example = "https://www.memories.com")]
    pub media_url: Option<String>,
    #[schema(example = 1)]
    pub familymember_id: Option<i32>,
}

impl CreateMemoryRequest {
    /// Fields are checked in declaration order.
    pub fn into_new(self) -> AppResult<NewMemory> {
        Ok(NewMemory {
            memory_title: required(self.memory_title, "memory_title")?,
            memory_date: required(self.memory_date, "memory_date")?,
            memory_desc: required(self.memory_desc, "memory_desc")?,
            media_url: required(self.media_url, "media_url")?,
            familymember_id: required(self.familymember_id, "familymember_id")?,
        })
    }
}

/// Memory update request, any subset of fields. `null`, `false`, `0` and
/// `""` count as not provided.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateMemoryRequest {
    #[serde(default, deserialize_with = "provided_text")]
    pub memory_title: Option<String>,
    #[serde(default, deserialize_with = "provided_timestamp")]
    #[schema(value_type = Option<String>)]
    pub memory_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "provided_text")]
    pub memory_desc: Option<String>,
    #[serde(default, deserialize_with = "provided_text")]
    pub media_url: Option<String>,
    #[serde(default, deserialize_with = "provided_id")]
    pub familymember_id: Option<i32>,
}

impl UpdateMemoryRequest {
    pub fn into_changes(self) -> AppResult<MemoryChanges> {
        let changes = MemoryChanges {
            memory_title: self.memory_title,
            memory_date: self.memory_date,
            memory_desc: self.memory_desc,
            media_url: self.media_url,
            familymember_id: self.familymember_id,
        };

        if changes.is_empty() {
            return Err(AppError::validation(MEMORY_UPDATE_REQUIRED));
        }
        Ok(changes)
    }
}

#[axum::async_trait]
impl Resolvable for Memory {
    const NOT_FOUND: &'static str = MEMORY_NOT_FOUND;

    async fn fetch(state: &AppState, id: i32) -> AppResult<Option<Self>> {
        state.memories.get_by_id(id).await
    }
}

/// Create memory routes
pub fn memory_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_memories).post(create_memory))
        .route(
            "/:id",
            get(get_memory).delete(delete_memory).patch(update_memory),
        )
}

/// List all memories
#[utoipa::path(
    get,
    path = "/api/memories",
    tag = "Memories",
    responses(
        (status = 200, description = "All memories", body = Vec<Memory>),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn list_memories(State(state): State<AppState>) -> AppResult<Json<Vec<Memory>>> {
    let memories = state.memories.list_all().await?;
    Ok(Json(memories.iter().map(Memory::sanitized).collect()))
}

/// Create a memory
#[utoipa::path(
    post,
    path = "/api/memories",
    tag = "Memories",
    request_body = CreateMemoryRequest,
    responses(
        (status = 201, description = "Memory created", body = Memory,
            headers(("Location" = String, description = "Path of the new memory"))),
        (status = 400, description = "Missing field or malformed JSON")
    )
)]
pub async fn create_memory(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    JsonBody(payload): JsonBody<CreateMemoryRequest>,
) -> AppResult<Created<Memory>> {
    let memory = state.memories.insert(payload.into_new()?).await?;
    tracing::info!(id = memory.id, familymember_id = memory.familymember_id, "Memory created");

    Ok(Created::at(uri.path(), memory.id, memory.sanitized()))
}

/// Get a memory by ID
#[utoipa::path(
    get,
    path = "/api/memories/{id}",
    tag = "Memories",
    params(("id" = i32, Path, description = "Memory ID")),
    responses(
        (status = 200, description = "Memory found", body = Memory),
        (status = 404, description = "Memory does not exist")
    )
)]
pub async fn get_memory(Resolved(memory): Resolved<Memory>) -> Json<Memory> {
    Json(memory.sanitized())
}

/// Delete a memory
#[utoipa::path(
    delete,
    path = "/api/memories/{id}",
    tag = "Memories",
    params(("id" = i32, Path, description = "Memory ID")),
    responses(
        (status = 204, description = "Memory deleted"),
        (status = 404, description = "Memory does not exist")
    )
)]
pub async fn delete_memory(
    State(state): State<AppState>,
    Resolved(memory): Resolved<Memory>,
) -> AppResult<NoContent> {
    let removed = state.memories.delete_by_id(memory.id).await?;
    tracing::info!(id = memory.id, removed, "Memory deleted");

    Ok(NoContent)
}

/// Update some fields of a memory
#[utoipa::path(
    patch,
    path = "/api/memories/{id}",
    tag = "Memories",
    params(("id" = i32, Path, description = "Memory ID")),
    request_body = UpdateMemoryRequest,
    responses(
        (status = 204, description = "Memory updated"),
        (status = 400, description = "No field to update"),
        (status = 404, description = "Memory does not exist")
    )
)]
pub async fn update_memory(
    State(state): State<AppState>,
    Resolved(memory): Resolved<Memory>,
    JsonBody(payload): JsonBody<UpdateMemoryRequest>,
) -> AppResult<NoContent> {
    let changes = payload.into_changes()?;
    state.memories.update_by_id(memory.id, changes).await?;
    tracing::debug!(id = memory.id, "Memory updated");

    Ok(NoContent)
}
