//! Route handlers.

use crate::{ApiError, AppState, CreateStoryRequest, CreateStoryResponse, StoryResponse};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use std::sync::Arc;
use storyteller_core::TaskId;
use tracing::{info, instrument};

/// `POST /stories`: create a task and start its run.
#[instrument(skip_all)]
pub async fn create_story(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateStoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let prompt = request.prompt.trim();
    if prompt.is_empty() {
        return Err(ApiError::BadRequest("prompt must not be empty".to_string()));
    }
    let limit = *state.config.max_prompt_chars();
    if prompt.chars().count() > limit {
        return Err(ApiError::BadRequest(format!(
            "prompt must be at most {} characters",
            limit
        )));
    }

    let task = state.dispatcher.submit(prompt).await?;
    info!(task_id = %task.id, prompt_chars = prompt.chars().count(), "Story requested");

    Ok((StatusCode::ACCEPTED, Json(CreateStoryResponse::from(&task))))
}

/// `GET /stories/{task_id}`: report a task's current state.
#[instrument(skip(state))]
pub async fn get_story(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<i64>,
) -> Result<Json<StoryResponse>, ApiError> {
    let task_id = TaskId::from(task_id);
    match state.repository.get(task_id).await? {
        Some(task) => Ok(Json(StoryResponse::from(task))),
        None => Err(ApiError::NotFound(task_id)),
    }
}

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
