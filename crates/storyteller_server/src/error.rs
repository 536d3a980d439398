//! HTTP error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use storyteller_core::TaskId;
use storyteller_error::StorytellerError;
use tracing::error;

/// Error returned by a handler, rendered as `{"error": "..."}`.
#[derive(Debug, derive_more::Display)]
pub enum ApiError {
    /// The request was understood but rejected
    #[display("{}", _0)]
    BadRequest(String),
    /// No task with this id
    #[display("Task {} not found", _0)]
    NotFound(TaskId),
    /// Anything else
    #[display("Internal error")]
    Internal(StorytellerError),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StorytellerError> for ApiError {
    fn from(err: StorytellerError) -> Self {
        ApiError::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(err) = &self {
            error!(error = %err, "Request failed");
        }
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
