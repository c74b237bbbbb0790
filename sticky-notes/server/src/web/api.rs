use crate::task::api::{TaskApiDoc, TaskState, create_task_router};
use axum::{Json, Router, routing::get};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

/// JSON body for every API error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human readable description of what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: String) -> Self {
        Self { error }
    }
}

/// Handler for GET /api-docs/openapi.json - Returns the OpenAPI document.
#[tracing::instrument]
pub async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(TaskApiDoc::openapi())
}

/// Creates the JSON API routes: the task resource plus its OpenAPI document.
pub fn create_api_router(task_state: TaskState) -> Router {
    Router::new()
        .merge(create_task_router(task_state))
        .route("/api-docs/openapi.json", get(openapi_handler))
}
