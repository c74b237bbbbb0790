//! JSON resource handlers for `/tasks`.

use crate::task::{TaskService, TaskServiceError};
use crate::web::api::ErrorResponse;
use axum::{
    Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use sticky_notes_core::{NewTask, Task, TaskPatch};
use utoipa::OpenApi;
use uuid::Uuid;

/// Confirmation body returned by a successful delete.
pub const TASK_DELETED: &str = "Task deleted!";

/// Shared state for the task routes.
#[derive(Clone)]
pub struct TaskState {
    pub service: TaskService,
}

impl TaskState {
    pub fn new(service: TaskService) -> Self {
        Self { service }
    }
}

/// Error type for task handlers. This is the only place service errors become status codes.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body or its fields were invalid.
    #[error("{0}")]
    BadRequest(String),
    /// The addressed task does not exist.
    #[error("{0}")]
    NotFound(String),
    /// The store failed; `context` is what the client gets to see.
    #[error("{context}")]
    Internal {
        context: &'static str,
        #[source]
        source: TaskServiceError,
    },
}

impl ApiError {
    /// Maps a service error, using `context` as the public message for store faults.
    fn from_service(context: &'static str) -> impl FnOnce(TaskServiceError) -> ApiError {
        move |err| match err {
            TaskServiceError::InvalidInput(validation) => ApiError::BadRequest(validation.to_string()),
            TaskServiceError::TaskNotFound(_) => ApiError::NotFound(err.to_string()),
            TaskServiceError::StoreFault(_) => ApiError::Internal {
                context,
                source: err,
            },
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal { context, source } => tracing::error!("{}: {}", context, source),
            ApiError::BadRequest(message) | ApiError::NotFound(message) => {
                tracing::warn!("Rejected task request: {}", message)
            }
        }
        (self.status_code(), Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

/// An ID that is not a UUID cannot name any task.
fn parse_task_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound(format!("Task with ID {} not found", raw)))
}

/// Handler for GET /tasks - Returns all tasks, oldest first.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/tasks",
    responses(
        (status = 200, description = "All tasks ordered by creation time", body = [Task]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn list_tasks_handler(State(state): State<TaskState>) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state
        .service
        .list_tasks()
        .await
        .map_err(ApiError::from_service("Failed to fetch tasks"))?;
    Ok(Json(tasks))
}

/// Handler for GET /tasks/{id} - Returns a single task.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/tasks/{id}",
    params(("id" = Uuid, Path, description = "Task ID")),
    responses(
        (status = 200, description = "The task", body = Task),
        (status = 404, description = "Task not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn get_task_handler(
    State(state): State<TaskState>,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_task_id(&id)?;
    let task = state
        .service
        .get_task(id)
        .await
        .map_err(ApiError::from_service("Failed to fetch task"))?;
    Ok(Json(task))
}

/// Handler for POST /tasks - Creates a task.
#[tracing::instrument(skip(state, payload))]
#[utoipa::path(
    post,
    path = "/tasks",
    request_body = NewTask,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 400, description = "Invalid or missing body", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn create_task_handler(
    State(state): State<TaskState>,
    payload: Result<Json<NewTask>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let Json(input) = payload?;
    let task = state
        .service
        .create_task(input)
        .await
        .map_err(ApiError::from_service("Failed to create task"))?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Handler for PUT /tasks/{id} - Applies a partial update.
#[tracing::instrument(skip(state, payload))]
#[utoipa::path(
    put,
    path = "/tasks/{id}",
    params(("id" = Uuid, Path, description = "Task ID")),
    request_body = TaskPatch,
    responses(
        (status = 200, description = "Task updated", body = Task),
        (status = 400, description = "Invalid or missing body", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn update_task_handler(
    State(state): State<TaskState>,
    Path(id): Path<String>,
    payload: Result<Json<TaskPatch>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_task_id(&id)?;
    let Json(patch) = payload?;
    let task = state
        .service
        .update_task(id, patch)
        .await
        .map_err(ApiError::from_service("Failed to update task"))?;
    Ok(Json(task))
}

/// Handler for DELETE /tasks/{id} - Deletes a task.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    delete,
    path = "/tasks/{id}",
    params(("id" = Uuid, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task deleted", body = String, content_type = "text/plain"),
        (status = 404, description = "Task not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn delete_task_handler(
    State(state): State<TaskState>,
    Path(id): Path<String>,
) -> Result<&'static str, ApiError> {
    let id = parse_task_id(&id)?;
    state
        .service
        .delete_task(id)
        .await
        .map_err(ApiError::from_service("Failed to delete task"))?;
    Ok(TASK_DELETED)
}

/// OpenAPI description of the task routes.
#[derive(OpenApi)]
#[openapi(
    paths(
        list_tasks_handler,
        get_task_handler,
        create_task_handler,
        update_task_handler,
        delete_task_handler
    ),
    components(schemas(Task, NewTask, TaskPatch, ErrorResponse)),
    tags((name = "Tasks", description = "Sticky note task management"))
)]
pub struct TaskApiDoc;

/// Creates and returns the task router.
pub fn create_task_router(state: TaskState) -> Router {
    Router::new()
        .route("/tasks", get(list_tasks_handler).post(create_task_handler))
        .route(
            "/tasks/{id}",
            get(get_task_handler)
                .put(update_task_handler)
                .delete(delete_task_handler),
        )
        .with_state(state)
}
