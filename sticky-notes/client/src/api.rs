//! HTTP wrapper around the Sticky Notes task API.
//!
//! Every non-2xx response is collapsed into [`ClientError::RequestFailed`],
//! carrying the server's `error` message when one is present. There are no
//! retries and nothing is cached.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use std::fmt::{Display, Formatter};
use sticky_notes_core::{NewTask, Task, TaskPatch};
use thiserror::Error;
use uuid::Uuid;

/// The API call that was being made when an error happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListTasks,
    GetTask,
    CreateTask,
    UpdateTask,
    DeleteTask,
}

impl Operation {
    /// Message used when the server does not explain a failure.
    pub fn default_message(self) -> &'static str {
        match self {
            Operation::ListTasks => "Failed to fetch tasks",
            Operation::GetTask => "Task not found",
            Operation::CreateTask => "Failed to create task",
            Operation::UpdateTask => "Failed to update task",
            Operation::DeleteTask => "Failed to delete task",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::ListTasks => "list tasks",
            Operation::GetTask => "get task",
            Operation::CreateTask => "create task",
            Operation::UpdateTask => "update task",
            Operation::DeleteTask => "delete task",
        };
        write!(f, "{}", name)
    }
}

/// Errors raised by the client data layer.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered outside the 2xx range.
    #[error("{message}")]
    RequestFailed {
        operation: Operation,
        status: u16,
        message: String,
    },
    /// The request could not be sent or the response could not be read.
    #[error("Failed to {operation}: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },
}

impl ClientError {
    pub fn operation(&self) -> Operation {
        match self {
            ClientError::RequestFailed { operation, .. } | ClientError::Transport { operation, .. } => {
                *operation
            }
        }
    }
}

/// Shape of the server's error bodies.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Task operations as seen from the client.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn list_tasks(&self) -> Result<Vec<Task>, ClientError>;

    async fn get_task(&self, id: Uuid) -> Result<Task, ClientError>;

    async fn create_task(&self, input: NewTask) -> Result<Task, ClientError>;

    async fn update_task(&self, id: Uuid, patch: TaskPatch) -> Result<Task, ClientError>;

    /// Deletes a task and returns the server's confirmation text.
    async fn delete_task(&self, id: Uuid) -> Result<String, ClientError>;
}

/// [`TaskApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTaskApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tasks_url(&self) -> String {
        format!("{}/tasks", self.base_url)
    }

    fn task_url(&self, id: Uuid) -> String {
        format!("{}/tasks/{}", self.base_url, id)
    }

    /// Sends a request, turning any non-2xx answer into `RequestFailed`.
    async fn send(
        &self,
        operation: Operation,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ClientError> {
        let response = request
            .send()
            .await
            .map_err(|source| ClientError::Transport { operation, source })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => operation.default_message().to_string(),
        };
        tracing::warn!("Request to {} failed with {}: {}", operation, status, message);
        Err(ClientError::RequestFailed {
            operation,
            status: status.as_u16(),
            message,
        })
    }

    async fn read_task(operation: Operation, response: reqwest::Response) -> Result<Task, ClientError> {
        response
            .json::<Task>()
            .await
            .map_err(|source| ClientError::Transport { operation, source })
    }
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    #[tracing::instrument(skip(self))]
    async fn list_tasks(&self) -> Result<Vec<Task>, ClientError> {
        let operation = Operation::ListTasks;
        let request = self
            .client
            .get(self.tasks_url())
            .header(ACCEPT, "application/json");
        self.send(operation, request)
            .await?
            .json::<Vec<Task>>()
            .await
            .map_err(|source| ClientError::Transport { operation, source })
    }

    #[tracing::instrument(skip(self))]
    async fn get_task(&self, id: Uuid) -> Result<Task, ClientError> {
        let operation = Operation::GetTask;
        let response = self.send(operation, self.client.get(self.task_url(id))).await?;
        Self::read_task(operation, response).await
    }

    #[tracing::instrument(skip(self))]
    async fn create_task(&self, input: NewTask) -> Result<Task, ClientError> {
        let operation = Operation::CreateTask;
        let request = self.client.post(self.tasks_url()).json(&input);
        let response = self.send(operation, request).await?;
        Self::read_task(operation, response).await
    }

    #[tracing::instrument(skip(self))]
    async fn update_task(&self, id: Uuid, patch: TaskPatch) -> Result<Task, ClientError> {
        let operation = Operation::UpdateTask;
        let request = self.client.put(self.task_url(id)).json(&patch);
        let response = self.send(operation, request).await?;
        Self::read_task(operation, response).await
    }

    #[tracing::instrument(skip(self))]
    async fn delete_task(&self, id: Uuid) -> Result<String, ClientError> {
        let operation = Operation::DeleteTask;
        let response = self
            .send(operation, self.client.delete(self.task_url(id)))
            .await?;
        response
            .text()
            .await
            .map_err(|source| ClientError::Transport { operation, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_strip_trailing_slash_from_base_url() {
        let api = HttpTaskApi::new("http://localhost:3000/");
        assert_eq!(api.base_url(), "http://localhost:3000");
        assert_eq!(api.tasks_url(), "http://localhost:3000/tasks");
    }

    #[test]
    fn can_build_task_url() {
        let api = HttpTaskApi::new("http://localhost:3000");
        let id = Uuid::new_v4();
        assert_eq!(api.task_url(id), format!("http://localhost:3000/tasks/{}", id));
    }

    #[test]
    fn can_display_server_message_verbatim() {
        let err = ClientError::RequestFailed {
            operation: Operation::CreateTask,
            status: 400,
            message: "Title must not be empty".to_string(),
        };
        assert_eq!(err.to_string(), "Title must not be empty");
        assert_eq!(err.operation(), Operation::CreateTask);
    }

    #[test]
    fn can_name_operations() {
        assert_eq!(Operation::ListTasks.to_string(), "list tasks");
        assert_eq!(Operation::DeleteTask.default_message(), "Failed to delete task");
        assert_eq!(Operation::GetTask.default_message(), "Task not found");
    }
}
