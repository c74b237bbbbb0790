//! Client-side state for the task list.
//!
//! [`TaskBoard`] holds what the presentation layer shows: the task list, a
//! loading flag, the last error and a transient success message. Every
//! mutation is followed by a full re-fetch of the list, so after a round trip
//! the board always mirrors the server's last known state.

use crate::api::{ClientError, TaskApi};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use sticky_notes_core::{NewTask, Task, TaskPatch};
use tracing_futures::Instrument;
use uuid::Uuid;

/// How long a success message stays visible.
pub const TOAST_DURATION: Duration = Duration::from_millis(3000);

pub const TASK_CREATED: &str = "✅ Task created successfully!";
pub const TASK_UPDATED: &str = "✏️ Task updated successfully!";
pub const TASK_DELETED: &str = "🗑️ Task deleted successfully!";

#[derive(Debug, Default)]
struct BoardState {
    tasks: Vec<Task>,
    loading: bool,
    error: Option<String>,
    success_message: Option<String>,
    /// Bumped for every success message; a pending clear only applies to its own message.
    toast_generation: u64,
}

/// UI state controller over a [`TaskApi`]. Clones share the same state.
pub struct TaskBoard<A> {
    api: Arc<A>,
    state: Arc<Mutex<BoardState>>,
    toast_duration: Duration,
}

impl<A> Clone for TaskBoard<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            state: Arc::clone(&self.state),
            toast_duration: self.toast_duration,
        }
    }
}

fn lock(state: &Mutex<BoardState>) -> MutexGuard<'_, BoardState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<A: TaskApi> TaskBoard<A> {
    pub fn new(api: A) -> Self {
        Self {
            api: Arc::new(api),
            state: Arc::new(Mutex::new(BoardState::default())),
            toast_duration: TOAST_DURATION,
        }
    }

    pub fn with_toast_duration(mut self, toast_duration: Duration) -> Self {
        self.toast_duration = toast_duration;
        self
    }

    /// Current task list, as of the last successful fetch.
    pub fn tasks(&self) -> Vec<Task> {
        lock(&self.state).tasks.clone()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).loading
    }

    pub fn error(&self) -> Option<String> {
        lock(&self.state).error.clone()
    }

    pub fn success_message(&self) -> Option<String> {
        lock(&self.state).success_message.clone()
    }

    pub fn clear_error(&self) {
        self.update(|state| state.error = None);
    }

    /// Replaces the list with the server's. Failures are kept in `error`.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_tasks(&self) -> Result<(), ClientError> {
        self.update(|state| {
            state.loading = true;
            state.error = None;
        });

        let result = self.api.list_tasks().await;

        self.update(|state| {
            state.loading = false;
            match &result {
                Ok(tasks) => state.tasks = tasks.clone(),
                Err(err) => state.error = Some(err.to_string()),
            }
        });
        result.map(|_| ())
    }

    /// Fetches a single task without touching the list.
    #[tracing::instrument(skip(self))]
    pub async fn get_task(&self, id: Uuid) -> Result<Task, ClientError> {
        self.clear_error();
        self.api.get_task(id).await.inspect_err(|err| {
            self.update(|state| state.error = Some(err.to_string()));
        })
    }

    #[tracing::instrument(skip(self))]
    pub async fn create_task(&self, input: NewTask) -> Result<Task, ClientError> {
        self.mutate(self.api.create_task(input), TASK_CREATED).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_task(&self, id: Uuid, patch: TaskPatch) -> Result<Task, ClientError> {
        self.mutate(self.api.update_task(id, patch), TASK_UPDATED).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_task(&self, id: Uuid) -> Result<(), ClientError> {
        self.mutate(self.api.delete_task(id), TASK_DELETED)
            .await
            .map(|_| ())
    }

    /// Flips the completion flag of `task`.
    pub async fn toggle_complete(&self, task: &Task) -> Result<Task, ClientError> {
        self.update_task(task.id, TaskPatch::completed(!task.is_completed))
            .await
    }

    /// Runs a mutating call, then re-fetches the list and shows `success`.
    async fn mutate<T>(
        &self,
        call: impl Future<Output = Result<T, ClientError>>,
        success: &'static str,
    ) -> Result<T, ClientError> {
        self.clear_error();
        match call.await {
            Ok(value) => {
                if let Err(err) = self.fetch_tasks().await {
                    tracing::warn!("Failed to refresh tasks after mutation: {}", err);
                }
                self.show_success(success);
                Ok(value)
            }
            Err(err) => {
                self.update(|state| state.error = Some(err.to_string()));
                Err(err)
            }
        }
    }

    /// Shows `message` and schedules it to disappear. A newer message restarts the countdown.
    fn show_success(&self, message: &str) {
        let generation = self.update(|state| {
            state.success_message = Some(message.to_string());
            state.toast_generation += 1;
            state.toast_generation
        });

        let state = Arc::clone(&self.state);
        let toast_duration = self.toast_duration;
        tokio::spawn(
            async move {
                tokio::time::sleep(toast_duration).await;
                let mut state = lock(&state);
                if state.toast_generation == generation {
                    state.success_message = None;
                }
            }
            .instrument(tracing::debug_span!("toast_expiry", generation)),
        );
    }

    fn update<R>(&self, f: impl FnOnce(&mut BoardState) -> R) -> R {
        f(&mut lock(&self.state))
    }
}
