use std::sync::Arc;
use sticky_notes_core::{NewTask, Task, TaskPatch, ValidationError, current_timestamp, sort_by_creation};
use uuid::Uuid;

pub mod api;
pub mod store;

pub use store::{InMemoryTaskStore, SeaOrmTaskStore, StoreError, TaskStore};

/// Error type for TaskService operations.
#[derive(Debug, thiserror::Error)]
pub enum TaskServiceError {
    /// The caller supplied invalid or missing data.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),
    /// No task exists with the given ID.
    #[error("Task with ID {0} not found")]
    TaskNotFound(Uuid),
    /// The underlying store failed.
    #[error("Store fault: {0}")]
    StoreFault(#[from] StoreError),
}

/// Application service for the task lifecycle.
///
/// Owns a handle to a [`TaskStore`] and is cheap to clone, so it can be shared
/// across request handlers.
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    /// Retrieves all tasks, oldest first.
    ///
    /// # Returns
    ///
    /// A `Result` containing the ordered tasks, or a store fault.
    #[tracing::instrument(skip(self))]
    pub async fn list_tasks(&self) -> Result<Vec<Task>, TaskServiceError> {
        let mut tasks = self.store.all().await?;
        sort_by_creation(&mut tasks);
        Ok(tasks)
    }

    /// Retrieves a task by its ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The ID of the task to retrieve.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Task`, or `TaskNotFound` if there is no such task.
    #[tracing::instrument(skip(self))]
    pub async fn get_task(&self, id: Uuid) -> Result<Task, TaskServiceError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(id))
    }

    /// Creates a new task. The store is not touched when the input is invalid.
    ///
    /// # Arguments
    ///
    /// * `input` - Title and optional description of the task.
    ///
    /// # Returns
    ///
    /// A `Result` containing the created `Task`, or an error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn create_task(&self, input: NewTask) -> Result<Task, TaskServiceError> {
        let task = Task::create(input, current_timestamp())?;
        let created = self.store.insert(task).await?;
        tracing::info!("Created task {}", created.id);
        Ok(created)
    }

    /// Applies a partial update to a task and refreshes its `updated_at`.
    ///
    /// # Arguments
    ///
    /// * `id` - The ID of the task to update.
    /// * `patch` - The fields to change; absent fields are left untouched.
    ///
    /// # Returns
    ///
    /// A `Result` containing the updated `Task`, or an error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn update_task(&self, id: Uuid, patch: TaskPatch) -> Result<Task, TaskServiceError> {
        patch.validate()?;
        let mut task = self.get_task(id).await?;
        task.apply(patch, current_timestamp());
        let updated = self
            .store
            .update(task)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(id))?;
        tracing::info!("Updated task {}", updated.id);
        Ok(updated)
    }

    /// Deletes a task after confirming it exists.
    ///
    /// # Arguments
    ///
    /// * `id` - The ID of the task to delete.
    ///
    /// # Returns
    ///
    /// A `Result` containing the deleted `Task`, or `TaskNotFound` if there is no such task.
    #[tracing::instrument(skip(self))]
    pub async fn delete_task(&self, id: Uuid) -> Result<Task, TaskServiceError> {
        let task = self.get_task(id).await?;
        self.store.delete_by_id(id).await?;
        tracing::info!("Deleted task {}", id);
        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::store::MockTaskStore;
    use chrono::Duration;
    use mockall::predicate::eq;

    fn existing_task() -> Task {
        let created_at = current_timestamp() - Duration::minutes(10);
        Task::create(NewTask::new("Buy milk", Some("2 litres".to_string())), created_at).unwrap()
    }

    #[tokio::test]
    async fn can_skip_store_when_title_is_blank() {
        let mut store = MockTaskStore::new();
        store.expect_insert().never();
        let service = TaskService::new(Arc::new(store));

        let result = service.create_task(NewTask::new("   ", None)).await;

        assert!(matches!(
            result,
            Err(TaskServiceError::InvalidInput(ValidationError::EmptyTitle))
        ));
    }

    #[tokio::test]
    async fn can_skip_store_when_patch_title_is_blank() {
        let mut store = MockTaskStore::new();
        store.expect_find_by_id().never();
        store.expect_update().never();
        let service = TaskService::new(Arc::new(store));
        let patch = TaskPatch {
            title: Some(String::new()),
            ..Default::default()
        };

        let result = service.update_task(Uuid::new_v4(), patch).await;

        assert!(matches!(result, Err(TaskServiceError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn can_check_existence_before_deleting() {
        let id = Uuid::new_v4();
        let mut store = MockTaskStore::new();
        store
            .expect_find_by_id()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(None));
        store.expect_delete_by_id().never();
        let service = TaskService::new(Arc::new(store));

        let result = service.delete_task(id).await;

        assert!(matches!(result, Err(TaskServiceError::TaskNotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn can_delete_existing_task() {
        let task = existing_task();
        let id = task.id;
        let mut store = MockTaskStore::new();
        let found = task.clone();
        store
            .expect_find_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(found.clone())));
        store
            .expect_delete_by_id()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(()));
        let service = TaskService::new(Arc::new(store));

        let deleted = service.delete_task(id).await.unwrap();

        assert_eq!(deleted, task);
    }

    #[tokio::test]
    async fn can_stamp_updated_at_on_update() {
        let task = existing_task();
        let id = task.id;
        let mut store = MockTaskStore::new();
        let found = task.clone();
        store
            .expect_find_by_id()
            .returning(move |_| Ok(Some(found.clone())));
        store
            .expect_update()
            .times(1)
            .returning(|task| Ok(Some(task)));
        let service = TaskService::new(Arc::new(store));

        let updated = service
            .update_task(id, TaskPatch::completed(true))
            .await
            .unwrap();

        assert!(updated.is_completed);
        assert_eq!(updated.title, task.title);
        assert_eq!(updated.description, task.description);
        assert_eq!(updated.created_at, task.created_at);
        assert!(updated.updated_at > task.updated_at);
    }

    #[tokio::test]
    async fn can_report_not_found_when_task_vanishes_before_update() {
        let task = existing_task();
        let id = task.id;
        let mut store = MockTaskStore::new();
        store
            .expect_find_by_id()
            .returning(move |_| Ok(Some(task.clone())));
        store.expect_update().times(1).returning(|_| Ok(None));
        let service = TaskService::new(Arc::new(store));

        let result = service.update_task(id, TaskPatch::completed(true)).await;

        assert!(matches!(result, Err(TaskServiceError::TaskNotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn can_surface_store_faults() {
        let mut store = MockTaskStore::new();
        store
            .expect_all()
            .returning(|| Err(StoreError::Database(sea_orm::DbErr::Custom("boom".into()))));
        let service = TaskService::new(Arc::new(store));

        let result = service.list_tasks().await;

        assert!(matches!(result, Err(TaskServiceError::StoreFault(_))));
    }

    #[tokio::test]
    async fn can_order_list_even_when_store_does_not() {
        let base = current_timestamp();
        let mut older = existing_task();
        older.created_at = base - Duration::hours(2);
        let mut newer = existing_task();
        newer.created_at = base - Duration::hours(1);
        let unordered = vec![newer.clone(), older.clone()];
        let mut store = MockTaskStore::new();
        store.expect_all().returning(move || Ok(unordered.clone()));
        let service = TaskService::new(Arc::new(store));

        let tasks = service.list_tasks().await.unwrap();

        assert_eq!(tasks, vec![older, newer]);
    }
}
