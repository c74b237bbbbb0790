use super::{StoreError, TaskStore};
use async_trait::async_trait;
use std::collections::HashMap;
use sticky_notes_core::Task;
use tokio::sync::RwLock;
use uuid::Uuid;

/// [`TaskStore`] holding tasks in process memory. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct InMemoryTaskStore {
    tasks: RwLock<HashMap<Uuid, Task>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given tasks.
    pub fn with_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        Self {
            tasks: RwLock::new(tasks.into_iter().map(|task| (task.id, task)).collect()),
        }
    }

    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tasks.read().await.is_empty()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn all(&self) -> Result<Vec<Task>, StoreError> {
        Ok(self.tasks.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        Ok(self.tasks.read().await.get(&id).cloned())
    }

    async fn insert(&self, task: Task) -> Result<Task, StoreError> {
        self.tasks.write().await.insert(task.id, task.clone());
        Ok(task)
    }

    async fn update(&self, task: Task) -> Result<Option<Task>, StoreError> {
        let mut tasks = self.tasks.write().await;
        match tasks.get_mut(&task.id) {
            Some(stored) => {
                *stored = task.clone();
                Ok(Some(task))
            }
            None => Ok(None),
        }
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        self.tasks.write().await.remove(&id);
        Ok(())
    }
}
