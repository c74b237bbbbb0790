use super::{StoreError, TaskStore};
use crate::entities::prelude::Tasks;
use crate::entities::tasks;
use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;
use sticky_notes_core::Task;
use uuid::Uuid;

/// [`TaskStore`] backed by a relational database through SeaORM.
#[derive(Clone, Debug)]
pub struct SeaOrmTaskStore {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmTaskStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<tasks::Model> for Task {
    fn from(model: tasks::Model) -> Self {
        Task {
            id: model.id,
            title: model.title,
            description: model.description,
            is_completed: model.is_completed,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<Task> for tasks::ActiveModel {
    fn from(task: Task) -> Self {
        tasks::ActiveModel {
            id: ActiveValue::Set(task.id),
            title: ActiveValue::Set(task.title),
            description: ActiveValue::Set(task.description),
            is_completed: ActiveValue::Set(task.is_completed),
            created_at: ActiveValue::Set(task.created_at),
            updated_at: ActiveValue::Set(task.updated_at),
        }
    }
}

#[async_trait]
impl TaskStore for SeaOrmTaskStore {
    #[tracing::instrument(skip(self))]
    async fn all(&self) -> Result<Vec<Task>, StoreError> {
        let tasks = Tasks::find()
            .order_by_asc(tasks::Column::CreatedAt)
            .order_by_asc(tasks::Column::Id)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(Task::from)
            .collect();
        Ok(tasks)
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        let task = Tasks::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .map(Task::from);
        Ok(task)
    }

    #[tracing::instrument(skip(self, task), fields(id = %task.id))]
    async fn insert(&self, task: Task) -> Result<Task, StoreError> {
        let created_model = tasks::ActiveModel::from(task)
            .insert(self.db.as_ref())
            .await?;
        Ok(Task::from(created_model))
    }

    #[tracing::instrument(skip(self, task), fields(id = %task.id))]
    async fn update(&self, task: Task) -> Result<Option<Task>, StoreError> {
        match tasks::ActiveModel::from(task).update(self.db.as_ref()).await {
            Ok(updated_model) => Ok(Some(Task::from(updated_model))),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        Tasks::delete_by_id(id)
            .exec(self.db.as_ref())
            .await?;
        Ok(())
    }
}
