//! Persistence seam for tasks.
//!
//! The [`TaskStore`] trait exposes the raw create/read/update/delete primitives.
//! It performs no validation and no existence checks: those belong to
//! [`TaskService`](crate::task::TaskService), which keeps error kinds
//! consistent across backends.

use async_trait::async_trait;
use sticky_notes_core::Task;
use thiserror::Error;
use uuid::Uuid;

mod database;
mod memory;

pub use database::SeaOrmTaskStore;
pub use memory::InMemoryTaskStore;

/// Errors raised by a task store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Represents a database error.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// Storage primitives for [`Task`] records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Returns every stored task. Callers must not rely on the order.
    async fn all(&self) -> Result<Vec<Task>, StoreError>;

    /// Looks up a task by its ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, StoreError>;

    /// Persists a new, fully formed task and returns the stored row.
    async fn insert(&self, task: Task) -> Result<Task, StoreError>;

    /// Overwrites the row sharing `task.id` and returns the stored row, or
    /// `None` if no such row exists. Never inserts.
    async fn update(&self, task: Task) -> Result<Option<Task>, StoreError>;

    /// Removes the row with the given ID.
    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError>;
}
