//! Core domain model shared by the Sticky Notes server and client.
pub mod task;

pub use task::{NewTask, Task, TaskPatch, ValidationError, current_timestamp, sort_by_creation};
