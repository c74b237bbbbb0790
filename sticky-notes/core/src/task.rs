use chrono::{DateTime, SubsecRound, Utc};
use std::cmp::Ordering;
use thiserror::Error;
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A titled, optionally described, completable note.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Task {
    /// Unique identifier, assigned at creation
    pub id: Uuid,
    /// Short title of the note
    pub title: String,
    /// Optional free-form body
    pub description: Option<String>,
    /// Whether the task has been marked done
    pub is_completed: bool,
    /// Creation time, never changes
    pub created_at: DateTime<Utc>,
    /// Time of the last successful update
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewTask {
    /// Title of the new task, must not be blank
    pub title: String,
    /// Optional description
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
}

/// Partial update of a task. Absent fields leave the stored value unchanged.
///
/// `description` has three states: `None` leaves it alone, `Some(None)` clears
/// it and `Some(Some(_))` replaces it. On the wire these are an absent key, a
/// `null` and a string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TaskPatch {
    /// Replacement title, must not be blank when present
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub title: Option<String>,
    /// Replacement description; `null` clears it
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            skip_serializing_if = "Option::is_none",
            deserialize_with = "deserialize_present"
        )
    )]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    pub description: Option<Option<String>>,
    /// Replacement completion flag
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub is_completed: Option<bool>,
}

/// Errors raised when task input fails validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title must not be empty")]
    EmptyTitle,
}

/// Maps a key that is present in the payload to `Some`, even when its value is `null`.
#[cfg(feature = "serde")]
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(())
}

/// Current time truncated to microseconds, the precision relational stores keep.
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

impl NewTask {
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            title: title.into(),
            description,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)
    }
}

impl TaskPatch {
    /// Patch that only flips the completion flag.
    pub fn completed(is_completed: bool) -> Self {
        Self {
            is_completed: Some(is_completed),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.title {
            Some(title) => validate_title(title),
            None => Ok(()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.is_completed.is_none()
    }
}

impl Task {
    /// Builds a fresh task from validated input. `created_at` and `updated_at` are both `now`.
    pub fn create(input: NewTask, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        input.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            is_completed: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies the fields present in `patch` and stamps `updated_at`.
    ///
    /// `updated_at` never moves before `created_at`, even if the clock does.
    pub fn apply(&mut self, patch: TaskPatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(is_completed) = patch.is_completed {
            self.is_completed = is_completed;
        }
        self.updated_at = now.max(self.created_at);
    }

    /// Listing order: oldest first, ties broken by id.
    pub fn cmp_by_creation(&self, other: &Self) -> Ordering {
        self.created_at
            .cmp(&other.created_at)
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// Sorts tasks into listing order.
pub fn sort_by_creation(tasks: &mut [Task]) {
    tasks.sort_by(Task::cmp_by_creation);
}
