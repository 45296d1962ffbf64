//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record persisted in Active/Trash slots.
//! - Validate the creation boundary so no empty-titled task can exist.
//!
//! # Invariants
//! - `id` is stable for the task's lifetime and never reused.
//! - `created_at` is assigned at construction and never mutated afterwards;
//!   moving a task between collections does not touch it.
//! - `title` is stored trimmed and is never empty.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for every task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Validation failure raised at the task creation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title was empty or whitespace-only after trimming.
    EmptyTitle,
    /// A caller-provided id was the nil uuid.
    NilId,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
            Self::NilId => write!(f, "task id must not be the nil uuid"),
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical task record.
///
/// Field names on the wire match the external storage schema, so data written
/// by earlier versions of the app deserializes unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable global id used for lookups across both collections.
    pub id: TaskId,
    /// Display title. Stored trimmed; never empty.
    pub title: String,
    /// Optional deadline in Unix epoch milliseconds. `None` means no deadline.
    pub deadline: Option<i64>,
    /// Completion flag. Only mutated while the task lives in Active.
    pub done: bool,
    /// Creation time in Unix epoch milliseconds. Serialized as `createdAt`
    /// to match the external schema naming.
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

impl Task {
    /// Creates a new task with a generated v4 id, `done = false` and
    /// `created_at = now`.
    ///
    /// # Errors
    /// - `TaskValidationError::EmptyTitle` when `title` trims to nothing.
    pub fn new(
        title: impl Into<String>,
        deadline: Option<i64>,
    ) -> Result<Self, TaskValidationError> {
        Self::with_id(Uuid::new_v4(), title, deadline)
    }

    /// Creates a task with a caller-provided stable id.
    ///
    /// Used by import and test paths where identity already exists.
    ///
    /// # Errors
    /// - `TaskValidationError::NilId` when `id` is the nil uuid.
    /// - `TaskValidationError::EmptyTitle` when `title` trims to nothing.
    pub fn with_id(
        id: TaskId,
        title: impl Into<String>,
        deadline: Option<i64>,
    ) -> Result<Self, TaskValidationError> {
        let task = Self {
            id,
            title: title.into().trim().to_string(),
            deadline,
            done: false,
            created_at: now_epoch_ms(),
        };
        task.validate()?;
        Ok(task)
    }

    /// Checks the invariants that must hold for any persisted task.
    ///
    /// Read paths run this on deserialized data so a hand-edited or corrupted
    /// slot cannot smuggle an invalid record into the engine.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        Ok(())
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64)
}
