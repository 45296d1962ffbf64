//! Persistent store for the two named task collections.
//!
//! # Responsibility
//! - Provide a durable read/write boundary for the Active and Trash slots.
//! - Keep SQL and payload-codec details out of the lifecycle engine.
//!
//! # Invariants
//! - Each `save` replaces the whole slot payload; there are no partial
//!   writes.
//! - `load` never raises: a missing, unreadable, or malformed slot degrades
//!   to an empty collection and is logged.
//! - Save failures are absorbed and logged here; the engine's in-memory
//!   state stays the source of truth for the session.

use crate::db::{migrations, DbError};
use crate::model::task::{Task, TaskValidationError};
use log::{error, warn};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// The two fixed collections a task can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    /// Tasks not yet deleted.
    Active,
    /// Soft-deleted tasks, recoverable until hard-deleted.
    Trash,
}

impl Collection {
    /// Durable slot name for this collection.
    ///
    /// Kept identical to the storage keys of earlier versions of the app so
    /// existing data keeps loading.
    pub const fn slot_name(self) -> &'static str {
        match self {
            Self::Active => "todo_active",
            Self::Trash => "todo_trash",
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Error raised by fallible store internals and connection guards.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Payload(serde_json::Error),
    Validation(TaskValidationError),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Payload(err) => write!(f, "invalid slot payload: {err}"),
            Self::Validation(err) => write!(f, "invalid persisted task: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; run migrations first"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Payload(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Payload(value)
    }
}

impl From<TaskValidationError> for StoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Durable persistence boundary consumed by the lifecycle engine.
///
/// Both methods are infallible by contract: storage trouble must degrade
/// (empty load, dropped save) rather than propagate into lifecycle rules.
pub trait TaskStore {
    /// Loads the full ordered contents of one collection.
    fn load(&self, collection: Collection) -> Vec<Task>;
    /// Replaces the durable contents of one collection. Idempotent.
    fn save(&self, collection: Collection, tasks: &[Task]);
}

/// SQLite-backed task store persisting each collection as one JSON payload.
pub struct SqliteTaskStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskStore<'conn> {
    /// Wraps a connection after verifying it is migrated and carries the
    /// `slots` table.
    ///
    /// # Errors
    /// - `StoreError::UninitializedConnection` when `PRAGMA user_version`
    ///   does not match the latest migration.
    /// - `StoreError::MissingRequiredTable` when the `slots` table is absent.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        let expected_version = migrations::latest_version();
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version != expected_version {
            return Err(StoreError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let slots_exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'slots'
            );",
            [],
            |row| row.get(0),
        )?;
        if slots_exists == 0 {
            return Err(StoreError::MissingRequiredTable("slots"));
        }

        Ok(Self { conn })
    }

    fn try_load(&self, collection: Collection) -> StoreResult<Vec<Task>> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM slots WHERE name = ?1;",
                [collection.slot_name()],
                |row| row.get(0),
            )
            .optional()?;

        let Some(payload) = payload else {
            return Ok(Vec::new());
        };

        let tasks: Vec<Task> = serde_json::from_str(&payload)?;
        for task in &tasks {
            task.validate()?;
        }

        Ok(tasks)
    }

    fn try_save(&self, collection: Collection, tasks: &[Task]) -> StoreResult<()> {
        let payload = serde_json::to_string(tasks)?;
        self.conn.execute(
            "INSERT INTO slots (name, payload, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(name) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![collection.slot_name(), payload],
        )?;
        Ok(())
    }
}

impl TaskStore for SqliteTaskStore<'_> {
    fn load(&self, collection: Collection) -> Vec<Task> {
        match self.try_load(collection) {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!(
                    "event=slot_load module=store status=degraded slot={} error={}",
                    collection.slot_name(),
                    err
                );
                Vec::new()
            }
        }
    }

    fn save(&self, collection: Collection, tasks: &[Task]) {
        if let Err(err) = self.try_save(collection, tasks) {
            error!(
                "event=slot_save module=store status=error slot={} count={} error={}",
                collection.slot_name(),
                tasks.len(),
                err
            );
        }
    }
}
