//! Core domain logic for taskbin.
//! This crate is the single source of truth for task lifecycle invariants.

pub mod db;
pub mod engine;
pub mod logging;
pub mod model;
pub mod store;

pub use engine::TaskEngine;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Task, TaskId, TaskValidationError};
pub use store::{Collection, SqliteTaskStore, StoreError, StoreResult, TaskStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
