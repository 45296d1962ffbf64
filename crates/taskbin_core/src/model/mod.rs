//! Domain model for the task lifecycle.
//!
//! # Responsibility
//! - Define the canonical task record shared by engine and store.
//! - Enforce creation-boundary validation (non-empty title, non-nil id).
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - `created_at` is set once at construction and never mutated.

pub mod task;
