//! Task lifecycle engine.
//!
//! # Responsibility
//! - Own the in-memory Active and Trash collections as private state.
//! - Expose the mutation operations and enforce lifecycle invariants.
//! - Persist affected collections and notify subscribers after each
//!   successful mutation.
//!
//! # Invariants
//! - A task lives in exactly one of Active or Trash, never both.
//! - Insertion order is preserved; cross-collection moves append at the end
//!   of the destination.
//! - Every mutation runs mutate -> persist -> notify to completion;
//!   validation failures reject before any state changes.
//! - No-ops (unknown id) persist nothing and fire no notification.
//!
//! Active-only operations never search Trash and vice versa. That is a
//! documented simplifying assumption, not a defensive gap.

use crate::model::task::{Task, TaskId, TaskValidationError};
use crate::store::{Collection, TaskStore};
use log::{debug, info, warn};

/// Listener invoked synchronously after each successful mutation.
pub type ChangeListener = Box<dyn Fn()>;

/// Lifecycle engine owning the Active and Trash collections.
///
/// Constructed with an injected store; the two collections are loaded once
/// at startup and are exclusively owned by the engine afterwards. The
/// presentation layer reads snapshots via [`active`](Self::active) and
/// [`trash`](Self::trash) and re-renders when a subscribed listener fires.
pub struct TaskEngine<S: TaskStore> {
    store: S,
    active: Vec<Task>,
    trash: Vec<Task>,
    listeners: Vec<ChangeListener>,
}

impl<S: TaskStore> TaskEngine<S> {
    /// Creates an engine, loading both collections from the store.
    pub fn new(store: S) -> Self {
        let active = store.load(Collection::Active);
        let trash = store.load(Collection::Trash);
        info!(
            "event=engine_init module=engine status=ok active={} trash={}",
            active.len(),
            trash.len()
        );
        Self {
            store,
            active,
            trash,
            listeners: Vec::new(),
        }
    }

    /// Current Active collection, in insertion order.
    pub fn active(&self) -> &[Task] {
        &self.active
    }

    /// Current Trash collection, in deletion order.
    pub fn trash(&self) -> &[Task] {
        &self.trash
    }

    /// Registers a change listener.
    ///
    /// All registered listeners are invoked, in registration order, exactly
    /// once per successful mutation.
    pub fn subscribe(&mut self, listener: impl Fn() + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Creates a new task into Active.
    ///
    /// # Errors
    /// - `TaskValidationError::EmptyTitle` when `title` is empty after
    ///   trimming. Nothing is mutated, persisted, or notified in that case.
    pub fn create(
        &mut self,
        title: impl Into<String>,
        deadline: Option<i64>,
    ) -> Result<TaskId, TaskValidationError> {
        let task = match Task::new(title, deadline) {
            Ok(task) => task,
            Err(err) => {
                warn!("event=task_create module=engine status=rejected error={err}");
                return Err(err);
            }
        };
        let id = task.id;

        self.active.push(task);
        self.store.save(Collection::Active, &self.active);
        info!("event=task_create module=engine status=ok id={id}");
        self.notify();
        Ok(id)
    }

    /// Flips the `done` flag of a task in Active.
    ///
    /// Returns `true` when a task was toggled. An id absent from Active
    /// (including one sitting in Trash) is a silent no-op returning `false`.
    pub fn toggle_done(&mut self, id: TaskId) -> bool {
        let Some(task) = self.active.iter_mut().find(|task| task.id == id) else {
            debug!("event=task_toggle module=engine status=noop id={id}");
            return false;
        };
        task.done = !task.done;
        let done = task.done;

        self.store.save(Collection::Active, &self.active);
        info!("event=task_toggle module=engine status=ok id={id} done={done}");
        self.notify();
        true
    }

    /// Moves a task from Active to the end of Trash, unchanged.
    ///
    /// Returns `true` when a task moved; unknown ids are a silent no-op.
    pub fn soft_delete(&mut self, id: TaskId) -> bool {
        let Some(index) = self.active.iter().position(|task| task.id == id) else {
            debug!("event=task_soft_delete module=engine status=noop id={id}");
            return false;
        };
        let task = self.active.remove(index);
        self.trash.push(task);

        self.store.save(Collection::Active, &self.active);
        self.store.save(Collection::Trash, &self.trash);
        info!("event=task_soft_delete module=engine status=ok id={id}");
        self.notify();
        true
    }

    /// Moves a task from Trash back to the end of Active, unchanged.
    ///
    /// `done` and `created_at` are preserved; restore does not reset
    /// recency. Returns `true` when a task moved.
    pub fn restore(&mut self, id: TaskId) -> bool {
        let Some(index) = self.trash.iter().position(|task| task.id == id) else {
            debug!("event=task_restore module=engine status=noop id={id}");
            return false;
        };
        let task = self.trash.remove(index);
        self.active.push(task);

        self.store.save(Collection::Active, &self.active);
        self.store.save(Collection::Trash, &self.trash);
        info!("event=task_restore module=engine status=ok id={id}");
        self.notify();
        true
    }

    /// Permanently removes a task from Trash. The only true destruction
    /// path.
    ///
    /// Returns `true` when a task was removed.
    pub fn hard_delete(&mut self, id: TaskId) -> bool {
        let Some(index) = self.trash.iter().position(|task| task.id == id) else {
            debug!("event=task_hard_delete module=engine status=noop id={id}");
            return false;
        };
        self.trash.remove(index);

        self.store.save(Collection::Trash, &self.trash);
        info!("event=task_hard_delete module=engine status=ok id={id}");
        self.notify();
        true
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener();
        }
    }
}
