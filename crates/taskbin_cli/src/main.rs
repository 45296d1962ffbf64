//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `taskbin_core` linkage.
//! - Run one in-memory lifecycle pass with deterministic output.

use std::error::Error;
use taskbin_core::db::open_db_in_memory;
use taskbin_core::{SqliteTaskStore, TaskEngine};

fn main() -> Result<(), Box<dyn Error>> {
    println!("taskbin_core version={}", taskbin_core::core_version());

    let conn = open_db_in_memory()?;
    let store = SqliteTaskStore::try_new(&conn)?;
    let mut engine = TaskEngine::new(store);

    let id = engine.create("smoke check", None)?;
    engine.toggle_done(id);
    engine.soft_delete(id);
    engine.restore(id);

    println!(
        "lifecycle pass active={} trash={} done={}",
        engine.active().len(),
        engine.trash().len(),
        engine.active().first().is_some_and(|task| task.done)
    );
    Ok(())
}
