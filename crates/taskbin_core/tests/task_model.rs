use taskbin_core::{Task, TaskValidationError};
use uuid::Uuid;

#[test]
fn new_sets_defaults() {
    let task = Task::new("water the plants", None).unwrap();

    assert!(!task.id.is_nil());
    assert_eq!(task.title, "water the plants");
    assert_eq!(task.deadline, None);
    assert!(!task.done);
    assert!(task.created_at > 0);
}

#[test]
fn new_trims_surrounding_whitespace() {
    let task = Task::new("  ship release notes \t", None).unwrap();
    assert_eq!(task.title, "ship release notes");
}

#[test]
fn new_rejects_empty_and_whitespace_titles() {
    let empty = Task::new("", None).unwrap_err();
    assert_eq!(empty, TaskValidationError::EmptyTitle);

    let blank = Task::new("   \t\n", Some(1_700_000_000_000)).unwrap_err();
    assert_eq!(blank, TaskValidationError::EmptyTitle);
}

#[test]
fn with_id_rejects_nil_uuid() {
    let err = Task::with_id(Uuid::nil(), "invalid", None).unwrap_err();
    assert_eq!(err, TaskValidationError::NilId);
}

#[test]
fn serialization_uses_expected_wire_fields() {
    let task_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let mut task = Task::with_id(task_id, "buy milk", Some(1_700_000_360_000)).unwrap();
    task.done = true;

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], task_id.to_string());
    assert_eq!(json["title"], "buy milk");
    assert_eq!(json["deadline"], 1_700_000_360_000_i64);
    assert_eq!(json["done"], true);
    assert_eq!(json["createdAt"], task.created_at);

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn absent_deadline_serializes_as_null() {
    let task = Task::new("no deadline", None).unwrap();
    let json = serde_json::to_value(&task).unwrap();
    assert!(json["deadline"].is_null());
}

#[test]
fn validate_rejects_hand_built_invalid_records() {
    let mut task = Task::new("valid", None).unwrap();
    task.title = "  ".to_string();
    assert_eq!(task.validate().unwrap_err(), TaskValidationError::EmptyTitle);
}
