mod common;

use common::{
    completed_todo, todo, todo_titled, todo_with_long_description, todo_with_long_title,
    todo_without_description,
};
use todos_core::{FieldErrorKind, Todo, TodoDraft, TodoField, TodoPatch};
use uuid::Uuid;

#[test]
fn title_of_minimum_length_is_valid() {
    assert!(todo_titled("Buy").validate().is_ok());
}

#[test]
fn title_shorter_than_three_characters_is_invalid() {
    let err = todo_titled("Hi").validate().unwrap_err();
    assert!(err
        .messages_for(TodoField::Title)
        .contains(&"is too short (minimum is 3 characters)".to_string()));
}

#[test]
fn title_longer_than_one_hundred_characters_is_invalid() {
    let err = todo_titled(&"A".repeat(101)).validate().unwrap_err();
    assert!(err
        .messages_for(TodoField::Title)
        .contains(&"is too long (maximum is 100 characters)".to_string()));
}

#[test]
fn every_title_length_in_range_is_valid() {
    for len in 3..=100 {
        let title = "A".repeat(len);
        assert!(todo_titled(&title).validate().is_ok(), "length {len}");
    }
    assert!(todo_with_long_title().validate().is_ok());
}

#[test]
fn blank_title_is_invalid() {
    let err = todo_titled("").validate().unwrap_err();
    assert!(err
        .messages_for(TodoField::Title)
        .contains(&"can't be blank".to_string()));
}

#[test]
fn absent_title_is_invalid() {
    let draft = TodoDraft {
        title: None,
        ..todo()
    };
    let err = draft.validate().unwrap_err();
    assert!(err.has_error(TodoField::Title, FieldErrorKind::Blank));
}

#[test]
fn description_is_optional_and_capped_at_five_hundred_characters() {
    assert!(todo_without_description().validate().is_ok());
    assert!(todo().with_description("").validate().is_ok());
    assert!(todo_with_long_description().validate().is_ok());

    let err = todo()
        .with_description("A".repeat(501))
        .validate()
        .unwrap_err();
    assert_eq!(
        err.messages_for(TodoField::Description),
        vec!["is too long (maximum is 500 characters)"]
    );
    assert!(err.messages_for(TodoField::Title).is_empty());
}

#[test]
fn completed_accepts_both_booleans_but_not_null() {
    assert!(todo().with_completed(true).validate().is_ok());
    assert!(todo().with_completed(false).validate().is_ok());

    let draft = TodoDraft {
        completed: None,
        ..todo()
    };
    let err = draft.validate().unwrap_err();
    assert_eq!(
        err.messages_for(TodoField::Completed),
        vec!["is not included in the list"]
    );
}

#[test]
fn completed_defaults_to_false() {
    let draft = TodoDraft::new("Test todo");
    assert_eq!(draft.completed, Some(false));
    assert_eq!(TodoDraft::default().completed, Some(false));
}

#[test]
fn is_pending_mirrors_completed_flag() {
    let mut todo = sample_todo();
    assert!(todo.is_pending());

    todo.completed = true;
    assert!(!todo.is_pending());
}

#[test]
fn factories_are_valid() {
    assert!(todo().validate().is_ok());
    assert!(completed_todo().validate().is_ok());
    assert!(todo_without_description().validate().is_ok());
}

#[test]
fn patch_applies_only_present_fields() {
    let original = sample_todo();

    let renamed = TodoPatch {
        title: Some("Walk the dog".to_string()),
        ..TodoPatch::default()
    }
    .apply_to(&original);
    assert_eq!(renamed.title, "Walk the dog");
    assert_eq!(renamed.description, original.description);
    assert!(!renamed.completed);

    let cleared = TodoPatch {
        description: Some(None),
        ..TodoPatch::default()
    }
    .apply_to(&original);
    assert_eq!(cleared.description, None);

    assert!(TodoPatch::default().is_empty());
    assert!(!TodoPatch::completed(true).is_empty());
}

#[test]
fn todo_serialization_uses_column_names() {
    let todo = sample_todo();

    let json = serde_json::to_value(&todo).unwrap();
    assert_eq!(json["id"], todo.id.to_string());
    assert_eq!(json["title"], "Buy groceries");
    assert_eq!(json["completed"], false);
    assert_eq!(json["created_at"], 1_700_000_000_000_i64);

    let decoded: Todo = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, todo);
}

#[test]
fn deserialize_rejects_invalid_title() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "title": "Hi",
        "description": null,
        "completed": false,
        "created_at": 1,
        "updated_at": 1
    });

    let err = serde_json::from_value::<Todo>(value).unwrap_err();
    assert!(
        err.to_string().contains("Title is too short"),
        "unexpected error: {err}"
    );
}

fn sample_todo() -> Todo {
    Todo {
        id: Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap(),
        title: "Buy groceries".to_string(),
        description: Some("milk".to_string()),
        completed: false,
        created_at: 1_700_000_000_000,
        updated_at: 1_700_000_000_000,
    }
}
