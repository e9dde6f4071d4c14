//! Shared factories for integration tests.
#![allow(dead_code)]

use rusqlite::{params, Connection};
use todos_core::{TodoDraft, TodoId};

pub const DEFAULT_TITLE: &str = "Buy groceries";
pub const DEFAULT_DESCRIPTION: &str = "Need to buy milk, bread, and eggs from the store";

/// Default pending todo with a description.
pub fn todo() -> TodoDraft {
    TodoDraft::new(DEFAULT_TITLE).with_description(DEFAULT_DESCRIPTION)
}

pub fn completed_todo() -> TodoDraft {
    todo().with_completed(true)
}

pub fn todo_without_description() -> TodoDraft {
    TodoDraft {
        description: None,
        ..todo()
    }
}

pub fn todo_with_long_title() -> TodoDraft {
    TodoDraft {
        title: Some("A".repeat(100)),
        ..todo()
    }
}

pub fn todo_with_long_description() -> TodoDraft {
    todo().with_description("A".repeat(500))
}

pub fn todo_titled(title: &str) -> TodoDraft {
    TodoDraft {
        title: Some(title.to_string()),
        ..todo()
    }
}

/// Rewrites `created_at` directly, bypassing the repository.
pub fn set_created_at(conn: &Connection, id: TodoId, created_at: i64) {
    conn.execute(
        "UPDATE todos SET created_at = ?1 WHERE id = ?2;",
        params![created_at, id.to_string()],
    )
    .unwrap();
}
