//! Todo domain model and field validation.
//!
//! # Responsibility
//! - Define the persisted `Todo` record and its unsaved/patch input shapes.
//! - Own the validation rules applied before every write.
//!
//! # Invariants
//! - `title` is present, not blank, and 3..=100 characters long.
//! - `description`, when present, is at most 500 characters long.
//! - `completed` is always an explicit boolean.
//!
//! # See also
//! - crates/todos_core/src/db/migrations/0001_create_todos.sql

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a persisted todo.
pub type TodoId = Uuid;

pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Persisted todo record as read back from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TodoWire")]
pub struct Todo {
    /// Generated by core at insert time.
    pub id: TodoId,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    /// Unix epoch milliseconds, assigned by storage.
    pub created_at: i64,
    /// Unix epoch milliseconds, refreshed on every update.
    pub updated_at: i64,
}

impl Todo {
    /// Validates the full record against field rules.
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        validate_fields(
            Some(self.title.as_str()),
            self.description.as_deref(),
            Some(self.completed),
        )
    }

    /// Returns `true` when the todo is not completed yet.
    pub fn is_pending(&self) -> bool {
        !self.completed
    }
}

#[derive(Deserialize)]
struct TodoWire {
    id: TodoId,
    title: String,
    description: Option<String>,
    completed: bool,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<TodoWire> for Todo {
    type Error = TodoValidationError;

    fn try_from(value: TodoWire) -> Result<Self, Self::Error> {
        let todo = Self {
            id: value.id,
            title: value.title,
            description: value.description,
            completed: value.completed,
            created_at: value.created_at,
            updated_at: value.updated_at,
        };
        todo.validate()?;
        Ok(todo)
    }
}

/// Unsaved todo input.
///
/// Fields are optional so that absent values can be validated (and, on the
/// unchecked write path, reach the storage constraints) instead of being
/// ruled out by the type system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    /// `None` is an explicit null and fails validation.
    pub completed: Option<bool>,
}

impl TodoDraft {
    /// Creates a draft with no description and `completed = false`.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: None,
            completed: Some(false),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn validate(&self) -> Result<(), TodoValidationError> {
        validate_fields(
            self.title.as_deref(),
            self.description.as_deref(),
            self.completed,
        )
    }
}

impl Default for TodoDraft {
    fn default() -> Self {
        Self {
            title: None,
            description: None,
            completed: Some(false),
        }
    }
}

/// Partial update applied on top of a persisted todo.
///
/// `None` leaves a field untouched; `description: Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    /// Returns `true` when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }

    /// Returns a copy of `todo` with this patch applied. Does not validate.
    pub fn apply_to(&self, todo: &Todo) -> Todo {
        let mut next = todo.clone();
        if let Some(title) = &self.title {
            next.title = title.clone();
        }
        if let Some(description) = &self.description {
            next.description = description.clone();
        }
        if let Some(completed) = self.completed {
            next.completed = completed;
        }
        next
    }
}

/// Validated field of a todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TodoField {
    Title,
    Description,
    Completed,
}

impl TodoField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Completed => "completed",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::Completed => "Completed",
        }
    }
}

/// Reason a single field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    Blank,
    TooShort { minimum: usize },
    TooLong { maximum: usize },
    NotIncluded,
}

impl Display for FieldErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blank => write!(f, "can't be blank"),
            Self::TooShort { minimum } => {
                write!(f, "is too short (minimum is {minimum} characters)")
            }
            Self::TooLong { maximum } => {
                write!(f, "is too long (maximum is {maximum} characters)")
            }
            Self::NotIncluded => write!(f, "is not included in the list"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: TodoField,
    pub kind: FieldErrorKind,
}

impl FieldError {
    /// Field-relative message, e.g. `is too short (minimum is 3 characters)`.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.field.label(), self.kind)
    }
}

/// Structured validation failure carrying every field error found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoValidationError {
    errors: Vec<FieldError>,
}

impl TodoValidationError {
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Returns messages for one field in rule order.
    pub fn messages_for(&self, field: TodoField) -> Vec<String> {
        self.errors
            .iter()
            .filter(|error| error.field == field)
            .map(FieldError::message)
            .collect()
    }

    pub fn has_error(&self, field: TodoField, kind: FieldErrorKind) -> bool {
        self.errors
            .iter()
            .any(|error| error.field == field && error.kind == kind)
    }

    pub fn fields(&self) -> Vec<TodoField> {
        let mut fields: Vec<TodoField> = Vec::new();
        for error in &self.errors {
            if !fields.contains(&error.field) {
                fields.push(error.field);
            }
        }
        fields
    }
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        write!(f, "validation failed: {}", messages.join(", "))
    }
}

impl Error for TodoValidationError {}

/// Checks raw field values against every rule and collects all failures.
pub fn validate_fields(
    title: Option<&str>,
    description: Option<&str>,
    completed: Option<bool>,
) -> Result<(), TodoValidationError> {
    let mut errors = Vec::new();

    let title = title.unwrap_or("");
    if title.trim().is_empty() {
        errors.push(FieldError {
            field: TodoField::Title,
            kind: FieldErrorKind::Blank,
        });
    }
    let title_chars = title.chars().count();
    if title_chars < TITLE_MIN_CHARS {
        errors.push(FieldError {
            field: TodoField::Title,
            kind: FieldErrorKind::TooShort {
                minimum: TITLE_MIN_CHARS,
            },
        });
    } else if title_chars > TITLE_MAX_CHARS {
        errors.push(FieldError {
            field: TodoField::Title,
            kind: FieldErrorKind::TooLong {
                maximum: TITLE_MAX_CHARS,
            },
        });
    }

    if let Some(description) = description {
        if description.chars().count() > DESCRIPTION_MAX_CHARS {
            errors.push(FieldError {
                field: TodoField::Description,
                kind: FieldErrorKind::TooLong {
                    maximum: DESCRIPTION_MAX_CHARS,
                },
            });
        }
    }

    if completed.is_none() {
        errors.push(FieldError {
            field: TodoField::Completed,
            kind: FieldErrorKind::NotIncluded,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(TodoValidationError { errors })
    }
}
