//! Todo repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and scope queries over the `todos` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths validate before SQL mutations, except the explicit
//!   `create_todo_unchecked` bypass.
//! - Every write runs in a single transaction and returns the stored row.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::{current_user_version, latest_version, DbError};
use crate::model::todo::{Todo, TodoDraft, TodoId, TodoPatch, TodoValidationError};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const TODO_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    completed,
    created_at,
    updated_at
FROM todos";

const NOW_EPOCH_MS_SQL: &str = "CAST((julianday('now') - 2440587.5) * 86400000 AS INTEGER)";

const REQUIRED_COLUMNS: [&str; 6] = [
    "id",
    "title",
    "description",
    "completed",
    "created_at",
    "updated_at",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for todo persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Field rules rejected the record before it reached storage.
    Validation(TodoValidationError),
    Db(DbError),
    NotFound(TodoId),
    /// A storage constraint (NOT NULL, CHECK, PRIMARY KEY) rejected a write.
    ConstraintViolation(String),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl RepoError {
    /// Stable machine-readable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::Db(_) => "db_error",
            Self::NotFound(_) => "not_found",
            Self::ConstraintViolation(_) => "constraint_violation",
            Self::InvalidData(_) => "invalid_data",
            Self::UninitializedConnection { .. } => "uninitialized_connection",
            Self::MissingRequiredTable(_) => "missing_table",
            Self::MissingRequiredColumn { .. } => "missing_column",
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "todo not found: {id}"),
            Self::ConstraintViolation(message) => {
                write!(f, "storage constraint violated: {message}")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted todo data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} is behind required {expected_version}; open it with open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TodoValidationError> for RepoError {
    fn from(value: TodoValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::Sqlite(err) => Self::from(err),
            other => Self::Db(other),
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        if value.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) {
            return Self::ConstraintViolation(value.to_string());
        }
        Self::Db(DbError::Sqlite(value))
    }
}

/// Row ordering for list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TodoOrder {
    /// Storage insertion order. Used when a scope leaves order unspecified.
    #[default]
    Insertion,
    /// `created_at` descending; ties resolve to the later insert first.
    RecentFirst,
}

/// Query options for listing todos.
///
/// The named constructors are the store's scopes; they compose through
/// struct update syntax or the chaining helpers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoListQuery {
    /// `Some(flag)` keeps only rows whose `completed` equals `flag`.
    pub completed: Option<bool>,
    pub order: TodoOrder,
    pub limit: Option<u32>,
    pub offset: u32,
}

impl TodoListQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn completed() -> Self {
        Self {
            completed: Some(true),
            ..Self::default()
        }
    }

    pub fn pending() -> Self {
        Self {
            completed: Some(false),
            ..Self::default()
        }
    }

    pub fn recent() -> Self {
        Self {
            order: TodoOrder::RecentFirst,
            ..Self::default()
        }
    }

    pub fn most_recent_first(mut self) -> Self {
        self.order = TodoOrder::RecentFirst;
        self
    }

    pub fn page(mut self, limit: u32, offset: u32) -> Self {
        self.limit = Some(limit);
        self.offset = offset;
        self
    }
}

/// Repository interface for todo CRUD and scope queries.
pub trait TodoRepository {
    /// Validates and inserts a draft, returning the stored record.
    fn create_todo(&self, draft: &TodoDraft) -> RepoResult<Todo>;
    fn get_todo(&self, id: TodoId) -> RepoResult<Option<Todo>>;
    /// Applies `patch`, re-validates the full record and writes it back.
    fn update_todo(&self, id: TodoId, patch: &TodoPatch) -> RepoResult<Todo>;
    fn delete_todo(&self, id: TodoId) -> RepoResult<()>;
    fn list_todos(&self, query: &TodoListQuery) -> RepoResult<Vec<Todo>>;
}

/// SQLite-backed todo repository.
pub struct SqliteTodoRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTodoRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema
    ///   does not match what this repository reads and writes.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_todo_connection_ready(conn)?;
        Ok(Self { conn })
    }

    /// Inserts a draft without running field validation.
    ///
    /// Storage constraints still apply, so a missing title or a null
    /// `completed` fails with `RepoError::ConstraintViolation`.
    pub fn create_todo_unchecked(&self, draft: &TodoDraft) -> RepoResult<Todo> {
        self.insert_draft(draft)
    }

    fn insert_draft(&self, draft: &TodoDraft) -> RepoResult<Todo> {
        let id = Uuid::new_v4();
        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            "INSERT INTO todos (
                id,
                title,
                description,
                completed
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                id.to_string(),
                draft.title.as_deref(),
                draft.description.as_deref(),
                draft.completed.map(bool_to_int),
            ],
        )?;

        let stored = load_todo(&tx, id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("inserted todo {id} could not be read back"))
        })?;
        tx.commit()?;
        Ok(stored)
    }
}

impl TodoRepository for SqliteTodoRepository<'_> {
    fn create_todo(&self, draft: &TodoDraft) -> RepoResult<Todo> {
        draft.validate()?;
        self.insert_draft(draft)
    }

    fn get_todo(&self, id: TodoId) -> RepoResult<Option<Todo>> {
        load_todo(self.conn, id)
    }

    fn update_todo(&self, id: TodoId, patch: &TodoPatch) -> RepoResult<Todo> {
        let tx = self.conn.unchecked_transaction()?;
        let current = load_todo(&tx, id)?.ok_or(RepoError::NotFound(id))?;

        let next = patch.apply_to(&current);
        next.validate()?;

        tx.execute(
            &format!(
                "UPDATE todos
                 SET
                    title = ?1,
                    description = ?2,
                    completed = ?3,
                    updated_at = {NOW_EPOCH_MS_SQL}
                 WHERE id = ?4;"
            ),
            params![
                next.title.as_str(),
                next.description.as_deref(),
                bool_to_int(next.completed),
                id.to_string(),
            ],
        )?;

        let stored = load_todo(&tx, id)?.ok_or(RepoError::NotFound(id))?;
        tx.commit()?;
        Ok(stored)
    }

    fn delete_todo(&self, id: TodoId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM todos WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn list_todos(&self, query: &TodoListQuery) -> RepoResult<Vec<Todo>> {
        let mut sql = format!("{TODO_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(completed) = query.completed {
            sql.push_str(" AND completed = ?");
            bind_values.push(Value::Integer(bool_to_int(completed)));
        }

        match query.order {
            TodoOrder::Insertion => sql.push_str(" ORDER BY rowid ASC"),
            TodoOrder::RecentFirst => sql.push_str(" ORDER BY created_at DESC, rowid DESC"),
        }

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut todos = Vec::new();

        while let Some(row) = rows.next()? {
            todos.push(parse_todo_row(row)?);
        }

        Ok(todos)
    }
}

fn load_todo(conn: &Connection, id: TodoId) -> RepoResult<Option<Todo>> {
    let mut stmt = conn.prepare(&format!("{TODO_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id.to_string()])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_todo_row(row)?));
    }
    Ok(None)
}

fn parse_todo_row(row: &Row<'_>) -> RepoResult<Todo> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in todos.id"))
    })?;

    let completed = match row.get::<_, i64>("completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid completed value `{other}` in todos.completed"
            )));
        }
    };

    let todo = Todo {
        id,
        title: row.get("title")?,
        description: row.get("description")?,
        completed,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    todo.validate().map_err(|err| {
        RepoError::InvalidData(format!("todo {id} fails validation: {err}"))
    })?;
    Ok(todo)
}

fn ensure_todo_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version < expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "todos")? {
        return Err(RepoError::MissingRequiredTable("todos"));
    }

    for column in REQUIRED_COLUMNS {
        if !table_has_column(conn, "todos", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "todos",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn bool_to_int(value: bool) -> i64 {
    i64::from(value)
}

#[cfg(test)]
mod tests {
    use super::{TodoListQuery, TodoOrder};

    #[test]
    fn scopes_compose_filter_and_order() {
        let query = TodoListQuery::pending().most_recent_first().page(5, 10);
        assert_eq!(query.completed, Some(false));
        assert_eq!(query.order, TodoOrder::RecentFirst);
        assert_eq!(query.limit, Some(5));
        assert_eq!(query.offset, 10);
    }

    #[test]
    fn default_query_lists_everything_in_insertion_order() {
        let query = TodoListQuery::all();
        assert_eq!(query.completed, None);
        assert_eq!(query.order, TodoOrder::Insertion);
    }
}
