//! Todo use-case service.
//!
//! # Responsibility
//! - Provide stable create/update/delete/scope entry points for callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Log events carry ids and error codes only, never titles or descriptions.

use crate::model::todo::{Todo, TodoDraft, TodoId, TodoPatch};
use crate::repo::todo_repo::{RepoResult, TodoListQuery, TodoRepository};
use log::{info, warn};

/// Use-case service wrapper for todo operations.
pub struct TodoService<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a pending todo from a title and optional description.
    pub fn create_todo(
        &self,
        title: impl Into<String>,
        description: Option<String>,
    ) -> RepoResult<Todo> {
        let draft = TodoDraft {
            description,
            ..TodoDraft::new(title)
        };
        self.create(&draft)
    }

    /// Creates a todo from a fully specified draft.
    pub fn create(&self, draft: &TodoDraft) -> RepoResult<Todo> {
        match self.repo.create_todo(draft) {
            Ok(todo) => {
                info!(
                    "event=todo_create module=service status=ok todo_id={} completed={}",
                    todo.id, todo.completed
                );
                Ok(todo)
            }
            Err(err) => {
                warn!(
                    "event=todo_create module=service status=error error_code={}",
                    err.code()
                );
                Err(err)
            }
        }
    }

    pub fn get_todo(&self, id: TodoId) -> RepoResult<Option<Todo>> {
        self.repo.get_todo(id)
    }

    /// Applies field changes to an existing todo.
    ///
    /// Returns repository-level not-found or validation errors unchanged.
    pub fn update_todo(&self, id: TodoId, patch: &TodoPatch) -> RepoResult<Todo> {
        match self.repo.update_todo(id, patch) {
            Ok(todo) => {
                info!("event=todo_update module=service status=ok todo_id={id}");
                Ok(todo)
            }
            Err(err) => {
                warn!(
                    "event=todo_update module=service status=error todo_id={id} error_code={}",
                    err.code()
                );
                Err(err)
            }
        }
    }

    pub fn mark_completed(&self, id: TodoId) -> RepoResult<Todo> {
        self.update_todo(id, &TodoPatch::completed(true))
    }

    pub fn mark_pending(&self, id: TodoId) -> RepoResult<Todo> {
        self.update_todo(id, &TodoPatch::completed(false))
    }

    pub fn delete_todo(&self, id: TodoId) -> RepoResult<()> {
        let result = self.repo.delete_todo(id);
        match &result {
            Ok(()) => info!("event=todo_delete module=service status=ok todo_id={id}"),
            Err(err) => warn!(
                "event=todo_delete module=service status=error todo_id={id} error_code={}",
                err.code()
            ),
        }
        result
    }

    /// All completed todos, in insertion order.
    pub fn list_completed(&self) -> RepoResult<Vec<Todo>> {
        self.repo.list_todos(&TodoListQuery::completed())
    }

    /// All pending todos, in insertion order.
    pub fn list_pending(&self) -> RepoResult<Vec<Todo>> {
        self.repo.list_todos(&TodoListQuery::pending())
    }

    /// All todos, newest `created_at` first.
    pub fn list_recent(&self) -> RepoResult<Vec<Todo>> {
        self.repo.list_todos(&TodoListQuery::recent())
    }

    pub fn list_todos(&self, query: &TodoListQuery) -> RepoResult<Vec<Todo>> {
        self.repo.list_todos(query)
    }
}
