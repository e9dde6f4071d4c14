//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `todos_core` linkage and schema bootstrap from a real binary.
//! - Print scope counts for an optional database file argument.
//!
//! Usage: `todos_cli [DB_PATH]` (defaults to an in-memory database).
//! Set `TODOS_LOG_DIR` to an absolute directory to enable file logging.

use std::process::ExitCode;
use todos_core::db::{open_db, open_db_in_memory};
use todos_core::{default_log_level, init_logging, SqliteTodoRepository, TodoService};

const LOG_DIR_ENV: &str = "TODOS_LOG_DIR";

fn main() -> ExitCode {
    println!("todos_core version={}", todos_core::core_version());

    if let Ok(log_dir) = std::env::var(LOG_DIR_ENV) {
        if let Err(err) = init_logging(default_log_level(), &log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    match run(std::env::args().nth(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(db_path: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let conn = match db_path.as_deref() {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let service = TodoService::new(SqliteTodoRepository::try_new(&conn)?);

    let recent = service.list_recent()?;
    let pending = recent.iter().filter(|todo| todo.is_pending()).count();
    let completed = recent.len() - pending;
    println!("todos pending={pending} completed={completed}");

    if let Some(latest) = recent.first() {
        println!("todos latest_id={} created_at={}", latest.id, latest.created_at);
    }

    Ok(())
}
