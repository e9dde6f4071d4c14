//! Schema migrations for the todo store.
//!
//! Each migration is one embedded SQL file. The highest applied version is
//! stored in `PRAGMA user_version`; everything above it runs in a single
//! transaction, so a failed step leaves the schema where it was.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::{Connection, Transaction};

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

impl Migration {
    fn run(&self, tx: &Transaction<'_>) -> DbResult<()> {
        debug!(
            "event=db_migrate module=db status=apply version={} name={}",
            self.version, self.name
        );
        tx.execute_batch(self.sql)?;
        tx.pragma_update(None, "user_version", self.version)?;
        Ok(())
    }
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "create_todos",
    sql: include_str!("0001_create_todos.sql"),
}];

/// Highest schema version this build can produce.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Brings `conn` up to `latest_version()`.
///
/// # Errors
/// - `DbError::UnsupportedSchemaVersion` when the file was written by a
///   newer build.
/// - `DbError::Sqlite` when a migration step fails; nothing is applied.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from_version = current_user_version(conn)?;
    let pending = pending_after(from_version)?;
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in pending {
        migration.run(&tx)?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={from_version} to_version={}",
        latest_version()
    );
    Ok(())
}

/// Reads the schema version recorded in `PRAGMA user_version`.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))?;
    Ok(version)
}

fn pending_after(version: u32) -> DbResult<&'static [Migration]> {
    let latest = latest_version();
    if version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: version,
            latest_supported: latest,
        });
    }
    let first_pending = MIGRATIONS.partition_point(|migration| migration.version <= version);
    Ok(&MIGRATIONS[first_pending..])
}
