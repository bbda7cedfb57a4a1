use std::path::Path;

use rusqlite::Connection;

use super::DatabaseError;

/// Schema steps in order. Each script records its own version.
const MIGRATIONS: &[(i64, &str)] = &[(1, include_str!("../../resources/migrations/001_initial.sql"))];

/// Open the health log at `path`, creating parent directories and the file
/// on first use, and bring the schema up to date.
pub fn open_database(path: &Path) -> Result<Connection, DatabaseError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let conn = Connection::open(path)?;
    prepare(&conn)?;
    tracing::debug!(path = %path.display(), "Opened health log database");
    Ok(conn)
}

/// Throwaway database with the current schema.
pub fn open_memory_database() -> Result<Connection, DatabaseError> {
    let conn = Connection::open_in_memory()?;
    prepare(&conn)?;
    Ok(conn)
}

fn prepare(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch("PRAGMA journal_mode=DELETE; PRAGMA foreign_keys=ON;")?;
    run_migrations(conn)
}

/// Apply every step newer than the recorded schema version.
pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    let applied = applied_version(conn)?;

    for &(version, script) in MIGRATIONS.iter().filter(|(v, _)| *v > applied) {
        tracing::info!(version, from = applied, "Applying schema migration");
        conn.execute_batch(script)
            .map_err(|e| DatabaseError::MigrationFailed {
                version,
                reason: e.to_string(),
            })?;
    }

    Ok(())
}

/// Highest recorded version. A database without the version table is at 0;
/// any other read failure is an error rather than a reason to migrate again.
fn applied_version(conn: &Connection) -> Result<i64, DatabaseError> {
    let tracked: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version')",
        [],
        |row| row.get(0),
    )?;
    if !tracked {
        return Ok(0);
    }

    let version = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}
