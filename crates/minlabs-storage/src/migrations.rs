//! Database migrations
//!
//! The applied version lives in SQLite's `user_version` header field, so the
//! schema carries no bookkeeping table of its own.

use crate::Result;
use rusqlite::Connection;

/// Ordered schema steps. Step `n` upgrades a database at version `n` to `n + 1`.
const MIGRATIONS: &[(&str, &str)] = &[(
    "local storage table",
    r#"
    CREATE TABLE IF NOT EXISTS local_storage (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    "#,
)];

pub fn run_migrations(conn: &Connection) -> Result<()> {
    let applied: usize = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    for (version, (name, sql)) in MIGRATIONS.iter().enumerate().skip(applied) {
        let target = version + 1;
        tracing::info!(version = target, name = %name, "Running storage migration");

        conn.execute_batch(sql)?;
        conn.pragma_update(None, "user_version", target)?;
    }

    Ok(())
}
