//! Versioned schema migrations.

mod v001_initial;

use rusqlite::Connection;

use synapse_core::errors::{StorageError, SynapseResult};

use crate::to_storage_err;

/// Current schema version.
const SCHEMA_VERSION: u32 = 1;

/// Run all pending migrations.
pub fn run_migrations(conn: &Connection) -> SynapseResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version     INTEGER PRIMARY KEY,
            applied_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let current: u32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    if current < 1 {
        v001_initial::migrate(conn).map_err(|e| StorageError::MigrationFailed {
            version: 1,
            reason: e.to_string(),
        })?;
        conn.execute("INSERT INTO schema_version (version) VALUES (1)", [])
            .map_err(|e| to_storage_err(e.to_string()))?;
    }

    debug_assert!(current <= SCHEMA_VERSION);
    Ok(())
}
