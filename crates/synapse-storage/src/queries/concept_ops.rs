//! Concept read/write operations.

use rusqlite::{params, Connection, OptionalExtension};

use synapse_core::errors::SynapseResult;
use synapse_core::link::Concept;

use crate::to_storage_err;

pub fn put_concept(conn: &Connection, tenant_id: &str, concept: &Concept) -> SynapseResult<()> {
    conn.execute(
        "INSERT INTO concepts (name, tenant_id, description)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(name, tenant_id) DO UPDATE SET description = excluded.description",
        params![concept.name, tenant_id, concept.description],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn get_concept(
    conn: &Connection,
    tenant_id: &str,
    name: &str,
) -> SynapseResult<Option<Concept>> {
    conn.query_row(
        "SELECT name, description FROM concepts WHERE name = ?1 AND tenant_id = ?2",
        params![name, tenant_id],
        |row| {
            Ok(Concept {
                name: row.get(0)?,
                description: row.get(1)?,
            })
        },
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))
}
