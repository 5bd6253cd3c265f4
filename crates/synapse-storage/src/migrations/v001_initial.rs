//! v001: concepts, attention_links.

use rusqlite::Connection;

use synapse_core::errors::SynapseResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> SynapseResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS concepts (
            name        TEXT NOT NULL,
            tenant_id   TEXT NOT NULL,
            description TEXT,
            created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            PRIMARY KEY (name, tenant_id)
        );

        CREATE TABLE IF NOT EXISTS attention_links (
            concept_a      TEXT NOT NULL,
            concept_b      TEXT NOT NULL,
            tenant_id      TEXT NOT NULL,
            strength       REAL NOT NULL CHECK (strength >= 0.0 AND strength <= 1.0),
            link_type      TEXT NOT NULL CHECK (link_type IN ('hebbian', 'neural')),
            last_activated TEXT NOT NULL,
            PRIMARY KEY (concept_a, concept_b, tenant_id)
        );

        CREATE INDEX IF NOT EXISTS idx_links_tenant ON attention_links(tenant_id);
        CREATE INDEX IF NOT EXISTS idx_links_strength ON attention_links(tenant_id, strength);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
