//! Attention-link upsert and read operations.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use synapse_core::errors::SynapseResult;
use synapse_core::link::{canonical_pair, AttentionLink, LinkType};

use crate::to_storage_err;

fn link_from_row(row: &Row<'_>) -> rusqlite::Result<AttentionLink> {
    let link_type: String = row.get(4)?;
    let last_activated: String = row.get(5)?;
    Ok(AttentionLink {
        concept_a: row.get(0)?,
        concept_b: row.get(1)?,
        tenant_id: row.get(2)?,
        strength: row.get::<_, f64>(3)? as f32,
        link_type: LinkType::parse(&link_type).unwrap_or(LinkType::Hebbian),
        last_activated: last_activated
            .parse::<DateTime<Utc>>()
            .unwrap_or_else(|_| Utc::now()),
    })
}

const LINK_COLUMNS: &str =
    "concept_a, concept_b, tenant_id, strength, link_type, last_activated";

pub fn upsert_link(conn: &Connection, link: &AttentionLink) -> SynapseResult<()> {
    conn.execute(
        "INSERT INTO attention_links
             (concept_a, concept_b, tenant_id, strength, link_type, last_activated)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(concept_a, concept_b, tenant_id) DO UPDATE SET
             strength = excluded.strength,
             link_type = excluded.link_type,
             last_activated = excluded.last_activated",
        params![
            link.concept_a,
            link.concept_b,
            link.tenant_id,
            link.strength as f64,
            link.link_type.as_str(),
            link.last_activated.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn get_link(
    conn: &Connection,
    tenant_id: &str,
    a: &str,
    b: &str,
) -> SynapseResult<Option<AttentionLink>> {
    let (a, b) = canonical_pair(a.to_string(), b.to_string());
    conn.query_row(
        &format!(
            "SELECT {LINK_COLUMNS} FROM attention_links
             WHERE concept_a = ?1 AND concept_b = ?2 AND tenant_id = ?3"
        ),
        params![a, b, tenant_id],
        link_from_row,
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))
}

pub fn get_links(
    conn: &Connection,
    tenant_id: &str,
    min_strength: f32,
) -> SynapseResult<Vec<AttentionLink>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {LINK_COLUMNS} FROM attention_links
             WHERE tenant_id = ?1 AND strength > ?2
             ORDER BY concept_a, concept_b"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![tenant_id, min_strength as f64], link_from_row)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut links = Vec::new();
    for row in rows {
        links.push(row.map_err(|e| to_storage_err(e.to_string()))?);
    }
    Ok(links)
}
