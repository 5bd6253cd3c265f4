//! Per-link-type aggregation.

use rusqlite::{params, Connection};

use synapse_core::errors::SynapseResult;
use synapse_core::link::LinkType;
use synapse_core::models::LinkTypeStats;

use crate::to_storage_err;

pub fn link_type_stats(conn: &Connection, tenant_id: &str) -> SynapseResult<Vec<LinkTypeStats>> {
    let mut stmt = conn
        .prepare(
            "SELECT link_type, COUNT(*), AVG(strength), MAX(strength)
             FROM attention_links
             WHERE tenant_id = ?1
             GROUP BY link_type
             ORDER BY link_type",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![tenant_id], |row| {
            let link_type: String = row.get(0)?;
            Ok((
                link_type,
                row.get::<_, i64>(1)?,
                row.get::<_, f64>(2)?,
                row.get::<_, f64>(3)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut stats = Vec::new();
    for row in rows {
        let (link_type, count, avg, max) = row.map_err(|e| to_storage_err(e.to_string()))?;
        let Some(link_type) = LinkType::parse(&link_type) else {
            continue;
        };
        stats.push(LinkTypeStats {
            link_type,
            count: count as usize,
            avg_strength: avg as f32,
            max_strength: max as f32,
        });
    }
    Ok(stats)
}
