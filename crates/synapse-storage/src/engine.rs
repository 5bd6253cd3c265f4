//! AttentionStore — owns the connection, runs migrations at open,
//! implements `IAttentionStore`.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;
use tracing::info;

use synapse_core::errors::SynapseResult;
use synapse_core::link::{AttentionLink, Concept};
use synapse_core::models::LinkTypeStats;
use synapse_core::traits::IAttentionStore;

use crate::migrations;
use crate::queries::{concept_ops, link_ops, stats_ops};
use crate::to_storage_err;

/// SQLite-backed store for concepts and attention links.
///
/// One learning event is handled on one thread, so a single connection
/// behind a mutex is enough; WAL keeps concurrent readers cheap when the
/// surrounding system shares the file.
pub struct AttentionStore {
    conn: Mutex<Connection>,
}

impl AttentionStore {
    /// Open a store backed by a file on disk.
    pub fn open(path: &Path) -> SynapseResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| to_storage_err(e.to_string()))?;
        conn.pragma_update(None, "synchronous", "NORMAL")
            .map_err(|e| to_storage_err(e.to_string()))?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize()?;
        info!(path = %path.display(), "attention store opened");
        Ok(store)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> SynapseResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> SynapseResult<()> {
        self.with_conn(|conn| migrations::run_migrations(conn))
    }

    fn with_conn<F, T>(&self, f: F) -> SynapseResult<T>
    where
        F: FnOnce(&Connection) -> SynapseResult<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|_| to_storage_err("connection mutex poisoned".to_string()))?;
        f(&conn)
    }
}

impl IAttentionStore for AttentionStore {
    fn put_concept(&self, tenant_id: &str, concept: &Concept) -> SynapseResult<()> {
        self.with_conn(|conn| concept_ops::put_concept(conn, tenant_id, concept))
    }

    fn get_concept(&self, tenant_id: &str, name: &str) -> SynapseResult<Option<Concept>> {
        self.with_conn(|conn| concept_ops::get_concept(conn, tenant_id, name))
    }

    fn get_link(&self, tenant_id: &str, a: &str, b: &str) -> SynapseResult<Option<AttentionLink>> {
        self.with_conn(|conn| link_ops::get_link(conn, tenant_id, a, b))
    }

    fn get_links(&self, tenant_id: &str, min_strength: f32) -> SynapseResult<Vec<AttentionLink>> {
        self.with_conn(|conn| link_ops::get_links(conn, tenant_id, min_strength))
    }

    fn upsert_link(&self, link: &AttentionLink) -> SynapseResult<()> {
        self.with_conn(|conn| link_ops::upsert_link(conn, link))
    }

    fn apply_updates(&self, links: &[AttentionLink]) -> SynapseResult<()> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|_| to_storage_err("connection mutex poisoned".to_string()))?;
        let tx = conn
            .transaction()
            .map_err(|e| to_storage_err(e.to_string()))?;
        for link in links {
            link_ops::upsert_link(&tx, link)?;
        }
        tx.commit().map_err(|e| to_storage_err(e.to_string()))?;
        Ok(())
    }

    fn link_type_stats(&self, tenant_id: &str) -> SynapseResult<Vec<LinkTypeStats>> {
        self.with_conn(|conn| stats_ops::link_type_stats(conn, tenant_id))
    }
}
