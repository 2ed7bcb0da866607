use std::sync::Arc;

use dashmap::DashMap;

use crate::table::Table;

/// Identifier of a session slot: the Telegram user id, or the chat id for
/// updates without a sender.
pub type SessionKey = i64;

/// In-memory per-user table slots.
///
/// Each key holds at most one table; loading a new one replaces the old.
/// Lives for the process lifetime, with no eviction and no persistence.
#[derive(Clone, Default)]
pub struct SessionStore {
    tables: Arc<DashMap<SessionKey, Arc<Table>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `table` for `key`, returning the table it replaced
    pub fn load(&self, key: SessionKey, table: Table) -> Option<Arc<Table>> {
        self.tables.insert(key, Arc::new(table))
    }

    /// Current table for `key`
    pub fn get(&self, key: SessionKey) -> Option<Arc<Table>> {
        self.tables.get(&key).map(|entry| Arc::clone(entry.value()))
    }

    pub fn clear(&self, key: SessionKey) -> Option<Arc<Table>> {
        self.tables.remove(&key).map(|(_, table)| table)
    }

    /// Number of sessions holding a table
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
