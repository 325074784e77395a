use std::collections::HashMap;
use std::sync::RwLock;

use cs_types::{CodespaceRecord, RecordPatch};

use crate::error::{StoreError, StoreResult};
use crate::traits::{validate_table_name, RecordStore};

/// In-memory, HashMap-based record store.
///
/// Intended for tests and embedding. Tables are created on first write. All
/// records are held behind a single `RwLock`, so each `put` is atomic with
/// respect to every other read and write. Records are cloned on read/write.
pub struct InMemoryRecordStore {
    tables: RwLock<HashMap<String, HashMap<String, CodespaceRecord>>>,
}

impl InMemoryRecordStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
        }
    }

    /// Number of records in `table`.
    pub fn len(&self, table: &str) -> usize {
        self.tables
            .read()
            .expect("lock poisoned")
            .get(table)
            .map_or(0, HashMap::len)
    }

    /// Returns `true` if no table holds any record.
    pub fn is_empty(&self) -> bool {
        self.tables
            .read()
            .expect("lock poisoned")
            .values()
            .all(HashMap::is_empty)
    }

    /// Sorted list of all ids in `table`.
    pub fn ids(&self, table: &str) -> Vec<String> {
        let tables = self.tables.read().expect("lock poisoned");
        let mut ids: Vec<String> = tables
            .get(table)
            .map(|t| t.keys().cloned().collect())
            .unwrap_or_default();
        ids.sort();
        ids
    }

    /// Remove every table and record.
    pub fn clear(&self) {
        self.tables.write().expect("lock poisoned").clear();
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn get(&self, table: &str, id: &str) -> StoreResult<Option<CodespaceRecord>> {
        validate_table_name(table)?;
        let tables = self.tables.read().expect("lock poisoned");
        Ok(tables.get(table).and_then(|t| t.get(id)).cloned())
    }

    fn put(&self, table: &str, id: &str, patch: &RecordPatch) -> StoreResult<CodespaceRecord> {
        validate_table_name(table)?;
        if id.is_empty() {
            return Err(StoreError::EmptyKey);
        }
        let mut tables = self.tables.write().expect("lock poisoned");
        let record = tables
            .entry(table.to_string())
            .or_default()
            .entry(id.to_string())
            .or_insert_with(|| CodespaceRecord::stub(id));
        record.apply(patch);
        Ok(record.clone())
    }
}

impl std::fmt::Debug for InMemoryRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tables = self.tables.read().expect("lock poisoned");
        let count: usize = tables.values().map(HashMap::len).sum();
        f.debug_struct("InMemoryRecordStore")
            .field("table_count", &tables.len())
            .field("record_count", &count)
            .finish()
    }
}
