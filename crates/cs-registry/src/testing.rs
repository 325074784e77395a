//! Store doubles shared by the registry tests.

use std::io;

use cs_store::{InMemoryRecordStore, RecordStore, StoreError, StoreResult};
use cs_types::{CodespaceRecord, RecordPatch};

use crate::config::RegistryConfig;

pub(crate) const TABLE: &str = "codespaces";

pub(crate) fn config() -> RegistryConfig {
    RegistryConfig::new(TABLE).unwrap()
}

/// Wraps an in-memory store and fails reads and/or writes on demand.
#[derive(Default)]
pub(crate) struct FailingStore {
    pub inner: InMemoryRecordStore,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

impl FailingStore {
    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Default::default()
        }
    }

    pub fn failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Default::default()
        }
    }
}

impl RecordStore for FailingStore {
    fn get(&self, table: &str, id: &str) -> StoreResult<Option<CodespaceRecord>> {
        if self.fail_reads {
            return Err(StoreError::Io(io::Error::other("read refused")));
        }
        self.inner.get(table, id)
    }

    fn put(&self, table: &str, id: &str, patch: &RecordPatch) -> StoreResult<CodespaceRecord> {
        if self.fail_writes {
            return Err(StoreError::Io(io::Error::other("write refused")));
        }
        self.inner.put(table, id, patch)
    }
}
