use std::sync::Arc;

use cs_store::RecordStore;
use cs_types::{CodespaceId, RecordPatch};

use crate::config::RegistryConfig;
use crate::error::{RegistryError, RegistryResult};

/// Creates codespace records.
///
/// Every call mints a fresh [`CodespaceId`] and writes a stub record (id
/// only) with a single store write. There is no read-before-write: the id
/// space is large enough that collisions are an accepted risk.
#[derive(Clone)]
pub struct IdentifierMinter {
    store: Arc<dyn RecordStore>,
    config: Arc<RegistryConfig>,
}

impl IdentifierMinter {
    pub fn new(store: Arc<dyn RecordStore>, config: Arc<RegistryConfig>) -> Self {
        Self { store, config }
    }

    /// Mint an id and persist its stub record.
    ///
    /// On `StoreWrite` the id is discarded; callers retry by minting again.
    pub fn create_record(&self) -> RegistryResult<CodespaceId> {
        let table = self.config.table_name();
        let id = CodespaceId::new();
        let key = id.to_string();

        if let Err(source) = self.store.put(table, &key, &RecordPatch::empty()) {
            tracing::error!(table, id = %key, error = %source, "failed to write stub record");
            return Err(RegistryError::StoreWrite { id: key, source });
        }

        tracing::info!(table, id = %key, "minted codespace");
        Ok(id)
    }
}

impl std::fmt::Debug for IdentifierMinter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentifierMinter")
            .field("table", &self.config.table_name)
            .finish()
    }
}
