use std::sync::Arc;

use cs_store::RecordStore;
use cs_types::{CodespaceId, DetailsView};

use crate::config::RegistryConfig;
use crate::error::RegistryResult;
use crate::minter::IdentifierMinter;
use crate::resolver::DetailsResolver;

/// Minter and resolver wired to one store and one config.
///
/// Cheap to clone; clones share the store.
#[derive(Clone, Debug)]
pub struct Registry {
    config: Arc<RegistryConfig>,
    minter: IdentifierMinter,
    resolver: DetailsResolver,
}

impl Registry {
    pub fn new(store: Arc<dyn RecordStore>, config: RegistryConfig) -> Self {
        let config = Arc::new(config);
        Self {
            minter: IdentifierMinter::new(Arc::clone(&store), Arc::clone(&config)),
            resolver: DetailsResolver::new(store, Arc::clone(&config)),
            config,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// See [`IdentifierMinter::create_record`].
    pub fn create(&self) -> RegistryResult<CodespaceId> {
        self.minter.create_record()
    }

    /// See [`DetailsResolver::get_details`].
    pub fn details(&self, id: &str) -> RegistryResult<DetailsView> {
        self.resolver.get_details(id)
    }
}
