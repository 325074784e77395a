use std::sync::Arc;

use cs_registry::{Registry, RegistryConfig};
use cs_store::{FileRecordStore, InMemoryRecordStore, RecordStore};
use tokio::net::TcpListener;

use crate::config::{ServerConfig, StoreBackend};
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;

/// Open the record store selected by `config`.
pub fn open_store(config: &ServerConfig) -> ServerResult<Arc<dyn RecordStore>> {
    let store: Arc<dyn RecordStore> = match config.backend {
        StoreBackend::Memory => Arc::new(InMemoryRecordStore::new()),
        StoreBackend::File => Arc::new(FileRecordStore::open(&config.data_dir)?),
    };
    Ok(store)
}

/// Codespace registry server.
pub struct CodespaceServer {
    config: ServerConfig,
    registry: Registry,
}

impl CodespaceServer {
    pub fn new(config: ServerConfig, registry: Registry) -> Self {
        Self { config, registry }
    }

    /// Open the configured store and wire a registry over it.
    pub fn open(config: ServerConfig, registry_config: RegistryConfig) -> ServerResult<Self> {
        let store = open_store(&config)?;
        let registry = Registry::new(store, registry_config);
        Ok(Self::new(config, registry))
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.registry.clone())
    }

    /// Serve requests until ctrl-c.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            addr = %self.config.bind_addr,
            backend = ?self.config.backend,
            table = self.registry.config().table_name(),
            "codespace server listening"
        );
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
