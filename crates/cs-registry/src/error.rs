use cs_store::StoreError;
use thiserror::Error;

/// Failures surfaced at the registry operation boundary.
///
/// None of these are retried by the registry itself. A record that exists
/// but lacks `code` or `wasm` is not an error and never appears here.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Configuration could not be resolved.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(String),

    /// A store write did not complete. The id was never committed and must
    /// not be reused; minting again is safe.
    #[error("failed to write record {id}: {source}")]
    StoreWrite { id: String, source: StoreError },

    /// The store failed while reading, as opposed to the key being absent.
    #[error("failed to read record {id}: {source}")]
    StoreRead { id: String, source: StoreError },

    /// The id has never been written.
    #[error("codespace not found: {0:?}")]
    NotFound(String),
}

impl RegistryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;
