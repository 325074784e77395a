use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cs_registry::RegistryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("store error: {0}")]
    Store(#[from] cs_store::StoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Status code and client-facing body. Details stay in the logs.
    pub fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Registry(RegistryError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "Codespace not found")
            }
            Self::Registry(RegistryError::ConfigLoad(_)) | Self::Config(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to load configuration")
            }
            Self::Registry(RegistryError::StoreWrite { .. }) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to put item in store")
            }
            Self::Registry(RegistryError::StoreRead { .. }) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to get item from store")
            }
            Self::Store(_) | Self::Io(_) | Self::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, message).into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
