//! HTTP server for the codespace registry.
//!
//! Exposes the registry's two operations over HTTP: minting a codespace
//! (`POST /v1/codespaces`) and resolving one (`GET /v1/codespaces/details?id=`).
//! Not-found answers 404; store and configuration failures answer 500 with a
//! generic message.

pub mod config;
pub mod endpoint;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::{ServerConfig, StoreBackend};
pub use endpoint::{endpoints, DetailsQuery, HealthResponse};
pub use error::{ServerError, ServerResult};
pub use server::{open_store, CodespaceServer};
