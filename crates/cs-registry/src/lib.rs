//! Codespace record lifecycle.
//!
//! Records are created by the [`IdentifierMinter`] as id-only stubs, filled
//! in later by an external writer through the store, and read back by the
//! [`DetailsResolver`]. Both components take the store and the
//! [`RegistryConfig`] explicitly; [`Registry`] wires them together.
//!
//! # Error Handling
//!
//! Every failure is reported once, at the operation boundary, as a
//! [`RegistryError`]. "Not found" is always kept apart from store failures.
//! A record missing `code` or `wasm` is valid state and resolves with empty
//! strings.

pub mod config;
pub mod error;
pub mod minter;
pub mod registry;
pub mod resolver;

#[cfg(test)]
mod testing;

pub use config::{RegistryConfig, TABLE_NAME_ENV};
pub use error::{RegistryError, RegistryResult};
pub use minter::IdentifierMinter;
pub use registry::Registry;
pub use resolver::DetailsResolver;
