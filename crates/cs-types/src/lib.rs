//! Foundation types for the codespace registry.
//!
//! Every other `cs-*` crate depends on `cs-types`.
//!
//! # Key Types
//!
//! - [`CodespaceId`] -- Random (UUID v4) identifier minted once per record
//! - [`CodespaceRecord`] -- Stored record with independently optional `code` and `wasm`
//! - [`RecordPatch`] -- Partial field update applied by a store `put`
//! - [`DetailsView`] -- Response projection with unset fields rendered empty

pub mod error;
pub mod id;
pub mod record;

pub use error::TypeError;
pub use id::CodespaceId;
pub use record::{CodespaceRecord, DetailsView, RecordPatch};
