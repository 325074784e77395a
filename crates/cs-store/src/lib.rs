//! Record storage for the codespace registry.
//!
//! A record store is a key-value store of [`CodespaceRecord`]s, partitioned
//! into named tables and keyed by the record id.
//!
//! # Storage Backends
//!
//! All backends implement the [`RecordStore`] trait:
//!
//! - [`InMemoryRecordStore`] -- `HashMap`-based store for tests and embedding
//! - [`FileRecordStore`] -- one JSON document per record on local disk
//!
//! # Design Rules
//!
//! 1. A `put` names the fields it writes; every other field is left alone.
//! 2. An absent key reads as `Ok(None)`, never as an error.
//! 3. Records are never deleted by the store.
//! 4. All I/O errors are propagated, never silently ignored.
//!
//! [`CodespaceRecord`]: cs_types::CodespaceRecord

pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use file::FileRecordStore;
pub use memory::InMemoryRecordStore;
pub use traits::{validate_table_name, RecordStore};
