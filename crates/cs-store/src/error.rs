/// Errors from record store operations.
///
/// An absent key is not an error: `get` returns `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored bytes for a key could not be decoded as a record.
    #[error("corrupt record {id} in table {table}: {reason}")]
    CorruptRecord {
        table: String,
        id: String,
        reason: String,
    },

    /// Attempted to write a record with an empty key.
    #[error("cannot store record with empty id")]
    EmptyKey,

    /// The key is longer than the backend can address.
    #[error("record id is {len} bytes, backend limit is {max}")]
    KeyTooLong { len: usize, max: usize },

    /// The table name is empty, too long, or contains characters outside
    /// `[A-Za-z0-9_.-]`.
    #[error("invalid table name {name:?}: {reason}")]
    InvalidTable { name: String, reason: String },
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
