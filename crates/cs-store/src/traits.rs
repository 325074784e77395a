use cs_types::{CodespaceRecord, RecordPatch};

use crate::error::{StoreError, StoreResult};

/// Longest accepted table name.
pub const MAX_TABLE_NAME_LEN: usize = 255;

/// Check that `name` is usable as a table name on every backend.
///
/// Names are 1 to [`MAX_TABLE_NAME_LEN`] characters from `[A-Za-z0-9_.-]`
/// and may not be `.` or `..`.
pub fn validate_table_name(name: &str) -> StoreResult<()> {
    let reason = if name.is_empty() {
        "must not be empty"
    } else if name.len() > MAX_TABLE_NAME_LEN {
        "longer than 255 characters"
    } else if name == "." || name == ".." {
        "reserved name"
    } else if !name
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b'-'))
    {
        "only ASCII letters, digits, '_', '.' and '-' are allowed"
    } else {
        return Ok(());
    };
    Err(StoreError::InvalidTable {
        name: name.to_string(),
        reason: reason.to_string(),
    })
}

/// Key-value store of codespace records, partitioned into named tables.
///
/// All implementations must satisfy these invariants:
/// - `put` writes only the fields present in the patch. Fields it does not
///   name keep their stored value, or stay absent on a newly created key.
/// - Writes to one key are atomic per call and visible to the next `get`
///   from the same process.
/// - Concurrent `put`s to different keys need no coordination; concurrent
///   writers to the same field resolve last-writer-wins.
/// - Records are never deleted or expired by the store.
/// - All I/O errors are propagated, never silently ignored.
pub trait RecordStore: Send + Sync {
    /// Read the record stored under `id`.
    ///
    /// Returns `Ok(None)` if the key has never been written.
    /// Returns `Err` on I/O failure or an undecodable record.
    fn get(&self, table: &str, id: &str) -> StoreResult<Option<CodespaceRecord>>;

    /// Create or update the record under `id` with the fields in `patch`.
    ///
    /// Returns the record as stored after the write.
    fn put(&self, table: &str, id: &str, patch: &RecordPatch) -> StoreResult<CodespaceRecord>;

    /// Check whether a key exists.
    fn exists(&self, table: &str, id: &str) -> StoreResult<bool> {
        Ok(self.get(table, id)?.is_some())
    }
}
