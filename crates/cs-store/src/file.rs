use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use cs_types::{CodespaceRecord, RecordPatch};

use crate::error::{StoreError, StoreResult};
use crate::traits::{validate_table_name, RecordStore};

/// Longest id, in bytes, that maps to a legal file name once hex-encoded.
pub const MAX_FILE_KEY_LEN: usize = 120;

const RECORD_EXT: &str = "json";
const LOCK_EXT: &str = "lock";

/// Directory-backed record store.
///
/// Layout: `<root>/<table>/<hex(id)>.json`, one JSON document per record.
/// Ids are hex-encoded so that any string, including path separators, maps
/// to a single file inside the table directory.
///
/// Each write lands in a temporary file in the table directory and is then
/// renamed over the record, so readers observe either the old or the new
/// document. Read-modify-write of a record holds an exclusive OS advisory
/// lock on `<root>/<table>/<hex(id)>.lock`, so field-level updates from any
/// number of store instances or processes sharing the root never clobber
/// each other.
pub struct FileRecordStore {
    root: PathBuf,
}

impl FileRecordStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        tracing::debug!(root = %root.display(), "opened file record store");
        Ok(Self { root })
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Sorted list of all ids in `table`. A missing table is empty.
    pub fn ids(&self, table: &str) -> StoreResult<Vec<String>> {
        validate_table_name(table)?;
        let entries = match fs::read_dir(self.table_dir(table)) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut ids = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXT) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if let Some(id) = hex::decode(stem).ok().and_then(|b| String::from_utf8(b).ok()) {
                ids.push(id);
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn table_dir(&self, table: &str) -> PathBuf {
        self.root.join(table)
    }

    fn record_path(&self, table: &str, id: &str) -> PathBuf {
        self.table_dir(table)
            .join(format!("{}.{RECORD_EXT}", hex::encode(id)))
    }

    fn lock_path(&self, table: &str, id: &str) -> PathBuf {
        self.table_dir(table)
            .join(format!("{}.{LOCK_EXT}", hex::encode(id)))
    }

    /// Block until this handle holds the record's lock. Dropping the file
    /// releases it.
    fn lock_record(&self, table: &str, id: &str) -> StoreResult<File> {
        use fs2::FileExt;

        fs::create_dir_all(self.table_dir(table))?;
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.lock_path(table, id))?;
        file.lock_exclusive()?;
        Ok(file)
    }

    fn read_record(&self, table: &str, id: &str) -> StoreResult<Option<CodespaceRecord>> {
        let bytes = match fs::read(self.record_path(table, id)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let record: CodespaceRecord =
            serde_json::from_slice(&bytes).map_err(|e| StoreError::CorruptRecord {
                table: table.to_string(),
                id: id.to_string(),
                reason: e.to_string(),
            })?;
        if record.id != id {
            return Err(StoreError::CorruptRecord {
                table: table.to_string(),
                id: id.to_string(),
                reason: format!("document holds id {:?}", record.id),
            });
        }
        Ok(Some(record))
    }

    fn write_record(&self, table: &str, record: &CodespaceRecord) -> StoreResult<()> {
        let dir = self.table_dir(table);
        fs::create_dir_all(&dir)?;

        let data =
            serde_json::to_vec(record).map_err(|e| StoreError::Serialization(e.to_string()))?;
        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(&data)?;
        tmp.as_file().sync_all()?;
        tmp.persist(self.record_path(table, &record.id))
            .map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }
}

impl RecordStore for FileRecordStore {
    fn get(&self, table: &str, id: &str) -> StoreResult<Option<CodespaceRecord>> {
        validate_table_name(table)?;
        // Keys that put() refuses can never have been written.
        if id.is_empty() || id.len() > MAX_FILE_KEY_LEN {
            return Ok(None);
        }
        self.read_record(table, id)
    }

    fn put(&self, table: &str, id: &str, patch: &RecordPatch) -> StoreResult<CodespaceRecord> {
        validate_table_name(table)?;
        if id.is_empty() {
            return Err(StoreError::EmptyKey);
        }
        if id.len() > MAX_FILE_KEY_LEN {
            return Err(StoreError::KeyTooLong {
                len: id.len(),
                max: MAX_FILE_KEY_LEN,
            });
        }

        let _lock = self.lock_record(table, id)?;
        let mut record = self
            .read_record(table, id)?
            .unwrap_or_else(|| CodespaceRecord::stub(id));
        record.apply(patch);
        self.write_record(table, &record)?;
        tracing::debug!(table, id, "wrote record");
        Ok(record)
    }
}

impl std::fmt::Debug for FileRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileRecordStore")
            .field("root", &self.root)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    const TABLE: &str = "codespaces";

    fn open_temp() -> (tempfile::TempDir, FileRecordStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileRecordStore::open(dir.path().join("data")).unwrap();
        (dir, store)
    }

    #[test]
    fn open_creates_root() {
        let (_dir, store) = open_temp();
        assert!(store.root().is_dir());
    }

    #[test]
    fn stub_then_fields() {
        let (_dir, store) = open_temp();
        store.put(TABLE, "abc", &RecordPatch::empty()).unwrap();
        assert_eq!(
            store.get(TABLE, "abc").unwrap(),
            Some(CodespaceRecord::stub("abc"))
        );

        store.put(TABLE, "abc", &RecordPatch::empty().with_code("c")).unwrap();
        store.put(TABLE, "abc", &RecordPatch::empty().with_wasm("w")).unwrap();
        let r = store.get(TABLE, "abc").unwrap().unwrap();
        assert_eq!(r.code.as_deref(), Some("c"));
        assert_eq!(r.wasm.as_deref(), Some("w"));
    }

    #[test]
    fn missing_table_and_key_are_absent() {
        let (_dir, store) = open_temp();
        assert!(store.get("never-written", "abc").unwrap().is_none());
        assert!(store.get(TABLE, "").unwrap().is_none());
        assert!(store.ids("never-written").unwrap().is_empty());
    }

    #[test]
    fn records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileRecordStore::open(dir.path()).unwrap();
            store.put(TABLE, "abc", &RecordPatch::empty().with_code("c")).unwrap();
        }
        let store = FileRecordStore::open(dir.path()).unwrap();
        let r = store.get(TABLE, "abc").unwrap().unwrap();
        assert_eq!(r.code.as_deref(), Some("c"));
    }

    #[test]
    fn path_like_ids_stay_inside_table() {
        let (_dir, store) = open_temp();
        store.put(TABLE, "../../escape", &RecordPatch::empty()).unwrap();
        assert_eq!(store.ids(TABLE).unwrap(), vec!["../../escape"]);
        assert!(store.get(TABLE, "../../escape").unwrap().is_some());
        assert_eq!(fs::read_dir(store.root()).unwrap().count(), 1);
    }

    #[test]
    fn key_limits() {
        let (_dir, store) = open_temp();
        assert!(matches!(
            store.put(TABLE, "", &RecordPatch::empty()),
            Err(StoreError::EmptyKey)
        ));

        let long = "k".repeat(MAX_FILE_KEY_LEN + 1);
        assert!(matches!(
            store.put(TABLE, &long, &RecordPatch::empty()),
            Err(StoreError::KeyTooLong { .. })
        ));
        assert!(store.get(TABLE, &long).unwrap().is_none());
    }

    #[test]
    fn corrupt_document_is_an_error() {
        let (_dir, store) = open_temp();
        store.put(TABLE, "abc", &RecordPatch::empty()).unwrap();
        fs::write(store.record_path(TABLE, "abc"), b"{not json").unwrap();
        let err = store.get(TABLE, "abc").unwrap_err();
        assert!(matches!(err, StoreError::CorruptRecord { .. }));
    }

    #[test]
    fn mismatched_id_is_an_error() {
        let (_dir, store) = open_temp();
        store.put(TABLE, "abc", &RecordPatch::empty()).unwrap();
        fs::write(store.record_path(TABLE, "abc"), br#"{"id":"other"}"#).unwrap();
        assert!(matches!(
            store.get(TABLE, "abc"),
            Err(StoreError::CorruptRecord { .. })
        ));
    }

    #[test]
    fn document_without_payload_keys_reads_as_stub() {
        let (_dir, store) = open_temp();
        store.put(TABLE, "abc", &RecordPatch::empty()).unwrap();
        let raw = fs::read_to_string(store.record_path(TABLE, "abc")).unwrap();
        assert_eq!(raw, r#"{"id":"abc"}"#);
    }

    #[test]
    fn concurrent_field_writes_to_same_key_both_land() {
        let (_dir, store) = open_temp();
        let store = Arc::new(store);
        store.put(TABLE, "abc", &RecordPatch::empty()).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let patch = if i % 2 == 0 {
                        RecordPatch::empty().with_code(format!("c{i}"))
                    } else {
                        RecordPatch::empty().with_wasm(format!("w{i}"))
                    };
                    store.put(TABLE, "abc", &patch).unwrap();
                })
            })
            .collect();
        for h in handles {
            h.join().expect("thread should not panic");
        }

        let r = store.get(TABLE, "abc").unwrap().unwrap();
        assert!(r.is_complete());
    }

    #[test]
    fn field_writes_from_separate_instances_both_land() {
        let dir = tempfile::tempdir().unwrap();
        let code_writer = FileRecordStore::open(dir.path()).unwrap();
        let wasm_writer = FileRecordStore::open(dir.path()).unwrap();
        let ids: Vec<String> = (0..200).map(|i| format!("id-{i}")).collect();

        thread::scope(|s| {
            s.spawn(|| {
                for id in &ids {
                    code_writer.put(TABLE, id, &RecordPatch::empty().with_code("c")).unwrap();
                }
            });
            s.spawn(|| {
                for id in &ids {
                    wasm_writer.put(TABLE, id, &RecordPatch::empty().with_wasm("w")).unwrap();
                }
            });
        });

        let lost: Vec<&String> = ids
            .iter()
            .filter(|id| !code_writer.get(TABLE, id).unwrap().unwrap().is_complete())
            .collect();
        assert!(lost.is_empty(), "lost field updates for {lost:?}");
    }

    #[test]
    fn lock_files_are_not_listed_as_ids() {
        let (_dir, store) = open_temp();
        store.put(TABLE, "abc", &RecordPatch::empty()).unwrap();
        assert!(store.lock_path(TABLE, "abc").exists());
        assert_eq!(store.ids(TABLE).unwrap(), vec!["abc"]);
    }
}
