use std::sync::Arc;

use cs_store::RecordStore;
use cs_types::{CodespaceRecord, DetailsView};

use crate::config::RegistryConfig;
use crate::error::{RegistryError, RegistryResult};

/// Resolves an id to its details view.
///
/// Read-only and repeatable. The id is passed to the store as given, so
/// empty or malformed ids simply resolve to [`RegistryError::NotFound`].
#[derive(Clone)]
pub struct DetailsResolver {
    store: Arc<dyn RecordStore>,
    config: Arc<RegistryConfig>,
}

impl DetailsResolver {
    pub fn new(store: Arc<dyn RecordStore>, config: Arc<RegistryConfig>) -> Self {
        Self { store, config }
    }

    /// Look up `id` and project whatever fields are present.
    pub fn get_details(&self, id: &str) -> RegistryResult<DetailsView> {
        let table = self.config.table_name();

        let record = match self.store.get(table, id) {
            Ok(Some(record)) => record,
            Ok(None) => {
                tracing::debug!(table, id, "codespace not found");
                return Err(RegistryError::NotFound(id.to_string()));
            }
            Err(source) => {
                tracing::error!(table, id, error = %source, "failed to read record");
                return Err(RegistryError::StoreRead {
                    id: id.to_string(),
                    source,
                });
            }
        };

        Ok(project(record))
    }
}

/// Project a record into a view, rendering unset payload fields empty.
///
/// `code` and `wasm` are written independently; each is checked on its own.
fn project(record: CodespaceRecord) -> DetailsView {
    let CodespaceRecord { id, code, wasm } = record;
    DetailsView {
        code: present_or_empty(&id, "code", code),
        wasm: present_or_empty(&id, "wasm", wasm),
        id,
    }
}

fn present_or_empty(id: &str, field: &'static str, value: Option<String>) -> String {
    value.unwrap_or_else(|| {
        tracing::debug!(id, field, "field not yet populated");
        String::new()
    })
}

impl std::fmt::Debug for DetailsResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailsResolver")
            .field("table", &self.config.table_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{config, FailingStore, TABLE};
    use cs_store::InMemoryRecordStore;
    use cs_types::RecordPatch;

    fn setup() -> (Arc<InMemoryRecordStore>, DetailsResolver) {
        let store = Arc::new(InMemoryRecordStore::new());
        let resolver = DetailsResolver::new(store.clone(), Arc::new(config()));
        (store, resolver)
    }

    #[test]
    fn stub_resolves_with_empty_fields() {
        let (store, resolver) = setup();
        store.put(TABLE, "abc", &RecordPatch::empty()).unwrap();

        let view = resolver.get_details("abc").unwrap();
        assert_eq!(
            view,
            DetailsView {
                id: "abc".into(),
                code: String::new(),
                wasm: String::new(),
            }
        );
    }

    #[test]
    fn code_only() {
        let (store, resolver) = setup();
        store.put(TABLE, "abc", &RecordPatch::empty().with_code("x")).unwrap();

        let view = resolver.get_details("abc").unwrap();
        assert_eq!(view.code, "x");
        assert_eq!(view.wasm, "");
    }

    #[test]
    fn wasm_only() {
        let (store, resolver) = setup();
        store.put(TABLE, "abc", &RecordPatch::empty().with_wasm("y")).unwrap();

        let view = resolver.get_details("abc").unwrap();
        assert_eq!(view.code, "");
        assert_eq!(view.wasm, "y");
    }

    #[test]
    fn fully_populated() {
        let (store, resolver) = setup();
        store
            .put(TABLE, "abc", &RecordPatch::empty().with_code("x").with_wasm("y"))
            .unwrap();

        let view = resolver.get_details("abc").unwrap();
        assert_eq!(view.code, "x");
        assert_eq!(view.wasm, "y");
    }

    #[test]
    fn unknown_id_is_not_found() {
        let (_store, resolver) = setup();
        let err = resolver.get_details("never-created").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn empty_id_is_not_found() {
        let (_store, resolver) = setup();
        let err = resolver.get_details("").unwrap_err();
        assert!(matches!(err, RegistryError::NotFound(ref id) if id.is_empty()));
    }

    #[test]
    fn read_failure_is_not_conflated_with_absence() {
        let resolver = DetailsResolver::new(
            Arc::new(FailingStore::failing_reads()),
            Arc::new(config()),
        );
        let err = resolver.get_details("abc").unwrap_err();
        assert!(matches!(err, RegistryError::StoreRead { .. }));
        assert!(!err.is_not_found());
    }

    #[test]
    fn repeated_reads_are_stable() {
        let (store, resolver) = setup();
        store.put(TABLE, "abc", &RecordPatch::empty().with_code("x")).unwrap();
        let first = resolver.get_details("abc").unwrap();
        let second = resolver.get_details("abc").unwrap();
        assert_eq!(first, second);
        assert_eq!(store.len(TABLE), 1);
    }
}
