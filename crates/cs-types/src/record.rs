use serde::{Deserialize, Serialize};

/// A stored codespace record.
///
/// `code` and `wasm` are populated independently and at different times by
/// an external writer, so either may be absent on any read. The `id` is the
/// store key and never changes after the stub is written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodespaceRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wasm: Option<String>,
}

impl CodespaceRecord {
    /// A record holding only its identifier.
    pub fn stub(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            code: None,
            wasm: None,
        }
    }

    /// Overwrite the fields supplied in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: &RecordPatch) {
        if let Some(code) = &patch.code {
            self.code = Some(code.clone());
        }
        if let Some(wasm) = &patch.wasm {
            self.wasm = Some(wasm.clone());
        }
    }

    /// Returns `true` once both payload fields have been written.
    pub fn is_complete(&self) -> bool {
        self.code.is_some() && self.wasm.is_some()
    }
}

/// Partial update for a record. `None` means "leave as is".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wasm: Option<String>,
}

impl RecordPatch {
    /// A patch that touches no fields; writing it creates a stub.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_wasm(mut self, wasm: impl Into<String>) -> Self {
        self.wasm = Some(wasm.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_none() && self.wasm.is_none()
    }
}

/// Details response body. Unset payload fields are empty strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailsView {
    pub id: String,
    pub code: String,
    pub wasm: String,
}
