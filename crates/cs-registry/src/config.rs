use crate::error::{RegistryError, RegistryResult};

/// Environment variable holding the record table name.
pub const TABLE_NAME_ENV: &str = "CODESPACEDB_TABLE_NAME";

/// Process-wide registry configuration.
///
/// Resolved once at startup and shared read-only with the minter and the
/// resolver. Nothing in the registry reads the environment after this.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Table that holds codespace records.
    pub table_name: String,
}

impl RegistryConfig {
    /// Build a config for `table_name`, validating it against store rules.
    pub fn new(table_name: impl Into<String>) -> RegistryResult<Self> {
        let table_name = table_name.into();
        cs_store::validate_table_name(&table_name)
            .map_err(|e| RegistryError::ConfigLoad(e.to_string()))?;
        Ok(Self { table_name })
    }

    /// Load from the process environment.
    pub fn from_env() -> RegistryResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` in place of the environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> RegistryResult<Self> {
        let value = lookup(TABLE_NAME_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| RegistryError::ConfigLoad(format!("{TABLE_NAME_ENV} is not set")))?;
        Self::new(value)
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}
