//! Reference catalog of currency codes and display names.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::CatalogError;

/// Default catalog dataset bundled with the binary. `setup` materializes
/// this next to the settings file; deployments may ship their own.
pub const DEFAULT_CATALOG: &str = include_str!("../data/currencies.json");

/// Mapping of 3-letter currency code to full display name, loaded once from
/// a local JSON file. Independent of any provider: a code being listed here
/// says nothing about whether the live provider will quote it.
#[derive(Debug, Clone)]
pub struct CurrencyCatalog {
    entries: HashMap<String, String>,
}

impl CurrencyCatalog {
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let entries: HashMap<String, String> =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(count = entries.len(), "Loaded currency catalog");
        Ok(CurrencyCatalog { entries })
    }

    #[cfg(test)]
    pub(crate) fn from_entries(entries: HashMap<String, String>) -> Self {
        CurrencyCatalog { entries }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    pub fn name_of(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
