use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Catalog index: locale -> table name -> downloadable resource path
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogIndex {
    #[serde(default)]
    pub version: String,
    #[serde(rename = "jsonWorldComponentContentPaths", default)]
    pub paths: HashMap<String, HashMap<String, String>>,
}

impl CatalogIndex {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            paths: HashMap::new(),
        }
    }

    /// Register a resource path (used when assembling an index by hand)
    pub fn with_path(
        mut self,
        locale: impl Into<String>,
        table: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        self.paths
            .entry(locale.into())
            .or_default()
            .insert(table.into(), path.into());
        self
    }

    /// Resolve the resource path of a table for a locale
    pub fn resolve(&self, locale: &str, table: &str) -> Result<&str> {
        let tables = self
            .paths
            .get(locale)
            .ok_or_else(|| Error::LocaleNotFound(locale.to_string()))?;

        tables
            .get(table)
            .map(String::as_str)
            .ok_or_else(|| Error::TableNotFound {
                locale: locale.to_string(),
                table: table.to_string(),
            })
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.paths.keys().map(String::as_str)
    }
}
