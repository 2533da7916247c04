use std::path::Path;

use serde::Deserialize;

use crate::error::{OrmError, Result};
use crate::sqlite::SqliteConfig;

/// Key generator settings.
///
/// `start` seeds the counter; the first key written is `start + 1`. It is
/// not derived from the table, so a restarted mapper with the default seed
/// reissues keys that may already be stored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    pub start: i64,
}

/// Top-level mapper configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OrmConfig {
    pub sqlite: SqliteConfig,
    pub keys: KeyConfig,
}

impl OrmConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text)
            .map_err(|e| OrmError::Configuration(format!("invalid config: {}", e)))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            OrmError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }
}
