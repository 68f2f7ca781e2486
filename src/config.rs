use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{error::{Error, Result}, index::DEFAULT_TOP_N};

/// Runtime settings for building and querying
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// directory holding cached artifacts
    pub store_dir: PathBuf,
    /// JSON catalog exported by the ingestion job
    pub catalog_path: Option<PathBuf>,
    /// recommendations per query
    pub top_n: usize,
    /// ignore cached artifacts and rebuild
    pub force_rebuild: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from("models"),
            catalog_path: None,
            top_n: DEFAULT_TOP_N,
            force_rebuild: false,
        }
    }
}

impl Config {
    /// Read a JSON config file; missing keys take defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        let config: Config = serde_json::from_slice(&bytes)
            .map_err(|e| Error::InvalidConfig(format!("{}: {}", path.as_ref().display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(Error::InvalidConfig("top_n must be at least 1".into()));
        }
        if self.store_dir.as_os_str().is_empty() {
            return Err(Error::InvalidConfig("store_dir must not be empty".into()));
        }
        Ok(())
    }

    /// Catalog path or an `InvalidConfig` error
    pub fn require_catalog(&self) -> Result<&Path> {
        self.catalog_path
            .as_deref()
            .ok_or_else(|| Error::InvalidConfig("no catalog path configured".into()))
    }
}
