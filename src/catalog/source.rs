use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{catalog::{fingerprint, hex_digest, CatalogItem, CatalogSource}, error::{Error, Result}};

/// Catalog stored as a JSON array of items on disk.
/// This is the hand-off point of the ingestion job.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    path: PathBuf,
}

impl JsonCatalog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(&self, bytes: &[u8]) -> Result<Vec<CatalogItem>> {
        let items: Vec<CatalogItem> = serde_json::from_slice(bytes)
            .map_err(|e| Error::CatalogUnavailable(format!("{}: {}", self.path.display(), e)))?;
        debug!("Read {} catalog items from {:?}", items.len(), self.path);
        Ok(items)
    }

    fn read(&self) -> Result<Vec<u8>> {
        std::fs::read(&self.path)
            .map_err(|e| Error::CatalogUnavailable(format!("{}: {}", self.path.display(), e)))
    }
}

impl CatalogSource for JsonCatalog {
    fn identity(&self) -> Result<String> {
        Ok(hex_digest(&self.read()?))
    }

    fn fetch(&self) -> Result<Vec<CatalogItem>> {
        self.parse(&self.read()?)
    }

    // one read, so identity and items cannot disagree
    fn snapshot(&self) -> Result<(String, Vec<CatalogItem>)> {
        let bytes = self.read()?;
        Ok((hex_digest(&bytes), self.parse(&bytes)?))
    }
}

/// Catalog already held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    items: Vec<CatalogItem>,
}

impl MemoryCatalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }
}

impl CatalogSource for MemoryCatalog {
    fn identity(&self) -> Result<String> {
        fingerprint(&self.items)
    }

    fn fetch(&self) -> Result<Vec<CatalogItem>> {
        Ok(self.items.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_catalog_unavailable() {
        let source = JsonCatalog::new("/nonexistent/catalog.json");
        assert!(matches!(source.identity(), Err(Error::CatalogUnavailable(_))));
        assert!(matches!(source.fetch(), Err(Error::CatalogUnavailable(_))));
    }

    #[test]
    fn memory_catalog_identity_tracks_items() {
        let a = MemoryCatalog::new(vec![CatalogItem::new("1", "A")]);
        let b = MemoryCatalog::new(vec![CatalogItem::new("2", "A")]);
        assert_ne!(a.identity().unwrap(), b.identity().unwrap());
        assert_eq!(a.fetch().unwrap().len(), 1);
    }
}
