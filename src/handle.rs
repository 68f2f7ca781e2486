use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::{catalog::CatalogSource, error::Result, index::Index, store::IndexStore};

/// Shared pointer to the active `Index`.
///
/// Readers take a cheap `Arc` clone and query without holding the lock.
/// A refresh builds a complete new index first and only then swaps the
/// pointer; in-flight queries keep the index they started with.
#[derive(Debug)]
pub struct IndexHandle {
    current: RwLock<Arc<Index>>,
}

impl IndexHandle {
    pub fn new(index: Index) -> Self {
        Self { current: RwLock::new(Arc::new(index)) }
    }

    /// Snapshot of the active index
    pub fn current(&self) -> Arc<Index> {
        Arc::clone(&self.current.read())
    }

    /// Install `index`, returning the one it replaced
    pub fn replace(&self, index: Index) -> Arc<Index> {
        let next = Arc::new(index);
        let prev = std::mem::replace(&mut *self.current.write(), next);
        info!("Swapped active index: {} -> {} items", prev.len(), self.current.read().len());
        prev
    }

    /// Rebuild from `source` and swap on success.
    /// On failure the active index stays in place and the error is returned.
    pub fn refresh<S>(&self, store: &IndexStore, source: &S) -> Result<Arc<Index>>
    where
        S: CatalogSource + ?Sized,
    {
        match store.rebuild(source) {
            Ok(index) => {
                self.replace(index);
                Ok(self.current())
            }
            Err(e) => {
                warn!("Index refresh failed, keeping current index: {}", e);
                Err(e)
            }
        }
    }
}
