pub mod manifest;

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    time::Instant,
};

use atomicwrites::{AllowOverwrite, AtomicFile};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use crate::{
    catalog::{hex_digest, CatalogItem, CatalogSource},
    error::{Error, Result},
    index::Index,
    similarity::SimilarityMatrix,
    store::manifest::{ArtifactEntry, Manifest, CATALOG_FILE, FORMAT_VERSION, MANIFEST_FILE, SIMILARITY_FILE, TERM_MATRIX_FILE, VOCABULARY_FILE},
    vectorizer::{matrix::TermMatrix, vocabulary::Vocabulary},
};

/// Directory holding one cached artifact set.
///
/// The set is usable only when `manifest.json` exists, names the expected
/// catalog identity, and every artifact matches its recorded digest and
/// shape. Saving removes the manifest first and writes it last, so an
/// interrupted save never leaves a set that loads.
#[derive(Debug, Clone)]
pub struct IndexStore {
    dir: PathBuf,
}

impl IndexStore {
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Cached index for `identity`, or `None` when the set is missing,
    /// incomplete, corrupt or built from another catalog.
    pub fn load(&self, identity: &str) -> Result<Option<Index>> {
        match self.try_load(identity) {
            Ok(index) => Ok(Some(index)),
            Err(Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No complete artifact set in {:?}: {}", self.dir, e);
                Ok(None)
            }
            Err(Error::Artifact(reason)) | Err(Error::Serialization(reason)) => {
                warn!("Ignoring cached artifacts in {:?}: {}", self.dir, reason);
                Ok(None)
            }
            Err(Error::EmptyCatalog) => {
                warn!("Ignoring cached artifacts in {:?}: empty catalog snapshot", self.dir);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Write all four artifacts, then the manifest.
    pub fn save(&self, index: &Index, identity: &str) -> Result<()> {
        let start = Instant::now();
        match fs::remove_file(self.path(MANIFEST_FILE)) {
            Ok(()) => debug!("Invalidated previous artifact set"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        let artifacts = vec![
            self.write_artifact(CATALOG_FILE, &index.items())?,
            self.write_artifact(VOCABULARY_FILE, index.vocabulary())?,
            self.write_artifact(TERM_MATRIX_FILE, index.term_matrix())?,
            self.write_artifact(SIMILARITY_FILE, index.similarity_matrix())?,
        ];
        let manifest = Manifest {
            format: FORMAT_VERSION,
            identity: identity.to_string(),
            item_count: index.len(),
            vocab_size: index.vocabulary().len(),
            artifacts,
        };
        write_atomic(&self.path(MANIFEST_FILE), &serde_json::to_vec_pretty(&manifest)?)?;

        info!("Saved artifact set to {:?} in {:.2}ms", self.dir, start.elapsed().as_secs_f64() * 1000.0);
        Ok(())
    }

    /// Use the cached set when it matches the source, otherwise rebuild
    /// from the source and persist the result.
    pub fn load_or_build<S>(&self, source: &S) -> Result<Index>
    where
        S: CatalogSource + ?Sized,
    {
        let identity = source.identity()?;
        if let Some(index) = self.load(&identity)? {
            info!("Loaded cached index ({} items) from {:?}", index.len(), self.dir);
            return Ok(index);
        }
        info!("Building index from catalog source");
        self.rebuild(source)
    }

    /// Rebuild from the source regardless of the cache.
    /// Nothing cached is used if the source cannot be read.
    pub fn rebuild<S>(&self, source: &S) -> Result<Index>
    where
        S: CatalogSource + ?Sized,
    {
        let (identity, items) = source.snapshot()?;
        let index = Index::build(items)?;
        self.save(&index, &identity)?;
        Ok(index)
    }

    fn try_load(&self, identity: &str) -> Result<Index> {
        let manifest: Manifest = serde_json::from_slice(&fs::read(self.path(MANIFEST_FILE))?)?;
        if manifest.format != FORMAT_VERSION {
            return Err(Error::Artifact(format!("format {} (expected {})", manifest.format, FORMAT_VERSION)));
        }
        if manifest.identity != identity {
            return Err(Error::Artifact("catalog identity changed".into()));
        }

        let items: Vec<CatalogItem> = self.read_artifact(&manifest, CATALOG_FILE)?;
        let vocabulary: Vocabulary = self.read_artifact(&manifest, VOCABULARY_FILE)?;
        let terms: TermMatrix = self.read_artifact(&manifest, TERM_MATRIX_FILE)?;
        let similarity: SimilarityMatrix = self.read_artifact(&manifest, SIMILARITY_FILE)?;

        if items.len() != manifest.item_count || vocabulary.len() != manifest.vocab_size {
            return Err(Error::Artifact("artifact shapes differ from manifest".into()));
        }
        Index::from_parts(items, vocabulary, terms, similarity)
    }

    fn write_artifact<T: Serialize>(&self, name: &str, value: &T) -> Result<ArtifactEntry> {
        let bytes = serde_cbor::to_vec(value)?;
        write_atomic(&self.path(name), &bytes)?;
        debug!("Wrote {} ({} bytes)", name, bytes.len());
        Ok(ArtifactEntry { name: name.to_string(), sha256: hex_digest(&bytes), bytes: bytes.len() as u64 })
    }

    fn read_artifact<T: DeserializeOwned>(&self, manifest: &Manifest, name: &str) -> Result<T> {
        let entry = manifest
            .entry(name)
            .ok_or_else(|| Error::Artifact(format!("{name} missing from manifest")))?;
        let bytes = fs::read(self.path(name))?;
        if bytes.len() as u64 != entry.bytes || hex_digest(&bytes) != entry.sha256 {
            return Err(Error::Artifact(format!("{name} does not match its manifest digest")));
        }
        Ok(serde_cbor::from_slice(&bytes)?)
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

/// Write to a temp file in the same directory, then rename over `path`
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    AtomicFile::new(path, AllowOverwrite)
        .write(|f| f.write_all(bytes))
        .map_err(|e| match e {
            atomicwrites::Error::Internal(e) | atomicwrites::Error::User(e) => Error::Io(e),
        })
}
