use serde::{Deserialize, Serialize};

/// Bumped whenever the artifact encoding changes
pub const FORMAT_VERSION: u32 = 1;

pub const MANIFEST_FILE: &str = "manifest.json";
pub const CATALOG_FILE: &str = "catalog.cbor";
pub const VOCABULARY_FILE: &str = "vocabulary.cbor";
pub const TERM_MATRIX_FILE: &str = "term_matrix.cbor";
pub const SIMILARITY_FILE: &str = "similarity.cbor";

/// The four artifacts, in write order
pub const ARTIFACT_FILES: [&str; 4] = [CATALOG_FILE, VOCABULARY_FILE, TERM_MATRIX_FILE, SIMILARITY_FILE];

/// Written last; its presence marks the artifact set as complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub format: u32,
    /// identity of the catalog the set was built from
    pub identity: String,
    pub item_count: usize,
    pub vocab_size: usize,
    pub artifacts: Vec<ArtifactEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactEntry {
    pub name: String,
    pub sha256: String,
    pub bytes: u64,
}

impl Manifest {
    pub fn entry(&self, name: &str) -> Option<&ArtifactEntry> {
        self.artifacts.iter().find(|a| a.name == name)
    }
}
