pub mod source;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::Result;

pub use source::{JsonCatalog, MemoryCatalog};

/// One recommendable song.
///
/// `genres`, `artists`, `album` and `explicit` feed the similarity text.
/// The remaining fields are carried through for display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// stable identifier, unique inside a catalog
    pub id: String,
    /// display title, also the lookup key for queries
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub artists: Vec<String>,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub explicit: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
}

impl CatalogItem {
    /// Minimal item, display-only fields left empty
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            genres: Vec::new(),
            artists: Vec::new(),
            album: String::new(),
            explicit: false,
            release_date: None,
            popularity: None,
            image_url: None,
            external_url: None,
        }
    }

    pub fn with_genres<T: AsRef<str>>(mut self, genres: &[T]) -> Self {
        self.genres = genres.iter().map(|g| g.as_ref().to_string()).collect();
        self
    }

    pub fn with_artists<T: AsRef<str>>(mut self, artists: &[T]) -> Self {
        self.artists = artists.iter().map(|a| a.as_ref().to_string()).collect();
        self
    }

    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = album.into();
        self
    }

    pub fn with_explicit(mut self, explicit: bool) -> Self {
        self.explicit = explicit;
        self
    }

    /// The text the vectorizer sees for this item.
    ///
    /// `"{genres} {artists} {album} {explicit}"` with list fields joined by `", "`.
    /// Missing genres render as an empty string.
    pub fn content(&self) -> String {
        format!(
            "{} {} {} {}",
            self.genres.join(", "),
            self.artists.join(", "),
            self.album,
            self.explicit
        )
    }

    /// Case-insensitive exact name comparison
    #[inline]
    pub fn name_matches(&self, lowered_query: &str) -> bool {
        self.name.to_lowercase() == lowered_query
    }
}

/// Where a catalog comes from.
///
/// `identity` must change whenever `fetch` would return different items;
/// it keys the artifact cache.
pub trait CatalogSource {
    fn identity(&self) -> Result<String>;
    fn fetch(&self) -> Result<Vec<CatalogItem>>;

    /// Identity and items read together
    fn snapshot(&self) -> Result<(String, Vec<CatalogItem>)> {
        Ok((self.identity()?, self.fetch()?))
    }
}

/// SHA-256 over the CBOR encoding of the items, hex encoded
pub fn fingerprint(items: &[CatalogItem]) -> Result<String> {
    let bytes = serde_cbor::to_vec(&items)?;
    Ok(hex_digest(&bytes))
}

pub(crate) fn hex_digest(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}
