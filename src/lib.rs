/// This crate recommends songs similar to a given song, using TF-IDF
/// vectors of their genres, artists, album and explicit flag.
pub mod catalog;
pub mod config;
pub mod error;
pub mod handle;
pub mod index;
pub mod similarity;
pub mod store;
pub mod utils;
pub mod vectorizer;

/// Index
/// The aggregate built from one catalog snapshot. It holds:
/// - The catalog items, in catalog order
/// - The vocabulary (term columns and IDF weights)
/// - The L2-normalized TF-IDF term matrix
/// - The item-by-item cosine similarity matrix
///
/// All four share one row ordering. An `Index` never changes after it is
/// built, so it can be queried from any number of threads.
///
/// `build_index` and `recommend` are the two core operations.
pub use index::{build_index, recommend, Index, DEFAULT_TOP_N};

/// Catalog input
/// `CatalogItem` is one song. `CatalogSource` is anything that can provide
/// an ordered catalog plus an identity token for cache keying.
/// `JsonCatalog` reads the JSON file written by the ingestion job,
/// `MemoryCatalog` wraps items already in memory.
pub use catalog::{CatalogItem, CatalogSource, JsonCatalog, MemoryCatalog};

/// Errors
/// - `EmptyCatalog`: nothing to build from
/// - `ItemNotFound`: the queried name is not in the catalog
/// - `CatalogUnavailable`: the catalog source could not be read
pub use error::{Error, Result};

/// Search Hits and Hit Entry structures
/// - `Hits`: ranked recommendations, best first
/// - `HitEntry`: one recommended item and its cosine similarity score
pub use similarity::hits::{HitEntry, Hits};

/// Similarity matrix
/// Dense symmetric matrix of cosine similarities between all catalog items.
pub use similarity::SimilarityMatrix;

/// TF-IDF Vectorizer
/// Fits the vocabulary over a catalog and turns text into L2-normalized
/// sparse TF-IDF rows.
/// The weighting strategy is pluggable through `TFIDFEngine`;
/// `DefaultTFIDFEngine` uses raw counts and smoothed IDF.
pub use vectorizer::{tfidf::{DefaultTFIDFEngine, TFIDFEngine}, TfIdfVectorizer};

/// Token Frequency structure
/// Counts token occurrences within one document.
pub use vectorizer::token::TokenFrequency;

/// Fitted vocabulary and term matrix
pub use vectorizer::{matrix::TermMatrix, vocabulary::Vocabulary};

/// Persistence
/// `IndexStore` caches the four built artifacts in a directory and reloads
/// them only when they are complete and match the catalog identity.
/// `IndexHandle` is the process-wide pointer to the active index, swapped
/// atomically on refresh.
pub use handle::IndexHandle;
pub use store::IndexStore;

/// Runtime configuration
pub use config::Config;
