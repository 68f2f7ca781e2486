use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// No items to vectorize, so no vocabulary can exist
    #[error("Catalog is empty, nothing to index")]
    EmptyCatalog,

    /// The queried name matched no catalog item
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// Cached artifact set is missing, incomplete or does not match
    #[error("Artifact error: {0}")]
    Artifact(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_cbor::Error> for Error {
    fn from(e: serde_cbor::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
