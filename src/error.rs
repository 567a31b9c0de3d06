//! Error types for the namespaces generator
//!
//! Every variant is fatal for a run. Entry-level problems inside the
//! generated-sql archive never surface here; the registry loader skips them.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the generator
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Failed to fetch {uri}: {source}")]
    Fetch {
        uri: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("Invalid URI '{uri}': {source}")]
    InvalidUri {
        uri: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to read generated-sql archive: {0}")]
    Archive(#[source] std::io::Error),

    #[error("Failed to decode app listings: {0}")]
    Listings(#[from] ListingsError),

    #[error("Invalid custom namespaces file {path}: {message}")]
    CustomNamespaces { path: PathBuf, message: String },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// App listing decoding errors
#[derive(Error, Debug)]
pub enum ListingsError {
    #[error("gzip decompression failed: {0}")]
    Decompress(#[source] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("listing '{app_name}' is missing {field}")]
    MissingField {
        app_name: String,
        field: &'static str,
    },
}

/// Result type alias for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;
