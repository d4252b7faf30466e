use std::path::PathBuf;

use thiserror::Error;

/// Errors that occur while loading packs into a repository.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading the index or a pack file.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The index or a pack file is not valid JSON for its schema.
    #[error("{path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A pack file declares a different id than its index entry.
    #[error("{path}: id mismatch (expected '{expected}', found '{found}')")]
    IdMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },

    /// Two packs share an id.
    #[error("duplicate pack id '{id}'")]
    DuplicatePack { id: String },
}
