//! Error types
//!
//! Only configuration and content loading can fail. Anchor generation, link
//! resolution and rendering are total and have no error type.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a catalog from configuration
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Duplicate catalog id '{id}'")]
    DuplicateId { id: String },

    /// Two entries share a file name, which makes link resolution ambiguous
    #[error("Duplicate catalog file name '{file_name}' (entries '{first}' and '{second}')")]
    DuplicateFileName {
        file_name: String,
        first: String,
        second: String,
    },

    #[error("Invalid catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Errors raised by a content store
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Content not found: '{name}'")]
    NotFound { name: String },

    #[error("Permission denied: cannot read '{path}'")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Absolute paths and `..` components would escape the content root
    #[error("Invalid content name '{name}'")]
    InvalidName { name: String },

    #[error("Invalid YAML in '{name}': {source}")]
    Yaml {
        name: String,
        #[source]
        source: serde_yaml::Error,
    },
}

impl ContentError {
    /// Classify an I/O error by kind, keeping the requested name for not-found.
    pub fn from_io(error: io::Error, name: &str, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => ContentError::NotFound {
                name: name.to_string(),
            },
            io::ErrorKind::PermissionDenied => ContentError::PermissionDenied {
                path,
                source: error,
            },
            _ => ContentError::Read {
                path,
                source: error,
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound { .. })
    }
}

/// Errors raised when loading a wiki page
#[derive(Error, Debug)]
pub enum WikiError {
    #[error("Page not found: '{id}'")]
    PageNotFound { id: String },

    #[error("Failed to load {file_name}: {source}")]
    Content {
        file_name: String,
        #[source]
        source: ContentError,
    },
}

/// Result type for content store operations
pub type ContentResult<T> = Result<T, ContentError>;
