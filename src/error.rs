//! Error types for the content pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Fatal content errors. Each one blocks the page that triggered it.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Content not found: {id} in {dir:?}")]
    NotFound { id: String, dir: PathBuf },

    #[error("Malformed front-matter in {path:?}: {message}")]
    FrontMatter { path: PathBuf, message: String },

    #[error("Math render error in `{expression}`: {message}")]
    Math { expression: String, message: String },

    #[error("Render error: {0}")]
    Render(String),

    #[error("Malformed data file {path:?}: {message}")]
    Data { path: PathBuf, message: String },

    #[error("Cannot read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A record that cannot appear in a listing.
///
/// Not fatal: the listing drops the record and logs this.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{id}' is missing required front-matter: {}", .missing.join(", "))]
pub struct ValidationError {
    pub id: String,
    pub missing: Vec<&'static str>,
}

impl ContentError {
    pub fn read(path: &std::path::Path, source: std::io::Error) -> Self {
        ContentError::Read {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T, E = ContentError> = std::result::Result<T, E>;
