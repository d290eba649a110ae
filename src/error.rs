//! Error types for ouilookup.
//!
//! Only construction-time failures live here. Query-time input problems
//! (malformed MAC, unknown country) are not errors; they produce an empty
//! result instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OuiError {
    #[error("Cannot read registry source {path:?}: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Registry source is not valid UTF-8 (line {line}): {source}")]
    Decoding {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to download {url}: {source}")]
    DownloadFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to save registry to {path:?}: {source}")]
    PersistFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, OuiError>;
