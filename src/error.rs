//! Error types for the datetime prefixer

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for datetime prefixer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the datetime prefixer
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a recognized image format: {path}")]
    NotAnImage { path: PathBuf },

    #[error("Failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list input directory: {0}")]
    ListDir(#[from] walkdir::Error),

    #[error("Could not resolve filename conflict for {path}")]
    FilenameConflict { path: PathBuf },

    #[error("Invalid file name: {path}")]
    InvalidFileName { path: PathBuf },
}

