use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PartError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("invalid chunk size {0}: must be greater than zero")]
    InvalidChunkSize(u64),

    #[error("source artifact not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    /// A stale part survived cleanup; nothing new was written.
    #[error("could not remove stale part {}: {source}", path.display())]
    StaleCleanup {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not write part {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("part set has a gap: index {missing} is missing ({found} parts found)")]
    ReassemblyGap { missing: u64, found: usize },

    #[error("part index {index} appears more than once")]
    DuplicatePart { index: u64 },

    #[error("could not fetch part {name}: {source}")]
    PartFetch {
        name: String,
        source: std::io::Error,
    },

    #[error("manifest mismatch: {0}")]
    ManifestMismatch(String),
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, PartError>;
