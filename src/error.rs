//! Error types for the reporter and its providers.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InfoError {
    #[error("Build information provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Failed to read snapshot {}: {source}", .path.display())]
    Snapshot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid snapshot {}: {source}", .path.display())]
    SnapshotFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to write report: {0}")]
    Output(#[from] io::Error),

    #[error("Unrecognised ImageMagick version: {0:?}")]
    InvalidVersion(String),

    #[error("Unsupported quantum depth: {0:?} (expected 8, 16 or 32)")]
    InvalidQuantumDepth(String),
}
