//! Error types for storage and repository operations.

use std::path::PathBuf;

use taskboard_protocol::ProtocolError;

/// Errors that can occur while reading or writing slots, or while
/// mutating the task collection.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A protocol-level failure: validation, a missing task, or serialization.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Failed to read a storage slot.
    #[error("failed to read slot '{key}': {source}")]
    ReadSlot {
        /// The slot that could not be read.
        key: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a storage slot.
    #[error("failed to write slot '{key}': {source}")]
    WriteSlot {
        /// The slot that could not be written.
        key: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create the storage directory.
    #[error("failed to create storage directory at {path}: {source}")]
    CreateDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A slot key that cannot be used as a file name.
    #[error("invalid slot key: '{0}'")]
    InvalidKey(String),
}

impl StoreError {
    /// Returns `true` if the operation targeted a task that does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Protocol(e) if e.is_not_found())
    }

    /// Returns `true` if the operation was refused by draft validation.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Protocol(e) if e.is_validation())
    }
}

/// A specialized Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
