//! Error types for the taskboard-protocol crate.
//!
//! This module defines all error types that can occur when working with
//! protocol types, including serialization failures and validation errors.

use thiserror::Error;

use crate::task::TaskId;

/// Errors that can occur during protocol operations.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Failed to serialize a protocol type to JSON.
    #[error("failed to serialize to JSON: {0}")]
    SerializationFailed(#[source] serde_json::Error),

    /// Failed to deserialize a protocol type from JSON.
    #[error("failed to deserialize from JSON: {0}")]
    DeserializationFailed(#[source] serde_json::Error),

    /// A task with the given ID was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// A task title was empty or whitespace only.
    #[error("invalid task title: title cannot be empty")]
    InvalidTaskTitle,
}

impl ProtocolError {
    /// Returns `true` if this error reports a missing task.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::TaskNotFound(_))
    }

    /// Returns `true` if this error reports a rejected draft.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidTaskTitle)
    }
}

/// A specialized Result type for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;
