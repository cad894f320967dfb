//! Error types for the document actor.

use crate::framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur while reading or changing page elements.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DocumentError {
    /// No element with this identifier is on the page.
    #[error("Element not found: {0}")]
    NotFound(String),

    /// An element with this identifier is already on the page.
    #[error("Element already exists: {0}")]
    AlreadyExists(String),

    /// The element refused the operation (wrong kind, unknown field).
    #[error("Element rejected operation: {0}")]
    Rejected(String),

    /// The actor answered with a result for a different action.
    #[error("Unexpected action result: {0}")]
    UnexpectedResult(String),

    /// An error occurred while communicating with the actor.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for DocumentError {
    fn from(msg: String) -> Self {
        DocumentError::ActorCommunicationError(msg)
    }
}

impl From<FrameworkError> for DocumentError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => DocumentError::NotFound(id),
            FrameworkError::AlreadyExists(id) => DocumentError::AlreadyExists(id),
            FrameworkError::Custom(msg) => DocumentError::Rejected(msg),
            other => DocumentError::ActorCommunicationError(other.to_string()),
        }
    }
}
