//! Error types for the dispatch engine
//!
//! Failure semantics are deliberately thin: the engine never retries, never
//! rolls back earlier sequential calls, and sequential per-job transport
//! failures go to the ambient log rather than the dispatch caller.

use foldercast_core::GroupId;

/// Folder resolution errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum DirectoryError {
    /// The group id does not name a known folder
    #[error("unknown group: {0}")]
    NotFound(GroupId),
}

/// Provider transport errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    /// The provider rejected the update
    #[error("provider rejected update: {0}")]
    Rejected(String),

    /// The provider could not be reached
    #[error("provider unreachable: {0}")]
    Unreachable(String),
}

/// Errors surfaced to the dispatch caller
#[derive(Debug, Clone, thiserror::Error)]
pub enum DispatchError {
    /// The folder could not be resolved; dispatch was a no-op
    #[error("unknown group: {0}")]
    UnknownGroup(GroupId),

    /// A bulk transport call failed
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),
}

impl From<DirectoryError> for DispatchError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::NotFound(group) => Self::UnknownGroup(group),
        }
    }
}
