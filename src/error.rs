//!
//! Defines error types for the session core.

use std::path::PathBuf;

/// Errors raised by a [`SessionStorage`](crate::storage::SessionStorage) backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The key cannot be mapped onto the backend (e.g. contains a path separator).
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
    /// Any other backend failure.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Errors surfaced by the session store.
///
/// Persistence failures during `login`/`logout` are never returned; they are logged
/// and the in-memory session stays authoritative. Only validation and explicit
/// `flush` calls produce these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// `login` was called with an empty or whitespace-only username.
    #[error("Username must not be empty")]
    EmptyUsername,
    /// A role name that is not one of `user`, `admin`, `developer`.
    #[error("Unknown role: {0:?}")]
    UnknownRole(String),
    /// A persisted record whose `isAuthenticated` flag disagrees with its `user`.
    #[error("Persisted session violates the authenticated/user invariant")]
    InconsistentRecord,
    /// The session record could not be encoded or decoded.
    #[error("Session serialization failed: {0}")]
    Serialization(String),
    /// The storage backend rejected a read or write.
    #[error("Session storage failed: {0}")]
    Storage(String),
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Serialization(err.to_string())
    }
}

impl From<StorageError> for SessionError {
    fn from(err: StorageError) -> Self {
        SessionError::Storage(err.to_string())
    }
}

/// Errors raised while loading or validating a [`SessionConfig`](crate::config::SessionConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// The route layout is unusable, e.g. a relative path or a protected login page.
    #[error("Invalid route layout: {0}")]
    InvalidLayout(String),
}
