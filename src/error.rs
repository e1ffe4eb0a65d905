//! Error taxonomy for the operations core.
//!
//! Write paths check permissions before touching any collection, so a
//! `PermissionDenied` always means nothing was mutated. Store failures
//! surface only from the load/save boundary; the aggregation functions
//! themselves are pure and infallible.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, OpsError>;

#[derive(Debug, Error)]
pub enum OpsError {
    /// The acting user's role or point assignments do not cover the
    /// attempted operation.
    #[error("permission denied: {action}")]
    PermissionDenied { action: &'static str },

    /// Collection read/write against the local database failed.
    #[error("store: {0}")]
    Storage(#[from] rusqlite::Error),

    /// A persisted collection could not be decoded, or a collection could
    /// not be encoded for saving.
    #[error("codec: {0}")]
    Codec(#[from] serde_json::Error),

    /// Data directory or database file could not be prepared.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// Password hashing failed.
    #[error("hash: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    /// Another caller panicked while holding the connection lock.
    #[error("database lock poisoned")]
    LockPoisoned,
}

impl OpsError {
    pub(crate) fn denied(action: &'static str) -> Self {
        OpsError::PermissionDenied { action }
    }
}
