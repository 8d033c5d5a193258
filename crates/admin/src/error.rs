//! Unified error handling for admin.

use thiserror::Error;

use boostmart_storefront::StorefrontError;
use boostmart_storefront::store::StoreError;

use crate::db::RepositoryError;

/// Application-level error type for the admin console.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Repository(#[from] RepositoryError),

    /// A storefront workflow failed.
    #[error(transparent)]
    Storefront(#[from] StorefrontError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing or invalid admin credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The log entry cannot be undone (not undoable, or already undone).
    #[error("Cannot undo this action: {0}")]
    CannotUndo(String),

    /// Undo is not implemented for this kind of action.
    #[error("Unsupported action type: {0}")]
    UnsupportedAction(String),

    /// The log entry is missing data its action requires.
    #[error("Invalid log entry: {0}")]
    InvalidLogEntry(String),

    /// Crediting a deposit would overflow the balance.
    #[error("Balance overflow: {0}")]
    BalanceOverflow(String),
}

impl From<StoreError> for AdminError {
    fn from(err: StoreError) -> Self {
        Self::Repository(RepositoryError::Store(err))
    }
}
