//! Signed-in admin session record.

use boostmart_storefront::store::{ADMIN_SESSION_KEY, KeyValueStore, read_json, write_json};

use super::RepositoryError;
use crate::models::AdminSession;

/// Repository for the cached admin session.
pub struct AdminSessionRepository<'a, S> {
    store: &'a S,
}

impl<'a, S: KeyValueStore> AdminSessionRepository<'a, S> {
    /// Create a new admin session repository.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// The signed-in admin, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the record is unreadable.
    pub async fn current(&self) -> Result<Option<AdminSession>, RepositoryError> {
        Ok(read_json(self.store, ADMIN_SESSION_KEY).await?)
    }

    /// Store the admin session.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the record cannot be written.
    pub async fn save(&self, session: &AdminSession) -> Result<(), RepositoryError> {
        write_json(self.store, ADMIN_SESSION_KEY, session).await?;
        Ok(())
    }

    /// Forget the admin session.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the store write fails.
    pub async fn clear(&self) -> Result<(), RepositoryError> {
        self.store.remove(ADMIN_SESSION_KEY).await?;
        Ok(())
    }
}
