//! Admin action log repository.
//!
//! Entries are stored oldest first, in the order they were appended.

use tracing::{debug, instrument};

use boostmart_core::AdminLogId;
use boostmart_storefront::store::{ADMIN_LOGS_KEY, Collection, KeyValueStore};

use super::RepositoryError;
use crate::models::{AdminLog, NewAdminLog};

/// Repository for the admin action log.
pub struct AdminLogRepository<'a, S> {
    logs: Collection<'a, S, AdminLog>,
}

impl<'a, S: KeyValueStore> AdminLogRepository<'a, S> {
    /// Create a new admin log repository.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self {
            logs: Collection::new(store, ADMIN_LOGS_KEY),
        }
    }

    /// Append an entry and return it as stored.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the log cannot be written.
    #[instrument(skip_all, fields(action = %entry.action, user = %entry.user))]
    pub async fn append(&self, entry: NewAdminLog) -> Result<AdminLog, RepositoryError> {
        let log = self.logs.append(entry.into_log()).await?;
        debug!(log_id = %log.id, "Admin action logged");
        Ok(log)
    }

    /// Every entry, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the log cannot be read.
    pub async fn list(&self) -> Result<Vec<AdminLog>, RepositoryError> {
        Ok(self.logs.load().await?)
    }

    /// Every entry, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the log cannot be read.
    pub async fn recent(&self) -> Result<Vec<AdminLog>, RepositoryError> {
        let mut logs = self.list().await?;
        logs.reverse();
        Ok(logs)
    }

    /// Get an entry by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the log cannot be read.
    pub async fn get(&self, id: &AdminLogId) -> Result<Option<AdminLog>, RepositoryError> {
        Ok(self.logs.find(id).await?)
    }

    /// Flag an entry as undone.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no entry has the ID.
    #[instrument(skip(self))]
    pub async fn mark_undone(&self, id: &AdminLogId) -> Result<AdminLog, RepositoryError> {
        self.logs
            .update(id, |log| log.undone = true)
            .await?
            .ok_or_else(|| RepositoryError::not_found("admin log", id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use boostmart_core::AdminAction;
    use boostmart_storefront::store::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_append_order_and_recent() {
        let store = MemoryStore::new();
        let repo = AdminLogRepository::new(&store);

        let first = repo
            .append(NewAdminLog::new("admin", AdminAction::Login, "first"))
            .await
            .unwrap();
        let second = repo
            .append(NewAdminLog::new("admin", AdminAction::Login, "second"))
            .await
            .unwrap();

        let oldest_first: Vec<_> = repo.list().await.unwrap().into_iter().map(|l| l.id).collect();
        assert_eq!(oldest_first, vec![first.id.clone(), second.id.clone()]);

        let newest_first: Vec<_> = repo
            .recent()
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(newest_first, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_mark_undone() {
        let store = MemoryStore::new();
        let repo = AdminLogRepository::new(&store);
        let log = repo
            .append(NewAdminLog::new("admin", AdminAction::UpdateOrderStatus, "x").undoable())
            .await
            .unwrap();

        let updated = repo.mark_undone(&log.id).await.unwrap();
        assert!(updated.undone);
        assert!(repo.get(&log.id).await.unwrap().unwrap().undone);

        let err = repo
            .mark_undone(&AdminLogId::new("log-missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }
}
