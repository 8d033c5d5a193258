//! Signed-in customer record.
//!
//! There is exactly one cached customer per store, under the `user` key.
//! Balance changes rewrite the whole record.

use rust_decimal::Decimal;
use tracing::{info, instrument};

use super::RepositoryError;
use crate::models::User;
use crate::store::{KeyValueStore, USER_KEY, read_json, write_json};

/// Repository for the cached customer record.
pub struct UserRepository<'a, S> {
    store: &'a S,
}

impl<'a, S: KeyValueStore> UserRepository<'a, S> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Get the signed-in customer, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the record is unreadable.
    pub async fn current(&self) -> Result<Option<User>, RepositoryError> {
        Ok(read_json(self.store, USER_KEY).await?)
    }

    /// Store `user` as the signed-in customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the record cannot be written.
    #[instrument(skip_all, fields(user_id = %user.id))]
    pub async fn save(&self, user: &User) -> Result<(), RepositoryError> {
        write_json(self.store, USER_KEY, user).await?;
        Ok(())
    }

    /// Forget the signed-in customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the store write fails.
    pub async fn clear(&self) -> Result<(), RepositoryError> {
        self.store.remove(USER_KEY).await?;
        Ok(())
    }

    /// Set the signed-in customer's balance.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if nobody is signed in.
    #[instrument(skip(self))]
    pub async fn update_balance(&self, balance: Decimal) -> Result<User, RepositoryError> {
        let mut user = self
            .current()
            .await?
            .ok_or_else(|| RepositoryError::not_found("user", "session"))?;
        user.balance = balance;
        self.save(&user).await?;
        info!(user_id = %user.id, %balance, "Balance updated");
        Ok(user)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use boostmart_core::{Email, UserId};

    use super::*;
    use crate::store::{MemoryStore, StoreError};

    fn demo_user() -> User {
        User {
            id: UserId::new("user-1"),
            name: "Demo User".to_owned(),
            email: Email::parse("demo@example.com").unwrap(),
            balance: Decimal::ZERO,
        }
    }

    #[tokio::test]
    async fn test_save_current_clear() {
        let store = MemoryStore::new();
        let repo = UserRepository::new(&store);
        assert_eq!(repo.current().await.unwrap(), None);

        repo.save(&demo_user()).await.unwrap();
        assert_eq!(repo.current().await.unwrap(), Some(demo_user()));

        repo.clear().await.unwrap();
        assert_eq!(repo.current().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_balance_requires_session() {
        let store = MemoryStore::new();
        let repo = UserRepository::new(&store);

        let err = repo.update_balance(Decimal::ONE).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { entity: "user", .. }));

        repo.save(&demo_user()).await.unwrap();
        let user = repo.update_balance(Decimal::new(4250, 2)).await.unwrap();
        assert_eq!(user.balance, Decimal::new(4250, 2));
    }

    #[tokio::test]
    async fn test_missing_balance_reads_as_zero() {
        let store = MemoryStore::with_entries([(
            USER_KEY,
            r#"{"id":"user-1","name":"Demo User","email":"demo@example.com"}"#,
        )]);
        let user = UserRepository::new(&store).current().await.unwrap().unwrap();
        assert_eq!(user.balance, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_corrupt_user_is_reported() {
        let store = MemoryStore::with_entries([(USER_KEY, "{")]);
        let err = UserRepository::new(&store).current().await.unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::Store(StoreError::Corrupt { .. })
        ));
    }
}
