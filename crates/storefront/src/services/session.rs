//! Mock customer sign-in.
//!
//! There are no accounts: signing in with the `google` provider fabricates
//! a demo customer and caches it as the store's single session record.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, instrument};

use boostmart_core::{Email, UserId};

use crate::db::UserRepository;
use crate::error::StorefrontError;
use crate::models::User;
use crate::store::KeyValueStore;

/// The only provider the mock sign-in accepts.
pub const GOOGLE_PROVIDER: &str = "google";

const DEMO_NAME: &str = "Demo User";
const DEMO_EMAIL: &str = "demo@example.com";

/// Customer session management.
pub struct SessionService<'a, S> {
    users: UserRepository<'a, S>,
}

impl<'a, S: KeyValueStore> SessionService<'a, S> {
    /// Create a new session service.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self {
            users: UserRepository::new(store),
        }
    }

    /// Sign in through `provider`, replacing any existing session.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::UnsupportedProvider` for anything but
    /// `google`.
    #[instrument(skip(self))]
    pub async fn sign_in(&self, provider: &str) -> Result<User, StorefrontError> {
        if provider != GOOGLE_PROVIDER {
            return Err(StorefrontError::UnsupportedProvider(provider.to_owned()));
        }

        let email = Email::parse(DEMO_EMAIL)
            .map_err(|e| StorefrontError::Validation(format!("demo email: {e}")))?;
        let user = User {
            id: UserId::new(format!(
                "{}-{}",
                UserId::PREFIX,
                Utc::now().timestamp_millis()
            )),
            name: DEMO_NAME.to_owned(),
            email,
            balance: Decimal::ZERO,
        };

        self.users.save(&user).await?;
        info!(user_id = %user.id, "Customer signed in");
        Ok(user)
    }

    /// Forget the current session.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Repository` if the store write fails.
    #[instrument(skip(self))]
    pub async fn sign_out(&self) -> Result<(), StorefrontError> {
        self.users.clear().await?;
        info!("Customer signed out");
        Ok(())
    }

    /// The signed-in customer, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Repository` if the record is unreadable.
    pub async fn current(&self) -> Result<Option<User>, StorefrontError> {
        Ok(self.users.current().await?)
    }

    /// The signed-in customer, or an error naming what needed one.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Unauthenticated` if nobody is signed in.
    pub async fn require_user(&self, action: &'static str) -> Result<User, StorefrontError> {
        self.current()
            .await?
            .ok_or(StorefrontError::Unauthenticated(action))
    }
}
