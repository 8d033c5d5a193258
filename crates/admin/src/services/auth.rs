//! Admin authentication.
//!
//! Credentials are compared against [`AdminConfig`]. A successful login is
//! recorded in the action log before the session is stored, and a logout is
//! recorded before the session is cleared.

use chrono::Utc;
use tracing::{info, instrument, warn};

use boostmart_core::AdminAction;
use boostmart_storefront::store::KeyValueStore;

use crate::config::AdminConfig;
use crate::db::{AdminLogRepository, AdminSessionRepository};
use crate::error::AdminError;
use crate::models::{AdminSession, NewAdminLog};

/// Admin sign-in and session handling.
pub struct AdminAuth<'a, S> {
    config: &'a AdminConfig,
    logs: AdminLogRepository<'a, S>,
    sessions: AdminSessionRepository<'a, S>,
}

impl<'a, S: KeyValueStore> AdminAuth<'a, S> {
    /// Create a new admin auth service.
    #[must_use]
    pub const fn new(store: &'a S, config: &'a AdminConfig) -> Self {
        Self {
            config,
            logs: AdminLogRepository::new(store),
            sessions: AdminSessionRepository::new(store),
        }
    }

    /// Check a username and password against the configured credentials.
    #[must_use]
    pub fn verify_credentials(&self, username: &str, password: &str) -> bool {
        self.config.verify(username, password)
    }

    /// Sign in as admin.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Unauthorized` for wrong credentials (nothing is
    /// written), or `AdminError::Repository` if the log or session cannot
    /// be stored.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<AdminSession, AdminError> {
        if !self.verify_credentials(username, password) {
            warn!("Rejected admin login");
            return Err(AdminError::Unauthorized(
                "invalid username or password".to_owned(),
            ));
        }

        self.logs
            .append(NewAdminLog::new(
                username,
                AdminAction::Login,
                "Admin login successful",
            ))
            .await?;

        let session = AdminSession {
            is_admin: true,
            username: username.to_owned(),
            login_time: Utc::now(),
        };
        self.sessions.save(&session).await?;

        info!("Admin logged in");
        Ok(session)
    }

    /// Sign out. Signing out without a session is not an error and writes
    /// no log entry.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Repository` if the store write fails.
    pub async fn logout(&self) -> Result<(), AdminError> {
        let Some(session) = self.sessions.current().await? else {
            self.sessions.clear().await?;
            return Ok(());
        };

        self.logs
            .append(NewAdminLog::new(
                session.username.as_str(),
                AdminAction::Logout,
                "Admin logout",
            ))
            .await?;
        self.sessions.clear().await?;

        info!(username = %session.username, "Admin logged out");
        Ok(())
    }

    /// The signed-in admin, if any.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Repository` if the session is unreadable.
    pub async fn current_session(&self) -> Result<Option<AdminSession>, AdminError> {
        Ok(self.sessions.current().await?)
    }

    /// The signed-in admin, or an error if nobody is signed in.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Unauthorized` without an admin session.
    pub async fn require_session(&self) -> Result<AdminSession, AdminError> {
        self.current_session()
            .await?
            .filter(|session| session.is_admin)
            .ok_or_else(|| AdminError::Unauthorized("admin login required".to_owned()))
    }
}
