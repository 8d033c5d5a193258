//! Customer sign-in commands.

use tracing::info;

use boostmart_core::format_usd;
use boostmart_storefront::StorefrontError;
use boostmart_storefront::services::SessionService;
use boostmart_storefront::store::KeyValueStore;

/// Sign in through `provider`.
///
/// # Errors
///
/// Returns `StorefrontError::UnsupportedProvider` for anything but `google`.
pub async fn sign_in<S: KeyValueStore>(store: &S, provider: &str) -> Result<(), StorefrontError> {
    let user = SessionService::new(store).sign_in(provider).await?;
    info!("Signed in as {} <{}> ({})", user.name, user.email, user.id);
    Ok(())
}

/// Sign out.
///
/// # Errors
///
/// Returns an error if the store write fails.
pub async fn sign_out<S: KeyValueStore>(store: &S) -> Result<(), StorefrontError> {
    SessionService::new(store).sign_out().await?;
    info!("Signed out");
    Ok(())
}

/// Show the signed-in customer and their balance.
///
/// # Errors
///
/// Returns an error if the session record is unreadable.
pub async fn show<S: KeyValueStore>(store: &S) -> Result<(), StorefrontError> {
    match SessionService::new(store).current().await? {
        Some(user) => {
            info!("{} <{}> ({})", user.name, user.email, user.id);
            info!("Balance: {}", format_usd(user.balance));
        }
        None => info!("Not signed in"),
    }
    Ok(())
}
