//! Customer deposit commands.

use tracing::info;

use boostmart_core::format_usd;
use boostmart_storefront::StorefrontError;
use boostmart_storefront::models::Payment;
use boostmart_storefront::services::{DepositRequest, DepositService};
use boostmart_storefront::store::KeyValueStore;

/// Request a deposit for admin review.
///
/// # Errors
///
/// Returns an error if the customer is signed out or the request is invalid.
pub async fn create<S: KeyValueStore>(
    store: &S,
    request: DepositRequest,
) -> Result<(), StorefrontError> {
    let payment = DepositService::new(store).request_deposit(request).await?;
    info!(
        "Deposit {} of {} submitted; funds are added once an admin approves it",
        payment.id,
        format_usd(payment.amount)
    );
    Ok(())
}

/// List the signed-in customer's deposits.
///
/// # Errors
///
/// Returns `StorefrontError::Unauthenticated` without a session.
pub async fn list<S: KeyValueStore>(store: &S) -> Result<(), StorefrontError> {
    let payments = DepositService::new(store).my_deposits().await?;
    info!("{} deposits", payments.len());
    for payment in &payments {
        info!("  {}", summary(payment));
    }
    Ok(())
}

/// One-line payment description shared with the admin listing.
#[must_use]
pub fn summary(payment: &Payment) -> String {
    format!(
        "{}  {:<8}  {}  {}  {}  {}",
        payment.id,
        payment.status.as_str(),
        payment.method,
        format_usd(payment.amount),
        payment.transaction_id,
        payment.created_at.format("%Y-%m-%d %H:%M")
    )
}
