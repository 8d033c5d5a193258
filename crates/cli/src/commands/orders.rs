//! Customer order commands.

use tracing::info;

use boostmart_core::{OrderId, format_usd};
use boostmart_storefront::StorefrontError;
use boostmart_storefront::models::Order;
use boostmart_storefront::services::{CheckoutService, OrderRequest};
use boostmart_storefront::store::KeyValueStore;

/// Place an order for the signed-in customer.
///
/// # Errors
///
/// Returns an error if the customer is signed out, the request is invalid,
/// or the balance does not cover the total.
pub async fn place<S: KeyValueStore>(store: &S, request: OrderRequest) -> Result<(), StorefrontError> {
    let order = CheckoutService::new(store).place_order(request).await?;
    info!(
        "Placed {} for {} ({} x {})",
        order.id,
        format_usd(order.price),
        order.quantity,
        order.service_name
    );
    Ok(())
}

/// List the signed-in customer's orders.
///
/// # Errors
///
/// Returns `StorefrontError::Unauthenticated` without a session.
pub async fn list<S: KeyValueStore>(store: &S) -> Result<(), StorefrontError> {
    let orders = CheckoutService::new(store).my_orders().await?;
    info!("{} orders", orders.len());
    for order in &orders {
        info!("  {}", summary(order));
    }
    Ok(())
}

/// Cancel a pending order.
///
/// # Errors
///
/// Returns `StorefrontError::InvalidTransition` unless the order is pending.
pub async fn cancel<S: KeyValueStore>(store: &S, id: &OrderId) -> Result<(), StorefrontError> {
    let order = CheckoutService::new(store).cancel_order(id).await?;
    info!("Cancelled {}", order.id);
    Ok(())
}

/// One-line order description shared with the admin listing.
#[must_use]
pub fn summary(order: &Order) -> String {
    format!(
        "{}  {:<10}  {} x {}  {}  {}  {}",
        order.id,
        order.status.as_str(),
        order.quantity,
        order.service_name,
        format_usd(order.price),
        order.link,
        order.created_at.format("%Y-%m-%d %H:%M")
    )
}
