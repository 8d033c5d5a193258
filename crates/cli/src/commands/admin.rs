//! Admin console commands.
//!
//! Everything except `login` requires an admin session; log entries are
//! attributed to the signed-in username.
//!
//! # Usage
//!
//! ```bash
//! bm-cli admin login -u admin -p '...'
//! bm-cli admin order-status order-... running
//! bm-cli admin undo log-...
//! bm-cli admin service-update service.yaml
//! ```

use tracing::info;

use boostmart_admin::services::{AdminAuth, AdminConsole};
use boostmart_admin::{AdminConfig, AdminError};
use boostmart_core::{AdminLogId, OrderId, OrderStatus, PaymentId, PaymentStatus, ServiceId};
use boostmart_storefront::models::Service;
use boostmart_storefront::store::KeyValueStore;

use super::{catalog, deposits, orders};

async fn console<'a, S: KeyValueStore>(
    store: &'a S,
    config: &AdminConfig,
) -> Result<AdminConsole<'a, S>, AdminError> {
    let session = AdminAuth::new(store, config).require_session().await?;
    Ok(AdminConsole::new(store, session.username))
}

/// Sign in as admin.
///
/// # Errors
///
/// Returns `AdminError::Unauthorized` for wrong credentials.
pub async fn login<S: KeyValueStore>(
    store: &S,
    config: &AdminConfig,
    username: &str,
    password: &str,
) -> Result<(), AdminError> {
    let session = AdminAuth::new(store, config)
        .login(username, password)
        .await?;
    info!("Logged in as {}", session.username);
    Ok(())
}

/// Sign out.
///
/// # Errors
///
/// Returns an error if the store write fails.
pub async fn logout<S: KeyValueStore>(store: &S, config: &AdminConfig) -> Result<(), AdminError> {
    AdminAuth::new(store, config).logout().await?;
    info!("Logged out");
    Ok(())
}

/// List every order.
///
/// # Errors
///
/// Returns `AdminError::Unauthorized` without an admin session.
pub async fn orders<S: KeyValueStore>(store: &S, config: &AdminConfig) -> Result<(), AdminError> {
    let all = console(store, config).await?.list_orders().await?;
    info!("{} orders", all.len());
    for order in &all {
        let owner = order.user_id.as_ref().map_or("-", |id| id.as_str());
        info!("  {}  [{owner}]", orders::summary(order));
    }
    Ok(())
}

/// Set an order's status.
///
/// # Errors
///
/// Returns `AdminError::NotFound` for an unknown order.
pub async fn order_status<S: KeyValueStore>(
    store: &S,
    config: &AdminConfig,
    id: &OrderId,
    status: OrderStatus,
) -> Result<(), AdminError> {
    let order = console(store, config)
        .await?
        .update_order_status(id, status)
        .await?;
    info!("Order {} is now {}", order.id, order.status);
    Ok(())
}

/// List every payment.
///
/// # Errors
///
/// Returns `AdminError::Unauthorized` without an admin session.
pub async fn payments<S: KeyValueStore>(store: &S, config: &AdminConfig) -> Result<(), AdminError> {
    let all = console(store, config).await?.list_payments().await?;
    info!("{} payments", all.len());
    for payment in &all {
        let owner = payment.user_id.as_ref().map_or("-", |id| id.as_str());
        info!("  {}  [{owner}]", deposits::summary(payment));
    }
    Ok(())
}

/// Set a payment's status.
///
/// # Errors
///
/// Returns `AdminError::NotFound` for an unknown payment.
pub async fn payment_status<S: KeyValueStore>(
    store: &S,
    config: &AdminConfig,
    id: &PaymentId,
    status: PaymentStatus,
) -> Result<(), AdminError> {
    let payment = console(store, config)
        .await?
        .update_payment_status(id, status)
        .await?;
    info!("Payment {} is now {}", payment.id, payment.status);
    Ok(())
}

/// Show the action log, newest first.
///
/// # Errors
///
/// Returns `AdminError::Unauthorized` without an admin session.
pub async fn logs<S: KeyValueStore>(store: &S, config: &AdminConfig) -> Result<(), AdminError> {
    let entries = console(store, config).await?.logs().await?;
    info!("{} log entries", entries.len());
    for entry in &entries {
        let flag = if entry.undone {
            "  (undone)"
        } else if entry.can_undo {
            "  (undoable)"
        } else {
            ""
        };
        info!(
            "  {}  {}  {}  {}: {}{flag}",
            entry.id,
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.user,
            entry.action,
            entry.details
        );
    }
    Ok(())
}

/// Undo a logged action.
///
/// # Errors
///
/// Returns `AdminError::CannotUndo` or `AdminError::UnsupportedAction` if the
/// entry cannot be reversed.
pub async fn undo<S: KeyValueStore>(
    store: &S,
    config: &AdminConfig,
    log_id: &AdminLogId,
) -> Result<(), AdminError> {
    let record = console(store, config).await?.undo(log_id).await?;
    info!("{}", record.details);
    Ok(())
}

/// List every service, including inactive ones.
///
/// # Errors
///
/// Returns `AdminError::Unauthorized` without an admin session.
pub async fn services<S: KeyValueStore>(store: &S, config: &AdminConfig) -> Result<(), AdminError> {
    let all = console(store, config).await?.list_services().await?;
    info!("{} services", all.len());
    for service in &all {
        info!("  {}", catalog::summary(service));
    }
    Ok(())
}

/// Add a service to the catalog under a new ID.
///
/// # Errors
///
/// Returns `AdminError::Unauthorized` without an admin session.
pub async fn service_create<S: KeyValueStore>(
    store: &S,
    config: &AdminConfig,
    service: Service,
) -> Result<(), AdminError> {
    let created = console(store, config).await?.create_service(service).await?;
    info!("Created service {} ({})", created.id, created.name);
    Ok(())
}

/// Replace the service with the same ID.
///
/// # Errors
///
/// Returns `AdminError::NotFound` if no service has the ID.
pub async fn service_update<S: KeyValueStore>(
    store: &S,
    config: &AdminConfig,
    service: Service,
) -> Result<(), AdminError> {
    let updated = console(store, config).await?.update_service(service).await?;
    info!("Updated service {} ({})", updated.id, updated.name);
    Ok(())
}

/// Delete a service.
///
/// # Errors
///
/// Returns an error if no service has the ID.
pub async fn service_delete<S: KeyValueStore>(
    store: &S,
    config: &AdminConfig,
    id: &ServiceId,
) -> Result<(), AdminError> {
    console(store, config).await?.delete_service(id).await?;
    info!("Deleted service {id}");
    Ok(())
}
