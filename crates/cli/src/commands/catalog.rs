//! Catalog browsing and quotes.

use tracing::info;

use boostmart_core::{DeviceType, ServiceId, format_usd};
use boostmart_storefront::StorefrontError;
use boostmart_storefront::db::ServiceRepository;
use boostmart_storefront::models::Service;
use boostmart_storefront::services::{CheckoutService, OrderRequest};
use boostmart_storefront::store::KeyValueStore;

/// List services, optionally in one category.
///
/// # Errors
///
/// Returns an error if the catalog cannot be read.
pub async fn list<S: KeyValueStore>(
    store: &S,
    category: Option<&str>,
) -> Result<(), StorefrontError> {
    let services = ServiceRepository::new(store);
    let services = match category {
        Some(category) => services.list_by_category(category).await?,
        None => services.list().await?,
    };

    info!("{} services", services.len());
    for service in &services {
        info!("  {}", summary(service));
    }
    Ok(())
}

/// One-line description of a service.
pub fn summary(service: &Service) -> String {
    format!(
        "{}  {} [{}] {}/{} (min {}){}",
        service.id,
        service.name,
        service.category,
        format_usd(service.price),
        service.unit,
        service.min_order,
        if service.is_active() { "" } else { "  inactive" }
    )
}

/// List distinct categories.
///
/// # Errors
///
/// Returns an error if the catalog cannot be read.
pub async fn categories<S: KeyValueStore>(store: &S) -> Result<(), StorefrontError> {
    for category in ServiceRepository::new(store).categories().await? {
        info!("  {category}");
    }
    Ok(())
}

/// List distinct geographic targets.
///
/// # Errors
///
/// Returns an error if the catalog cannot be read.
pub async fn targets<S: KeyValueStore>(store: &S) -> Result<(), StorefrontError> {
    for target in ServiceRepository::new(store).target_options().await? {
        info!("  {target}");
    }
    Ok(())
}

/// Show one service in full.
///
/// # Errors
///
/// Returns `StorefrontError::NotFound` for an unknown ID.
pub async fn show<S: KeyValueStore>(store: &S, id: &ServiceId) -> Result<(), StorefrontError> {
    let service = ServiceRepository::new(store)
        .get(id)
        .await?
        .ok_or_else(|| StorefrontError::NotFound(format!("service {id}")))?;

    describe(&service);
    Ok(())
}

fn describe(service: &Service) {
    info!("{} ({})", service.name, service.id);
    info!("  {}", service.description);
    info!("  Category:  {}", service.category);
    info!("  Price:     {} per {}", format_usd(service.price), service.unit);
    info!("  Minimum:   {}", service.min_order);
    info!("  Active:    {}", service.is_active());
    if let Some(targets) = &service.target_options {
        info!("  Targets:   {}", targets.join(", "));
    }
    if let Some(devices) = &service.device_types {
        let devices: Vec<_> = devices.iter().map(|d| d.as_str()).collect();
        info!("  Devices:   {}", devices.join(", "));
    }
}

/// Price an order configuration.
///
/// # Errors
///
/// Returns an error for an unknown service or an invalid configuration.
pub async fn quote<S: KeyValueStore>(
    store: &S,
    service_id: ServiceId,
    quantity: u64,
    device: DeviceType,
    target: Option<String>,
) -> Result<(), StorefrontError> {
    let request = OrderRequest {
        service_id,
        quantity,
        device_type: device,
        target_option: target,
        link: String::new(),
    };
    let quote = CheckoutService::new(store).quote(&request).await?;

    info!(
        "{} x {} at {} ({} x{}, {} x{})",
        quote.quantity,
        quote.service_id,
        format_usd(quote.unit_price),
        quote.device_type,
        quote.device_multiplier,
        quote.target_option,
        quote.target_multiplier
    );
    info!("Total: {}", format_usd(quote.total));
    Ok(())
}
