//! Order price calculator.
//!
//! `total = unit price x quantity x device multiplier x target multiplier`,
//! rounded to cents. Device multipliers come from [`DeviceType::multiplier`];
//! any target other than `global` costs 15% more.

use rust_decimal::Decimal;
use serde::Serialize;

use boostmart_core::{DeviceType, ServiceId, round_cents};

use crate::error::StorefrontError;
use crate::models::Service;

/// The target that carries no surcharge.
pub const GLOBAL_TARGET: &str = "global";

/// Surcharge for geo-targeted delivery (1.15x).
pub const TARGETED_MULTIPLIER: Decimal = Decimal::from_parts(115, 0, 0, false, 2);

/// A priced order configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub service_id: ServiceId,
    pub quantity: u64,
    pub unit_price: Decimal,
    pub device_type: DeviceType,
    pub target_option: String,
    pub device_multiplier: Decimal,
    pub target_multiplier: Decimal,
    pub total: Decimal,
}

/// The target used when the customer does not pick one: the service's first
/// listed target, or `global`.
#[must_use]
pub fn default_target(service: &Service) -> &str {
    service
        .target_options
        .as_ref()
        .and_then(|targets| targets.first())
        .map_or(GLOBAL_TARGET, String::as_str)
}

/// Surcharge multiplier for a target option.
#[must_use]
pub fn target_multiplier(target: &str) -> Decimal {
    if target == GLOBAL_TARGET {
        Decimal::ONE
    } else {
        TARGETED_MULTIPLIER
    }
}

/// Price an order configuration for `service`.
///
/// # Errors
///
/// Returns `StorefrontError::Validation` if the quantity is below the
/// service minimum, the device or target is not offered, or the total
/// overflows.
pub fn quote(
    service: &Service,
    quantity: u64,
    device_type: DeviceType,
    target_option: Option<&str>,
) -> Result<Quote, StorefrontError> {
    if quantity < service.min_order {
        return Err(StorefrontError::Validation(format!(
            "minimum order for {} is {} {}s",
            service.name, service.min_order, service.unit
        )));
    }

    if !service.offers_device(device_type) {
        return Err(StorefrontError::Validation(format!(
            "{} is not available for {device_type} devices",
            service.name
        )));
    }

    let target = target_option.unwrap_or_else(|| default_target(service));
    if !service.offers_target(target) {
        return Err(StorefrontError::Validation(format!(
            "{} does not offer targeting for {target}",
            service.name
        )));
    }

    let device_multiplier = device_type.multiplier();
    let target_multiplier = target_multiplier(target);
    let total = service
        .price
        .checked_mul(Decimal::from(quantity))
        .and_then(|t| t.checked_mul(device_multiplier))
        .and_then(|t| t.checked_mul(target_multiplier))
        .map(round_cents)
        .ok_or_else(|| StorefrontError::Validation("order total is too large".to_owned()))?;

    Ok(Quote {
        service_id: service.id.clone(),
        quantity,
        unit_price: service.price,
        device_type,
        target_option: target.to_owned(),
        device_multiplier,
        target_multiplier,
        total,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::services::default_catalog;

    fn followers() -> Service {
        default_catalog().remove(0)
    }

    #[test]
    fn test_mobile_usa_quote() {
        let quote = quote(&followers(), 100, DeviceType::Mobile, Some("usa")).unwrap();
        assert_eq!(quote.total, Decimal::new(31_625, 2));
        assert_eq!(quote.device_multiplier, Decimal::new(11, 1));
        assert_eq!(quote.target_multiplier, Decimal::new(115, 2));
    }

    #[test]
    fn test_global_all_devices_is_base_price() {
        let quote = quote(&followers(), 400, DeviceType::All, Some("global")).unwrap();
        assert_eq!(quote.total, Decimal::new(1000, 0));
    }

    #[test]
    fn test_tablet_multiplier() {
        let quote = quote(&followers(), 100, DeviceType::Tablet, Some("global")).unwrap();
        assert_eq!(quote.total, Decimal::new(300, 0));
    }

    #[test]
    fn test_default_target_is_first_listed() {
        let quote = quote(&followers(), 100, DeviceType::Desktop, None).unwrap();
        assert_eq!(quote.target_option, "global");
        assert_eq!(quote.total, Decimal::new(250, 0));

        let mut service = followers();
        service.target_options = None;
        assert_eq!(default_target(&service), GLOBAL_TARGET);
    }

    #[test]
    fn test_rounds_to_cents() {
        let mut service = followers();
        service.price = Decimal::new(333, 3);
        service.min_order = 1;
        // 0.333 * 7 * 1.1 = 2.5641
        let quote = quote(&service, 7, DeviceType::Mobile, Some("global")).unwrap();
        assert_eq!(quote.total, Decimal::new(256, 2));
    }

    #[test]
    fn test_below_minimum_rejected() {
        let err = quote(&followers(), 99, DeviceType::All, None).unwrap_err();
        assert!(matches!(err, StorefrontError::Validation(_)));
    }

    #[test]
    fn test_overflowing_total_rejected() {
        let mut service = followers();
        service.price = Decimal::new(10_000_000_000, 0);
        let err = quote(&service, u64::MAX, DeviceType::Tablet, Some("usa")).unwrap_err();
        assert!(matches!(err, StorefrontError::Validation(ref msg) if msg.contains("too large")));
    }

    #[test]
    fn test_unoffered_device_and_target_rejected() {
        let installs = default_catalog().remove(5);
        assert!(quote(&installs, 100, DeviceType::Desktop, None).is_err());
        assert!(quote(&installs, 100, DeviceType::Mobile, None).is_ok());
        assert!(quote(&followers(), 100, DeviceType::All, Some("mars")).is_err());
    }
}
