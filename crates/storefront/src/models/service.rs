//! Purchasable services offered in the catalog.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use boostmart_core::{DeviceType, ServiceId};

use crate::store::Record;

/// A purchasable unit of social or traffic delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
    pub description: String,
    pub category: String,
    /// Price per unit in dollars.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Smallest quantity that can be ordered.
    pub min_order: u64,
    /// Singular unit label, e.g. "follower".
    pub unit: String,
    /// Absent means active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_types: Option<Vec<DeviceType>>,
}

impl Service {
    /// Whether the service can currently be ordered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.unwrap_or(true)
    }

    /// Whether an order may target `device`.
    ///
    /// `All` is always allowed, as is anything when the service does not
    /// list its devices.
    #[must_use]
    pub fn offers_device(&self, device: DeviceType) -> bool {
        device == DeviceType::All
            || self
                .device_types
                .as_ref()
                .is_none_or(|devices| devices.contains(&device))
    }

    /// Whether an order may use the given geographic target.
    ///
    /// `global` is always allowed, as is anything when the service does not
    /// list its targets.
    #[must_use]
    pub fn offers_target(&self, target: &str) -> bool {
        target == crate::services::pricing::GLOBAL_TARGET
            || self
                .target_options
                .as_ref()
                .is_none_or(|targets| targets.iter().any(|t| t == target))
    }
}

impl Record for Service {
    type Id = ServiceId;

    fn id(&self) -> &ServiceId {
        &self.id
    }
}
