//! Customer orders.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use boostmart_core::{DeviceType, OrderId, OrderStatus, ServiceId, UserId};

use crate::store::Record;

/// A customer's purchase of a quantity of a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    pub service_id: ServiceId,
    /// Denormalized at creation; not updated if the service is renamed.
    pub service_name: String,
    pub quantity: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<DeviceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_option: Option<String>,
    /// Where the service is delivered (profile, video, site URL).
    pub link: String,
    /// Total charged, in dollars.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Fields for a new order; the ID is assigned on creation.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: Option<UserId>,
    pub service_id: ServiceId,
    pub service_name: String,
    pub quantity: u64,
    pub device_type: Option<DeviceType>,
    pub target_option: Option<String>,
    pub link: String,
    pub price: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl NewOrder {
    /// Attach a freshly generated ID.
    #[must_use]
    pub fn into_order(self) -> Order {
        Order {
            id: OrderId::generate(),
            user_id: self.user_id,
            service_id: self.service_id,
            service_name: self.service_name,
            quantity: self.quantity,
            device_type: self.device_type,
            target_option: self.target_option,
            link: self.link,
            price: self.price,
            status: self.status,
            created_at: self.created_at,
            start_count: None,
            current_count: None,
            completed_at: None,
            notes: None,
        }
    }
}

impl Record for Order {
    type Id = OrderId;

    fn id(&self) -> &OrderId {
        &self.id
    }
}
