//! Admin action log entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use boostmart_core::{AdminAction, AdminLogId, OrderId, PaymentId, ServiceId};
use boostmart_storefront::store::Record;

/// One recorded administrative action.
///
/// Entries are never edited, except that `undone` flips to `true` once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminLog {
    pub id: AdminLogId,
    /// Who performed the action.
    pub user: String,
    pub action: AdminAction,
    pub timestamp: DateTime<Utc>,
    pub details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<OrderId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<PaymentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<ServiceId>,
    #[serde(default)]
    pub can_undo: bool,
    #[serde(default)]
    pub undone: bool,
}

impl AdminLog {
    /// Whether [`undo`](crate::services::AdminConsole::undo) may still be
    /// attempted on this entry.
    #[must_use]
    pub const fn is_undoable(&self) -> bool {
        self.can_undo && !self.undone
    }
}

impl Record for AdminLog {
    type Id = AdminLogId;

    fn id(&self) -> &AdminLogId {
        &self.id
    }
}

/// A log entry before it is stamped with an ID and timestamp.
#[derive(Debug, Clone)]
pub struct NewAdminLog {
    pub user: String,
    pub action: AdminAction,
    pub details: String,
    pub order_id: Option<OrderId>,
    pub payment_id: Option<PaymentId>,
    pub service_id: Option<ServiceId>,
    pub can_undo: bool,
}

impl NewAdminLog {
    /// Start an entry for `action` performed by `user`.
    pub fn new(user: impl Into<String>, action: AdminAction, details: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            action,
            details: details.into(),
            order_id: None,
            payment_id: None,
            service_id: None,
            can_undo: false,
        }
    }

    /// Reference the affected order.
    #[must_use]
    pub fn order(mut self, id: OrderId) -> Self {
        self.order_id = Some(id);
        self
    }

    /// Reference the affected payment.
    #[must_use]
    pub fn payment(mut self, id: PaymentId) -> Self {
        self.payment_id = Some(id);
        self
    }

    /// Reference the affected service.
    #[must_use]
    pub fn service(mut self, id: ServiceId) -> Self {
        self.service_id = Some(id);
        self
    }

    /// Mark the entry as reversible.
    #[must_use]
    pub const fn undoable(mut self) -> Self {
        self.can_undo = true;
        self
    }

    /// Stamp with a fresh ID and the current time.
    #[must_use]
    pub fn into_log(self) -> AdminLog {
        AdminLog {
            id: AdminLogId::generate(),
            user: self.user,
            action: self.action,
            timestamp: Utc::now(),
            details: self.details,
            order_id: self.order_id,
            payment_id: self.payment_id,
            service_id: self.service_id,
            can_undo: self.can_undo,
            undone: false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_persisted_layout() {
        let log = NewAdminLog::new("admin", AdminAction::UpdateOrderStatus, "Updated order")
            .order(OrderId::new("order-1"))
            .undoable()
            .into_log();

        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json["action"], "update_order_status");
        assert_eq!(json["orderId"], "order-1");
        assert_eq!(json["canUndo"], true);
        assert_eq!(json["undone"], false);
        assert!(json.get("paymentId").is_none());
    }

    #[test]
    fn test_missing_flags_default_false() {
        let log: AdminLog = serde_json::from_str(
            r#"{"id":"log-1","user":"admin","action":"login",
                "timestamp":"2024-05-01T10:00:00Z","details":"Admin login successful"}"#,
        )
        .unwrap();
        assert!(!log.can_undo);
        assert!(!log.undone);
        assert!(!log.is_undoable());
    }
}
