//! Best-effort reversal of logged admin actions.
//!
//! Only status changes can be undone, and the reversal is lossy: the log
//! does not record the previous status, so an order goes back to `running`
//! if it is now `completed` and to `pending` otherwise, and a payment goes
//! back to `pending`. Reverting an approved payment does not debit the
//! balance that was credited.

use tracing::{info, instrument, warn};

use boostmart_core::{AdminAction, AdminLogId, OrderStatus, PaymentStatus};
use boostmart_storefront::store::KeyValueStore;

use super::AdminConsole;
use crate::error::AdminError;
use crate::models::{AdminLog, NewAdminLog};

impl<S: KeyValueStore> AdminConsole<'_, S> {
    /// Reverse the action recorded by log entry `log_id`.
    ///
    /// On success the entry is flagged `undone` and a non-undoable `undo`
    /// entry is appended and returned.
    ///
    /// # Errors
    ///
    /// - `AdminError::NotFound` if the entry or its target record is missing
    /// - `AdminError::CannotUndo` if the entry is not undoable or was
    ///   already undone
    /// - `AdminError::UnsupportedAction` for actions other than status
    ///   changes
    /// - `AdminError::InvalidLogEntry` if the entry lacks its target ID
    #[instrument(skip(self), fields(actor = %self.actor))]
    pub async fn undo(&self, log_id: &AdminLogId) -> Result<AdminLog, AdminError> {
        let entry = self
            .logs
            .get(log_id)
            .await?
            .ok_or_else(|| AdminError::NotFound(format!("admin log {log_id}")))?;

        if entry.undone {
            return Err(AdminError::CannotUndo(format!("{log_id} was already undone")));
        }
        if !entry.can_undo {
            return Err(AdminError::CannotUndo(format!(
                "{} entries are not reversible",
                entry.action
            )));
        }

        match &entry.action {
            AdminAction::UpdateOrderStatus => self.revert_order(&entry).await?,
            AdminAction::UpdatePaymentStatus => self.revert_payment(&entry).await?,
            other => {
                warn!(action = %other, "Undo requested for unsupported action");
                return Err(AdminError::UnsupportedAction(other.to_string()));
            }
        }

        self.logs.mark_undone(&entry.id).await?;
        let record = self
            .logs
            .append(NewAdminLog::new(
                &self.actor,
                AdminAction::Undo,
                format!("Undid action: {} ({})", entry.action, entry.details),
            ))
            .await?;

        info!(undone = %entry.id, "Admin action undone");
        Ok(record)
    }

    async fn revert_order(&self, entry: &AdminLog) -> Result<(), AdminError> {
        let id = entry
            .order_id
            .as_ref()
            .ok_or_else(|| AdminError::InvalidLogEntry(format!("{} has no order ID", entry.id)))?;

        let order = self
            .orders
            .get(id)
            .await?
            .ok_or_else(|| AdminError::NotFound(format!("order {id}")))?;

        let restored = if order.status == OrderStatus::Completed {
            OrderStatus::Running
        } else {
            OrderStatus::Pending
        };
        self.apply_order_status(id, restored).await?;
        Ok(())
    }

    async fn revert_payment(&self, entry: &AdminLog) -> Result<(), AdminError> {
        let id = entry.payment_id.as_ref().ok_or_else(|| {
            AdminError::InvalidLogEntry(format!("{} has no payment ID", entry.id))
        })?;

        self.apply_payment_status(id, PaymentStatus::Pending).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use boostmart_core::{OrderId, PaymentMethod, ServiceId};
    use boostmart_storefront::db::{OrderRepository, PaymentRepository};
    use boostmart_storefront::models::{NewOrder, NewPayment, Order};
    use boostmart_storefront::store::MemoryStore;

    use super::*;
    use crate::db::AdminLogRepository;

    async fn order_with_status(store: &MemoryStore, status: OrderStatus) -> Order {
        OrderRepository::new(store)
            .create(NewOrder {
                user_id: None,
                service_id: ServiceId::new("service-1"),
                service_name: "Instagram Followers".to_owned(),
                quantity: 100,
                device_type: None,
                target_option: None,
                link: "https://instagram.com/demo".to_owned(),
                price: Decimal::new(250, 0),
                status,
                created_at: Utc::now(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_undo_completed_order_goes_to_running() {
        let store = MemoryStore::new();
        let order = order_with_status(&store, OrderStatus::Running).await;
        let console = AdminConsole::new(&store, "admin");

        console
            .update_order_status(&order.id, OrderStatus::Completed)
            .await
            .unwrap();
        let logged = console.logs().await.unwrap().remove(0);

        let undo = console.undo(&logged.id).await.unwrap();
        assert_eq!(undo.action, AdminAction::Undo);
        assert!(!undo.can_undo);
        assert_eq!(
            undo.details,
            format!(
                "Undid action: update_order_status (Updated order {} status to completed)",
                order.id
            )
        );

        let order = OrderRepository::new(&store).get(&order.id).await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Running);
    }

    #[tokio::test]
    async fn test_undo_other_status_goes_to_pending() {
        let store = MemoryStore::new();
        let order = order_with_status(&store, OrderStatus::Pending).await;
        let console = AdminConsole::new(&store, "admin");

        console
            .update_order_status(&order.id, OrderStatus::Cancelled)
            .await
            .unwrap();
        let logged = console.logs().await.unwrap().remove(0);
        console.undo(&logged.id).await.unwrap();

        let order = OrderRepository::new(&store).get(&order.id).await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_undo_twice_fails() {
        let store = MemoryStore::new();
        let order = order_with_status(&store, OrderStatus::Pending).await;
        let console = AdminConsole::new(&store, "admin");

        console
            .update_order_status(&order.id, OrderStatus::Processing)
            .await
            .unwrap();
        let logged = console.logs().await.unwrap().remove(0);

        console.undo(&logged.id).await.unwrap();
        let err = console.undo(&logged.id).await.unwrap_err();
        assert!(matches!(err, AdminError::CannotUndo(_)));

        let logs = AdminLogRepository::new(&store).list().await.unwrap();
        assert_eq!(logs.len(), 2);
        assert!(logs[0].undone);
    }

    #[tokio::test]
    async fn test_undo_payment_keeps_credit() {
        let store = MemoryStore::new();
        let payment = PaymentRepository::new(&store)
            .create(
                NewPayment {
                    method: PaymentMethod::Crypto,
                    amount: Decimal::new(25, 0),
                    transaction_id: "0xabc".to_owned(),
                    status: PaymentStatus::Pending,
                    created_at: Utc::now(),
                    notes: None,
                    screenshot: None,
                },
                None,
            )
            .await
            .unwrap();
        let console = AdminConsole::new(&store, "admin");

        console
            .update_payment_status(&payment.id, PaymentStatus::Approved)
            .await
            .unwrap();
        let logged = console.logs().await.unwrap().remove(0);
        console.undo(&logged.id).await.unwrap();

        let payment = PaymentRepository::new(&store)
            .get(&payment.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(payment.status, PaymentStatus::Pending);
    }

    #[tokio::test]
    async fn test_undo_rejections() {
        let store = MemoryStore::new();
        let logs = AdminLogRepository::new(&store);
        let console = AdminConsole::new(&store, "admin");

        let missing = console.undo(&AdminLogId::new("log-missing")).await.unwrap_err();
        assert!(matches!(missing, AdminError::NotFound(_)));

        let login = logs
            .append(NewAdminLog::new("admin", AdminAction::Login, "Admin login successful"))
            .await
            .unwrap();
        let err = console.undo(&login.id).await.unwrap_err();
        assert!(matches!(err, AdminError::CannotUndo(_)));

        let service = logs
            .append(
                NewAdminLog::new("admin", AdminAction::UpdateService, "Updated service x")
                    .undoable(),
            )
            .await
            .unwrap();
        let err = console.undo(&service.id).await.unwrap_err();
        assert!(matches!(err, AdminError::UnsupportedAction(ref a) if a == "update_service"));

        let no_target = logs
            .append(
                NewAdminLog::new("admin", AdminAction::UpdateOrderStatus, "Updated order")
                    .undoable(),
            )
            .await
            .unwrap();
        let err = console.undo(&no_target.id).await.unwrap_err();
        assert!(matches!(err, AdminError::InvalidLogEntry(_)));

        let gone = logs
            .append(
                NewAdminLog::new("admin", AdminAction::UpdateOrderStatus, "Updated order")
                    .order(OrderId::new("order-gone"))
                    .undoable(),
            )
            .await
            .unwrap();
        let err = console.undo(&gone.id).await.unwrap_err();
        assert!(matches!(err, AdminError::NotFound(_)));
        assert!(!logs.get(&gone.id).await.unwrap().unwrap().undone);
    }
}
