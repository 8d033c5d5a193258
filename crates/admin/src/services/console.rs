//! Logged admin mutations over orders, payments and the catalog.
//!
//! Every successful mutation appends one entry to the action log, after the
//! change is stored. A failed mutation writes no log entry.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, info, instrument};

use boostmart_core::{AdminAction, OrderId, OrderStatus, PaymentId, PaymentStatus, ServiceId};
use boostmart_storefront::db::{
    OrderRepository, PaymentRepository, ServiceRepository, UserRepository,
};
use boostmart_storefront::models::{Order, Payment, Service};
use boostmart_storefront::store::KeyValueStore;

use crate::db::AdminLogRepository;
use crate::error::AdminError;
use crate::models::{AdminLog, NewAdminLog};

/// Admin operations, performed and logged on behalf of `actor`.
pub struct AdminConsole<'a, S> {
    pub(super) actor: String,
    pub(super) orders: OrderRepository<'a, S>,
    pub(super) payments: PaymentRepository<'a, S>,
    pub(super) services: ServiceRepository<'a, S>,
    pub(super) users: UserRepository<'a, S>,
    pub(super) logs: AdminLogRepository<'a, S>,
}

impl<'a, S: KeyValueStore> AdminConsole<'a, S> {
    /// Create a console whose log entries are attributed to `actor`.
    #[must_use]
    pub fn new(store: &'a S, actor: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            orders: OrderRepository::new(store),
            payments: PaymentRepository::new(store),
            services: ServiceRepository::new(store),
            users: UserRepository::new(store),
            logs: AdminLogRepository::new(store),
        }
    }

    /// Every order, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Repository` if orders cannot be read.
    pub async fn list_orders(&self) -> Result<Vec<Order>, AdminError> {
        Ok(self.orders.list_all().await?)
    }

    /// Every payment, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Repository` if payments cannot be read.
    pub async fn list_payments(&self) -> Result<Vec<Payment>, AdminError> {
        Ok(self.payments.list_all().await?)
    }

    /// The full catalog, including inactive services.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Repository` if the catalog cannot be read.
    pub async fn list_services(&self) -> Result<Vec<Service>, AdminError> {
        Ok(self.services.list().await?)
    }

    /// The action log, newest first.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Repository` if the log cannot be read.
    pub async fn logs(&self) -> Result<Vec<AdminLog>, AdminError> {
        Ok(self.logs.recent().await?)
    }

    /// Set an order's status.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::NotFound` if the order does not exist.
    #[instrument(skip(self), fields(actor = %self.actor))]
    pub async fn update_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, AdminError> {
        let order = self.apply_order_status(id, status).await?;

        self.logs
            .append(
                NewAdminLog::new(
                    &self.actor,
                    AdminAction::UpdateOrderStatus,
                    format!("Updated order {id} status to {status}"),
                )
                .order(id.clone())
                .undoable(),
            )
            .await?;

        info!("Order status updated");
        Ok(order)
    }

    /// Set a payment's status, crediting the customer on approval.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::NotFound` if the payment does not exist.
    #[instrument(skip(self), fields(actor = %self.actor))]
    pub async fn update_payment_status(
        &self,
        id: &PaymentId,
        status: PaymentStatus,
    ) -> Result<Payment, AdminError> {
        let payment = self.apply_payment_status(id, status).await?;

        self.logs
            .append(
                NewAdminLog::new(
                    &self.actor,
                    AdminAction::UpdatePaymentStatus,
                    format!("Updated payment {id} status to {status}"),
                )
                .payment(id.clone())
                .undoable(),
            )
            .await?;

        info!("Payment status updated");
        Ok(payment)
    }

    /// Add a service to the catalog under a freshly generated ID.
    ///
    /// Any ID on `service` is replaced.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Repository` if the catalog cannot be written.
    #[instrument(skip_all, fields(actor = %self.actor, name = %service.name))]
    pub async fn create_service(&self, mut service: Service) -> Result<Service, AdminError> {
        service.id = ServiceId::generate();
        self.services.upsert(service.clone()).await?;

        self.logs
            .append(
                NewAdminLog::new(
                    &self.actor,
                    AdminAction::CreateService,
                    format!("Created new service {}", service.id),
                )
                .service(service.id.clone()),
            )
            .await?;

        info!(service_id = %service.id, "Service created");
        Ok(service)
    }

    /// Replace an existing service.
    ///
    /// The log entry is not undoable; the previous version is not kept.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::NotFound` if no service has the ID.
    #[instrument(skip_all, fields(actor = %self.actor, service_id = %service.id))]
    pub async fn update_service(&self, service: Service) -> Result<Service, AdminError> {
        if self.services.get(&service.id).await?.is_none() {
            return Err(AdminError::NotFound(format!("service {}", service.id)));
        }
        self.services.upsert(service.clone()).await?;

        self.logs
            .append(
                NewAdminLog::new(
                    &self.actor,
                    AdminAction::UpdateService,
                    format!("Updated service {}", service.id),
                )
                .service(service.id.clone()),
            )
            .await?;

        info!("Service updated");
        Ok(service)
    }

    /// Remove a service from the catalog.
    ///
    /// Existing orders keep their denormalized service name.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Repository` with a not-found error if no service
    /// has the ID.
    #[instrument(skip(self), fields(actor = %self.actor))]
    pub async fn delete_service(&self, id: &ServiceId) -> Result<(), AdminError> {
        self.services.delete(id).await?;

        self.logs
            .append(
                NewAdminLog::new(
                    &self.actor,
                    AdminAction::DeleteService,
                    format!("Deleted service {id}"),
                )
                .service(id.clone()),
            )
            .await?;

        info!("Service deleted");
        Ok(())
    }

    pub(super) async fn apply_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, AdminError> {
        if self.orders.get(id).await?.is_none() {
            return Err(AdminError::NotFound(format!("order {id}")));
        }
        Ok(self.orders.set_status(id, status).await?)
    }

    /// Store the new payment status. Moving into `approved` stamps the
    /// approval time and credits the owner, once.
    pub(super) async fn apply_payment_status(
        &self,
        id: &PaymentId,
        status: PaymentStatus,
    ) -> Result<Payment, AdminError> {
        let mut payment = self
            .payments
            .get(id)
            .await?
            .ok_or_else(|| AdminError::NotFound(format!("payment {id}")))?;

        let newly_approved =
            status == PaymentStatus::Approved && payment.status != PaymentStatus::Approved;

        // Resolve the credit before writing so an overflow leaves both records untouched.
        let credited = if newly_approved {
            self.credited_balance(&payment).await?
        } else {
            None
        };

        payment.status = status;
        if newly_approved {
            payment.approved_at = Some(Utc::now());
        }
        self.payments.update(payment.clone()).await?;

        if let Some(balance) = credited {
            let user = self.users.update_balance(balance).await?;
            info!(user_id = %user.id, amount = %payment.amount, "Deposit credited");
        }
        Ok(payment)
    }

    /// The cached customer's balance after adding `payment`, or `None` if
    /// the cached customer does not own it.
    async fn credited_balance(&self, payment: &Payment) -> Result<Option<Decimal>, AdminError> {
        let Some(user) = self.users.current().await? else {
            debug!(payment_id = %payment.id, "No cached customer; balance not credited");
            return Ok(None);
        };

        if payment.user_id.as_ref() != Some(&user.id) {
            debug!(payment_id = %payment.id, "Payment owner is not the cached customer");
            return Ok(None);
        }

        user.balance
            .checked_add(payment.amount)
            .map(Some)
            .ok_or_else(|| {
                AdminError::BalanceOverflow(format!(
                    "crediting {} to {} exceeds the supported range",
                    payment.id, user.id
                ))
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use boostmart_core::{Email, PaymentMethod, UserId};
    use boostmart_storefront::db::services::default_catalog;
    use boostmart_storefront::models::{NewPayment, User};
    use boostmart_storefront::store::MemoryStore;

    use super::*;

    async fn cached_user(store: &MemoryStore, balance: Decimal) -> User {
        let user = User {
            id: UserId::new("user-1"),
            name: "Demo User".to_owned(),
            email: Email::parse("demo@example.com").unwrap(),
            balance,
        };
        UserRepository::new(store).save(&user).await.unwrap();
        user
    }

    async fn pending_payment(store: &MemoryStore, owner: Option<UserId>, amount: i64) -> Payment {
        PaymentRepository::new(store)
            .create(
                NewPayment {
                    method: PaymentMethod::Upi,
                    amount: Decimal::new(amount, 0),
                    transaction_id: "UPI-REF-1".to_owned(),
                    status: PaymentStatus::Pending,
                    created_at: Utc::now(),
                    notes: None,
                    screenshot: None,
                },
                owner,
            )
            .await
            .unwrap()
    }

    async fn balance(store: &MemoryStore) -> Decimal {
        UserRepository::new(store)
            .current()
            .await
            .unwrap()
            .unwrap()
            .balance
    }

    #[tokio::test]
    async fn test_approval_credits_owner_once() {
        let store = MemoryStore::new();
        let user = cached_user(&store, Decimal::new(10, 0)).await;
        let payment = pending_payment(&store, Some(user.id), 50).await;
        let console = AdminConsole::new(&store, "admin");

        let approved = console
            .update_payment_status(&payment.id, PaymentStatus::Approved)
            .await
            .unwrap();
        assert!(approved.approved_at.is_some());
        assert_eq!(balance(&store).await, Decimal::new(60, 0));

        let again = console
            .update_payment_status(&payment.id, PaymentStatus::Approved)
            .await
            .unwrap();
        assert_eq!(again.approved_at, approved.approved_at);
        assert_eq!(balance(&store).await, Decimal::new(60, 0));
    }

    #[tokio::test]
    async fn test_approval_skips_other_owners() {
        let store = MemoryStore::new();
        cached_user(&store, Decimal::new(10, 0)).await;
        let theirs = pending_payment(&store, Some(UserId::new("user-2")), 50).await;
        let orphan = pending_payment(&store, None, 20).await;
        let console = AdminConsole::new(&store, "admin");

        for id in [&theirs.id, &orphan.id] {
            console
                .update_payment_status(id, PaymentStatus::Approved)
                .await
                .unwrap();
        }
        assert_eq!(balance(&store).await, Decimal::new(10, 0));
    }

    #[tokio::test]
    async fn test_overflowing_credit_writes_nothing() {
        let store = MemoryStore::new();
        let huge = Decimal::from_i128_with_scale(5 * 10_i128.pow(28), 0);
        let user = cached_user(&store, huge).await;
        let before = balance(&store).await;
        let payment = PaymentRepository::new(&store)
            .create(
                NewPayment {
                    method: PaymentMethod::Crypto,
                    amount: huge,
                    transaction_id: "0xbig".to_owned(),
                    status: PaymentStatus::Pending,
                    created_at: Utc::now(),
                    notes: None,
                    screenshot: None,
                },
                Some(user.id),
            )
            .await
            .unwrap();
        let console = AdminConsole::new(&store, "admin");

        let err = console
            .update_payment_status(&payment.id, PaymentStatus::Approved)
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::BalanceOverflow(_)));

        let stored = PaymentRepository::new(&store)
            .get(&payment.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, PaymentStatus::Pending);
        assert_eq!(balance(&store).await, before);
        assert!(console.logs().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejection_does_not_credit() {
        let store = MemoryStore::new();
        let user = cached_user(&store, Decimal::ZERO).await;
        let payment = pending_payment(&store, Some(user.id), 50).await;
        let console = AdminConsole::new(&store, "admin");

        let rejected = console
            .update_payment_status(&payment.id, PaymentStatus::Rejected)
            .await
            .unwrap();
        assert_eq!(rejected.status, PaymentStatus::Rejected);
        assert!(rejected.approved_at.is_none());
        assert_eq!(balance(&store).await, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_status_updates_are_logged_undoable() {
        let store = MemoryStore::new();
        let payment = pending_payment(&store, None, 5).await;
        let console = AdminConsole::new(&store, "ops");

        console
            .update_payment_status(&payment.id, PaymentStatus::Rejected)
            .await
            .unwrap();

        let logs = console.logs().await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].user, "ops");
        assert_eq!(logs[0].action, AdminAction::UpdatePaymentStatus);
        assert_eq!(logs[0].payment_id.as_ref(), Some(&payment.id));
        assert_eq!(
            logs[0].details,
            format!("Updated payment {} status to rejected", payment.id)
        );
        assert!(logs[0].is_undoable());
    }

    #[tokio::test]
    async fn test_missing_order_writes_no_log() {
        let store = MemoryStore::new();
        let console = AdminConsole::new(&store, "admin");

        let err = console
            .update_order_status(&OrderId::new("order-missing"), OrderStatus::Running)
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::NotFound(_)));
        assert!(console.logs().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_service_lifecycle_is_logged() {
        let store = MemoryStore::new();
        let console = AdminConsole::new(&store, "admin");

        let mut draft = default_catalog().remove(0);
        draft.name = "Instagram Saves".to_owned();
        let created = console.create_service(draft).await.unwrap();
        assert_ne!(created.id.as_str(), "service-1");

        let mut edited = created.clone();
        edited.price = Decimal::new(3, 0);
        console.update_service(edited).await.unwrap();
        console.delete_service(&created.id).await.unwrap();

        let missing = console.update_service(created.clone()).await.unwrap_err();
        assert!(matches!(missing, AdminError::NotFound(_)));

        let actions: Vec<_> = console
            .logs()
            .await
            .unwrap()
            .into_iter()
            .map(|log| (log.action, log.can_undo))
            .collect();
        assert_eq!(
            actions,
            vec![
                (AdminAction::DeleteService, false),
                (AdminAction::UpdateService, false),
                (AdminAction::CreateService, false),
            ]
        );
    }
}
