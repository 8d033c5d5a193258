//! Payment repository.

use tracing::{info, instrument};

use boostmart_core::{PaymentId, UserId};

use super::RepositoryError;
use crate::models::{NewPayment, Payment};
use crate::store::{Collection, KeyValueStore, PAYMENTS_KEY};

/// Repository for deposit payments.
pub struct PaymentRepository<'a, S> {
    payments: Collection<'a, S, Payment>,
}

impl<'a, S: KeyValueStore> PaymentRepository<'a, S> {
    /// Create a new payment repository.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self {
            payments: Collection::new(store, PAYMENTS_KEY),
        }
    }

    /// Append a new payment owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the collection cannot be written.
    #[instrument(skip(self, payment), fields(method = %payment.method, amount = %payment.amount))]
    pub async fn create(
        &self,
        payment: NewPayment,
        user_id: Option<UserId>,
    ) -> Result<Payment, RepositoryError> {
        let payment = self
            .payments
            .append(Payment {
                id: PaymentId::generate(),
                user_id,
                method: payment.method,
                amount: payment.amount,
                transaction_id: payment.transaction_id,
                status: payment.status,
                created_at: payment.created_at,
                approved_at: None,
                notes: payment.notes,
                screenshot: payment.screenshot,
            })
            .await?;
        info!(payment_id = %payment.id, "Payment created");
        Ok(payment)
    }

    /// Get every payment, for the admin view.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the collection cannot be read.
    pub async fn list_all(&self) -> Result<Vec<Payment>, RepositoryError> {
        Ok(self.payments.load().await?)
    }

    /// Get the payments owned by one customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the collection cannot be read.
    pub async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Payment>, RepositoryError> {
        let mut payments = self.payments.load().await?;
        payments.retain(|p| p.user_id.as_ref() == Some(user_id));
        Ok(payments)
    }

    /// Get a payment by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the collection cannot be read.
    pub async fn get(&self, id: &PaymentId) -> Result<Option<Payment>, RepositoryError> {
        Ok(self.payments.find(id).await?)
    }

    /// Replace a stored payment with `payment`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no payment has the same ID.
    #[instrument(skip_all, fields(payment_id = %payment.id))]
    pub async fn update(&self, payment: Payment) -> Result<(), RepositoryError> {
        let id = payment.id.clone();
        if self.payments.replace(payment).await? {
            Ok(())
        } else {
            Err(RepositoryError::not_found("payment", id))
        }
    }
}
