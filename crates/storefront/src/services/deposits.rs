//! Deposit requests.
//!
//! A deposit only records the customer's claim that they paid; funds reach
//! the balance when an admin approves the payment.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, instrument};

use boostmart_core::{PaymentMethod, PaymentStatus};

use super::session::SessionService;
use crate::db::PaymentRepository;
use crate::error::StorefrontError;
use crate::models::{NewPayment, Payment};
use crate::store::KeyValueStore;

/// A customer's deposit claim.
#[derive(Debug, Clone)]
pub struct DepositRequest {
    pub method: PaymentMethod,
    pub amount: Decimal,
    /// Reference from the payment rail.
    pub transaction_id: String,
    /// Reference to a proof-of-payment image.
    pub screenshot: Option<String>,
    pub notes: Option<String>,
}

/// Customer deposit workflows.
pub struct DepositService<'a, S> {
    payments: PaymentRepository<'a, S>,
    sessions: SessionService<'a, S>,
}

impl<'a, S: KeyValueStore> DepositService<'a, S> {
    /// Create a new deposit service.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self {
            payments: PaymentRepository::new(store),
            sessions: SessionService::new(store),
        }
    }

    /// Record a pending deposit for the signed-in customer.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Unauthenticated` without a session and
    /// `StorefrontError::Validation` for a non-positive amount or a missing
    /// transaction reference.
    #[instrument(skip(self, request), fields(method = %request.method, amount = %request.amount))]
    pub async fn request_deposit(&self, request: DepositRequest) -> Result<Payment, StorefrontError> {
        let user = self.sessions.require_user("sign in to add funds").await?;

        if request.amount <= Decimal::ZERO {
            return Err(StorefrontError::Validation(
                "deposit amount must be greater than zero".to_owned(),
            ));
        }

        let transaction_id = request.transaction_id.trim();
        if transaction_id.is_empty() {
            return Err(StorefrontError::Validation(
                "the transaction ID from your payment is required".to_owned(),
            ));
        }

        let payment = self
            .payments
            .create(
                NewPayment {
                    method: request.method,
                    amount: request.amount,
                    transaction_id: transaction_id.to_owned(),
                    status: PaymentStatus::Pending,
                    created_at: Utc::now(),
                    notes: request.notes,
                    screenshot: request.screenshot,
                },
                Some(user.id),
            )
            .await?;

        info!(payment_id = %payment.id, "Deposit submitted for review");
        Ok(payment)
    }

    /// The signed-in customer's deposits.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Unauthenticated` without a session.
    pub async fn my_deposits(&self) -> Result<Vec<Payment>, StorefrontError> {
        let user = self.sessions.require_user("sign in to view deposits").await?;
        Ok(self.payments.list_for_user(&user.id).await?)
    }
}
