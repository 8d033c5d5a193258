//! Integration tests for Boostmart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p boostmart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - sign in, deposit, approval, order, cancel
//! - `admin_undo` - action log and undo across both libraries
//! - `file_store_persistence` - state surviving a reopen of the data file
//!
//! The helpers here build stores in known states so each test reads as a
//! customer or admin story.

use std::path::PathBuf;

use rust_decimal::Decimal;

use boostmart_admin::services::AdminConsole;
use boostmart_core::{PaymentMethod, UserId};
use boostmart_storefront::models::{Payment, User};
use boostmart_storefront::services::{DepositRequest, DepositService, SessionService};
use boostmart_storefront::store::{KeyValueStore, MemoryStore};
use boostmart_storefront::{StorefrontError, db::UserRepository};

/// Admin name recorded on log entries made by the helpers.
pub const TEST_ADMIN: &str = "admin";

/// A fresh in-memory store with the demo customer signed in.
///
/// # Errors
///
/// Returns an error if the sign-in cannot be stored.
pub async fn signed_in_store() -> Result<(MemoryStore, User), StorefrontError> {
    let store = MemoryStore::new();
    let user = SessionService::new(&store).sign_in("google").await?;
    Ok((store, user))
}

/// Submit a deposit for the signed-in customer and have an admin approve it.
///
/// # Errors
///
/// Returns an error if either step fails.
pub async fn fund<S: KeyValueStore>(
    store: &S,
    amount: Decimal,
) -> Result<Payment, Box<dyn std::error::Error>> {
    let payment = DepositService::new(store)
        .request_deposit(DepositRequest {
            method: PaymentMethod::Upi,
            amount,
            transaction_id: format!("UPI-{}", uuid::Uuid::new_v4().simple()),
            screenshot: None,
            notes: None,
        })
        .await?;

    let approved = AdminConsole::new(store, TEST_ADMIN)
        .update_payment_status(&payment.id, boostmart_core::PaymentStatus::Approved)
        .await?;
    Ok(approved)
}

/// Current cached balance, or zero when signed out.
///
/// # Errors
///
/// Returns an error if the session record is unreadable.
pub async fn balance<S: KeyValueStore>(store: &S) -> Result<Decimal, StorefrontError> {
    Ok(UserRepository::new(store)
        .current()
        .await?
        .map_or(Decimal::ZERO, |user| user.balance))
}

/// Whether `user` is the cached customer.
///
/// # Errors
///
/// Returns an error if the session record is unreadable.
pub async fn is_signed_in<S: KeyValueStore>(store: &S, user: &UserId) -> Result<bool, StorefrontError> {
    Ok(UserRepository::new(store)
        .current()
        .await?
        .is_some_and(|current| &current.id == user))
}

/// A data file path under the system temp directory that does not exist yet.
#[must_use]
pub fn temp_data_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "boostmart-it-{name}-{}.json",
        uuid::Uuid::new_v4().simple()
    ))
}
