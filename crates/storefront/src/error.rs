//! Unified error handling for storefront workflows.
//!
//! Every customer-facing operation returns `Result<T, StorefrontError>`.
//! Validation failures are raised before anything is written, so a failed
//! operation never leaves a partial update behind.

use rust_decimal::Decimal;
use thiserror::Error;

use boostmart_core::{OrderStatus, format_usd};

use crate::db::RepositoryError;
use crate::store::StoreError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Repository(#[from] RepositoryError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// No customer is signed in.
    #[error("Authentication required: {0}")]
    Unauthenticated(&'static str),

    /// Sign-in provider is not supported.
    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// Input failed validation.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The customer cannot afford the order.
    #[error(
        "Insufficient balance: your balance ({}) is less than the order total ({})",
        format_usd(*balance),
        format_usd(*required)
    )]
    InsufficientBalance {
        /// Current balance.
        balance: Decimal,
        /// Order total.
        required: Decimal,
    },

    /// The order's status does not allow the requested change.
    #[error("Order is {current}; {action}")]
    InvalidTransition {
        /// Status at the time of the request.
        current: OrderStatus,
        /// What was refused.
        action: &'static str,
    },
}

impl From<StoreError> for StorefrontError {
    fn from(err: StoreError) -> Self {
        Self::Repository(RepositoryError::Store(err))
    }
}
