//! Repositories over the key-value store.
//!
//! Each repository wraps one collection key and performs whole-collection
//! read-modify-write. Nothing is indexed, paginated, or transactional.
//!
//! ## Collections
//!
//! - `services` - catalog, seeded with the built-in services on first read
//! - `orders` - every customer's orders
//! - `payments` - every customer's deposits
//! - `user` - the single signed-in customer

pub mod orders;
pub mod payments;
pub mod services;
pub mod users;

use thiserror::Error;

use crate::store::StoreError;

pub use orders::OrderRepository;
pub use payments::PaymentRepository;
pub use services::ServiceRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The underlying store failed or held corrupt data.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Requested entity was not found.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity kind, e.g. "order".
        entity: &'static str,
        /// The missing ID.
        id: String,
    },
}

impl RepositoryError {
    /// Build a not-found error for `entity` with the given ID.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
