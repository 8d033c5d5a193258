//! Domain models for the storefront.
//!
//! These are the records persisted in the key-value store. Field names
//! serialize in camelCase to match the stored JSON layout, and money fields
//! are stored as JSON numbers.

pub mod order;
pub mod payment;
pub mod service;
pub mod user;

pub use order::{NewOrder, Order};
pub use payment::{NewPayment, Payment};
pub use service::Service;
pub use user::User;
