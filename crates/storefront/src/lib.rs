//! Boostmart Storefront library.
//!
//! The customer side of Boostmart: a key-value store that stands in for
//! browser local storage, repositories over its JSON collections, and the
//! workflows a customer drives (browse, quote, order, deposit).
//!
//! # Modules
//!
//! - [`store`] - `KeyValueStore` trait, memory and file backends, collections
//! - [`models`] - Persisted records (`Service`, `Order`, `Payment`, `User`)
//! - [`db`] - Repositories, one per collection
//! - [`services`] - Pricing, session, checkout and deposit workflows
//! - [`config`] - Environment configuration
//! - [`error`] - `StorefrontError`

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

pub use config::StorefrontConfig;
pub use error::StorefrontError;
