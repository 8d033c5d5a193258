//! Boostmart Core - Shared types library.
//!
//! This crate provides common types used across all Boostmart components:
//! - `storefront` - Key-value store, catalog, orders, payments and checkout
//! - `admin` - Admin console, action log and undo
//! - `cli` - Command-line front end over both libraries
//!
//! # Architecture
//!
//! The core crate contains only types and small pure helpers - no I/O and no
//! storage access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, statuses, emails and money

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
