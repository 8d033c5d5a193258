//! Boostmart Admin library.
//!
//! The operator side of Boostmart: credential-gated sessions, order and
//! payment review, catalog management, and an append-only action log with
//! best-effort undo.
//!
//! # Modules
//!
//! - [`models`] - `AdminLog` and `AdminSession` records
//! - [`db`] - Admin log and session repositories
//! - [`services`] - `AdminAuth` and `AdminConsole`
//! - [`config`] - Admin credentials from the environment
//! - [`error`] - `AdminError`

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use config::AdminConfig;
pub use error::AdminError;
