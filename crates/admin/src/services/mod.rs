//! Admin workflows.
//!
//! - [`AdminAuth`] - credential check and admin session lifecycle
//! - [`AdminConsole`] - logged mutations over orders, payments and services,
//!   plus undo

pub mod auth;
pub mod console;
mod undo;

pub use auth::AdminAuth;
pub use console::AdminConsole;
