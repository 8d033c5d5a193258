//! Domain models for the admin console.

pub mod admin_log;
pub mod session;

pub use admin_log::{AdminLog, NewAdminLog};
pub use session::AdminSession;
