//! Repositories for admin-only records.
//!
//! ## Keys
//!
//! - `adminLogs` - append-only admin action log
//! - `adminSession` - the signed-in admin
//!
//! Customer collections (orders, payments, services, user) are reached
//! through the storefront repositories.

pub mod admin_logs;
pub mod admin_sessions;

pub use admin_logs::AdminLogRepository;
pub use admin_sessions::AdminSessionRepository;
pub use boostmart_storefront::db::RepositoryError;
