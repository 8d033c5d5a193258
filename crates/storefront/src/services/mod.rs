//! Customer-facing workflows built on the repositories.
//!
//! - [`pricing`] - Order price calculator
//! - [`session`] - Mock customer sign-in and the cached session record
//! - [`checkout`] - Placing and cancelling orders against the balance
//! - [`deposits`] - Deposit requests awaiting admin approval

pub mod checkout;
pub mod deposits;
pub mod pricing;
pub mod session;

pub use checkout::{CheckoutService, OrderRequest};
pub use deposits::{DepositRequest, DepositService};
pub use pricing::{Quote, quote};
pub use session::SessionService;
