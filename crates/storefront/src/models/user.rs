//! The signed-in customer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use boostmart_core::{Email, UserId};

/// The single customer record cached in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    /// Spendable funds in dollars. Missing in older records means zero.
    #[serde(default, with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}
