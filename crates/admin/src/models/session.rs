//! Session-stored admin identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The signed-in admin, stored under the `adminSession` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    pub is_admin: bool,
    pub username: String,
    pub login_time: DateTime<Utc>,
}
