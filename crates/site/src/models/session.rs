//! Session-related types.
//!
//! Types stored in the session for admin authentication state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session-stored proof of a completed admin login.
///
/// Its presence in a live server-side session is what the access gate checks;
/// the cookie itself only carries the opaque session id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSession {
    /// Username that logged in.
    pub username: String,
    /// When the login happened.
    pub authenticated_at: DateTime<Utc>,
}

impl AdminSession {
    /// A session for `username`, authenticated now.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            authenticated_at: Utc::now(),
        }
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the logged-in admin.
    pub const ADMIN: &str = "admin";
}
