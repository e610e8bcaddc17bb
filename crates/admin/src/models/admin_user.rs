//! Admin account record.

use core::fmt;

use serde::{Deserialize, Serialize};

/// An admin account as stored in the admin file.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    /// Login name.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

impl fmt::Debug for AdminUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminUser")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
