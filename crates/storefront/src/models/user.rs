//! Customer account domain type.

use serde::{Deserialize, Serialize};

use flatmart_core::{Digest, Username};

/// A registered customer.
///
/// Only the username is kept in the clear. The password, email and phone are
/// stored as digests, so identity checks hash the candidate value first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Login name, unique among customers.
    pub username: Username,
    /// Digest of the password.
    pub password: Digest,
    /// Digest of the email address given at registration.
    pub email: Digest,
    /// Digest of the phone number given at registration.
    pub phone: Digest,
}
