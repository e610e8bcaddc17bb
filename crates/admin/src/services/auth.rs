//! Admin authentication service.
//!
//! Plaintext comparison against the admin file. There is no registration,
//! no password change and no recovery for admins.

use secrecy::{ExposeSecret, SecretString};

use crate::db::AdminRepository;
use crate::error::{AdminError, Result};
use crate::models::AdminUser;

/// Admin authentication service.
pub struct AdminAuth<'a> {
    admins: &'a AdminRepository,
}

impl<'a> AdminAuth<'a> {
    /// Create a new admin authentication service.
    #[must_use]
    pub const fn new(admins: &'a AdminRepository) -> Self {
        Self { admins }
    }

    /// Login with username and password.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::InvalidCredentials` if the username/password is
    /// wrong, or `AdminError::Repository` if the admin file cannot be read.
    pub fn login(&self, username: &str, password: &SecretString) -> Result<AdminUser> {
        let admin = self
            .admins
            .get_by_username(username.trim())?
            .filter(|admin| admin.password == password.expose_secret())
            .ok_or(AdminError::InvalidCredentials)?;

        tracing::info!(admin = %admin.username, "Admin logged in");
        Ok(admin)
    }
}
