//! Authentication service.
//!
//! Provides customer registration, password login and password recovery.
//! Passwords, emails and phone numbers are stored as SHA-256 digests;
//! usernames are stored as typed.

mod error;

pub use error::AuthError;

use secrecy::SecretString;

use flatmart_core::{Digest, Email, Password, Phone, Username};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

/// Everything needed to open an account.
#[derive(Debug)]
pub struct Registration {
    /// Requested username, 3-20 characters.
    pub username: String,
    /// Plaintext password, 6-20 characters; only its digest is stored.
    pub password: SecretString,
    /// Contact email, stored as a digest.
    pub email: String,
    /// 11-digit phone number, stored as a digest.
    pub phone: String,
}

/// Proof of identity for a password reset.
#[derive(Debug)]
pub struct RecoveryClaim {
    /// Account to recover.
    pub username: String,
    /// Email given at registration.
    pub email: String,
    /// Phone number given at registration.
    pub phone: String,
}

/// Authentication service.
///
/// Handles user registration, login, and password recovery.
pub struct AuthService<'a> {
    users: &'a UserRepository,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(users: &'a UserRepository) -> Self {
        Self { users }
    }

    // =========================================================================
    // Registration & Login
    // =========================================================================

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidUsername`, `AuthError::WeakPassword`,
    /// `AuthError::InvalidEmail` or `AuthError::InvalidPhone` for malformed
    /// input, and `AuthError::UserAlreadyExists` if the username is taken.
    pub fn register(&self, registration: Registration) -> Result<User, AuthError> {
        let username = Username::parse(&registration.username)?;
        let password = Password::parse(registration.password)?;
        let email = Email::parse(&registration.email)?;
        let phone = Phone::parse(&registration.phone)?;

        let user = User {
            username,
            password: password.digest(),
            email: Digest::of(email.as_str()),
            phone: Digest::of(phone.as_str()),
        };

        self.users.create(&user).map_err(|e| match e {
            RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
            other => AuthError::Repository(other),
        })?;

        Ok(user)
    }

    /// Login with username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the username/password is wrong.
    pub fn login(&self, username: &str, password: &SecretString) -> Result<User, AuthError> {
        let user = self
            .users
            .get_by_username(username.trim())?
            .ok_or(AuthError::InvalidCredentials)?;

        if user.password != Digest::of_secret(password) {
            tracing::info!(username = %user.username, "Login failed: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(username = %user.username, "User logged in");
        Ok(user)
    }

    // =========================================================================
    // Password Recovery
    // =========================================================================

    /// Look up the account a recovery is for.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if no such user exists.
    pub fn begin_recovery(&self, username: &str) -> Result<User, AuthError> {
        self.users
            .get_by_username(username.trim())?
            .ok_or(AuthError::UserNotFound)
    }

    /// Check the claimed email and phone against the stored digests.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` or `AuthError::InvalidPhone` for
    /// malformed input, and `AuthError::IdentityMismatch` if either differs.
    pub fn verify_identity(user: &User, email: &str, phone: &str) -> Result<(), AuthError> {
        let email = Email::parse(email)?;
        let phone = Phone::parse(phone)?;

        if user.email.matches(email.as_str()) && user.phone.matches(phone.as_str()) {
            Ok(())
        } else {
            tracing::warn!(username = %user.username, "Password recovery identity mismatch");
            Err(AuthError::IdentityMismatch)
        }
    }

    /// Store a new password for a verified user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::WeakPassword` for an invalid password, or
    /// `AuthError::UserNotFound` if the account vanished in the meantime.
    pub fn reset_password(&self, user: &User, password: SecretString) -> Result<User, AuthError> {
        let password = Password::parse(password)?;
        let updated = User {
            password: password.digest(),
            ..user.clone()
        };

        self.users.update(&updated).map_err(|e| match e {
            RepositoryError::NotFound => AuthError::UserNotFound,
            other => AuthError::Repository(other),
        })?;

        tracing::info!(username = %updated.username, "Password reset");
        Ok(updated)
    }

    /// Verify identity and set a new password in one step.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound`, `AuthError::IdentityMismatch`, or
    /// a validation error; nothing is written on failure.
    pub fn recover(
        &self,
        claim: &RecoveryClaim,
        new_password: SecretString,
    ) -> Result<User, AuthError> {
        let user = self.begin_recovery(&claim.username)?;
        Self::verify_identity(&user, &claim.email, &claim.phone)?;
        self.reset_password(&user, new_password)
    }
}
