//! Authentication error types.

use thiserror::Error;

use flatmart_core::{EmailError, PasswordError, PhoneError, UsernameError};

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid username format.
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    /// Password too short or too long.
    #[error("invalid password: {0}")]
    WeakPassword(#[from] PasswordError),

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Invalid phone number.
    #[error("invalid phone: {0}")]
    InvalidPhone(#[from] PhoneError),

    /// Invalid credentials (wrong password or user not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// User not found.
    #[error("user not found")]
    UserNotFound,

    /// User already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Email or phone does not match the account.
    #[error("email or phone does not match")]
    IdentityMismatch,

    /// Repository/file error.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}
