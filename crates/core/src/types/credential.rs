//! Credential types.
//!
//! Plaintext passwords are carried as [`SecretString`] and only ever leave
//! that wrapper to be hashed. Stored credentials and contact details are
//! SHA-256 [`Digest`]s rendered as lowercase hex.

use core::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

/// Errors that can occur when validating a [`Password`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    /// The password is shorter or longer than allowed.
    #[error("password must be between {min} and {max} characters")]
    Length {
        /// Minimum allowed length.
        min: usize,
        /// Maximum allowed length.
        max: usize,
    },
}

/// A validated plaintext password.
///
/// `Debug` never prints the secret.
#[derive(Debug)]
pub struct Password(SecretString);

impl Password {
    /// Minimum password length in characters.
    pub const MIN_LENGTH: usize = 6;
    /// Maximum password length in characters.
    pub const MAX_LENGTH: usize = 20;

    /// Validate a new password.
    ///
    /// Surrounding whitespace does not count towards the length but is kept
    /// as part of the password.
    ///
    /// # Errors
    ///
    /// Returns `PasswordError::Length` unless the trimmed password is 6-20
    /// characters long.
    pub fn parse(secret: SecretString) -> Result<Self, PasswordError> {
        let len = secret.expose_secret().trim().chars().count();
        if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&len) {
            return Err(PasswordError::Length {
                min: Self::MIN_LENGTH,
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(secret))
    }

    /// Hash the password for storage.
    #[must_use]
    pub fn digest(&self) -> Digest {
        Digest::of(self.0.expose_secret())
    }
}

/// A one-way SHA-256 digest, stored as 64 lowercase hex characters.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Digest(String);

impl Digest {
    /// Hash `value`.
    #[must_use]
    pub fn of(value: &str) -> Self {
        Self(hex::encode(Sha256::digest(value.as_bytes())))
    }

    /// Hash a secret without copying it out of its wrapper.
    #[must_use]
    pub fn of_secret(secret: &SecretString) -> Self {
        Self::of(secret.expose_secret())
    }

    /// Whether `value` hashes to this digest.
    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        *self == Self::of(value)
    }

    /// Returns the hex digest.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = self.0.get(..8).unwrap_or(&self.0);
        write!(f, "Digest({prefix}…)")
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_is_sha256_hex() {
        assert_eq!(
            Digest::of("abc").as_str(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_digest_matches() {
        let digest = Digest::of("13800138000");
        assert!(digest.matches("13800138000"));
        assert!(!digest.matches("13800138001"));
        assert!(!digest.matches(digest.as_str()));
    }

    #[test]
    fn test_password_length() {
        assert!(Password::parse(SecretString::from("secret")).is_ok());
        assert!(Password::parse(SecretString::from("x".repeat(20))).is_ok());
        assert_eq!(
            Password::parse(SecretString::from("short")).unwrap_err(),
            PasswordError::Length { min: 6, max: 20 }
        );
        assert!(Password::parse(SecretString::from("   abc   ")).is_err());
        assert!(Password::parse(SecretString::from("x".repeat(21))).is_err());
    }

    #[test]
    fn test_password_digest_and_debug() {
        let password = Password::parse(SecretString::from("hunter22")).unwrap();
        assert!(password.digest().matches("hunter22"));
        assert!(!format!("{password:?}").contains("hunter22"));
    }
}
