//! User repository over the customer file.

use std::path::PathBuf;

use super::{FlatFile, Record, RepositoryError};
use crate::models::User;

impl Record for User {
    const KIND: &'static str = "user";
    const FIELDS: usize = 4;
}

/// Repository for customer accounts.
#[derive(Debug, Clone)]
pub struct UserRepository {
    file: FlatFile<User>,
}

impl UserRepository {
    /// Create a repository backed by the users file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: FlatFile::new(path),
        }
    }

    /// Every account, in file order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the file cannot be read.
    pub fn all(&self) -> Result<Vec<User>, RepositoryError> {
        self.file.load_all()
    }

    /// Get a user by username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the file cannot be read.
    pub fn get_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .all()?
            .into_iter()
            .find(|u| u.username.as_str() == username))
    }

    /// Append a new account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username is taken, or any
    /// error from the append.
    pub fn create(&self, user: &User) -> Result<(), RepositoryError> {
        if self.get_by_username(user.username.as_str())?.is_some() {
            return Err(RepositoryError::Conflict("username already exists".to_owned()));
        }
        self.file.append(user)?;
        tracing::info!(username = %user.username, "User registered");
        Ok(())
    }

    /// Replace the stored account with the same username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` (without rewriting) if the user
    /// does not exist, or any error from the rewrite.
    pub fn update(&self, user: &User) -> Result<(), RepositoryError> {
        let mut users = self.all()?;
        let slot = users
            .iter_mut()
            .find(|u| u.username == user.username)
            .ok_or(RepositoryError::NotFound)?;
        slot.clone_from(user);
        self.file.rewrite_all(&users)
    }

    /// Delete an account by username.
    ///
    /// Returns `false` and leaves the file untouched when the username is
    /// blank or unknown.
    ///
    /// # Errors
    ///
    /// Returns any error from reading or rewriting the file.
    pub fn delete(&self, username: &str) -> Result<bool, RepositoryError> {
        let username = username.trim();
        if username.is_empty() {
            return Ok(false);
        }
        let mut users = self.all()?;
        let before = users.len();
        users.retain(|u| u.username.as_str() != username);
        if users.len() == before {
            return Ok(false);
        }
        self.file.rewrite_all(&users)?;
        tracing::info!(username, "User deleted");
        Ok(true)
    }
}
