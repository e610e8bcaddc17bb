//! Admin account repository.

use std::path::PathBuf;

use flatmart_storefront::db::{FlatFile, Record, RepositoryError};

use crate::models::AdminUser;

impl Record for AdminUser {
    const KIND: &'static str = "admin";
    const FIELDS: usize = 2;
    const HEADER: Option<&'static str> = Some("username,password");
}

/// Read access to the admin file.
#[derive(Debug, Clone)]
pub struct AdminRepository {
    file: FlatFile<AdminUser>,
}

impl AdminRepository {
    /// Create a repository backed by the admin file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: FlatFile::new(path),
        }
    }

    /// Every admin account. A missing file means no admins.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the file cannot be read.
    pub fn all(&self) -> Result<Vec<AdminUser>, RepositoryError> {
        self.file.load_all()
    }

    /// Get an admin by username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the file cannot be read.
    pub fn get_by_username(&self, username: &str) -> Result<Option<AdminUser>, RepositoryError> {
        Ok(self.all()?.into_iter().find(|a| a.username == username))
    }
}
