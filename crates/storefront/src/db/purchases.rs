//! Append-only purchase log.

use std::path::PathBuf;

use flatmart_core::Username;

use super::{FlatFile, Record, RepositoryError};
use crate::models::Purchase;

impl Record for Purchase {
    const KIND: &'static str = "purchase";
    const FIELDS: usize = 3;
}

/// Repository for purchase records.
#[derive(Debug, Clone)]
pub struct PurchaseRepository {
    file: FlatFile<Purchase>,
}

impl PurchaseRepository {
    /// Create a repository backed by the purchases file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: FlatFile::new(path),
        }
    }

    /// Record confirmed purchases.
    ///
    /// # Errors
    ///
    /// Returns any error from the append; nothing is written in that case.
    pub fn record_all(&self, purchases: &[Purchase]) -> Result<(), RepositoryError> {
        self.file.append_all(purchases)
    }

    /// Purchases made by `username`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the file cannot be read.
    pub fn for_user(&self, username: &Username) -> Result<Vec<Purchase>, RepositoryError> {
        let mut purchases = self.file.load_all()?;
        purchases.retain(|p| &p.username == username);
        Ok(purchases)
    }
}
