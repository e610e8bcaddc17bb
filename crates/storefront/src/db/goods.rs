//! Goods repository over the catalog file.

use std::path::PathBuf;

use flatmart_core::GoodId;

use super::{FlatFile, Record, RepositoryError};
use crate::models::Good;

impl Record for Good {
    const KIND: &'static str = "good";
    const FIELDS: usize = 6;
    const HEADER: Option<&'static str> = Some("id,name,description,price,stock,category");
}

/// Repository for catalog goods.
#[derive(Debug, Clone)]
pub struct GoodsRepository {
    file: FlatFile<Good>,
}

impl GoodsRepository {
    /// Create a repository backed by the goods file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: FlatFile::new(path),
        }
    }

    /// Every good, in file order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the file cannot be read.
    pub fn all(&self) -> Result<Vec<Good>, RepositoryError> {
        self.file.load_all()
    }

    /// Append a new good. Duplicate IDs are not detected.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Delimiter` if a field would break the file
    /// format, or `RepositoryError::Io` if the write fails.
    pub fn add(&self, good: &Good) -> Result<(), RepositoryError> {
        self.file.append(good)?;
        tracing::info!(good_id = %good.id, "Good added");
        Ok(())
    }

    /// Replace every good whose ID matches `good.id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` (without rewriting) if no good has
    /// that ID, or any error from the rewrite.
    pub fn update(&self, good: &Good) -> Result<(), RepositoryError> {
        let mut goods = self.all()?;
        let mut found = false;
        for existing in goods.iter_mut().filter(|g| g.id == good.id) {
            existing.clone_from(good);
            found = true;
        }
        if !found {
            return Err(RepositoryError::NotFound);
        }
        self.file.rewrite_all(&goods)
    }

    /// Remove every good with the given ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` (without rewriting) if no good has
    /// that ID, or any error from the rewrite.
    pub fn delete(&self, id: &GoodId) -> Result<(), RepositoryError> {
        let mut goods = self.all()?;
        let before = goods.len();
        goods.retain(|g| &g.id != id);
        if goods.len() == before {
            return Err(RepositoryError::NotFound);
        }
        self.file.rewrite_all(&goods)?;
        tracing::info!(good_id = %id, "Good deleted");
        Ok(())
    }
}
