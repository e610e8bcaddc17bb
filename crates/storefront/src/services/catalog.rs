//! Store-backed catalog of goods.
//!
//! The catalog owns the in-memory copy of the goods file. The copy is only
//! reloaded at explicit invalidation points: [`Catalog::refresh`], every
//! [`Catalog::list`], and after each write made through the catalog.

use thiserror::Error;

use flatmart_core::GoodId;

use crate::db::{GoodsRepository, RepositoryError};
use crate::models::Good;

/// Errors that can occur in catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No good with this ID in the catalog.
    #[error("good {0} not found")]
    NotFound(GoodId),

    /// Fewer units in stock than requested.
    #[error("insufficient stock for {id}: requested {requested}, available {available}")]
    InsufficientStock {
        /// Good being drawn from.
        id: GoodId,
        /// Units requested.
        requested: u32,
        /// Units available.
        available: u32,
    },

    /// Stock would exceed the representable maximum.
    #[error("stock for {0} would overflow")]
    StockOverflow(GoodId),

    /// Repository/file error.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}

/// The catalog of goods, sorted by ascending price.
#[derive(Debug)]
pub struct Catalog {
    goods: GoodsRepository,
    cache: Vec<Good>,
}

impl Catalog {
    /// Create a catalog with an empty cache. Call [`Catalog::refresh`] to load it.
    #[must_use]
    pub const fn new(goods: GoodsRepository) -> Self {
        Self {
            goods,
            cache: Vec::new(),
        }
    }

    /// Create a catalog and load it.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the goods file cannot be read.
    pub fn open(goods: GoodsRepository) -> Result<Self, CatalogError> {
        let mut catalog = Self::new(goods);
        catalog.refresh()?;
        Ok(catalog)
    }

    /// Reload every good from the store.
    ///
    /// On failure the previous cache is kept.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the goods file cannot be read.
    pub fn refresh(&mut self) -> Result<(), CatalogError> {
        let mut goods = self.goods.all()?;
        goods.sort_by(|a, b| a.price.cmp(&b.price));
        self.cache = goods;
        Ok(())
    }

    /// Reload and return every good, cheapest first.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the goods file cannot be read.
    pub fn list(&mut self) -> Result<&[Good], CatalogError> {
        self.refresh()?;
        Ok(&self.cache)
    }

    /// Goods as of the last load, without touching the store.
    #[must_use]
    pub fn cached(&self) -> &[Good] {
        &self.cache
    }

    /// Look a good up in the last-loaded cache.
    #[must_use]
    pub fn by_id(&self, id: &GoodId) -> Option<&Good> {
        self.cache.iter().find(|g| &g.id == id)
    }

    /// Take `quantity` units out of stock and persist the new level.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for an unknown good,
    /// `CatalogError::InsufficientStock` (with no change) if `quantity`
    /// exceeds the stock, or `CatalogError::Repository` if persisting fails.
    pub fn reduce_stock(&mut self, id: &GoodId, quantity: u32) -> Result<&Good, CatalogError> {
        let good = self
            .by_id(id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
        let stock = good
            .stock
            .checked_sub(quantity)
            .ok_or_else(|| CatalogError::InsufficientStock {
                id: id.clone(),
                requested: quantity,
                available: good.stock,
            })?;
        self.set_stock(id, stock)
    }

    /// Return `quantity` units to stock and persist the new level.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for an unknown good,
    /// `CatalogError::StockOverflow` if the stock would not fit, or
    /// `CatalogError::Repository` if persisting fails.
    pub fn add_stock(&mut self, id: &GoodId, quantity: u32) -> Result<&Good, CatalogError> {
        let good = self
            .by_id(id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
        let stock = good
            .stock
            .checked_add(quantity)
            .ok_or_else(|| CatalogError::StockOverflow(id.clone()))?;
        self.set_stock(id, stock)
    }

    /// Append a new good and reload.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if writing or reloading fails.
    pub fn insert(&mut self, good: &Good) -> Result<(), CatalogError> {
        self.goods.add(good)?;
        self.refresh()
    }

    /// Overwrite the stored good with the same ID and reload.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no good has that ID, or
    /// `CatalogError::Repository` if writing or reloading fails.
    pub fn replace(&mut self, good: &Good) -> Result<(), CatalogError> {
        self.goods.update(good).map_err(|e| not_found_as(e, &good.id))?;
        self.refresh()
    }

    /// Delete the good with this ID and reload.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no good has that ID, or
    /// `CatalogError::Repository` if writing or reloading fails.
    pub fn remove(&mut self, id: &GoodId) -> Result<(), CatalogError> {
        self.goods.delete(id).map_err(|e| not_found_as(e, id))?;
        self.refresh()
    }

    fn set_stock(&mut self, id: &GoodId, stock: u32) -> Result<&Good, CatalogError> {
        let slot = self
            .cache
            .iter_mut()
            .find(|g| &g.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
        let mut updated = slot.clone();
        updated.stock = stock;

        self.goods.update(&updated).map_err(|e| not_found_as(e, id))?;
        tracing::debug!(good_id = %id, stock, "Stock updated");

        *slot = updated;
        Ok(&*slot)
    }
}

fn not_found_as(err: RepositoryError, id: &GoodId) -> CatalogError {
    match err {
        RepositoryError::NotFound => CatalogError::NotFound(id.clone()),
        other => CatalogError::Repository(other),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::goods::tests::good;

    fn catalog_with(goods: &[Good]) -> (tempfile::TempDir, Catalog) {
        let dir = tempfile::tempdir().unwrap();
        let repo = GoodsRepository::new(dir.path().join("goods.txt"));
        for g in goods {
            repo.add(g).unwrap();
        }
        let catalog = Catalog::open(repo).unwrap();
        (dir, catalog)
    }

    fn id(s: &str) -> GoodId {
        GoodId::parse(s).unwrap()
    }

    #[test]
    fn test_list_sorted_by_price() {
        let (_dir, mut catalog) = catalog_with(&[
            good("B", "30", 1),
            good("A", "5.5", 1),
            good("C", "12", 1),
        ]);
        let ids: Vec<_> = catalog
            .list()
            .unwrap()
            .iter()
            .map(|g| g.id.to_string())
            .collect();
        assert_eq!(ids, ["A", "C", "B"]);
    }

    #[test]
    fn test_by_id_uses_cache_until_refresh() {
        let (dir, mut catalog) = catalog_with(&[good("A", "1", 1)]);
        GoodsRepository::new(dir.path().join("goods.txt"))
            .add(&good("B", "2", 2))
            .unwrap();

        assert!(catalog.by_id(&id("B")).is_none());
        catalog.refresh().unwrap();
        assert_eq!(catalog.by_id(&id("B")).unwrap().stock, 2);
    }

    #[test]
    fn test_reduce_stock_persists() {
        let (dir, mut catalog) = catalog_with(&[good("A", "1", 10)]);
        assert_eq!(catalog.reduce_stock(&id("A"), 4).unwrap().stock, 6);
        assert_eq!(catalog.reduce_stock(&id("A"), 6).unwrap().stock, 0);

        let stored = GoodsRepository::new(dir.path().join("goods.txt"))
            .all()
            .unwrap();
        assert_eq!(stored[0].stock, 0);
    }

    #[test]
    fn test_reduce_stock_beyond_available_changes_nothing() {
        let (dir, mut catalog) = catalog_with(&[good("A", "1", 3)]);
        let before = std::fs::read(dir.path().join("goods.txt")).unwrap();

        let err = catalog.reduce_stock(&id("A"), 4).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InsufficientStock {
                requested: 4,
                available: 3,
                ..
            }
        ));
        assert_eq!(catalog.by_id(&id("A")).unwrap().stock, 3);
        assert_eq!(std::fs::read(dir.path().join("goods.txt")).unwrap(), before);
    }

    #[test]
    fn test_add_stock_is_unconditional() {
        let (_dir, mut catalog) = catalog_with(&[good("A", "1", 50)]);
        assert_eq!(catalog.add_stock(&id("A"), 1).unwrap().stock, 51);
        catalog.refresh().unwrap();
        assert_eq!(catalog.by_id(&id("A")).unwrap().stock, 51);
    }

    #[test]
    fn test_add_stock_overflow() {
        let (_dir, mut catalog) = catalog_with(&[good("A", "1", u32::MAX)]);
        assert!(matches!(
            catalog.add_stock(&id("A"), 1),
            Err(CatalogError::StockOverflow(_))
        ));
    }

    #[test]
    fn test_unknown_good() {
        let (_dir, mut catalog) = catalog_with(&[]);
        assert!(matches!(
            catalog.reduce_stock(&id("Z"), 1),
            Err(CatalogError::NotFound(_))
        ));
        assert!(matches!(
            catalog.remove(&id("Z")),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn test_insert_replace_remove_refresh_cache() {
        let (_dir, mut catalog) = catalog_with(&[]);
        catalog.insert(&good("A", "1", 1)).unwrap();
        assert!(catalog.by_id(&id("A")).is_some());

        let mut changed = good("A", "9", 4);
        changed.category = "tools".to_owned();
        catalog.replace(&changed).unwrap();
        assert_eq!(catalog.by_id(&id("A")), Some(&changed));

        catalog.remove(&id("A")).unwrap();
        assert!(catalog.cached().is_empty());
    }
}
