//! Session cart.
//!
//! Units placed in the cart are taken out of catalog stock immediately, and
//! every quantity edit moves the difference back or forth. Checkout therefore
//! never touches stock.

use core::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

use flatmart_core::GoodId;

use super::catalog::{Catalog, CatalogError};
use crate::models::Good;

/// Errors that can occur in cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The good is not in the catalog.
    #[error("good {0} not found")]
    GoodNotFound(GoodId),

    /// The good is not in the cart.
    #[error("good {0} is not in the cart")]
    NotInCart(GoodId),

    /// Adding zero units.
    #[error("quantity must be greater than zero")]
    ZeroQuantity,

    /// Catalog error (insufficient stock, storage).
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// A good and how many units of it are in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    /// The good as it was when last touched by the cart.
    pub good: Good,
    /// Units held.
    pub quantity: u32,
}

impl CartItem {
    /// Price times quantity, or `None` on overflow.
    #[must_use]
    pub fn subtotal(&self) -> Option<Decimal> {
        self.good.price.times(self.quantity)
    }
}

impl fmt::Display for CartItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} x {}",
            self.good.id, self.good.name, self.quantity
        )
    }
}

/// Outcome of [`Cart::modify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// The item was dropped and its units returned to stock.
    Removed {
        /// Units returned.
        restored: u32,
    },
    /// Fewer units; the difference went back to stock.
    Decreased {
        /// Units returned.
        restored: u32,
    },
    /// More units; the difference came out of stock.
    Increased {
        /// Units taken.
        taken: u32,
    },
    /// Requested quantity equals the current one.
    Unchanged,
}

/// The active session's cart.
#[derive(Debug, Default)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Items in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The item for a good, if present.
    #[must_use]
    pub fn get(&self, id: &GoodId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.good.id == id)
    }

    /// Sum of all line subtotals, or `None` on overflow.
    #[must_use]
    pub fn total(&self) -> Option<Decimal> {
        self.items
            .iter()
            .try_fold(Decimal::ZERO, |sum, item| sum.checked_add(item.subtotal()?))
    }

    /// Put `quantity` units of a good in the cart, taking them out of stock.
    ///
    /// Adding a good that is already in the cart increases that line.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ZeroQuantity` for zero units,
    /// `CartError::GoodNotFound` for a good missing from the catalog, or the
    /// catalog's error (notably `InsufficientStock`); the cart and stock are
    /// unchanged in every error case.
    pub fn add(
        &mut self,
        catalog: &mut Catalog,
        id: &GoodId,
        quantity: u32,
    ) -> Result<&CartItem, CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }
        if catalog.by_id(id).is_none() {
            return Err(CartError::GoodNotFound(id.clone()));
        }

        let good = catalog.reduce_stock(id, quantity)?.clone();
        tracing::debug!(good_id = %id, quantity, "Added to cart");

        let index = match self.items.iter().position(|item| &item.good.id == id) {
            Some(index) => index,
            None => {
                self.items.push(CartItem { good: good.clone(), quantity: 0 });
                self.items.len() - 1
            }
        };
        let item = self
            .items
            .get_mut(index)
            .ok_or_else(|| CartError::NotInCart(id.clone()))?;
        item.good = good;
        item.quantity += quantity;
        Ok(&*item)
    }

    /// Set the quantity of a good already in the cart.
    ///
    /// Zero removes the line. The difference to the current quantity is
    /// returned to, or taken from, catalog stock.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotInCart` if the good is not in the cart, or the
    /// catalog's error (notably `InsufficientStock` when increasing); the cart
    /// is unchanged in every error case.
    pub fn modify(
        &mut self,
        catalog: &mut Catalog,
        id: &GoodId,
        quantity: u32,
    ) -> Result<CartChange, CartError> {
        let index = self
            .items
            .iter()
            .position(|item| &item.good.id == id)
            .ok_or_else(|| CartError::NotInCart(id.clone()))?;
        let current = self.items.get(index).map_or(0, |item| item.quantity);

        let change = if quantity == current {
            CartChange::Unchanged
        } else if quantity == 0 {
            match catalog.add_stock(id, current) {
                Ok(_) => {}
                // Deleted from the catalog meanwhile; nothing to return it to.
                Err(CatalogError::NotFound(_)) => {
                    tracing::warn!(good_id = %id, "Removed cart item for a good no longer in the catalog");
                }
                Err(e) => return Err(e.into()),
            }
            self.items.remove(index);
            CartChange::Removed { restored: current }
        } else if quantity < current {
            let restored = current - quantity;
            catalog.add_stock(id, restored)?;
            CartChange::Decreased { restored }
        } else {
            let taken = quantity - current;
            catalog.reduce_stock(id, taken)?;
            CartChange::Increased { taken }
        };

        if let Some(item) = self.items.get_mut(index)
            && matches!(change, CartChange::Decreased { .. } | CartChange::Increased { .. })
        {
            item.quantity = quantity;
        }
        tracing::debug!(good_id = %id, quantity, ?change, "Cart modified");
        Ok(change)
    }

    /// Empty the cart without touching stock.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Return every held unit to stock and empty the cart.
    ///
    /// Used when a session ends without checking out. Returns the number of
    /// units restored.
    ///
    /// # Errors
    ///
    /// Returns the first catalog error; lines not yet released stay in the
    /// cart.
    pub fn release(&mut self, catalog: &mut Catalog) -> Result<u32, CartError> {
        let ids: Vec<GoodId> = self.items.iter().map(|item| item.good.id.clone()).collect();
        let mut restored = 0;
        for id in &ids {
            if let CartChange::Removed { restored: units } = self.modify(catalog, id, 0)? {
                restored += units;
            }
        }
        Ok(restored)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::GoodsRepository;
    use crate::db::goods::tests::good;

    fn setup(goods: &[Good]) -> (tempfile::TempDir, Catalog) {
        let dir = tempfile::tempdir().unwrap();
        let repo = GoodsRepository::new(dir.path().join("goods.txt"));
        for g in goods {
            repo.add(g).unwrap();
        }
        (dir, Catalog::open(repo).unwrap())
    }

    fn id(s: &str) -> GoodId {
        GoodId::parse(s).unwrap()
    }

    fn stock(catalog: &mut Catalog, good: &str) -> u32 {
        catalog.refresh().unwrap();
        catalog.by_id(&id(good)).unwrap().stock
    }

    #[test]
    fn test_add_takes_stock() {
        let (_dir, mut catalog) = setup(&[good("A", "10", 5)]);
        let mut cart = Cart::new();

        let item = cart.add(&mut catalog, &id("A"), 3).unwrap();
        assert_eq!(item.quantity, 3);
        assert_eq!(stock(&mut catalog, "A"), 2);
    }

    #[test]
    fn test_add_same_good_merges() {
        let (_dir, mut catalog) = setup(&[good("A", "10", 5)]);
        let mut cart = Cart::new();
        cart.add(&mut catalog, &id("A"), 1).unwrap();
        cart.add(&mut catalog, &id("A"), 2).unwrap();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.get(&id("A")).unwrap().quantity, 3);
        assert_eq!(stock(&mut catalog, "A"), 2);
    }

    #[test]
    fn test_add_rejects_bad_requests() {
        let (_dir, mut catalog) = setup(&[good("A", "10", 2)]);
        let mut cart = Cart::new();

        assert!(matches!(
            cart.add(&mut catalog, &id("A"), 0),
            Err(CartError::ZeroQuantity)
        ));
        assert!(matches!(
            cart.add(&mut catalog, &id("B"), 1),
            Err(CartError::GoodNotFound(_))
        ));
        assert!(matches!(
            cart.add(&mut catalog, &id("A"), 3),
            Err(CartError::Catalog(CatalogError::InsufficientStock { .. }))
        ));
        assert!(cart.is_empty());
        assert_eq!(stock(&mut catalog, "A"), 2);
    }

    #[test]
    fn test_modify_to_zero_removes_and_restores() {
        let (_dir, mut catalog) = setup(&[good("A", "10", 5)]);
        let mut cart = Cart::new();
        cart.add(&mut catalog, &id("A"), 4).unwrap();

        let change = cart.modify(&mut catalog, &id("A"), 0).unwrap();
        assert_eq!(change, CartChange::Removed { restored: 4 });
        assert!(cart.get(&id("A")).is_none());
        assert!(cart.is_empty());
        assert_eq!(stock(&mut catalog, "A"), 5);
    }

    #[test]
    fn test_modify_down_and_up() {
        let (_dir, mut catalog) = setup(&[good("A", "10", 5)]);
        let mut cart = Cart::new();
        cart.add(&mut catalog, &id("A"), 3).unwrap();

        assert_eq!(
            cart.modify(&mut catalog, &id("A"), 1).unwrap(),
            CartChange::Decreased { restored: 2 }
        );
        assert_eq!(stock(&mut catalog, "A"), 4);

        assert_eq!(
            cart.modify(&mut catalog, &id("A"), 5).unwrap(),
            CartChange::Increased { taken: 4 }
        );
        assert_eq!(stock(&mut catalog, "A"), 0);
        assert_eq!(cart.get(&id("A")).unwrap().quantity, 5);

        assert_eq!(
            cart.modify(&mut catalog, &id("A"), 5).unwrap(),
            CartChange::Unchanged
        );
    }

    #[test]
    fn test_modify_up_without_stock_changes_nothing() {
        let (_dir, mut catalog) = setup(&[good("A", "10", 3)]);
        let mut cart = Cart::new();
        cart.add(&mut catalog, &id("A"), 2).unwrap();

        assert!(matches!(
            cart.modify(&mut catalog, &id("A"), 9),
            Err(CartError::Catalog(CatalogError::InsufficientStock { .. }))
        ));
        assert_eq!(cart.get(&id("A")).unwrap().quantity, 2);
        assert_eq!(stock(&mut catalog, "A"), 1);
    }

    #[test]
    fn test_modify_requires_item_in_cart() {
        let (_dir, mut catalog) = setup(&[good("A", "10", 3)]);
        let mut cart = Cart::new();
        assert!(matches!(
            cart.modify(&mut catalog, &id("A"), 1),
            Err(CartError::NotInCart(_))
        ));
    }

    #[test]
    fn test_remove_item_whose_good_was_deleted() {
        let (_dir, mut catalog) = setup(&[good("A", "10", 3)]);
        let mut cart = Cart::new();
        cart.add(&mut catalog, &id("A"), 1).unwrap();
        catalog.remove(&id("A")).unwrap();

        assert_eq!(
            cart.modify(&mut catalog, &id("A"), 0).unwrap(),
            CartChange::Removed { restored: 1 }
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_and_display() {
        let (_dir, mut catalog) = setup(&[good("A", "2.50", 9), good("B", "100", 9)]);
        let mut cart = Cart::new();
        cart.add(&mut catalog, &id("A"), 4).unwrap();
        cart.add(&mut catalog, &id("B"), 1).unwrap();

        assert_eq!(cart.total(), Some(Decimal::new(110, 0)));
        assert_eq!(cart.items()[0].to_string(), "[A] Good A x 4");

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(stock(&mut catalog, "A"), 5);
    }

    #[test]
    fn test_release_returns_everything() {
        let (_dir, mut catalog) = setup(&[good("A", "1", 4), good("B", "1", 4)]);
        let mut cart = Cart::new();
        cart.add(&mut catalog, &id("A"), 3).unwrap();
        cart.add(&mut catalog, &id("B"), 1).unwrap();

        assert_eq!(cart.release(&mut catalog).unwrap(), 4);
        assert!(cart.is_empty());
        assert_eq!(stock(&mut catalog, "A"), 4);
        assert_eq!(stock(&mut catalog, "B"), 4);
    }
}
