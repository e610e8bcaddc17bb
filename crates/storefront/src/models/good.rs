//! Catalog good domain type.

use core::fmt;

use serde::{Deserialize, Serialize};

use flatmart_core::{GoodId, Price};

/// A good offered in the catalog.
///
/// Field order matches the columns of the goods file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Good {
    /// Identifier. Unique by convention; inserts do not check it.
    pub id: GoodId,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Unit price.
    pub price: Price,
    /// Units available.
    pub stock: u32,
    /// Category label, e.g. "electronics".
    pub category: String,
}

impl fmt::Display for Good {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} - {} | price {} | stock {} | {}",
            self.id, self.name, self.description, self.price, self.stock, self.category
        )
    }
}
