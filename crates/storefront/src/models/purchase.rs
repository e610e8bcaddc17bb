//! Purchase log entry.

use core::fmt;

use serde::{Deserialize, Serialize};

use flatmart_core::{GoodId, Username};

/// One confirmed cart line. Entries are never updated or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    /// Buyer.
    pub username: Username,
    /// Good bought.
    pub good_id: GoodId,
    /// Units bought.
    pub quantity: u32,
}

impl fmt::Display for Purchase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "good {} x {}", self.good_id, self.quantity)
    }
}
