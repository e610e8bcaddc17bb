//! Flat-file persistence for the shop.
//!
//! # Data directory
//!
//! Every entity kind lives in its own comma-delimited text file:
//!
//! - `goods.txt` - Catalog, with an `id,name,description,price,stock,category` header
//! - `users.txt` - Customer accounts, no header
//! - `purchases.txt` - Append-only purchase log, no header
//!
//! The admin file is owned by the `flatmart-admin` crate but goes through the
//! same [`FlatFile`] machinery.
//!
//! # Consistency
//!
//! Files are read wholesale and rewritten wholesale on every update or delete.
//! There is no locking; a single process owns the data directory.

pub mod file;
pub mod goods;
pub mod purchases;
pub mod users;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use file::{FlatFile, Record};
pub use goods::GoodsRepository;
pub use purchases::PurchaseRepository;
pub use users::UserRepository;

/// Errors that can occur in repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Reading or writing a data file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// A record could not be encoded.
    #[error("record encoding error: {0}")]
    Encoding(#[from] csv::Error),

    /// An encoded record would not fit on one line with the expected fields.
    #[error("record does not fit the file format: {0}")]
    Delimiter(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
