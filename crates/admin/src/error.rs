//! Unified error handling for admin.

use thiserror::Error;

use flatmart_core::{FieldError, GoodIdError, PriceError};
use flatmart_storefront::services::catalog::CatalogError;

use crate::db::RepositoryError;

/// Application-level error type for the admin console.
#[derive(Debug, Error)]
pub enum AdminError {
    /// File operation failed.
    #[error("Storage error: {0}")]
    Repository(#[from] RepositoryError),

    /// Catalog operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Wrong admin username or password.
    #[error("invalid admin credentials")]
    InvalidCredentials,

    /// A required field was left blank.
    #[error("{0} cannot be empty")]
    MissingField(&'static str),

    /// The good ID is not usable.
    #[error("invalid good ID: {0}")]
    InvalidId(#[from] GoodIdError),

    /// The price is not a non-negative number.
    #[error("invalid price: {0}")]
    InvalidPrice(#[from] PriceError),

    /// The stock is not a non-negative integer.
    #[error("stock must be a non-negative whole number, got {0:?}")]
    InvalidStock(String),

    /// A text field contains a character the file format cannot hold.
    #[error("invalid {field}: {source}")]
    InvalidText {
        /// Field name.
        field: &'static str,
        /// What was wrong with it.
        #[source]
        source: FieldError,
    },
}

impl AdminError {
    /// Whether this is a system failure rather than rejected input.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Repository(_) | Self::Catalog(CatalogError::Repository(_))
        )
    }

    /// Log internal failures and return the console message.
    #[must_use]
    pub fn report(&self) -> String {
        if self.is_internal() {
            tracing::error!(error = %self, "Admin operation failed");
            return "Something went wrong while accessing the store files".to_string();
        }
        tracing::debug!(error = %self, "Admin request rejected");
        match self {
            Self::InvalidCredentials => "Invalid admin username or password".to_string(),
            Self::Catalog(CatalogError::NotFound(id)) => format!("Good {id} not found"),
            other => other.to_string(),
        }
    }
}

/// Result type alias for `AdminError`.
pub type Result<T> = std::result::Result<T, AdminError>;
