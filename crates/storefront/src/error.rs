//! Unified error handling for the storefront.
//!
//! Provides a unified `AppError` type for everything a console action can
//! fail with. Internal failures (file access, encoding) are logged with
//! `tracing::error!` when reported; everything else is the customer's input
//! and is shown back to them as a short message.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::cart::CartError;
use crate::services::catalog::CatalogError;
use crate::services::checkout::CheckoutError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// File operation failed.
    #[error("Storage error: {0}")]
    Repository(#[from] RepositoryError),

    /// Catalog operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Checkout failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Input could not be parsed (e.g. a quantity that is not a number).
    #[error("Bad input: {0}")]
    BadInput(String),
}

impl AppError {
    /// The underlying storage error, if this failure came from the files.
    #[must_use]
    pub const fn storage(&self) -> Option<&RepositoryError> {
        match self {
            Self::Repository(err)
            | Self::Catalog(CatalogError::Repository(err))
            | Self::Cart(CartError::Catalog(CatalogError::Repository(err)))
            | Self::Checkout(CheckoutError::Repository(err))
            | Self::Auth(AuthError::Repository(err)) => Some(err),
            _ => None,
        }
    }

    /// Whether this is a system failure rather than a rejected request.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        self.storage().is_some()
    }

    /// Message suitable for the console.
    ///
    /// Internal details are not exposed; they go to the log instead.
    #[must_use]
    pub fn user_message(&self) -> String {
        if self.is_internal() {
            return "Something went wrong while accessing the store files".to_string();
        }
        match self {
            Self::Catalog(err) | Self::Cart(CartError::Catalog(err)) => match err {
                CatalogError::NotFound(_) => "Good not found".to_string(),
                CatalogError::InsufficientStock { available, .. } => {
                    format!("Insufficient stock (available: {available})")
                }
                other => other.to_string(),
            },
            Self::Cart(err) => match err {
                CartError::GoodNotFound(_) => "Good not found".to_string(),
                CartError::NotInCart(_) => "That good is not in your cart".to_string(),
                other => other.to_string(),
            },
            Self::Checkout(CheckoutError::EmptyCart) => "Your cart is empty".to_string(),
            Self::Checkout(CheckoutError::TotalOverflow) => {
                "Cart total is too large to check out; remove some items".to_string()
            }
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => "Invalid username or password".to_string(),
                AuthError::UserNotFound => "User not found".to_string(),
                AuthError::UserAlreadyExists => "Username already exists".to_string(),
                AuthError::IdentityMismatch => {
                    "Email or phone does not match our records".to_string()
                }
                other => other.to_string(),
            },
            Self::BadInput(msg) => msg.clone(),
            _ => self.to_string(),
        }
    }

    /// Log internal failures and return the console message.
    #[must_use]
    pub fn report(&self) -> String {
        if self.is_internal() {
            tracing::error!(error = %self, "Store operation failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }
        self.user_message()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io;

    use flatmart_core::GoodId;

    use super::*;

    fn io_error() -> RepositoryError {
        RepositoryError::Io {
            path: "goods.txt".into(),
            source: io::Error::other("disk on fire"),
        }
    }

    #[test]
    fn test_storage_errors_are_internal_and_hidden() {
        let err = AppError::from(CartError::Catalog(CatalogError::Repository(io_error())));
        assert!(err.is_internal());
        assert!(!err.user_message().contains("disk on fire"));
    }

    #[test]
    fn test_user_errors_are_shown() {
        let err = AppError::from(CartError::Catalog(CatalogError::InsufficientStock {
            id: GoodId::parse("G1").unwrap(),
            requested: 5,
            available: 2,
        }));
        assert!(!err.is_internal());
        assert_eq!(err.user_message(), "Insufficient stock (available: 2)");

        let err = AppError::from(CheckoutError::EmptyCart);
        assert_eq!(err.user_message(), "Your cart is empty");
        let err = AppError::from(CheckoutError::TotalOverflow);
        assert!(!err.is_internal());
        assert_eq!(
            err.user_message(),
            "Cart total is too large to check out; remove some items"
        );
        assert_eq!(
            AppError::BadInput("Quantity must be a number".to_string()).user_message(),
            "Quantity must be a number"
        );
    }
}
