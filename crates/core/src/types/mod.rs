//! Core types for Flatmart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod contact;
pub mod credential;
pub mod email;
pub mod id;
pub mod price;
pub mod text;

pub use contact::{Phone, PhoneError};
pub use credential::{Digest, Password, PasswordError};
pub use email::{Email, EmailError};
pub use id::{GoodId, GoodIdError, Username, UsernameError};
pub use price::{Price, PriceError};
pub use text::{FieldError, check_field};
