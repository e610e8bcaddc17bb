//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Customer registration, login and password recovery
//! - `catalog` - Goods listing and stock adjustment
//! - `cart` - Session cart; mirrors quantity changes into catalog stock
//! - `checkout` - Discount policy and purchase recording

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
