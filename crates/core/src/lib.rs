//! Flatmart Core - Shared domain types.
//!
//! This crate provides the validated types used across all Flatmart components:
//! - `storefront` - Catalog, cart, checkout and customer accounts
//! - `admin` - Catalog and user administration
//! - `cli` - The interactive console
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no file access and
//! no console I/O. Every field that ends up in a flat file is validated here,
//! which is also where the "no commas, no newlines" rule of the file format is
//! enforced.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for good IDs, usernames, contact details,
//!   credentials and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
