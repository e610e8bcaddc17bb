//! Flatmart Admin library.
//!
//! Catalog and customer administration over the same data files the
//! storefront uses.
//!
//! # Security
//!
//! Admin accounts are provisioned out-of-band by editing `admins.txt`; there
//! is no way to create or change one from the console. Admin passwords in
//! that file are plaintext.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use error::{AdminError, Result};
