//! File operations for admin data.
//!
//! # Data files
//!
//! - `admins.txt` - Admin accounts, `username,password`, with an optional
//!   header line. Read-only from the console.
//!
//! Goods and customer files are reached through the storefront repositories.

pub mod admins;

pub use admins::AdminRepository;
pub use flatmart_storefront::db::RepositoryError;
