//! Flatmart Storefront library.
//!
//! Catalog, cart, checkout and customer accounts on top of plain
//! comma-delimited files. The console front end lives in `flatmart-cli`.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod state;

pub use error::{AppError, Result};
pub use state::AppState;
