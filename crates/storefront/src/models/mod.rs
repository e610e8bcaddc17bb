//! Domain models for the storefront.
//!
//! Each model doubles as its flat-file record; the `db` module declares how
//! it is laid out on disk.

pub mod good;
pub mod purchase;
pub mod user;

pub use good::Good;
pub use purchase::Purchase;
pub use user::User;
