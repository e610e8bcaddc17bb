//! Admin domain types.

pub mod admin_user;

pub use admin_user::AdminUser;
