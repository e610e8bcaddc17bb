//! Admin services.
//!
//! # Services
//!
//! - `auth` - Admin login against the admin file
//! - `goods` - Validated catalog maintenance
//! - `users` - Customer account listing and removal

pub mod auth;
pub mod goods;
pub mod users;

pub use auth::AdminAuth;
pub use goods::{GoodDraft, add_good, delete_good, list_goods, modify_good};
pub use users::{delete_user, list_users};
