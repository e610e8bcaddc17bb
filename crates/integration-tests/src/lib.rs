//! Integration tests for Flatmart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p flatmart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `shopping` - Register, fill a cart, check out, read history
//! - `admin_catalog` - Admin goods maintenance seen from a customer session
//! - `accounts` - Login, recovery and admin user removal
//!
//! Every test gets its own data directory from [`TestStore`].

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;

use secrecy::SecretString;
use tempfile::TempDir;

use flatmart_admin::db::AdminRepository;
use flatmart_storefront::AppState;
use flatmart_storefront::config::StoreConfig;
use flatmart_storefront::services::auth::Registration;

/// Goods every test store starts with.
pub const SEED_GOODS: &str = "id,name,description,price,stock,category\n\
    P100,Pen,blue ink,100,20,office\n\
    L500,Lamp,desk lamp,500,6,home\n\
    C50,Clip,paper clip,0.50,1000,office\n";

/// Admin file every test store starts with (no header line).
pub const SEED_ADMINS: &str = "root,letmein\n";

/// A throwaway data directory with an opened store.
pub struct TestStore {
    dir: TempDir,
    /// The opened store.
    pub state: AppState,
    /// Admin accounts seeded from [`SEED_ADMINS`].
    pub admins: AdminRepository,
}

impl TestStore {
    /// Seed a fresh directory and open it.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be prepared.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = StoreConfig::in_dir(dir.path());
        std::fs::write(&config.goods_file, SEED_GOODS).expect("Failed to seed goods");
        std::fs::write(&config.admins_file, SEED_ADMINS).expect("Failed to seed admins");

        let admins = AdminRepository::new(&config.admins_file);
        let state = AppState::open(&config).expect("Failed to open store");
        Self { dir, state, admins }
    }

    /// Reopen the same directory, as a new process would.
    ///
    /// # Panics
    ///
    /// Panics if the store cannot be reopened.
    #[must_use]
    pub fn reopen(self) -> Self {
        let config = StoreConfig::in_dir(self.dir.path());
        let admins = AdminRepository::new(&config.admins_file);
        let state = AppState::open(&config).expect("Failed to reopen store");
        Self {
            dir: self.dir,
            state,
            admins,
        }
    }

    /// Data directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Raw contents of a data file, empty if missing.
    #[must_use]
    pub fn read(&self, file: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(file)).unwrap_or_default()
    }
}

impl Default for TestStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Plaintext secret from a literal.
#[must_use]
pub fn secret(s: &str) -> SecretString {
    SecretString::from(s.to_owned())
}

/// A valid registration for `username`.
#[must_use]
pub fn registration(username: &str) -> Registration {
    Registration {
        username: username.to_owned(),
        password: secret("opensesame"),
        email: format!("{username}@example.com"),
        phone: "13912345678".to_owned(),
    }
}
