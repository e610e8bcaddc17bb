//! Store handles shared by the console session.

use crate::config::StoreConfig;
use crate::db::{GoodsRepository, PurchaseRepository, UserRepository};
use crate::error::Result;
use crate::services::auth::AuthService;
use crate::services::catalog::Catalog;
use crate::services::checkout::Checkout;

/// Everything a session needs to reach the data files.
///
/// There is no global state: the catalog cache lives here and is handed out
/// by `&mut` to whoever changes stock.
#[derive(Debug)]
pub struct AppState {
    users: UserRepository,
    purchases: PurchaseRepository,
    catalog: Catalog,
    checkout: Checkout,
}

impl AppState {
    /// Open the store described by `config` and load the catalog.
    ///
    /// The data directory is created if missing.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Repository` if the directory cannot be created, or
    /// `AppError::Catalog` if the goods file cannot be read.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.data_dir)
            .map_err(|e| crate::db::RepositoryError::io(&config.data_dir, e))?;

        let purchases = PurchaseRepository::new(&config.purchases_file);
        let catalog = Catalog::open(GoodsRepository::new(&config.goods_file))?;

        tracing::info!(
            data_dir = %config.data_dir.display(),
            goods = catalog.cached().len(),
            "Store opened"
        );

        Ok(Self {
            users: UserRepository::new(&config.users_file),
            checkout: Checkout::new(purchases.clone()),
            purchases,
            catalog,
        })
    }

    /// Customer accounts.
    #[must_use]
    pub const fn users(&self) -> &UserRepository {
        &self.users
    }

    /// Purchase log.
    #[must_use]
    pub const fn purchases(&self) -> &PurchaseRepository {
        &self.purchases
    }

    /// Goods catalog as last loaded.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Goods catalog, for stock changes and admin edits.
    pub const fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    /// Purchase recorder.
    #[must_use]
    pub const fn checkout(&self) -> &Checkout {
        &self.checkout
    }

    /// Authentication over the users file.
    #[must_use]
    pub const fn auth(&self) -> AuthService<'_> {
        AuthService::new(&self.users)
    }
}
