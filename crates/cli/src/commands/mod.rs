//! Interactive menus.
//!
//! - `root` - Register, login, admin login, password recovery, exit
//! - `user` - Browse, cart, checkout and purchase history for a customer
//! - `admin` - Goods and customer maintenance
//!
//! Every action either succeeds, or fails with an error that is reported on
//! the console before the menu is shown again. Only console failures (and
//! end of input) leave the menus.

mod admin;
mod root;
mod user;

use std::io::{BufRead, Write};

use thiserror::Error;

use flatmart_admin::AdminError;
use flatmart_admin::db::AdminRepository;
use flatmart_storefront::AppError;
use flatmart_storefront::AppState;
use flatmart_storefront::services::checkout::RateSource;

use crate::console::{Console, ConsoleError};

/// Errors a single menu action can end with.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Console(#[from] ConsoleError),

    #[error(transparent)]
    App(#[from] AppError),

    #[error(transparent)]
    Admin(#[from] AdminError),
}

macro_rules! impl_from_app_error {
    ($($source:ty),* $(,)?) => {
        $(
            impl From<$source> for CliError {
                fn from(err: $source) -> Self {
                    Self::App(AppError::from(err))
                }
            }
        )*
    };
}

impl_from_app_error!(
    flatmart_storefront::db::RepositoryError,
    flatmart_storefront::services::auth::AuthError,
    flatmart_storefront::services::cart::CartError,
    flatmart_storefront::services::catalog::CatalogError,
    flatmart_storefront::services::checkout::CheckoutError,
);

/// The running console shop.
pub struct Shell<R, W, S> {
    console: Console<R, W>,
    state: AppState,
    admins: AdminRepository,
    rates: S,
}

impl<R: BufRead, W: Write, S: RateSource> Shell<R, W, S> {
    /// Shell over an opened store, drawing small-cart discounts from `rates`.
    pub const fn new(
        console: Console<R, W>,
        state: AppState,
        admins: AdminRepository,
        rates: S,
    ) -> Self {
        Self {
            console,
            state,
            admins,
            rates,
        }
    }

    /// Report a failed action and carry on; stop only for console errors.
    fn settle(&mut self, result: Result<(), CliError>) -> Result<(), ConsoleError> {
        let message = match result {
            Ok(()) => return Ok(()),
            Err(CliError::Console(err)) => return Err(err),
            Err(CliError::App(err)) => err.report(),
            Err(CliError::Admin(err)) => err.report(),
        };
        self.console.say(message)
    }

    /// Show a numbered menu and read the choice.
    fn menu(&mut self, title: &str, entries: &[&str]) -> Result<String, ConsoleError> {
        self.console.say("")?;
        self.console.say(format!("=== {title} ==="))?;
        for entry in entries {
            self.console.say(entry)?;
        }
        Ok(self.console.ask("Choose an option: ")?.trim().to_owned())
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.console.into_output()
    }
}
