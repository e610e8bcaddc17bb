//! Flatmart - console shop over flat files.
//!
//! # Usage
//!
//! ```bash
//! # Use ./data (or $FLATMART_DATA_DIR)
//! flatmart
//!
//! # Use another data directory
//! flatmart --data-dir /srv/flatmart
//! ```
//!
//! Logs go to stderr and are controlled with `RUST_LOG`
//! (default: `flatmart=info,flatmart_storefront=info,flatmart_admin=info`).
//!
//! # Exit codes
//!
//! - `0` - The user exited, or input ended
//! - `1` - Configuration or data directory could not be loaded

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flatmart_admin::db::AdminRepository;
use flatmart_storefront::AppState;
use flatmart_storefront::config::StoreConfig;
use flatmart_storefront::services::checkout::RandomRate;

mod commands;
mod console;

use commands::Shell;
use console::Console;

#[derive(Parser)]
#[command(name = "flatmart")]
#[command(author, version, about = "Flatmart console shop")]
struct Cli {
    /// Directory holding goods.txt, users.txt, admins.txt and purchases.txt
    #[arg(long, env = "FLATMART_DATA_DIR")]
    data_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "flatmart=info,flatmart_storefront=info,flatmart_admin=info".into()
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match StoreConfig::from_env(cli.data_dir) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    let admins = AdminRepository::new(&config.admins_file);
    let state = match AppState::open(&config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to open store: {e}");
            return ExitCode::FAILURE;
        }
    };

    let console = Console::new(io::stdin().lock(), io::stdout().lock());
    let mut shell = Shell::new(console, state, admins, RandomRate::thread_local());

    if let Err(e) = shell.run() {
        tracing::error!("Console failed: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
