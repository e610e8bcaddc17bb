//! Data directory configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `FLATMART_DATA_DIR` - Directory holding the data files (default: `data`)
//! - `FLATMART_GOODS_FILE` - Goods file name or path (default: `goods.txt`)
//! - `FLATMART_USERS_FILE` - Users file name or path (default: `users.txt`)
//! - `FLATMART_ADMINS_FILE` - Admins file name or path (default: `admins.txt`)
//! - `FLATMART_PURCHASES_FILE` - Purchases file name or path (default: `purchases.txt`)
//!
//! Relative file names are resolved against the data directory.

use std::path::{Path, PathBuf};

use thiserror::Error;

const DEFAULT_DATA_DIR: &str = "data";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Data directory {0} exists but is not a directory")]
    NotADirectory(PathBuf),
}

/// Locations of the flat files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory the data files live in.
    pub data_dir: PathBuf,
    /// Goods file.
    pub goods_file: PathBuf,
    /// Customer accounts file.
    pub users_file: PathBuf,
    /// Admin accounts file.
    pub admins_file: PathBuf,
    /// Purchase log.
    pub purchases_file: PathBuf,
}

impl StoreConfig {
    /// Default file layout inside `data_dir`.
    #[must_use]
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            goods_file: data_dir.join("goods.txt"),
            users_file: data_dir.join("users.txt"),
            admins_file: data_dir.join("admins.txt"),
            purchases_file: data_dir.join("purchases.txt"),
            data_dir,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    /// `data_dir_override` (typically a command-line flag) wins over
    /// `FLATMART_DATA_DIR`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but empty or not valid
    /// Unicode, or if the data directory path names a regular file.
    pub fn from_env(data_dir_override: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = match data_dir_override {
            Some(dir) => dir,
            None => get_optional_path("FLATMART_DATA_DIR")?
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
        };
        if data_dir.exists() && !data_dir.is_dir() {
            return Err(ConfigError::NotADirectory(data_dir));
        }

        let mut config = Self::in_dir(&data_dir);
        if let Some(file) = get_optional_path("FLATMART_GOODS_FILE")? {
            config.goods_file = resolve(&data_dir, file);
        }
        if let Some(file) = get_optional_path("FLATMART_USERS_FILE")? {
            config.users_file = resolve(&data_dir, file);
        }
        if let Some(file) = get_optional_path("FLATMART_ADMINS_FILE")? {
            config.admins_file = resolve(&data_dir, file);
        }
        if let Some(file) = get_optional_path("FLATMART_PURCHASES_FILE")? {
            config.purchases_file = resolve(&data_dir, file);
        }

        tracing::debug!(data_dir = %config.data_dir.display(), "Store configuration loaded");
        Ok(config)
    }
}

fn resolve(data_dir: &Path, file: PathBuf) -> PathBuf {
    if file.is_absolute() {
        file
    } else {
        data_dir.join(file)
    }
}

fn get_optional_path(key: &str) -> Result<Option<PathBuf>, ConfigError> {
    match std::env::var(key) {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not be empty".to_string(),
        )),
        Ok(value) => Ok(Some(PathBuf::from(value.trim()))),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e @ std::env::VarError::NotUnicode(_)) => {
            Err(ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        }
    }
}
