mod config;
pub mod store;

pub use config::{Config, Theme};
pub use store::Store;

use std::path::PathBuf;

use crate::error::StoreError;

/// Returns `~/.config/medicycle[-dev]/` based on MEDICYCLE_ENV.
///
/// Set MEDICYCLE_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("MEDICYCLE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("medicycle-dev")
    } else {
        base_dir.join("medicycle")
    };

    std::fs::create_dir_all(&dir).map_err(|e| StoreError::DataDir(e.to_string()))?;
    Ok(dir)
}
