pub mod config;
pub mod database;
pub mod state_store;

pub use config::Config;
pub use database::Database;
pub use state_store::{LoadReport, StateStore};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns the data directory, creating it if needed.
///
/// `MUHASABAH_HOME` wins outright. Otherwise `~/.config/muhasabah[-dev]/`,
/// with `MUHASABAH_ENV=dev` selecting the development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("MUHASABAH_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("MUHASABAH_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("muhasabah-dev")
            } else {
                base_dir.join("muhasabah")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
