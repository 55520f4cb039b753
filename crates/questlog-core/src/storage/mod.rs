mod config;

pub use config::{Config, PomodoroConfig, StoreConfig, UiConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/questlog[-dev]/` based on QUESTLOG_ENV.
///
/// Set QUESTLOG_ENV=dev to use the development directory, or
/// QUESTLOG_CONFIG_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("QUESTLOG_CONFIG_DIR") {
        Some(custom) => PathBuf::from(custom),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("QUESTLOG_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("questlog-dev")
            } else {
                base_dir.join("questlog")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
