mod config;
pub mod database;

pub use config::Config;
pub use database::{DailyLog, Database, Goal, StatsSummary, WorkoutRecord};

use std::path::PathBuf;

use crate::error::CoreError;

/// Returns `~/.config/fitlog[-dev]/` based on FITLOG_ENV.
///
/// Set FITLOG_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, CoreError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FITLOG_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("fitlog-dev")
    } else {
        base_dir.join("fitlog")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
