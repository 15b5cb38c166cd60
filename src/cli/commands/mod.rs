pub mod decode;
pub mod export;
pub mod fetch;

use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::session::DecodeSession;
use std::path::Path;
use tracing::{info, warn};

/// Load configuration, reporting problems the way every command does
pub(crate) fn load_config() -> AppResult<AppConfig> {
    match AppConfig::load() {
        Ok(config) => {
            info!("Configuration loaded successfully");
            Ok(config)
        }
        Err(e) => {
            warn!("Failed to load configuration: {}", e);
            Err(AppError::Config(format!(
                "Configuration error: {}. Check config.toml and FEED_* environment variables",
                e
            )))
        }
    }
}

/// Read a feed response document from disk
pub(crate) fn read_source(path: &Path) -> AppResult<String> {
    if !path.exists() {
        return Err(AppError::Config(format!(
            "Input file does not exist: {}",
            path.display()
        )));
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Print one line per decoded item
pub(crate) fn print_items(session: &DecodeSession) {
    println!("\n=== DECODED BINARIES ===");
    for item in session.items() {
        println!("  [{}] {}", item.index + 1, item.summary());
    }
}
