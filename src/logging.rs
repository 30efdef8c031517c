use anyhow::Result;
use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Initialize tracing to a session log file so the TUI screen stays clean.
/// Filtering follows RUST_LOG, defaulting to info.
pub fn init_tracing() -> Result<PathBuf> {
    let log_path = log_file_path()?;
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(&log_path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .compact()
        .init();

    tracing::info!("Logging to {}", log_path.display());
    Ok(log_path)
}

/// Session log lives under the platform data dir
fn log_file_path() -> Result<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(data_dir.join("inventory-tui").join("inventory-tui.log"))
}
