//! File System Utilities
//!
//! Per-user directories for config, settings and log files.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::constants::CONFIG_FILE_NAME;
use crate::error::{Error, Result};

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "terrawatch", "terra-watch").ok_or_else(|| Error::Config {
        message: "Could not determine project directories".to_string(),
    })
}

fn ensure_dir(dir: &Path) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(dir.to_path_buf())
}

/// Get or create the configuration directory
///
/// Platform-specific locations:
/// - **Linux**: `~/.config/terra-watch/` or `$XDG_CONFIG_HOME/terra-watch/`
/// - **macOS**: `~/Library/Application Support/com.terrawatch.terra-watch/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\terrawatch\terra-watch\config\`
pub fn get_or_create_config_dir() -> Result<PathBuf> {
    ensure_dir(project_dirs()?.config_dir())
}

/// Get or create the data directory, where persisted settings live
///
/// - **Linux**: `~/.local/share/terra-watch/`
/// - **macOS**: `~/Library/Application Support/com.terrawatch.terra-watch/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\terrawatch\terra-watch\data\`
pub fn get_or_create_data_dir() -> Result<PathBuf> {
    ensure_dir(project_dirs()?.data_dir())
}

/// Location of `config.toml`; the file itself may not exist
pub fn config_file_path() -> Result<PathBuf> {
    Ok(get_or_create_config_dir()?.join(CONFIG_FILE_NAME))
}
