//! Configuration loading and root folder resolution

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Environment variable naming the ACMS data root folder
pub const ROOT_FOLDER_ENV: &str = "ACMS_ROOT_FOLDER";

/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "acms.db";

/// Root folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&Path>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        return PathBuf::from(path);
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = find_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(root_folder) = config.get("root_folder").and_then(|v| v.as_str()) {
                    return PathBuf::from(root_folder);
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// Path of the SQLite database inside the root folder
pub fn database_path(root_folder: &Path) -> PathBuf {
    root_folder.join(DATABASE_FILE)
}

/// Locate the configuration file for the platform
fn find_config_file() -> Result<PathBuf> {
    let candidate = if cfg!(target_os = "linux") {
        // Try ~/.config/acms/config.toml first, then /etc/acms/config.toml
        let user_config = dirs::config_dir().map(|d| d.join("acms").join("config.toml"));
        let system_config = PathBuf::from("/etc/acms/config.toml");

        if let Some(path) = user_config {
            if path.exists() {
                return Ok(path);
            }
        }
        system_config
    } else {
        dirs::config_dir()
            .map(|d| d.join("acms").join("config.toml"))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?
    };

    if candidate.exists() {
        Ok(candidate)
    } else {
        Err(Error::Config(format!(
            "Config file not found: {:?}",
            candidate
        )))
    }
}

/// Get OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/acms (or /var/lib/acms for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("acms"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/acms"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("acms"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/acms"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("acms"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\acms"))
    } else {
        PathBuf::from("./acms_data")
    }
}
