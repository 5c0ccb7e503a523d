//! Utility functions shared across the crate.

use std::path::PathBuf;

const APP_NAME: &str = "pocket-translator";
const SETTINGS_FILE: &str = "settings.json";

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", APP_NAME)
}

/// Per-user application data directory (platform specific).
///
/// Falls back to `./.pocket-translator` when no home directory can be resolved.
pub fn data_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".").join(format!(".{APP_NAME}")))
}

/// Default location of the provider settings document.
pub fn default_settings_path() -> PathBuf {
    data_dir().join(SETTINGS_FILE)
}

/// User-level TOML configuration file, if a config directory exists.
pub fn app_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Current Unix time in milliseconds.
pub fn unix_millis() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}
