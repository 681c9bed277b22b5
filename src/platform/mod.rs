// Credvault platform paths
// Config holds settings.json; data holds the vault database.
//
// Uses `cfg(target_os)` to pick the per-OS location at compile time.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "credvault";

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Returns the configuration directory.
///
/// - **Linux**: `$XDG_CONFIG_HOME/credvault` or `~/.config/credvault`
/// - **macOS**: `~/Library/Application Support/credvault`
/// - **Windows**: `%APPDATA%/credvault`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        windows_app_data().join(APP_DIR)
    }
    #[cfg(target_os = "macos")]
    {
        home_dir().join("Library").join("Application Support").join(APP_DIR)
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        match env::var("XDG_CONFIG_HOME") {
            Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join(APP_DIR),
            _ => home_dir().join(".config").join(APP_DIR),
        }
    }
}

/// Returns the data directory.
///
/// - **Linux**: `$XDG_DATA_HOME/credvault` or `~/.local/share/credvault`
/// - **macOS** and **Windows**: same as the config directory
pub fn get_data_dir() -> PathBuf {
    #[cfg(any(target_os = "windows", target_os = "macos"))]
    {
        get_config_dir()
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        match env::var("XDG_DATA_HOME") {
            Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join(APP_DIR),
            _ => home_dir().join(".local").join("share").join(APP_DIR),
        }
    }
}

#[cfg(target_os = "windows")]
fn windows_app_data() -> PathBuf {
    env::var("APPDATA")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join("AppData").join("Roaming"))
}
