//! Configuration file location
//!
//! Linux: `~/.config/cat-test/`, macOS: `~/Library/Application Support/cat-test/`,
//! Windows: `%APPDATA%\cat-test\`

use std::path::PathBuf;

/// Application name used for platform directories
const APP_NAME: &str = "cat-test";

/// Get the configuration directory path
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the configuration file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_is_toml() {
        if let Some(path) = config_path() {
            assert_eq!(path.file_name().unwrap(), "config.toml");
        }
    }
}
