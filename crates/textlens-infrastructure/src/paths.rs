//! Path management for TextLens configuration and history files.
//!
//! Paths are resolved via AppPaths from the version-migrate crate, which
//! picks the platform's conventional config and data directories.

use std::path::{Path, PathBuf};
use thiserror::Error;
use version_migrate::AppPaths;

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// The platform directory for config or data could not be determined.
    #[error("Cannot resolve {kind} directory: {message}")]
    DirUnavailable { kind: &'static str, message: String },
}

/// Unified path management for TextLens.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/textlens/          # Config directory
/// └── config.toml              # Service and history settings
///
/// ~/.local/share/textlens/     # Data directory
/// └── history.json             # Persisted analysis history
/// ```
pub struct TextLensPaths;

impl TextLensPaths {
    const APP_NAME: &'static str = "textlens";
    const CONFIG_FILENAME: &'static str = "config.toml";
    const HISTORY_FILENAME: &'static str = "history.json";

    fn app_paths() -> AppPaths {
        AppPaths::new(Self::APP_NAME)
    }

    /// Returns the TextLens configuration directory.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        Self::app_paths()
            .config_dir()
            .map_err(|e| PathError::DirUnavailable {
                kind: "config",
                message: e.to_string(),
            })
    }

    /// Returns the TextLens data directory.
    pub fn data_dir() -> Result<PathBuf, PathError> {
        Self::app_paths()
            .data_dir()
            .map_err(|e| PathError::DirUnavailable {
                kind: "data",
                message: e.to_string(),
            })
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_file_in(&Self::config_dir()?))
    }

    /// Returns the default path to the persisted history.
    pub fn history_file() -> Result<PathBuf, PathError> {
        Ok(Self::history_file_in(&Self::data_dir()?))
    }

    fn config_file_in(config_dir: &Path) -> PathBuf {
        config_dir.join(Self::CONFIG_FILENAME)
    }

    fn history_file_in(data_dir: &Path) -> PathBuf {
        data_dir.join(Self::HISTORY_FILENAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names_within_dirs() {
        let config_dir = Path::new("/home/user/.config/textlens");
        let data_dir = Path::new("/home/user/.local/share/textlens");

        assert_eq!(
            TextLensPaths::config_file_in(config_dir),
            PathBuf::from("/home/user/.config/textlens/config.toml")
        );
        assert_eq!(
            TextLensPaths::history_file_in(data_dir),
            PathBuf::from("/home/user/.local/share/textlens/history.json")
        );
    }

    #[test]
    fn test_path_error_message() {
        let err = PathError::DirUnavailable {
            kind: "data",
            message: "no home".to_string(),
        };
        assert_eq!(err.to_string(), "Cannot resolve data directory: no home");
    }
}
