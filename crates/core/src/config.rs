//! Configuration path utilities for notes-launcher.
//!
//! This module provides functions for resolving the configuration file path,
//! the worker script path and expanding shell variables like `~` in paths.

use std::env;
use std::path::{Path, PathBuf};

/// Default path for the worker configuration file
const DEFAULT_CONFIG_PATH: &str = "~/.notes-launcher/config.yml";

/// Default interpreter used to run the worker script
pub const DEFAULT_INTERPRETER: &str = "python";

/// Default worker script, resolved against the current directory
pub const DEFAULT_WORKER_SCRIPT: &str = "AudioTranscriber.py";

/// Placeholder replaced with the resolved worker script path
pub const SCRIPT_PLACEHOLDER: &str = "script";

/// Placeholder replaced with the selected target file
pub const TARGET_PLACEHOLDER: &str = "target";

/// Resolves the configuration file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// configuration path. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use notes_launcher_core::config::get_config_path;
///
/// // Use default path
/// let default_path = get_config_path(&None);
///
/// // Use custom path
/// let custom_path = get_config_path(&Some("/path/to/config.yml".to_string()));
/// assert_eq!(custom_path, "/path/to/config.yml");
/// ```
pub fn get_config_path(config_path_arg: &Option<String>) -> String {
    let config_path = match config_path_arg {
        Some(config_path) => config_path,
        None => DEFAULT_CONFIG_PATH,
    };

    shellexpand::tilde(config_path).to_string()
}

/// Resolves the worker script path.
///
/// `~` is expanded first. A relative script is joined onto the current
/// working directory, so the worker receives an absolute path no matter
/// which directory it is started in.
pub fn resolve_script_path(script: &str) -> PathBuf {
    let expanded = shellexpand::tilde(script).to_string();
    let path = Path::new(&expanded);

    if path.is_absolute() {
        return path.to_path_buf();
    }

    match env::current_dir() {
        Ok(current_dir) => current_dir.join(path),
        Err(_) => path.to_path_buf(),
    }
}

/// Expands shell variables in a working directory path.
///
/// Returns None if no working directory is provided.
///
/// ```
/// use notes_launcher_core::config::expand_working_directory;
///
/// let expanded = expand_working_directory(&Some("~/notes".to_string()));
/// assert!(expanded.is_some());
///
/// assert!(expand_working_directory(&None).is_none());
/// ```
pub fn expand_working_directory(working_directory: &Option<String>) -> Option<String> {
    working_directory
        .as_ref()
        .map(|working_directory| shellexpand::tilde(working_directory).to_string())
}
