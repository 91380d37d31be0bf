//! Configuration structures for autoless.
//!
//! This module provides the application-level settings, loaded from an
//! optional JSON file:
//!
//! - [`ConfigDefaults`] - Values written into newly created `.lessconfig` files
//! - [`CompilerConfig`] - Compiler executable and flags
//! - [`WatchConfig`] - File watcher settings (debouncing, recursion)
//! - [`EditorConfig`] - Editor used to open files and jump to errors
//! - [`Config`] - Root configuration combining all settings
//!
//! Every section implements [`Default`], so an empty JSON object (or no file
//! at all) yields a working configuration.

use std::fs;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::ProjectConfig;

/// Values used when creating a new `.lessconfig`.
///
/// Serialized with kebab-case keys (`auto-compile`, `source-file`, ...).
///
/// # Examples
///
/// ```
/// use al_core::ConfigDefaults;
///
/// let defaults = ConfigDefaults::default();
/// assert!(!defaults.minify);
/// assert!(defaults.auto_compile);
/// assert_eq!(defaults.source_file, "less/style.less");
/// assert_eq!(defaults.target_file, "css/style.css");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ConfigDefaults {
    /// Initial `MINIFY` value.
    pub minify: bool,

    /// Initial `AUTO_COMPILE` value.
    pub auto_compile: bool,

    /// Initial `SOURCE_FILE` value.
    pub source_file: String,

    /// Initial `TARGET_FILE` value.
    pub target_file: String,
}

impl ConfigDefaults {
    /// Returns these defaults as a project config.
    #[must_use]
    pub fn to_project_config(&self) -> ProjectConfig {
        ProjectConfig {
            minify: self.minify,
            auto_compile: self.auto_compile,
            source_file: self.source_file.clone(),
            target_file: self.target_file.clone(),
        }
    }
}

impl Default for ConfigDefaults {
    fn default() -> Self {
        Self {
            minify: false,
            auto_compile: true,
            source_file: "less/style.less".to_owned(),
            target_file: "css/style.css".to_owned(),
        }
    }
}

/// Configuration for the LESS compiler invocation.
///
/// # Examples
///
/// ```
/// use al_core::CompilerConfig;
///
/// let config = CompilerConfig::default();
/// assert_eq!(config.program, "lessc");
/// assert_eq!(config.minify_flag, "--clean-css");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Compiler executable, looked up on `PATH` unless absolute.
    pub program: String,

    /// Flag appended when `MINIFY` is on.
    pub minify_flag: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            program: "lessc".to_owned(),
            minify_flag: "--clean-css".to_owned(),
        }
    }
}

/// Configuration for the file watcher.
///
/// Controls how saves are detected and debounced.
///
/// # Examples
///
/// ```
/// use al_core::WatchConfig;
///
/// let config = WatchConfig::default();
/// assert_eq!(config.debounce_ms, 100);
/// assert!(config.recursive);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Debounce window in milliseconds.
    ///
    /// Multiple writes to a file within this window are reported as one save.
    pub debounce_ms: u64,

    /// Whether to watch subdirectories recursively.
    pub recursive: bool,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 100,
            recursive: true,
        }
    }
}

/// Configuration for opening files in an editor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Editor command. Falls back to `$VISUAL`, `$EDITOR`, then known editors.
    pub editor: Option<String>,
}

/// Root configuration for autoless.
///
/// # Examples
///
/// ```
/// use al_core::Config;
///
/// let config = Config::from_json_str(r#"{"defaults": {"minify": true}}"#).unwrap();
/// assert!(config.defaults.minify);
/// assert_eq!(config.compiler.program, "lessc");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Values for new `.lessconfig` files.
    pub defaults: ConfigDefaults,

    /// Compiler settings.
    pub compiler: CompilerConfig,

    /// File watcher settings.
    pub watch: WatchConfig,

    /// Editor settings.
    pub editor: EditorConfig,
}

impl Config {
    /// Parses settings from JSON text. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not valid settings JSON.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Loads settings from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SettingsRead`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if its contents are invalid.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path.as_std_path()).map_err(|source| {
            ConfigError::SettingsRead {
                path: path.to_owned(),
                source,
            }
        })?;
        Self::from_json_str(&text)
    }
}
