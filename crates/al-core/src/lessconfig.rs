//! The per-project `.lessconfig` file: parsing and storage.
//!
//! # File Format
//!
//! ```text
//! MINIFY=false
//! AUTO_COMPILE=true
//! SOURCE_FILE=less/style.less
//! TARGET_FILE=css/style.css
//! ```
//!
//! Each line is searched for `identifier=value`. Keys are matched
//! case-insensitively (stored lower-case), values are coerced with
//! [`ConfigValue::coerce`], lines without a match are ignored, and a key that
//! appears twice keeps its last value.
//!
//! Parsing ([`parse_config_text`]) is a pure function. All filesystem access
//! goes through [`ConfigStore`], which re-reads the file on every call.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::sync::OnceLock;

use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::config::ConfigDefaults;
use crate::error::ConfigError;
use crate::types::ConfigValue;

/// File name of the per-project config.
pub const CONFIG_FILE_NAME: &str = ".lessconfig";

#[allow(clippy::expect_used)] // constant pattern
fn line_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"([0-9A-Za-z_]+)=([^=]*)").expect("line pattern is valid"))
}

/// Parsed `.lessconfig` contents: lower-case key to typed value.
///
/// Holds every key found in the file, recognized or not. Lookups via
/// [`get`](Self::get) are case-insensitive.
///
/// # Examples
///
/// ```
/// use al_core::{ConfigValue, parse_config_text};
///
/// let raw = parse_config_text("MINIFY=true\nCustom_Key=value");
/// assert_eq!(raw.get("minify"), Some(&ConfigValue::Bool(true)));
/// assert_eq!(raw.get("CUSTOM_KEY"), Some(&ConfigValue::Str("value".to_owned())));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawConfig {
    entries: FxHashMap<String, ConfigValue>,
}

impl RawConfig {
    /// Creates an empty config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for `key`, matched case-insensitively.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(&key.to_ascii_lowercase())
    }

    /// Sets `key` (lower-cased) to `value`, replacing any previous value.
    pub fn insert(&mut self, key: &str, value: ConfigValue) -> Option<ConfigValue> {
        self.entries.insert(key.to_ascii_lowercase(), value)
    }

    /// Returns the number of keys.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no keys were parsed.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, value)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl<K: AsRef<str>> FromIterator<(K, ConfigValue)> for RawConfig {
    fn from_iter<T: IntoIterator<Item = (K, ConfigValue)>>(iter: T) -> Self {
        let mut config = Self::new();
        for (key, value) in iter {
            config.insert(key.as_ref(), value);
        }
        config
    }
}

/// Parses `.lessconfig` text. Never fails; unmatched lines are skipped.
#[must_use]
pub fn parse_config_text(text: &str) -> RawConfig {
    let regex = line_regex();
    let mut config = RawConfig::new();

    for line in text.lines() {
        let Some(captures) = regex.captures(line) else {
            continue;
        };
        let (Some(key), Some(value)) = (captures.get(1), captures.get(2)) else {
            continue;
        };
        config.insert(key.as_str(), ConfigValue::coerce(value.as_str()));
    }

    config
}

/// Result of [`ConfigStore::create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// A new config file was written.
    Created(Utf8PathBuf),

    /// A config already existed and was left untouched.
    AlreadyExists(Utf8PathBuf),
}

impl CreateOutcome {
    /// Path of the config file in either case.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        match self {
            Self::Created(path) | Self::AlreadyExists(path) => path,
        }
    }
}

/// Locates, reads, and creates `.lessconfig` files under project roots.
///
/// The store holds no state besides the file name; each call hits the
/// filesystem so edits are picked up on the next compile.
///
/// # Examples
///
/// ```no_run
/// use al_core::{ConfigStore, ProjectConfig};
/// use camino::Utf8Path;
///
/// let store = ConfigStore::new();
/// if let Ok(Some(raw)) = store.load(Utf8Path::new("/work/site")) {
///     let config = ProjectConfig::from_raw(&raw);
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigStore {
    file_name: String,
}

impl ConfigStore {
    /// Creates a store for `.lessconfig` files.
    #[must_use]
    pub fn new() -> Self {
        Self {
            file_name: CONFIG_FILE_NAME.to_owned(),
        }
    }

    /// Creates a store that uses a different file name.
    #[must_use]
    pub fn with_file_name(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    /// Returns the config file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the config path for a project root.
    #[must_use]
    pub fn config_path(&self, root: &Utf8Path) -> Utf8PathBuf {
        root.join(&self.file_name)
    }

    /// Returns `true` if a config file is present under `root`.
    ///
    /// Errors while checking are logged at debug level and reported as
    /// "does not exist".
    #[must_use]
    pub fn exists(&self, root: &Utf8Path) -> bool {
        let path = self.config_path(root);
        match fs::metadata(path.as_std_path()) {
            Ok(metadata) => metadata.is_file(),
            Err(error) if error.kind() == io::ErrorKind::NotFound => false,
            Err(error) => {
                debug!(%error, path = %path, "Failed to determine if config file exists");
                false
            }
        }
    }

    /// Reads and parses the config under `root`.
    ///
    /// Returns `Ok(None)` if there is no config file or it is empty.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file exists but cannot be read.
    pub fn load(&self, root: &Utf8Path) -> Result<Option<RawConfig>, ConfigError> {
        if !self.exists(root) {
            return Ok(None);
        }

        let path = self.config_path(root);
        let text = fs::read_to_string(path.as_std_path()).map_err(|e| ConfigError::read(&path, e))?;
        if text.is_empty() {
            debug!(path = %path, "Config file is empty");
            return Ok(None);
        }

        Ok(Some(parse_config_text(&text)))
    }

    /// Writes a new config under `root` populated from `defaults`.
    ///
    /// An existing config is never overwritten; the file is created with
    /// `create_new`, so a config appearing concurrently is also left alone.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Write`] if the file cannot be created or written.
    pub fn create(
        &self,
        root: &Utf8Path,
        defaults: &ConfigDefaults,
    ) -> Result<CreateOutcome, ConfigError> {
        let path = self.config_path(root);
        if self.exists(root) {
            return Ok(CreateOutcome::AlreadyExists(path));
        }

        let mut file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path.as_std_path())
        {
            Ok(file) => file,
            Err(error) if error.kind() == io::ErrorKind::AlreadyExists => {
                return Ok(CreateOutcome::AlreadyExists(path));
            }
            Err(error) => return Err(ConfigError::write(&path, error)),
        };

        let text = defaults.to_project_config().to_config_text();
        file.write_all(text.as_bytes())
            .map_err(|e| ConfigError::write(&path, e))?;

        debug!(path = %path, "Created config file");
        Ok(CreateOutcome::Created(path))
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}
