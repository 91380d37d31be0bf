//! Error types for the al-core crate.
//!
//! This module provides the [`ConfigError`] type for failures while reading,
//! writing, or validating `.lessconfig` files and the JSON settings file.

use camino::{Utf8Path, Utf8PathBuf};

use crate::validate::ConfigField;

/// Errors that can occur while handling project or application configuration.
///
/// # Examples
///
/// ```
/// use al_core::{ConfigError, ConfigField};
///
/// let error = ConfigError::Invalid { fields: vec![ConfigField::Minify] };
/// assert!(error.to_string().contains("MINIFY"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A `.lessconfig` exists but could not be read.
    #[error("failed to read '{path}': {source}")]
    Read {
        /// Path of the config file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A `.lessconfig` could not be created or written.
    #[error("failed to write '{path}': {source}")]
    Write {
        /// Path of the config file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// One or more recognized fields are missing or mistyped.
    #[error("invalid configuration fields: {}", join_keys(fields))]
    Invalid {
        /// Offending fields, in check order.
        fields: Vec<ConfigField>,
    },

    /// The JSON settings file could not be read.
    #[error("failed to read settings '{path}': {source}")]
    SettingsRead {
        /// Path of the settings file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the settings file.
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates a [`ConfigError::Read`] for `path`.
    #[must_use]
    pub fn read(path: &Utf8Path, source: std::io::Error) -> Self {
        Self::Read {
            path: path.to_owned(),
            source,
        }
    }

    /// Creates a [`ConfigError::Write`] for `path`.
    #[must_use]
    pub fn write(path: &Utf8Path, source: std::io::Error) -> Self {
        Self::Write {
            path: path.to_owned(),
            source,
        }
    }

    /// Returns `true` if the user can fix this by editing their config.
    #[must_use]
    pub const fn is_user_actionable(&self) -> bool {
        matches!(self, Self::Invalid { .. } | Self::Parse(_))
    }

    /// Returns the file the error relates to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8Path> {
        match self {
            Self::Read { path, .. } | Self::Write { path, .. } | Self::SettingsRead { path, .. } => {
                Some(path)
            }
            Self::Invalid { .. } | Self::Parse(_) => None,
        }
    }
}

fn join_keys(fields: &[ConfigField]) -> String {
    fields
        .iter()
        .map(|field| field.key())
        .collect::<Vec<_>>()
        .join(", ")
}
