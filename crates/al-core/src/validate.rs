//! Schema validation for parsed `.lessconfig` contents.
//!
//! [`validate`] checks every recognized field independently and reports all
//! violations together, so the user can fix the file in one pass.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lessconfig::RawConfig;
use crate::types::ConfigValue;

/// A field recognized in a `.lessconfig`.
///
/// # Examples
///
/// ```
/// use al_core::ConfigField;
///
/// assert_eq!(ConfigField::AutoCompile.key(), "AUTO_COMPILE");
/// assert_eq!(ConfigField::AutoCompile.name(), "auto_compile");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigField {
    /// `MINIFY`: boolean.
    Minify,

    /// `AUTO_COMPILE`: boolean.
    AutoCompile,

    /// `SOURCE_FILE`: string.
    SourceFile,

    /// `TARGET_FILE`: string.
    TargetFile,
}

impl ConfigField {
    /// All fields, in the order they are checked and written.
    pub const ALL: [Self; 4] = [
        Self::Minify,
        Self::AutoCompile,
        Self::SourceFile,
        Self::TargetFile,
    ];

    /// The key as written in the file.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Minify => "MINIFY",
            Self::AutoCompile => "AUTO_COMPILE",
            Self::SourceFile => "SOURCE_FILE",
            Self::TargetFile => "TARGET_FILE",
        }
    }

    /// The normalized (lower-case) key used for lookups.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Minify => "minify",
            Self::AutoCompile => "auto_compile",
            Self::SourceFile => "source_file",
            Self::TargetFile => "target_file",
        }
    }

    /// The expected value type, for messages.
    #[must_use]
    pub const fn expected_type(self) -> &'static str {
        match self {
            Self::Minify | Self::AutoCompile => "boolean",
            Self::SourceFile | Self::TargetFile => "string",
        }
    }

    fn accepts(self, value: &ConfigValue) -> bool {
        match self {
            Self::Minify | Self::AutoCompile => matches!(value, ConfigValue::Bool(_)),
            Self::SourceFile | Self::TargetFile => matches!(value, ConfigValue::Str(_)),
        }
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Returns every recognized field that is missing or has the wrong type.
///
/// An empty result means the config is valid. Unknown keys are ignored.
///
/// # Examples
///
/// ```
/// use al_core::{ConfigField, parse_config_text, validate};
///
/// let raw = parse_config_text("MINIFY=maybe\nAUTO_COMPILE=true\nSOURCE_FILE=a.less\nTARGET_FILE=a.css");
/// assert_eq!(validate(&raw), vec![ConfigField::Minify]);
/// ```
#[must_use]
pub fn validate(raw: &RawConfig) -> Vec<ConfigField> {
    ConfigField::ALL
        .into_iter()
        .filter(|field| !raw.get(field.name()).is_some_and(|value| field.accepts(value)))
        .collect()
}

/// Formats fields as an indented bullet list, one `   - KEY` line each.
#[must_use]
pub fn format_field_list(fields: &[ConfigField]) -> String {
    fields
        .iter()
        .map(|field| format!("   - {}\n", field.key()))
        .collect()
}
