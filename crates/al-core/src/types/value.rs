//! Typed values parsed from `.lessconfig` lines.
//!
//! This module provides the [`ConfigValue`] type and the coercion rules used to
//! turn the raw right-hand side of a `KEY=value` line into a typed value.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A value read from a `.lessconfig` line after type coercion.
///
/// Coercion is applied in order and the first matching rule wins:
///
/// 1. exactly `true` or `false` (case-sensitive) becomes [`ConfigValue::Bool`]
/// 2. an all-digit string becomes [`ConfigValue::Int`]
/// 3. digits with a single decimal point become [`ConfigValue::Float`]
/// 4. anything else is kept verbatim as [`ConfigValue::Str`]
///
/// # Examples
///
/// ```
/// use al_core::ConfigValue;
///
/// assert_eq!(ConfigValue::coerce("true"), ConfigValue::Bool(true));
/// assert_eq!(ConfigValue::coerce("42"), ConfigValue::Int(42));
/// assert_eq!(ConfigValue::coerce("1.5"), ConfigValue::Float(1.5));
/// assert_eq!(
///     ConfigValue::coerce("less/style.less"),
///     ConfigValue::Str("less/style.less".to_owned())
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// A boolean (`true` / `false`).
    Bool(bool),

    /// A non-negative integer written as plain digits.
    Int(i64),

    /// A decimal number such as `1.5`.
    Float(f64),

    /// Any other text, kept as written.
    Str(String),
}

impl ConfigValue {
    /// Coerces a raw string into a typed value.
    #[must_use]
    pub fn coerce(raw: &str) -> Self {
        match raw {
            "true" => return Self::Bool(true),
            "false" => return Self::Bool(false),
            _ => {}
        }

        if is_all_digits(raw) {
            // Out of range for i64: fall back to a float like a JS number would
            return raw
                .parse::<i64>()
                .map(Self::Int)
                .or_else(|_| raw.parse::<f64>().map(Self::Float))
                .unwrap_or_else(|_| Self::Str(raw.to_owned()));
        }

        if is_decimal(raw) {
            if let Ok(value) = raw.parse::<f64>() {
                return Self::Float(value);
            }
        }

        Self::Str(raw.to_owned())
    }

    /// Returns a short name for the value's type, used in messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
        }
    }

    /// Returns the boolean if this is a [`ConfigValue::Bool`].
    #[inline]
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the text if this is a [`ConfigValue::Str`].
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Str(value) => f.write_str(value),
        }
    }
}

fn is_all_digits(raw: &str) -> bool {
    !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit())
}

fn is_decimal(raw: &str) -> bool {
    raw.bytes().filter(|&b| b == b'.').count() == 1
        && raw.bytes().any(|b| b.is_ascii_digit())
        && raw.bytes().all(|b| b == b'.' || b.is_ascii_digit())
}
